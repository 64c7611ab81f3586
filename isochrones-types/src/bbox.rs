use crate::point::Point2d;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// Stored as `(xmin, xmax, ymin, ymax)`. A box built from no points is
/// *empty*: its minimums are `+inf` and its maximums `-inf`, so every
/// containment query against it fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Create a bounding box from its four bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use isochrones_types::bbox::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(10.0, 40.0, 10.0, 40.0);
    /// assert_eq!(bbox.width(), 30.0);
    /// ```
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// The empty box; contains nothing and is the identity for `union`.
    pub const fn empty() -> Self {
        Self {
            xmin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymin: f64::INFINITY,
            ymax: f64::NEG_INFINITY,
        }
    }

    /// Smallest box covering every point.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2d>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.extend(point);
        }
        bbox
    }

    /// Grow the box to cover `point`.
    pub fn extend(&mut self, point: &Point2d) {
        self.xmin = self.xmin.min(point.x);
        self.xmax = self.xmax.max(point.x);
        self.ymin = self.ymin.min(point.y);
        self.ymax = self.ymax.max(point.y);
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.xmin <= self.xmax && self.ymin <= self.ymax)
    }

    /// Check if a point lies inside the box or on its border.
    ///
    /// Always false for an empty box and for NaN coordinates.
    #[inline]
    pub fn contains_point(&self, point: &Point2d) -> bool {
        point.x >= self.xmin && point.x <= self.xmax && point.y >= self.ymin && point.y <= self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Convert to a `geo::Rect`, or `None` for an empty box.
    pub fn to_rect(&self) -> Option<Rect<f64>> {
        if self.is_empty() {
            return None;
        }
        Some(Rect::new(
            geo::coord! { x: self.xmin, y: self.ymin },
            geo::coord! { x: self.xmax, y: self.ymax },
        ))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            xmin: rect.min().x,
            xmax: rect.max().x,
            ymin: rect.min().y,
            ymax: rect.max().y,
        }
    }
}

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// A planar point with `x` (longitude) and `y` (latitude).
///
/// The geometry code built on this type never assumes a coordinate system;
/// the longitude/latitude naming is only a convention.
///
/// # Examples
///
/// ```
/// use isochrones_types::point::Point2d;
///
/// let moscow = Point2d::new(37.6173, 55.7558);
/// assert_eq!(moscow.lon(), 37.6173);
/// assert_eq!(Point2d::from((37.6173, 55.7558)), moscow);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2d {
    /// Longitude or x-coordinate
    pub x: f64,
    /// Latitude or y-coordinate
    pub y: f64,
}

impl Point2d {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Longitude (alias for `x`).
    #[inline]
    pub fn lon(&self) -> f64 {
        self.x
    }

    /// Latitude (alias for `y`).
    #[inline]
    pub fn lat(&self) -> f64 {
        self.y
    }

    /// Both coordinates are neither NaN nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2d {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Coord<f64>> for Point2d {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
        }
    }
}

impl From<Point<f64>> for Point2d {
    fn from(point: Point<f64>) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
        }
    }
}

impl From<Point2d> for Coord<f64> {
    fn from(point: Point2d) -> Self {
        geo::coord! { x: point.x, y: point.y }
    }
}

impl From<Point2d> for Point<f64> {
    fn from(point: Point2d) -> Self {
        Point::new(point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_round_trip() {
        let point = Point2d::new(-51.7216, 64.1835);
        let coord: Coord<f64> = point.into();
        assert_eq!(coord.x, -51.7216);
        assert_eq!(Point2d::from(coord), point);

        let geo_point: Point<f64> = point.into();
        assert_eq!(Point2d::from(geo_point), point);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2d::new(0.0, 0.0).is_finite());
        assert!(!Point2d::new(f64::NAN, 0.0).is_finite());
        assert!(!Point2d::new(0.0, f64::INFINITY).is_finite());
    }
}

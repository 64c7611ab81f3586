//! Point-in-polygon containment for simple, holed and multi-part polygons.
//!
//! Every ring caches its bounding box at construction so that most misses
//! are rejected without touching the edges. Containment uses the even-odd
//! rule: a ray from the query point to a point just outside the box is
//! tested against every edge, including the closing edge back to the first
//! vertex.
//!
//! A ray passing exactly through a ring vertex is counted with a half-open
//! rule: an edge crosses the ray only if its endpoints lie strictly on
//! opposite sides of the edge line *and* exactly one endpoint lies strictly
//! to the left of the ray. Containment of points exactly on an edge is
//! unspecified.

use crate::error::{IsochroneError, Result};
use isochrones_types::{BoundingBox, Point2d};

/// Cross product `(k - i) x (j - i)`. Zero when the three points are
/// collinear; the sign tells which side of line `i -> j` `k` falls on.
#[inline]
fn orientation(i: Point2d, j: Point2d, k: Point2d) -> f64 {
    (k.x - i.x) * (j.y - i.y) - (k.y - i.y) * (j.x - i.x)
}

/// Whether the ray segment `p -> q` crosses ring edge `a -> b`.
#[inline]
fn ray_crosses_edge(p: Point2d, q: Point2d, a: Point2d, b: Point2d) -> bool {
    let d1 = orientation(a, b, p);
    let d2 = orientation(a, b, q);
    if !((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0)) {
        return false;
    }

    let d3 = orientation(p, q, a);
    let d4 = orientation(p, q, b);
    (d3 > 0.0) != (d4 > 0.0)
}

/// A closed ring of at least three vertices.
///
/// The ring is implicitly closed; a trailing vertex equal to the first one
/// is dropped on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePolygon {
    vertices: Vec<Point2d>,
    bbox: BoundingBox,
}

impl SimplePolygon {
    /// Build a ring from its vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use isochrones::SimplePolygon;
    ///
    /// let ring = SimplePolygon::new([(30.0, 10.0), (40.0, 40.0), (20.0, 40.0), (10.0, 20.0)])?;
    /// assert!(ring.contains((20.0, 20.0)));
    /// assert!(!ring.contains((0.0, 0.0)));
    /// # Ok::<(), isochrones::IsochroneError>(())
    /// ```
    pub fn new<I, P>(vertices: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point2d>,
    {
        let mut vertices: Vec<Point2d> = vertices.into_iter().map(Into::into).collect();

        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(IsochroneError::InvalidInput(format!(
                "Ring vertex ({}, {}) is not finite",
                bad.x, bad.y
            )));
        }

        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        if vertices.len() < 3 {
            log::warn!("Rejecting ring with {} vertices", vertices.len());
            return Err(IsochroneError::InvalidInput(format!(
                "Ring needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }

        let bbox = BoundingBox::from_points(&vertices);
        Ok(Self { vertices, bbox })
    }

    pub fn vertices(&self) -> &[Point2d] {
        &self.vertices
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn contains(&self, point: impl Into<Point2d>) -> bool {
        let p = point.into();
        if !self.bbox.contains_point(&p) {
            return false;
        }

        let outside = Point2d::new(self.bbox.xmin - 1.0, self.bbox.ymin);
        let n = self.vertices.len();
        let crossings = (0..n)
            .filter(|&i| ray_crosses_edge(p, outside, self.vertices[i], self.vertices[(i + 1) % n]))
            .count();

        crossings % 2 == 1
    }
}

/// An exterior ring with zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: SimplePolygon,
    holes: Vec<SimplePolygon>,
}

impl Polygon {
    pub fn new(exterior: SimplePolygon, holes: Vec<SimplePolygon>) -> Self {
        Self { exterior, holes }
    }

    /// Build from ring vertex arrays; the first ring is the exterior, the
    /// rest are holes.
    ///
    /// # Examples
    ///
    /// ```
    /// use isochrones::Polygon;
    ///
    /// let polygon = Polygon::from_rings(vec![
    ///     vec![(20.0, 35.0), (10.0, 30.0), (10.0, 10.0), (30.0, 5.0), (45.0, 20.0)],
    ///     vec![(30.0, 20.0), (20.0, 15.0), (20.0, 25.0)],
    /// ])?;
    /// assert!(!polygon.contains((25.0, 20.0)));
    /// assert!(polygon.contains((35.0, 20.0)));
    /// # Ok::<(), isochrones::IsochroneError>(())
    /// ```
    pub fn from_rings<R, I, P>(rings: R) -> Result<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = P>,
        P: Into<Point2d>,
    {
        let mut rings = rings.into_iter();
        let exterior = match rings.next() {
            Some(ring) => SimplePolygon::new(ring)?,
            None => {
                return Err(IsochroneError::InvalidInput(
                    "Polygon needs an exterior ring".to_string(),
                ));
            }
        };
        let holes = rings.map(SimplePolygon::new).collect::<Result<Vec<_>>>()?;
        Ok(Self::new(exterior, holes))
    }

    pub fn exterior(&self) -> &SimplePolygon {
        &self.exterior
    }

    pub fn holes(&self) -> &[SimplePolygon] {
        &self.holes
    }

    pub fn bbox(&self) -> &BoundingBox {
        self.exterior.bbox()
    }

    pub fn contains(&self, point: impl Into<Point2d>) -> bool {
        let p = point.into();
        self.exterior.contains(p) && !self.holes.iter().any(|hole| hole.contains(p))
    }
}

/// A possibly empty collection of polygons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    bbox: BoundingBox,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let bbox = polygons
            .iter()
            .fold(BoundingBox::empty(), |acc, polygon| acc.union(polygon.bbox()));
        Self { polygons, bbox }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Union of the member boxes; empty when there are no members.
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn contains(&self, point: impl Into<Point2d>) -> bool {
        let p = point.into();
        self.bbox.contains_point(&p) && self.polygons.iter().any(|polygon| polygon.contains(p))
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(polygon: Polygon) -> Self {
        Self::new(vec![polygon])
    }
}

fn ring_points(ring: &geo::LineString<f64>) -> impl Iterator<Item = Point2d> + '_ {
    ring.coords().map(|&coord| Point2d::from(coord))
}

impl TryFrom<&geo::Polygon<f64>> for Polygon {
    type Error = IsochroneError;

    fn try_from(polygon: &geo::Polygon<f64>) -> Result<Self> {
        let exterior = SimplePolygon::new(ring_points(polygon.exterior()))?;
        let holes = polygon
            .interiors()
            .iter()
            .map(|ring| SimplePolygon::new(ring_points(ring)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(exterior, holes))
    }
}

impl TryFrom<&geo::MultiPolygon<f64>> for MultiPolygon {
    type Error = IsochroneError;

    fn try_from(multi: &geo::MultiPolygon<f64>) -> Result<Self> {
        let polygons = multi
            .0
            .iter()
            .map(Polygon::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(polygons))
    }
}

impl TryFrom<&geo::Geometry<f64>> for MultiPolygon {
    type Error = IsochroneError;

    fn try_from(geometry: &geo::Geometry<f64>) -> Result<Self> {
        match geometry {
            geo::Geometry::Polygon(polygon) => Ok(Polygon::try_from(polygon)?.into()),
            geo::Geometry::MultiPolygon(multi) => MultiPolygon::try_from(multi),
            other => Err(IsochroneError::InvalidInput(format!(
                "Expected a Polygon or MultiPolygon, got {}",
                geometry_kind(other)
            ))),
        }
    }
}

fn geometry_kind(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::Line(_) => "Line",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo::Geometry::Rect(_) => "Rect",
        geo::Geometry::Triangle(_) => "Triangle",
    }
}

//! # isochrones-types
//!
//! Core planar value types shared by the isochrones crate.
//!
//! - **Point types**: `Point2d`
//! - **Bounding box types**: `BoundingBox`
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use isochrones_types::bbox::BoundingBox;
//! use isochrones_types::point::Point2d;
//!
//! let ring = [
//!     Point2d::new(30.0, 10.0),
//!     Point2d::new(40.0, 40.0),
//!     Point2d::new(10.0, 20.0),
//! ];
//! let bbox = BoundingBox::from_points(&ring);
//! assert!(bbox.contains_point(&Point2d::new(20.0, 20.0)));
//! assert!(!bbox.contains_point(&Point2d::new(0.0, 0.0)));
//! ```

pub mod bbox;
pub mod point;

pub use bbox::BoundingBox;
pub use point::Point2d;

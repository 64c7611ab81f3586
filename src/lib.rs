//! Reachability isochrones over weighted graphs, plus polygon coverage tagged
//! with Hilbert-curve index codes.
//!
//! ```rust
//! use isochrones::{Graph, MultiPolygon, Polygon, geohash_encode, reachable_within};
//!
//! let graph = Graph::from_edges(vec![(1, 2, 4.0), (2, 3, 4.0), (3, 1, 4.0)])?;
//! let isochrones = reachable_within(&graph, &[1, 2], 5.0, 2)?;
//! assert_eq!(isochrones[0].len(), 2);
//!
//! let square = Polygon::from_rings([[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]])?;
//! let area = MultiPolygon::from(square);
//! assert!(area.contains((0.5, 0.5)));
//! assert_eq!(geohash_encode(0.0, 0.0, 18, 2)?, "200000000000000000");
//! # Ok::<(), isochrones::IsochroneError>(())
//! ```

pub mod config;
pub mod coverage;
pub mod error;
pub mod geohash;
pub mod geometry;
pub mod graph;
pub mod parallel;
pub mod search;
pub mod validation;

pub use config::Config;
pub use error::{IsochroneError, Result};

pub use isochrones_types::{BoundingBox, Point2d};

pub use graph::{AdjacencyMap, Graph, Neighbors, VertexId, VertexInterner};

pub use search::{
    Cutoff, DistanceMap, MaxDistance, Unbounded, multi_source_search, reachable_within,
    search_with_config, single_source_search,
};

pub use geohash::{encode as geohash_encode, encode_batch};

pub use geometry::{MultiPolygon, Polygon, SimplePolygon};

pub use coverage::{contains_batch, polygon_geohashes, tag_points};

pub use parallel::run_in_threads;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, IsochroneError, Result};

    pub use crate::{Graph, VertexInterner};

    pub use crate::{Cutoff, DistanceMap, MaxDistance, Unbounded};

    pub use crate::{multi_source_search, reachable_within, single_source_search};

    pub use crate::{MultiPolygon, Point2d, Polygon, SimplePolygon};

    pub use crate::{geohash_encode, polygon_geohashes, tag_points};
}

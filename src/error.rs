//! Error types for isochrones.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IsochroneError {
    /// Malformed argument: coordinates out of range, bad precision or
    /// alphabet size, degenerate rings, negative edge weights.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// A search tried to expand a vertex the graph has no adjacency entry for.
    #[error("Vertex not found in graph: {0}")]
    VertexNotFound(String),

    /// A batch task panicked. The remaining workers were still joined.
    #[error("Worker {worker} panicked: {message}")]
    WorkerPanicked { worker: usize, message: String },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IsochroneError>;

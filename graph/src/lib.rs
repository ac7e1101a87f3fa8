pub mod adjacency;
pub mod edge_index;
pub mod laplacian;
pub mod pipeline;

pub use adjacency::{AdjacencyBuilder, AdjacencyList, RelationMatrix};
pub use edge_index::{EdgeChecksum, EdgeIndex, EdgeRecord, FlatEdges, HeadRow};
pub use laplacian::LaplacianNormalizer;
pub use pipeline::RelationalGraph;

use jpprec_core::error::{ErrorCode, JpprecError};
use jpprec_core::SpaceError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("{table} pair ({row}, {col}) falls outside the {n_nodes}-node index space")]
    IndexOutOfRange {
        table: &'static str,
        row: usize,
        col: usize,
        n_nodes: usize,
    },
    #[error("edge index reorder is not a permutation: before [{before}], after [{after}]")]
    IntegrityViolation {
        before: EdgeChecksum,
        after: EdgeChecksum,
    },
    #[error("invalid index space: {0}")]
    Space(#[from] SpaceError),
}

impl JpprecError for GraphError {
    fn error_code(&self) -> ErrorCode {
        match self {
            GraphError::IndexOutOfRange { .. } | GraphError::Space(_) => ErrorCode::InvalidArgument,
            GraphError::IntegrityViolation { .. } => ErrorCode::Internal,
        }
    }
}

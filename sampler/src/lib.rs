pub mod generator;
pub mod triple;

pub use generator::BatchGenerator;
pub use triple::TripleSampler;

use jpprec_core::error::{ErrorCode, JpprecError};
use jpprec_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SamplingError {
    #[error("cannot sample {batch_size} heads from an empty edge index")]
    EmptyGraph { batch_size: usize },
    #[error("head {0} has no outgoing edges")]
    UnknownHead(NodeId),
    #[error("negative sampling domain is empty")]
    EmptyNegativeDomain,
    #[error("rejection sampling for head {head} gave up after {draws} draws")]
    SamplingExhausted { head: NodeId, draws: usize },
}

impl JpprecError for SamplingError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SamplingError::EmptyGraph { .. } | SamplingError::EmptyNegativeDomain => {
                ErrorCode::InvalidArgument
            }
            SamplingError::UnknownHead(_) => ErrorCode::NotFound,
            SamplingError::SamplingExhausted { .. } => ErrorCode::ResourceExhausted,
        }
    }
}

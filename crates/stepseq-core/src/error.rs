//! Error types for stepseq

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepSeqError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Step {step} out of range (sequence has {len} steps)")]
    IndexOutOfRange { step: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, StepSeqError>;

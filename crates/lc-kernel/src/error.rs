use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("invalid coalescing factor {factor}: loop nest has {depth} levels")]
    InvalidFactor { factor: usize, depth: usize },
    #[error("buffer size mismatch: expected {expected} elements, got {got}")]
    SizeMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, KernelError>;

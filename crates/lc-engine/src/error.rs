use lc_kernel::KernelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no {device} device available\n{guidance}")]
    BackendUnavailable { device: String, guidance: String },
    #[error("kernel task failed: {0}")]
    TaskFailed(String),
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

use crate::alloc::AllocError;
use crate::utils::size::SizeError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Only one of -b, -k, -m, or -g may be specified")]
    ConflictingUnits,
    #[error(transparent)]
    InvalidSize(#[from] SizeError),
    #[error("size '{0}' does not fit in 64 bits")]
    SizeOverflow(String),
    #[error("chunk size must be greater than zero")]
    ZeroChunk,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("malloc(): {0}")]
    Alloc(AllocError),
    #[error("failed to write status line")]
    Output(#[from] std::io::Error),
}

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("failed to read input after {bytes_read} bytes")]
    Read {
        bytes_read: u64,
        #[source]
        source:     io::Error,
    },

    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid fingerprint: {0:?}")]
pub struct ParseFingerprintError(pub String);

pub type Result<T> = std::result::Result<T, HashError>;

use thiserror::Error;

/// Digest pipeline errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

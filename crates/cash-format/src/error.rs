use thiserror::Error;

/// Encoding and decoding errors for keys and addresses.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Input that is not structurally valid for the expected encoding.
    #[error("decode error: {0}")]
    Decode(String),

    /// The structure is fine but the embedded checksum does not match.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// A CashAddr contained a character outside its charset.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("invalid public key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("unknown version byte: 0x{0:02x}")]
    UnknownVersion(u8),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("unsupported hash size: {0} bytes")]
    UnsupportedSizeClass(usize),
}

//! Base58Check, the legacy encoding used here for WIF private keys.

use bs58::decode::Error as Bs58Error;

use crate::error::FormatError;

/// Base58Check-encode `payload` under a one-byte version prefix.
///
/// The checksum is the first four bytes of the double SHA-256 over
/// version byte plus payload.
pub fn b58encode_check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);
    bs58::encode(&data).with_check().into_string()
}

/// Decode a Base58Check string into its version byte and payload.
///
/// A string that is not valid base-58, or is too short to carry a version
/// and checksum, fails with [`FormatError::Decode`]; a structurally valid
/// string whose checksum does not match fails with
/// [`FormatError::ChecksumMismatch`]. The two are always distinguishable.
pub fn b58decode_check(encoded: &str) -> Result<(u8, Vec<u8>), FormatError> {
    let decoded = bs58::decode(encoded)
        .with_check(None)
        .into_vec()
        .map_err(|e| match e {
            Bs58Error::InvalidChecksum { .. } => FormatError::ChecksumMismatch,
            other => FormatError::Decode(other.to_string()),
        })?;

    if decoded.is_empty() {
        return Err(FormatError::Decode("missing version byte".into()));
    }
    Ok((decoded[0], decoded[1..].to_vec()))
}

use sha2::{Digest, Sha256};

use crate::provider::{DigestProvider, NativeProvider, RIPEMD160};
use crate::ripemd::ripemd160_fallback;

/// SHA-256. Always the host implementation, never routed through a
/// provider.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// First four bytes of the double SHA-256 — the Base58Check trailer.
pub fn double_sha256_checksum(data: &[u8]) -> [u8; 4] {
    let digest = double_sha256(data);
    let mut checksum = [0u8; 4];
    checksum.copy_from_slice(&digest[..4]);
    checksum
}

/// RIPEMD-160 via the native provider.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    ripemd160_with(&NativeProvider, data)
}

/// RIPEMD-160 resolved through `provider`, with transparent fallback to
/// the portable implementation when the provider cannot supply it.
pub fn ripemd160_with(provider: &dyn DigestProvider, data: &[u8]) -> [u8; 20] {
    match provider.new_digest(RIPEMD160) {
        Ok(mut digest) => {
            digest.update(data);
            let out = digest.finalize();
            if out.len() != 20 {
                // Wrong output width, treat it as a refusal.
                return ripemd160_fallback(data);
            }
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&out);
            hash
        }
        Err(_) => ripemd160_fallback(data),
    }
}

/// Hash160: RIPEMD-160(SHA-256(data)), the address digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    hash160_with(&NativeProvider, data)
}

/// Hash160 with the RIPEMD-160 stage resolved through `provider`.
///
/// The provider is consulted on every call; a refusal is never remembered,
/// so the same process can mix providers freely.
pub fn hash160_with(provider: &dyn DigestProvider, data: &[u8]) -> [u8; 20] {
    ripemd160_with(provider, &sha256(data))
}

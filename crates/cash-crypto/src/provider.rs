use ripemd::Ripemd160;
use sha2::digest::DynDigest;
use sha2::Sha256;

use crate::error::CryptoError;

/// Algorithm names understood by providers. Lowercase by convention.
pub const SHA256: &str = "sha256";
pub const RIPEMD160: &str = "ripemd160";

/// A source of streaming digest implementations, looked up by name.
///
/// The hash pipeline asks its provider for `"ripemd160"` on every call and
/// falls back to the portable implementation when the provider refuses, so
/// availability is never cached across calls. Injecting a provider is how
/// callers (and tests) steer the pipeline without any global registry.
pub trait DigestProvider {
    fn new_digest(&self, algorithm: &str) -> Result<Box<dyn DynDigest>, CryptoError>;
}

/// Provider backed by the host digest crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProvider;

impl DigestProvider for NativeProvider {
    fn new_digest(&self, algorithm: &str) -> Result<Box<dyn DynDigest>, CryptoError> {
        match algorithm {
            SHA256 => Ok(Box::new(Sha256::default())),
            RIPEMD160 => Ok(Box::new(Ripemd160::default())),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_provider_sha256() {
        let mut digest = NativeProvider.new_digest(SHA256).unwrap();
        digest.update(b"abc");
        assert_eq!(
            hex::encode(digest.finalize()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn native_provider_ripemd160() {
        let mut digest = NativeProvider.new_digest(RIPEMD160).unwrap();
        digest.update(b"abc");
        assert_eq!(
            hex::encode(digest.finalize()),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn native_provider_streaming_matches_one_shot() {
        let mut digest = NativeProvider.new_digest(RIPEMD160).unwrap();
        digest.update(b"message ");
        digest.update(b"digest");
        assert_eq!(
            hex::encode(digest.finalize()),
            "5d0689ef49d2fae572b881b123a85ffa21595f36"
        );
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = NativeProvider.new_digest("keccak256").err().unwrap();
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(name) if name == "keccak256"));
    }
}

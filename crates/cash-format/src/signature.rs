//! ECDSA signature verification over secp256k1.

use k256::ecdsa::signature::Verifier;
use k256::ecdsa::{Signature, VerifyingKey};

/// Verify a DER-encoded ECDSA signature over `data` against a SEC1
/// public key. The message is digested with SHA-256 before verification.
///
/// This is a security boundary, so it fails closed: malformed DER, a key
/// that is not on the curve, out-of-range scalars, and a plain wrong
/// signature all collapse to `false`. Nothing panics or errors. Low-S
/// normalization is not enforced; a high-S signature over the right
/// message verifies true, and canonicality policy belongs to the caller.
pub fn verify_sig(signature: &[u8], data: &[u8], public_key: &[u8]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };
    let Ok(signature) = Signature::from_der(signature) else {
        return false;
    };
    verifying_key.verify(data, &signature).is_ok()
}

//! SEC1 public-key parsing, point decompression, and address derivation.
//!
//! The field arithmetic is written out with `BigUint` rather than
//! delegated to a curve library so that every malformed encoding can be
//! classified precisely: wrong length, wrong lead byte, coordinate out of
//! field range, and x-not-on-curve are all distinct failures.

use num_bigint::BigUint;

use cash_crypto::hash::{hash160, hash160_with};
use cash_crypto::provider::DigestProvider;

use crate::cashaddress::CashAddress;
use crate::error::FormatError;
use crate::network::{AddressKind, Network};

/// secp256k1 field prime, 2^256 - 2^32 - 977.
const FIELD_PRIME_HEX: &[u8] =
    b"fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";

fn field_prime() -> BigUint {
    BigUint::parse_bytes(FIELD_PRIME_HEX, 16).expect("fixed hex constant")
}

/// `y² mod p` for a point on `y² = x³ + 7`.
fn curve_rhs(x: &BigUint, p: &BigUint) -> BigUint {
    (x.modpow(&BigUint::from(3u8), p) + BigUint::from(7u8)) % p
}

fn field_element_bytes(value: &BigUint) -> Result<[u8; 32], FormatError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(FormatError::InvalidKeyEncoding(format!(
            "field element is {} bytes, expected at most 32",
            bytes.len()
        )));
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Parse a SEC1 public key into its curve coordinates.
///
/// A 33-byte key (`0x02`/`0x03` lead) is decompressed: the candidate y is
/// `(x³ + 7)^((p+1)/4) mod p` — valid because `p ≡ 3 (mod 4)` — and the
/// root whose parity matches the lead byte is selected. A 65-byte key
/// (`0x04` lead) carries both coordinates, which are checked against the
/// curve equation. Anything else is `InvalidKeyEncoding`.
pub fn public_key_to_coords(public_key: &[u8]) -> Result<(BigUint, BigUint), FormatError> {
    let p = field_prime();

    match public_key {
        [lead @ (0x02 | 0x03), x_bytes @ ..] if public_key.len() == 33 => {
            let x = BigUint::from_bytes_be(x_bytes);
            if x >= p {
                return Err(FormatError::InvalidKeyEncoding(
                    "x coordinate exceeds the field prime".into(),
                ));
            }

            let rhs = curve_rhs(&x, &p);
            let exponent = (&p + BigUint::from(1u8)) >> 2;
            let candidate = rhs.modpow(&exponent, &p);
            if candidate.modpow(&BigUint::from(2u8), &p) != rhs {
                return Err(FormatError::InvalidKeyEncoding(
                    "x is not on the curve".into(),
                ));
            }

            let want_even = *lead == 0x02;
            let candidate_even = &candidate % 2u8 == BigUint::ZERO;
            let y = if want_even == candidate_even {
                candidate
            } else {
                &p - candidate
            };
            Ok((x, y))
        }
        [0x04, rest @ ..] if public_key.len() == 65 => {
            let x = BigUint::from_bytes_be(&rest[..32]);
            let y = BigUint::from_bytes_be(&rest[32..]);
            if x >= p || y >= p {
                return Err(FormatError::InvalidKeyEncoding(
                    "coordinate exceeds the field prime".into(),
                ));
            }
            if y.modpow(&BigUint::from(2u8), &p) != curve_rhs(&x, &p) {
                return Err(FormatError::InvalidKeyEncoding(
                    "point is not on the curve".into(),
                ));
            }
            Ok((x, y))
        }
        _ => Err(FormatError::InvalidKeyEncoding(format!(
            "expected 33 bytes (0x02/0x03) or 65 bytes (0x04), got {} bytes",
            public_key.len()
        ))),
    }
}

/// Serialize curve coordinates as a SEC1 public key.
///
/// Pure serialization: the coordinates are not re-checked against the
/// curve equation. [`PublicKeyPoint::new`] is the validating entry point.
pub fn coords_to_public_key(
    x: &BigUint,
    y: &BigUint,
    compressed: bool,
) -> Result<Vec<u8>, FormatError> {
    let x_bytes = field_element_bytes(x)?;
    if compressed {
        let parity = if y % 2u8 == BigUint::ZERO { 0x02 } else { 0x03 };
        let mut out = Vec::with_capacity(33);
        out.push(parity);
        out.extend_from_slice(&x_bytes);
        Ok(out)
    } else {
        let y_bytes = field_element_bytes(y)?;
        let mut out = Vec::with_capacity(65);
        out.push(0x04);
        out.extend_from_slice(&x_bytes);
        out.extend_from_slice(&y_bytes);
        Ok(out)
    }
}

/// A validated secp256k1 point plus the serialization form it arrived in
/// (or was requested with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyPoint {
    pub x: BigUint,
    pub y: BigUint,
    pub compressed: bool,
}

impl PublicKeyPoint {
    /// Construct from coordinates, verifying field range and the curve
    /// equation. A constructed point always serializes.
    pub fn new(x: BigUint, y: BigUint, compressed: bool) -> Result<Self, FormatError> {
        let p = field_prime();
        if x >= p || y >= p {
            return Err(FormatError::InvalidKeyEncoding(
                "coordinate exceeds the field prime".into(),
            ));
        }
        if y.modpow(&BigUint::from(2u8), &p) != curve_rhs(&x, &p) {
            return Err(FormatError::InvalidKeyEncoding(
                "point is not on the curve".into(),
            ));
        }
        Ok(PublicKeyPoint { x, y, compressed })
    }

    /// Parse either SEC1 form, remembering which one it was.
    pub fn from_public_key(public_key: &[u8]) -> Result<Self, FormatError> {
        let (x, y) = public_key_to_coords(public_key)?;
        Ok(PublicKeyPoint {
            x,
            y,
            compressed: public_key.len() == 33,
        })
    }

    /// Serialize honoring the stored compression flag.
    pub fn to_public_key(&self) -> Result<Vec<u8>, FormatError> {
        coords_to_public_key(&self.x, &self.y, self.compressed)
    }
}

/// Free-function spelling of [`PublicKeyPoint::to_public_key`].
pub fn point_to_public_key(point: &PublicKeyPoint) -> Result<Vec<u8>, FormatError> {
    point.to_public_key()
}

/// Derive the CashAddr for a serialized public key.
///
/// The key is validated (decompressed or curve-checked) first, then the
/// serialized bytes as given are Hash160'd, so compressed and uncompressed
/// forms of the same point yield different addresses.
pub fn public_key_to_address(
    public_key: &[u8],
    network: Network,
    kind: AddressKind,
) -> Result<String, FormatError> {
    public_key_to_coords(public_key)?;
    let hash = hash160(public_key);
    Ok(CashAddress::new(network, kind, &hash)?.encode())
}

/// [`public_key_to_address`] with the RIPEMD-160 stage of Hash160 routed
/// through `provider`.
pub fn public_key_to_address_with(
    provider: &dyn DigestProvider,
    public_key: &[u8],
    network: Network,
    kind: AddressKind,
) -> Result<String, FormatError> {
    public_key_to_coords(public_key)?;
    let hash = hash160_with(provider, public_key);
    Ok(CashAddress::new(network, kind, &hash)?.encode())
}

/// Extract the embedded hash from a CashAddr string, discarding network
/// and kind. Works for P2SH payloads too, despite the name.
pub fn address_to_public_key_hash(address: &str) -> Result<Vec<u8>, FormatError> {
    Ok(CashAddress::decode(address)?.payload().to_vec())
}

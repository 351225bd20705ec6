//! CashAddr, the bech32-family address encoding used by Bitcoin Cash.
//!
//! An address is `prefix:payload` where the payload is a base-32 encoding
//! of a version byte, the hash, and a 40-bit BCH checksum. The prefix
//! participates in the checksum, so a payload pasted under the wrong
//! network's prefix fails validation.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;
use crate::network::{AddressKind, Network};

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Hash lengths in bytes for size classes 0..=7, per the CashAddr spec.
const SIZE_CLASSES: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

/// 40-bit BCH checksum over 5-bit symbols.
fn polymod(values: &[u8]) -> u64 {
    const GENERATOR: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];

    let mut checksum: u64 = 1;
    for &value in values {
        let top = checksum >> 35;
        checksum = ((checksum & 0x07_ffff_ffff) << 5) ^ u64::from(value);
        for (i, &generator) in GENERATOR.iter().enumerate() {
            if top >> i & 1 == 1 {
                checksum ^= generator;
            }
        }
    }
    checksum ^ 1
}

/// Low five bits of each prefix character, then a zero separator.
fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut expanded: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    expanded.push(0);
    expanded
}

/// Repack a stream of `from`-bit groups into `to`-bit groups,
/// most-significant bit first.
///
/// With `pad` set, leftover bits on the final group are zero-filled; with
/// it clear (the decode direction), leftover bits must be zero and fewer
/// than `from`, otherwise the input carried data that cannot have come
/// from a padded encode.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    let max = (1u32 << to) - 1;

    for &value in data {
        if u32::from(value) >> from != 0 {
            return None;
        }
        acc = (acc << from) | u32::from(value);
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max) as u8);
        }
    } else if bits >= from || (acc << (to - bits)) & max != 0 {
        return None;
    }
    Some(out)
}

/// A decoded or constructed CashAddr: network, payload kind, and hash.
///
/// Immutable once built; re-encoding a decoded address reproduces the
/// input string exactly (modulo case folding).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashAddress {
    network: Network,
    kind: AddressKind,
    payload: Vec<u8>,
}

impl CashAddress {
    /// Build an address from its parts. The payload length must be one of
    /// the eight published size classes.
    pub fn new(network: Network, kind: AddressKind, payload: &[u8]) -> Result<Self, FormatError> {
        if !SIZE_CLASSES.contains(&payload.len()) {
            return Err(FormatError::UnsupportedSizeClass(payload.len()));
        }
        Ok(CashAddress {
            network,
            kind,
            payload: payload.to_vec(),
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// The embedded hash (Hash160 for the 20-byte class).
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Encode to the canonical lowercase `prefix:payload` form.
    pub fn encode(&self) -> String {
        let size_class = SIZE_CLASSES
            .iter()
            .position(|&len| len == self.payload.len())
            .expect("constructor checked the size class") as u8;
        let version = (self.kind.type_bits() << 3) | size_class;

        let mut data = Vec::with_capacity(1 + self.payload.len());
        data.push(version);
        data.extend_from_slice(&self.payload);
        let mut digits =
            convert_bits(&data, 8, 5, true).expect("8-bit input always repacks into 5-bit groups");

        let prefix = self.network.cashaddr_prefix();
        let mut checksum_input = expand_prefix(prefix);
        checksum_input.extend_from_slice(&digits);
        checksum_input.extend_from_slice(&[0u8; 8]);
        let checksum = polymod(&checksum_input);
        for i in 0..8 {
            digits.push((checksum >> (5 * (7 - i)) & 0x1f) as u8);
        }

        let mut encoded = String::with_capacity(prefix.len() + 1 + digits.len());
        encoded.push_str(prefix);
        encoded.push(':');
        for digit in digits {
            encoded.push(CHARSET[digit as usize] as char);
        }
        encoded
    }

    /// Decode an address, defaulting a bare payload (no `prefix:`) to the
    /// main network's prefix.
    pub fn decode(address: &str) -> Result<Self, FormatError> {
        Self::decode_with_default(address, Network::Main)
    }

    /// Decode an address, defaulting a bare payload to `default`'s prefix.
    ///
    /// Case is folded before checksum validation, but only when it is not
    /// mixed: the format permits either case for display, not both at
    /// once.
    pub fn decode_with_default(address: &str, default: Network) -> Result<Self, FormatError> {
        let has_lower = address.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = address.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(FormatError::Decode("mixed-case address".into()));
        }
        let address = address.to_ascii_lowercase();

        let mut parts = address.split(':');
        let (prefix, body) = match (parts.next(), parts.next(), parts.next()) {
            (Some(body), None, _) => (default.cashaddr_prefix().to_string(), body),
            (Some(prefix), Some(body), None) => (prefix.to_string(), body),
            _ => return Err(FormatError::Decode("more than one ':' separator".into())),
        };

        let network = Network::from_cashaddr_prefix(&prefix)
            .ok_or_else(|| FormatError::UnknownNetwork(prefix.clone()))?;

        let mut digits = Vec::with_capacity(body.len());
        for c in body.chars() {
            let digit = CHARSET
                .iter()
                .position(|&a| a as char == c)
                .ok_or(FormatError::InvalidCharacter(c))?;
            digits.push(digit as u8);
        }
        if digits.len() < 9 {
            return Err(FormatError::Decode("payload too short for a checksum".into()));
        }

        let mut checksum_input = expand_prefix(&prefix);
        checksum_input.extend_from_slice(&digits);
        if polymod(&checksum_input) != 0 {
            return Err(FormatError::ChecksumMismatch);
        }

        let data = convert_bits(&digits[..digits.len() - 8], 5, 8, false)
            .ok_or_else(|| FormatError::Decode("non-zero padding bits".into()))?;
        let (&version, hash) = data
            .split_first()
            .ok_or_else(|| FormatError::Decode("empty payload".into()))?;

        if version & 0x80 != 0 {
            return Err(FormatError::UnknownVersion(version));
        }
        let kind = AddressKind::from_type_bits(version >> 3)
            .ok_or(FormatError::UnknownVersion(version))?;
        let expected_len = SIZE_CLASSES[(version & 0x07) as usize];
        if hash.len() != expected_len {
            return Err(FormatError::MalformedPayload(format!(
                "size class declares {expected_len} bytes, payload has {}",
                hash.len()
            )));
        }

        Ok(CashAddress {
            network,
            kind,
            payload: hash.to_vec(),
        })
    }
}

impl fmt::Display for CashAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for CashAddress {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CashAddress::decode(s)
    }
}

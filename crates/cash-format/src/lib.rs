//! # cash-format
//!
//! Byte- and string-level codecs for Bitcoin Cash keys and addresses:
//! WIF private-key import/export, Base58Check, CashAddr, SEC1 public-key
//! points, and ECDSA signature verification.

pub mod base58;
pub mod cashaddress;
pub mod error;
pub mod keys;
pub mod network;
pub mod signature;
pub mod wif;

pub use error::FormatError;

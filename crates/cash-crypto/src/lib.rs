//! # cash-crypto
//!
//! Hash primitives for the Bitcoin Cash encoding stack: SHA-256 helpers,
//! Hash160, and a pluggable digest-provider layer with a portable
//! RIPEMD-160 fallback.

pub mod error;
pub mod hash;
pub mod provider;
pub mod ripemd;

pub use error::CryptoError;

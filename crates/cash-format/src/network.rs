use std::str::FromStr;

use crate::error::FormatError;

/// WIF version byte for main-net private keys.
pub const WIF_VERSION_MAIN: u8 = 0x80;

/// WIF version byte shared by testnet and regtest private keys.
pub const WIF_VERSION_TEST: u8 = 0xEF;

/// Bitcoin Cash network a key or address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Main,
    Test,
    Regtest,
}

impl Network {
    /// Human-readable CashAddr prefix for this network.
    pub fn cashaddr_prefix(self) -> &'static str {
        match self {
            Network::Main => "bitcoincash",
            Network::Test => "bchtest",
            Network::Regtest => "bchreg",
        }
    }

    /// WIF version byte. Testnet and regtest share one.
    pub fn wif_version_byte(self) -> u8 {
        match self {
            Network::Main => WIF_VERSION_MAIN,
            Network::Test | Network::Regtest => WIF_VERSION_TEST,
        }
    }

    /// Resolve a CashAddr prefix back to its network.
    pub fn from_cashaddr_prefix(prefix: &str) -> Option<Network> {
        match prefix {
            "bitcoincash" => Some(Network::Main),
            "bchtest" => Some(Network::Test),
            "bchreg" => Some(Network::Regtest),
            _ => None,
        }
    }

    /// Resolve a WIF version byte. `0xEF` does not distinguish testnet
    /// from regtest, so the caller says which one it is operating
    /// against.
    pub fn from_wif_version(version: u8, regtest: bool) -> Option<Network> {
        match version {
            WIF_VERSION_MAIN => Some(Network::Main),
            WIF_VERSION_TEST if regtest => Some(Network::Regtest),
            WIF_VERSION_TEST => Some(Network::Test),
            _ => None,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Main => write!(f, "main"),
            Network::Test => write!(f, "test"),
            Network::Regtest => write!(f, "regtest"),
        }
    }
}

impl FromStr for Network {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            other => Err(FormatError::UnknownNetwork(other.to_string())),
        }
    }
}

/// What a CashAddr payload commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Pay-to-public-key-hash.
    P2pkh,
    /// Pay-to-script-hash.
    P2sh,
}

impl AddressKind {
    /// Type bits stored in the upper half of the CashAddr version byte.
    pub fn type_bits(self) -> u8 {
        match self {
            AddressKind::P2pkh => 0,
            AddressKind::P2sh => 1,
        }
    }

    pub fn from_type_bits(bits: u8) -> Option<AddressKind> {
        match bits {
            0 => Some(AddressKind::P2pkh),
            1 => Some(AddressKind::P2sh),
            _ => None,
        }
    }
}

impl std::fmt::Display for AddressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressKind::P2pkh => write!(f, "P2PKH"),
            AddressKind::P2sh => write!(f, "P2SH"),
        }
    }
}

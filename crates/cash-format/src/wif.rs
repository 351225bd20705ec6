//! Wallet Import Format: Base58Check-wrapped private keys.

use zeroize::Zeroize;

use crate::base58::{b58decode_check, b58encode_check};
use crate::error::FormatError;
use crate::network::Network;

/// Private key material recovered from a WIF string.
///
/// The key bytes are wiped when the value is dropped.
#[derive(Debug)]
pub struct DecodedWif {
    pub private_key: [u8; 32],
    pub compressed: bool,
    pub network: Network,
}

impl Drop for DecodedWif {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// Encode a raw 32-byte private key as WIF.
///
/// A `0x01` suffix marks the key as deriving a compressed public key,
/// which changes the resulting address. Keys of any other length are
/// rejected rather than padded or truncated.
pub fn bytes_to_wif(
    private_key: &[u8],
    network: Network,
    compressed: bool,
) -> Result<String, FormatError> {
    if private_key.len() != 32 {
        return Err(FormatError::MalformedPayload(format!(
            "private key must be 32 bytes, got {}",
            private_key.len()
        )));
    }

    let mut payload = Vec::with_capacity(33);
    payload.extend_from_slice(private_key);
    if compressed {
        payload.push(0x01);
    }

    let wif = b58encode_check(network.wif_version_byte(), &payload);
    payload.zeroize();
    Ok(wif)
}

/// Decode a WIF string into key bytes, compression flag, and network.
///
/// `regtest` tells the decoder how to read the `0xEF` version byte, which
/// testnet and regtest share; the string alone cannot distinguish them.
pub fn wif_to_bytes(wif: &str, regtest: bool) -> Result<DecodedWif, FormatError> {
    let (version, mut payload) = b58decode_check(wif)?;
    let result = decode_key_payload(version, &payload, regtest);
    payload.zeroize();
    result
}

fn decode_key_payload(
    version: u8,
    payload: &[u8],
    regtest: bool,
) -> Result<DecodedWif, FormatError> {
    // Any non-WIF version byte lands here, including the 0x00 of a legacy
    // base-58 address pasted where a key was expected.
    let network = Network::from_wif_version(version, regtest)
        .ok_or(FormatError::UnknownVersion(version))?;

    let (key_bytes, compressed) = match payload.len() {
        32 => (payload, false),
        33 => {
            if payload[32] != 0x01 {
                return Err(FormatError::MalformedPayload(
                    "33-byte payload must end with the 0x01 compression marker".into(),
                ));
            }
            (&payload[..32], true)
        }
        other => {
            return Err(FormatError::MalformedPayload(format!(
                "expected a 32-byte key, got {other} bytes"
            )))
        }
    };

    let mut private_key = [0u8; 32];
    private_key.copy_from_slice(key_bytes);
    Ok(DecodedWif {
        private_key,
        compressed,
        network,
    })
}

/// Probe whether a string is an intact WIF: it must Base58Check-decode
/// cleanly *and* carry a WIF version byte.
///
/// A legacy base-58 address has a perfectly valid checksum and still
/// returns false; the question answered is "is this a WIF", not "is the
/// base-58 intact". Never errors.
pub fn wif_checksum_check(wif: &str) -> bool {
    match b58decode_check(wif) {
        Ok((version, mut payload)) => {
            payload.zeroize();
            Network::from_wif_version(version, false).is_some()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY_HEX: &str =
        "3e2dd3fbbd8caa41a4569357d947e1d52b7cf33168d70dbc1ef7dff6e45226f9";

    const WIF_MAIN: &str = "5JHfrtiGdeDttuPNcBMXavKgBcDRJp1gBcLRKyzkbFhWuVLZ9Y5";
    const WIF_MAIN_COMPRESSED: &str = "KyJaXDF9zjHv46DkNGhbziMRwpRpHcVywpxiNnZuQBspzJ7zwEjP";
    const WIF_TEST: &str = "924JSdXpDsJ2rxtfEXFSTWsdqGa8TyYsXZCNQcMFvzSZgWG4cTz";
    const WIF_TEST_COMPRESSED: &str = "cPfZz8F1RnzBDXh1kgWjN2rVa3jDx4bg1s7BVD2QuJXqF3By4UD8";

    /// A base-58 string with a valid checksum that is not a WIF.
    const LEGACY_ADDRESS: &str = "19Rf1VHyczRti16L5nBrfmbF33LV38Apgf";

    fn test_key() -> [u8; 32] {
        hex::decode(PRIVATE_KEY_HEX).unwrap().try_into().unwrap()
    }

    #[test]
    fn encode_main_uncompressed() {
        let wif = bytes_to_wif(&test_key(), Network::Main, false).unwrap();
        assert_eq!(wif, WIF_MAIN);
        assert!(wif.starts_with('5'), "main uncompressed starts with 5");
    }

    #[test]
    fn encode_main_compressed() {
        let wif = bytes_to_wif(&test_key(), Network::Main, true).unwrap();
        assert_eq!(wif, WIF_MAIN_COMPRESSED);
        assert!(
            wif.starts_with('K') || wif.starts_with('L'),
            "main compressed starts with K or L"
        );
    }

    #[test]
    fn encode_test_network() {
        assert_eq!(
            bytes_to_wif(&test_key(), Network::Test, false).unwrap(),
            WIF_TEST
        );
        assert_eq!(
            bytes_to_wif(&test_key(), Network::Test, true).unwrap(),
            WIF_TEST_COMPRESSED
        );
    }

    #[test]
    fn regtest_shares_test_version_byte() {
        assert_eq!(
            bytes_to_wif(&test_key(), Network::Regtest, false).unwrap(),
            WIF_TEST
        );
    }

    #[test]
    fn short_and_long_keys_rejected() {
        let short = [0u8; 31];
        let long = [0u8; 33];
        assert!(matches!(
            bytes_to_wif(&short, Network::Main, false),
            Err(FormatError::MalformedPayload(_))
        ));
        assert!(matches!(
            bytes_to_wif(&long, Network::Main, false),
            Err(FormatError::MalformedPayload(_))
        ));
    }

    #[test]
    fn decode_main_uncompressed() {
        let decoded = wif_to_bytes(WIF_MAIN, false).unwrap();
        assert_eq!(decoded.private_key, test_key());
        assert!(!decoded.compressed);
        assert_eq!(decoded.network, Network::Main);
    }

    #[test]
    fn decode_main_compressed() {
        let decoded = wif_to_bytes(WIF_MAIN_COMPRESSED, false).unwrap();
        assert_eq!(decoded.private_key, test_key());
        assert!(decoded.compressed);
        assert_eq!(decoded.network, Network::Main);
    }

    #[test]
    fn decode_test_network() {
        let decoded = wif_to_bytes(WIF_TEST_COMPRESSED, false).unwrap();
        assert_eq!(decoded.private_key, test_key());
        assert!(decoded.compressed);
        assert_eq!(decoded.network, Network::Test);
    }

    #[test]
    fn regtest_flag_disambiguates_version_byte() {
        let decoded = wif_to_bytes(WIF_TEST, true).unwrap();
        assert_eq!(decoded.network, Network::Regtest);

        // The flag has no effect on a main-net string.
        let decoded = wif_to_bytes(WIF_MAIN, true).unwrap();
        assert_eq!(decoded.network, Network::Main);
    }

    #[test]
    fn round_trip_all_networks_and_flags() {
        let key = test_key();
        for network in [Network::Main, Network::Test, Network::Regtest] {
            for compressed in [false, true] {
                let wif = bytes_to_wif(&key, network, compressed).unwrap();
                let decoded = wif_to_bytes(&wif, network == Network::Regtest).unwrap();
                assert_eq!(decoded.private_key, key);
                assert_eq!(decoded.compressed, compressed);
                assert_eq!(decoded.network, network);
            }
        }
    }

    #[test]
    fn legacy_address_is_unknown_version() {
        let err = wif_to_bytes(LEGACY_ADDRESS, false).unwrap_err();
        assert!(matches!(err, FormatError::UnknownVersion(0x00)));
    }

    #[test]
    fn corrupted_wif_is_checksum_mismatch() {
        // Last character changed within the base-58 alphabet.
        let mut corrupted = String::from(WIF_MAIN);
        corrupted.pop();
        corrupted.push('6');
        assert!(matches!(
            wif_to_bytes(&corrupted, false),
            Err(FormatError::ChecksumMismatch)
        ));
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(
            wif_to_bytes("not-a-wif-0OIl", false),
            Err(FormatError::Decode(_))
        ));
    }

    #[test]
    fn checksum_check_accepts_wifs() {
        assert!(wif_checksum_check(WIF_MAIN));
        assert!(wif_checksum_check(WIF_MAIN_COMPRESSED));
        assert!(wif_checksum_check(WIF_TEST));
        assert!(wif_checksum_check(WIF_TEST_COMPRESSED));
    }

    #[test]
    fn checksum_check_rejects_non_wif_version() {
        // Valid checksum, wrong version byte.
        assert!(!wif_checksum_check(LEGACY_ADDRESS));
    }

    #[test]
    fn checksum_check_rejects_corruption_and_garbage() {
        let mut corrupted = String::from(WIF_TEST);
        corrupted.pop();
        corrupted.push('2');
        assert!(!wif_checksum_check(&corrupted));
        assert!(!wif_checksum_check(""));
        assert!(!wif_checksum_check("hello world"));
    }
}

//! # Wire Primitives
//!
//! Fixed-width value types shared by every layer of the SDK: 20-byte
//! addresses and 32-byte hashes, both rendered as `0x`-prefixed lowercase
//! hex on the wire and in display output.
//!
//! Both types are `Copy` — they are identifiers, not buffers, and every
//! RPC payload in the SDK carries at least one of them. Parsing is strict:
//! the `0x` prefix is mandatory, the length is exact, and uppercase hex is
//! accepted on input but never produced on output.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a hex-encoded primitive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseHexError {
    /// The string does not start with `0x`.
    #[error("missing 0x prefix")]
    MissingPrefix,

    /// The decoded byte length is wrong for the target type.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// The characters after the prefix are not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

pub(crate) fn decode_prefixed(s: &str, expected: usize) -> Result<Vec<u8>, ParseHexError> {
    let body = s.strip_prefix("0x").ok_or(ParseHexError::MissingPrefix)?;
    let bytes = hex::decode(body).map_err(|e| ParseHexError::InvalidHex(e.to_string()))?;
    if bytes.len() != expected {
        return Err(ParseHexError::InvalidLength {
            expected,
            got: bytes.len(),
        });
    }
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte Aether account address.
///
/// Addresses are derived from Ed25519 public keys (see
/// [`PublicKey::to_address`](crate::crypto::keys::PublicKey::to_address)),
/// never chosen freely. The textual form is `0x` followed by 40 lowercase
/// hex characters.
///
/// # Examples
///
/// ```
/// use aether_sdk::types::Address;
///
/// let addr: Address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse().unwrap();
/// assert_eq!(addr.to_string(), "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address. Used as a placeholder, never as a real account.
    pub const fn zero() -> Self {
        Address([0u8; 20])
    }

    /// Wraps raw address bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Builds an address from a byte slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseHexError> {
        if bytes.len() != 20 {
            return Err(ParseHexError::InvalidLength {
                expected: 20,
                got: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(bytes);
        Ok(Address(arr))
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_prefixed(s, 20)?;
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Address(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// TxHash
// ---------------------------------------------------------------------------

/// A 32-byte hash: transaction ids, job ids, model hashes, block hashes,
/// state roots, execution traces.
///
/// Always the output of the canonical codec's SHA-256 digest (or the node's
/// own hashing for block-level identifiers). Textual form is `0x` + 64
/// lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// The all-zero hash. The "no such thing" sentinel in a few RPC payloads.
    pub const fn zero() -> Self {
        TxHash([0u8; 32])
    }

    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        TxHash(bytes)
    }

    /// Builds a hash from a byte slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseHexError> {
        if bytes.len() != 32 {
            return Err(ParseHexError::InvalidLength {
                expected: 32,
                got: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(TxHash(arr))
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for TxHash {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_prefixed(s, 32)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(TxHash(arr))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Hex byte-string serde helpers
// ---------------------------------------------------------------------------

/// Serde adapter: `Vec<u8>` as a `0x`-prefixed hex string.
///
/// Every binary payload on the Aether wire (transaction data, job inputs,
/// results, attestations) travels as prefixed hex, not as JSON byte arrays.
pub mod hex_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let body = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(body).map_err(de::Error::custom)
    }
}

/// Serde adapter: `Option<Vec<u8>>` as a `0x` hex string or `null`.
pub mod hex_bytes_opt {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => serializer.serialize_some(&format!("0x{}", hex::encode(b))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) => {
                let body = s.strip_prefix("0x").unwrap_or(&s);
                hex::decode(body).map(Some).map_err(de::Error::custom)
            }
        }
    }
}

/// Serde adapter: `Vec<Vec<u8>>` as a list of `0x` hex strings.
pub mod hex_bytes_seq {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        items: &[Vec<u8>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let encoded: Vec<String> = items
            .iter()
            .map(|b| format!("0x{}", hex::encode(b)))
            .collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let strings: Vec<String> = Vec::deserialize(deserializer)?;
        strings
            .into_iter()
            .map(|s| {
                let body = s.strip_prefix("0x").map(str::to_owned).unwrap_or(s);
                hex::decode(&body).map_err(de::Error::custom)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_roundtrip() {
        let text = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        let addr: Address = text.parse().unwrap();
        assert_eq!(addr.to_string(), text);
        assert_eq!(addr.as_bytes(), &[0xAA; 20]);
    }

    #[test]
    fn address_accepts_uppercase_input() {
        let addr: Address = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".parse().unwrap();
        // Output is always lowercase regardless of input casing.
        assert_eq!(addr.to_string(), "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn address_rejects_missing_prefix() {
        let err = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
            .parse::<Address>()
            .unwrap_err();
        assert_eq!(err, ParseHexError::MissingPrefix);
    }

    #[test]
    fn address_rejects_wrong_length() {
        let err = "0xaaaa".parse::<Address>().unwrap_err();
        assert_eq!(
            err,
            ParseHexError::InvalidLength {
                expected: 20,
                got: 2
            }
        );
    }

    #[test]
    fn address_rejects_non_hex() {
        assert!(matches!(
            "0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"
                .parse::<Address>()
                .unwrap_err(),
            ParseHexError::InvalidHex(_)
        ));
    }

    #[test]
    fn hash_roundtrip() {
        let text = "0x0101010101010101010101010101010101010101010101010101010101010101";
        let hash: TxHash = text.parse().unwrap();
        assert_eq!(hash.to_string(), text);
        assert_eq!(hash.as_bytes(), &[0x01; 32]);
    }

    #[test]
    fn hash_rejects_address_length() {
        let err = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
            .parse::<TxHash>()
            .unwrap_err();
        assert_eq!(
            err,
            ParseHexError::InvalidLength {
                expected: 32,
                got: 20
            }
        );
    }

    #[test]
    fn serde_uses_hex_strings() {
        let addr = Address::from_bytes([0xAB; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0xabababababababababababababababababababab\"");

        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, recovered);
    }

    #[test]
    fn serde_rejects_malformed_strings() {
        assert!(serde_json::from_str::<Address>("\"not-an-address\"").is_err());
        assert!(serde_json::from_str::<TxHash>("\"0x1234\"").is_err());
    }

    #[test]
    fn zero_constants() {
        assert_eq!(Address::zero().as_bytes(), &[0u8; 20]);
        assert_eq!(TxHash::zero().as_bytes(), &[0u8; 32]);
        assert_eq!(
            TxHash::zero().to_string(),
            format!("0x{}", "0".repeat(64))
        );
    }
}

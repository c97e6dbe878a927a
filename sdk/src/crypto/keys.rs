//! # Key Management
//!
//! Ed25519 keypair generation, address derivation, and signing for Aether
//! accounts.
//!
//! Every signature in the protocol is Ed25519 over a 32-byte SHA-256
//! digest — never over raw transaction fields. Bounding the signed message
//! to a digest keeps canonicalization questions out of the signature layer
//! entirely: the canonical codec owns the byte layout, the signer only ever
//! sees its hash.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (courtesy of ed25519-dalek).
//! - Key generation uses the OS CSPRNG (`OsRng`).
//! - Secret key bytes leave a [`Keypair`] only through the explicit export
//!   methods. `Debug` output shows the public key, never the secret, and
//!   `Keypair` deliberately has no serde implementations.

use ed25519_dalek::{
    Signature as DalekSignature, Signer as _, SigningKey, Verifier as _, VerifyingKey,
    SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::crypto::hash::sha256;
use crate::types::{decode_prefixed, Address, ParseHexError};

/// Errors from constructing keys out of caller-supplied material.
///
/// Deliberately vague about *why* the material is bad — error messages that
/// describe key bytes in detail have a way of ending up in logs.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Secret key bytes have the wrong length or are not valid hex.
    #[error("invalid secret key material")]
    InvalidSecretKey,

    /// Public key bytes are the wrong length or not a valid Ed25519 point.
    #[error("invalid public key material")]
    InvalidPublicKey,
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// An Aether account keypair: an Ed25519 signing key plus its derived
/// public key and [`Address`].
///
/// # Examples
///
/// ```
/// use aether_sdk::crypto::keys::Keypair;
/// use aether_sdk::crypto::hash::digest;
///
/// let kp = Keypair::generate();
/// let msg = digest(b"transfer 100 AETH to alice");
/// let sig = kp.sign(msg.as_bytes());
/// assert!(kp.public_key().verify(msg.as_bytes(), &sig));
/// ```
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Derive a keypair deterministically from arbitrary seed bytes.
    ///
    /// The secret key is `sha256(seed)` — the same seed always yields the
    /// same keypair, which is what test fixtures and reproducible devnet
    /// accounts need.
    ///
    /// **This is not a key-derivation function.** There is no domain
    /// separation, no salting, and no stretching: a low-entropy seed (a
    /// word, a short phrase) gives an attacker a low-entropy key. Use
    /// [`Keypair::generate`] for anything that holds real value.
    pub fn from_seed(seed: impl AsRef<[u8]>) -> Self {
        let secret = sha256(seed.as_ref());
        Self {
            signing_key: SigningKey::from_bytes(&secret),
        }
    }

    /// Reconstruct a keypair from raw 32-byte secret key material.
    ///
    /// Fails with [`KeyError::InvalidSecretKey`] if the slice is not
    /// exactly 32 bytes.
    pub fn from_secret_key(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidSecretKey);
        }
        let mut arr = [0u8; SECRET_KEY_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self {
            signing_key: SigningKey::from_bytes(&arr),
        })
    }

    /// Reconstruct a keypair from a hex-encoded secret key, with or without
    /// a `0x` prefix.
    pub fn from_secret_hex(hex_str: &str) -> Result<Self, KeyError> {
        let body = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(body).map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_secret_key(&bytes)
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// The account address derived from this keypair's public key.
    pub fn address(&self) -> Address {
        self.public_key().to_address()
    }

    /// Sign a message.
    ///
    /// By protocol convention the message is always a 32-byte digest (a
    /// transaction hash); nothing enforces that here, but every call site in
    /// the SDK upholds it. Ed25519 signing is deterministic — the same
    /// (key, message) pair always yields the same signature — and pure, so
    /// concurrent signs on a shared keypair need no synchronization.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig = self.signing_key.sign(message);
        Signature {
            bytes: sig.to_bytes(),
        }
    }

    /// Export the raw 32-byte secret key.
    ///
    /// **Handle with care.** This is the only secret standing between an
    /// attacker and the account. The SDK never calls this internally.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Export the secret key as bare hex. Same caveats as
    /// [`secret_key_bytes`](Self::secret_key_bytes).
    pub fn to_secret_hex(&self) -> String {
        hex::encode(self.secret_key_bytes())
    }
}

impl Clone for Keypair {
    /// Cloning is allowed but every copy of a secret key is another copy
    /// to protect.
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material, not even partially.
        write!(f, "Keypair(address={})", self.address())
    }
}

impl PartialEq for Keypair {
    /// Keypairs compare by public key. Comparing secret material byte-wise
    /// in non-constant time is a habit not worth forming, and the public
    /// key is the identity anyway.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for Keypair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// The public half of an Aether account, safe to embed in transactions and
/// share freely.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; 32],
}

impl PublicKey {
    /// Wraps raw public key bytes without curve validation.
    ///
    /// Use [`try_from_slice`](Self::try_from_slice) for untrusted input.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Build a public key from a byte slice, validating both the length and
    /// that the bytes decode to a point on the curve.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        if slice.len() != 32 {
            return Err(KeyError::InvalidPublicKey);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Derive the account address: the **last** 20 bytes of
    /// `sha256(public_key)`. Deterministic and total.
    pub fn to_address(&self) -> Address {
        let hash = sha256(&self.bytes);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hash[12..]);
        Address::from_bytes(addr)
    }

    /// Verify a signature over a message.
    ///
    /// Returns `false` for any malformed input — an undecodable point, a
    /// bad signature, a wrong message. Verification is a policy input, not
    /// an exception: the caller decides what an invalid signature means.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &sig).is_ok()
    }
}

impl FromStr for PublicKey {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_prefixed(s, 32)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { bytes: arr })
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.bytes))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(0x{}…)", &hex::encode(self.bytes)[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// An Ed25519 signature: 64 bytes, textually `0x` + 128 hex characters.
///
/// Bound to exactly one (message, public key) pair. Construction enforces
/// the length, so a `Signature` value is always structurally well-formed;
/// whether it *verifies* is a separate question answered by
/// [`PublicKey::verify`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    bytes: [u8; 64],
}

impl Signature {
    /// Wraps a raw 64-byte signature.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self { bytes }
    }

    /// The raw 64 bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }
}

impl FromStr for Signature {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_prefixed(s, 64)?;
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self { bytes: arr })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.bytes))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = hex::encode(self.bytes);
        write!(f, "Signature(0x{}…{})", &h[..8], &h[120..])
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Verify a signature over a message under a public key.
///
/// Free-function form of [`PublicKey::verify`] for call sites that hold the
/// pieces separately. Total: malformed input returns `false`, never panics.
pub fn verify(signature: &Signature, message: &[u8], public_key: &PublicKey) -> bool {
    public_key.verify(message, signature)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::digest;

    #[test]
    fn generate_produces_valid_keypair() {
        let kp = Keypair::generate();
        assert_eq!(kp.public_key().as_bytes().len(), 32);
        assert_eq!(kp.secret_key_bytes().len(), 32);
    }

    #[test]
    fn two_generated_keypairs_differ() {
        let kp1 = Keypair::generate();
        let kp2 = Keypair::generate();
        assert_ne!(kp1.public_key(), kp2.public_key());
        assert_ne!(kp1.address(), kp2.address());
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = Keypair::generate();
        let msg = digest(b"transfer 100 AETH");
        let sig = kp.sign(msg.as_bytes());
        assert!(kp.public_key().verify(msg.as_bytes(), &sig));
        assert!(verify(&sig, msg.as_bytes(), &kp.public_key()));
    }

    #[test]
    fn wrong_message_fails_verification() {
        let kp = Keypair::generate();
        let sig = kp.sign(digest(b"correct").as_bytes());
        assert!(!kp.public_key().verify(digest(b"wrong").as_bytes(), &sig));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let kp1 = Keypair::generate();
        let kp2 = Keypair::generate();
        let msg = digest(b"message");
        let sig = kp1.sign(msg.as_bytes());
        assert!(!kp2.public_key().verify(msg.as_bytes(), &sig));
    }

    #[test]
    fn bit_flipped_signature_fails_verification() {
        let kp = Keypair::generate();
        let msg = digest(b"flip me");
        let sig = kp.sign(msg.as_bytes());

        let mut tampered = *sig.as_bytes();
        tampered[0] ^= 0x01;
        let tampered = Signature::from_bytes(tampered);
        assert!(!kp.public_key().verify(msg.as_bytes(), &tampered));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = Keypair::generate();
        let msg = digest(b"determinism");
        assert_eq!(
            kp.sign(msg.as_bytes()).as_bytes(),
            kp.sign(msg.as_bytes()).as_bytes()
        );
    }

    #[test]
    fn from_seed_is_deterministic() {
        let kp1 = Keypair::from_seed("test");
        let kp2 = Keypair::from_seed("test");
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.address(), kp2.address());

        let other = Keypair::from_seed("test2");
        assert_ne!(kp1.address(), other.address());
    }

    #[test]
    fn from_seed_matches_sha256_of_seed() {
        // from_seed is specified as secret = sha256(seed bytes); pin it so a
        // backend change can never silently move every deterministic account.
        let kp = Keypair::from_seed("test");
        let expected = Keypair::from_secret_key(&sha256(b"test")).unwrap();
        assert_eq!(kp.public_key(), expected.public_key());
    }

    #[test]
    fn secret_key_roundtrip() {
        let kp = Keypair::generate();
        let restored = Keypair::from_secret_key(&kp.secret_key_bytes()).unwrap();
        assert_eq!(kp.public_key(), restored.public_key());
    }

    #[test]
    fn secret_hex_roundtrip() {
        let kp = Keypair::generate();
        let restored = Keypair::from_secret_hex(&kp.to_secret_hex()).unwrap();
        assert_eq!(kp.address(), restored.address());
    }

    #[test]
    fn from_secret_key_rejects_wrong_length() {
        assert!(matches!(
            Keypair::from_secret_key(&[0u8; 16]),
            Err(KeyError::InvalidSecretKey)
        ));
        assert!(matches!(
            Keypair::from_secret_hex("deadbeef"),
            Err(KeyError::InvalidSecretKey)
        ));
        assert!(matches!(
            Keypair::from_secret_hex("not hex at all"),
            Err(KeyError::InvalidSecretKey)
        ));
    }

    #[test]
    fn address_is_last_twenty_bytes_of_pubkey_hash() {
        let kp = Keypair::generate();
        let full_hash = sha256(kp.public_key().as_bytes());
        assert_eq!(kp.address().as_bytes()[..], full_hash[12..]);
    }

    #[test]
    fn address_derivation_does_not_collide_in_sample() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..256 {
            assert!(seen.insert(Keypair::generate().address()));
        }
    }

    #[test]
    fn public_key_hex_roundtrip() {
        let kp = Keypair::generate();
        let pk = kp.public_key();
        let recovered: PublicKey = pk.to_string().parse().unwrap();
        assert_eq!(pk, recovered);
    }

    #[test]
    fn try_from_slice_rejects_bad_input() {
        assert!(PublicKey::try_from_slice(&[0u8; 16]).is_err());
        // All-0xFF is not a valid curve point encoding.
        assert!(PublicKey::try_from_slice(&[0xFF; 32]).is_err());
    }

    #[test]
    fn signature_hex_roundtrip() {
        let kp = Keypair::generate();
        let sig = kp.sign(digest(b"round trip").as_bytes());
        let recovered: Signature = sig.to_string().parse().unwrap();
        assert_eq!(sig, recovered);
        assert_eq!(sig.to_string().len(), 2 + 128);
    }

    #[test]
    fn debug_never_leaks_secret() {
        let kp = Keypair::from_seed("debug-check");
        let dbg = format!("{:?}", kp);
        assert!(dbg.starts_with("Keypair(address="));
        assert!(!dbg.contains(&kp.to_secret_hex()));
    }

    #[test]
    fn serde_uses_prefixed_hex() {
        let kp = Keypair::from_seed("serde");
        let pk_json = serde_json::to_string(&kp.public_key()).unwrap();
        assert!(pk_json.starts_with("\"0x"));

        let sig = kp.sign(digest(b"serde").as_bytes());
        let sig_json = serde_json::to_string(&sig).unwrap();
        let back: Signature = serde_json::from_str(&sig_json).unwrap();
        assert_eq!(sig, back);
    }
}

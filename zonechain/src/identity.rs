//! Cryptographic identity: key pairs, signing, and verification.
//!
//! Peers sign with 2048-bit RSA using PSS padding over SHA-256. PSS salts
//! are drawn fresh per signature, so signing the same bytes twice yields
//! different signature bytes; protocol code must therefore never compare
//! signature bytes for equality. Verification is total: malformed
//! signatures, mismatched keys, and missing key material all verify as
//! `false`, never as a panic or an error.
//!
//! The public key doubles as the durable peer identity through its
//! canonical string encoding: the decimal modulus and exponent joined by a
//! pipe, e.g. `"2899…763|65537"`.

use std::error::Error;
use std::fmt;

use rsa::pss::{Signature as PssSignature, SigningKey, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::types::PeerId;

/// RSA modulus size for generated identities.
pub const KEY_BITS: usize = 2048;

/// Errors reported while generating, using, or decoding key material.
#[derive(Debug)]
pub enum IdentityError {
    /// Key generation failed in the underlying RSA implementation.
    Generation(String),
    /// A textual key encoding could not be parsed back into a key.
    Decode(String),
    /// Signing failed for the local private key.
    Signing(String),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generation(err) => write!(f, "key generation error: {err}"),
            Self::Decode(err) => write!(f, "key decode error: {err}"),
            Self::Signing(err) => write!(f, "signing error: {err}"),
        }
    }
}

impl Error for IdentityError {}

/// Detached signature bytes.
///
/// The bytes differ between signing calls over identical input; entity
/// equality is never defined over them.
#[derive(Clone, Debug)]
pub struct Signature(pub Vec<u8>);

impl Signature {
    /// Returns the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hex encoding used on the wire.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

/// Public half of a peer identity.
#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey(RsaPublicKey);

impl PublicKey {
    /// Canonical textual encoding: decimal modulus and exponent,
    /// pipe-separated. Stable for the lifetime of the key.
    pub fn encode(&self) -> String {
        format!("{}|{}", self.0.n(), self.0.e())
    }

    /// The peer identifier derived from this key.
    pub fn peer_id(&self) -> PeerId {
        PeerId(self.encode())
    }

    /// Parses the canonical `modulus|exponent` encoding back into a key.
    pub fn decode(encoded: &str) -> Result<Self, IdentityError> {
        let (n, e) = encoded
            .split_once('|')
            .ok_or_else(|| IdentityError::Decode("missing '|' separator".to_string()))?;
        let n = BigUint::parse_bytes(n.as_bytes(), 10)
            .ok_or_else(|| IdentityError::Decode("modulus is not a decimal integer".to_string()))?;
        let e = BigUint::parse_bytes(e.as_bytes(), 10)
            .ok_or_else(|| IdentityError::Decode("exponent is not a decimal integer".to_string()))?;
        let key = RsaPublicKey::new(n, e).map_err(|err| IdentityError::Decode(err.to_string()))?;
        Ok(PublicKey(key))
    }

    /// Verifies `signature` over `data`.
    ///
    /// Returns `false` on any failure: wrong key, tampered data, or
    /// signature bytes that do not even parse.
    pub fn verify(&self, data: &[u8], signature: &Signature) -> bool {
        let Ok(sig) = PssSignature::try_from(signature.as_bytes()) else {
            return false;
        };
        VerifyingKey::<Sha256>::new(self.0.clone())
            .verify(data, &sig)
            .is_ok()
    }
}

/// A peer's signing identity: RSA private key plus the derived public half.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private: RsaPrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generates a fresh [`KEY_BITS`]-bit identity.
    pub fn generate() -> Result<Self, IdentityError> {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, KEY_BITS)
            .map_err(|err| IdentityError::Generation(err.to_string()))?;
        let public = PublicKey(private.to_public_key());
        Ok(Self { private, public })
    }

    /// Returns the public half of this identity.
    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    /// The peer identifier derived from the public key.
    pub fn peer_id(&self) -> PeerId {
        self.public.peer_id()
    }

    /// Signs `data` with a fresh random PSS salt.
    pub fn sign(&self, data: &[u8]) -> Result<Signature, IdentityError> {
        let signing = SigningKey::<Sha256>::new(self.private.clone());
        let mut rng = rand::thread_rng();
        let sig = signing
            .try_sign_with_rng(&mut rng, data)
            .map_err(|err| IdentityError::Signing(err.to_string()))?;
        Ok(Signature(sig.to_vec()))
    }
}

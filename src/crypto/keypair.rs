//! Ed25519 keypair generation.

use std::fmt;

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;

use super::Address;
use crate::error::Result;

/// Length of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of the private key as printed: 32-byte seed followed by the public key.
pub const PRIVATE_KEY_LEN: usize = 64;

/// An Ed25519 public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Creates a public key from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the key as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Returns the key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An Ed25519 keypair.
///
/// The private half is kept in the 64-byte layout (seed || public key) so it
/// can be pasted straight into a node configuration.
#[derive(Clone)]
pub struct Keypair {
    secret_key: [u8; PRIVATE_KEY_LEN],
    public_key: PublicKey,
}

impl Keypair {
    /// Generates a new random keypair from the OS random source.
    ///
    /// A failing random source is reported, not retried.
    #[inline]
    pub fn generate() -> Result<Self> {
        let mut seed = [0u8; 32];
        OsRng.try_fill_bytes(&mut seed)?;
        Ok(Self::from_seed(&seed))
    }

    /// Expands a 32-byte seed into a keypair.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);

        Self {
            secret_key: signing_key.to_keypair_bytes(),
            public_key: PublicKey::from_bytes(signing_key.verifying_key().to_bytes()),
        }
    }

    /// Assembles a keypair from already-derived parts.
    ///
    /// No consistency check is made between the halves.
    pub fn from_parts(secret_key: [u8; PRIVATE_KEY_LEN], public_key: PublicKey) -> Self {
        Self {
            secret_key,
            public_key,
        }
    }

    /// Returns the private key as a hex string.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key)
    }

    /// Returns the private key bytes.
    pub fn private_key_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.secret_key
    }

    #[inline]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Derives the overlay address for this keypair's public key.
    pub fn address(&self) -> Address {
        Address::for_key(&self.public_key)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Anything a worker can pull fresh keypairs from.
pub trait KeySource {
    fn generate(&mut self) -> Result<Keypair>;
}

/// Key source backed by the OS random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsKeySource;

impl KeySource for OsKeySource {
    #[inline]
    fn generate(&mut self) -> Result<Keypair> {
        Keypair::generate()
    }
}

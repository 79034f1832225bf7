//! Key generation and address derivation for overlay node identities.
//!
//! This module provides:
//! - Ed25519 keypair generation from the OS random source
//! - The `KeySource` seam workers pull keys through
//! - Derivation of the IPv6 node address from a public key

mod address;
mod keypair;

pub use address::{Address, ADDRESS_LEN, ADDRESS_PREFIX};
pub use keypair::{KeySource, Keypair, OsKeySource, PublicKey, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};

//! Overlay address derivation.

use std::fmt;
use std::net::Ipv6Addr;

use super::PublicKey;

/// First byte of every node address (the 200::/7 range).
pub const ADDRESS_PREFIX: u8 = 0x02;

/// Length of an overlay address in bytes.
pub const ADDRESS_LEN: usize = 16;

/// A node address in the overlay's IPv6 range.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Creates an address from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the address as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Derives the address for a public key.
    ///
    /// Process:
    /// 1. Invert every bit of the key
    /// 2. Count the leading 1 bits
    /// 3. Drop those bits and the 0 bit that ends the run
    /// 4. Pack what remains into bytes, most significant bit first
    ///
    /// The address is the prefix byte, the count, then as many packed bytes
    /// as fit. A trailing partial byte is discarded.
    pub fn for_key(key: &PublicKey) -> Self {
        let inverted = key.as_bytes().map(|b| !b);
        let total_bits = inverted.len() * 8;

        let bit_at = |idx: usize| (inverted[idx / 8] >> (7 - idx % 8)) & 1;

        let mut ones: u8 = 0;
        let mut idx = 0;
        while idx < total_bits && bit_at(idx) == 1 {
            // Wraps for a key with 256 leading ones, same as the reference nodes
            ones = ones.wrapping_add(1);
            idx += 1;
        }
        // Skip the terminating zero
        idx += 1;

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = ADDRESS_PREFIX;
        bytes[1] = ones;

        let mut out = 2;
        let mut acc: u8 = 0;
        let mut acc_bits = 0;
        while idx < total_bits && out < ADDRESS_LEN {
            acc = (acc << 1) | bit_at(idx);
            acc_bits += 1;
            if acc_bits == 8 {
                bytes[out] = acc;
                out += 1;
                acc = 0;
                acc_bits = 0;
            }
            idx += 1;
        }

        Self(bytes)
    }

    /// Returns the address as an IPv6 address.
    #[inline]
    pub fn to_ipv6(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.0)
    }

    /// Number of leading 1 bits in the inverted key.
    #[inline]
    pub fn leading_ones(&self) -> u8 {
        self.0[1]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_ipv6())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ipv6())
    }
}

//! The "is-better" comparison shared by workers and the coordinator.

use crate::crypto::{PublicKey, PUBLIC_KEY_LEN};

/// A key no generated key can lose to: every byte at its maximum.
pub const WORST_KEY: PublicKey = PublicKey::from_bytes([0xff; PUBLIC_KEY_LEN]);

/// Returns true if `candidate` is strictly better than `current`.
///
/// Bytes are compared from the front; at the first difference the smaller
/// byte wins. Equal sequences are never better than each other.
#[inline]
pub fn is_better(current: &[u8], candidate: &[u8]) -> bool {
    debug_assert_eq!(current.len(), candidate.len());

    current
        .iter()
        .zip(candidate)
        .find(|(old, new)| old != new)
        .is_some_and(|(old, new)| new < old)
}

impl PublicKey {
    /// Returns true if this key beats `other` under [`is_better`].
    #[inline]
    pub fn is_better_than(&self, other: &PublicKey) -> bool {
        is_better(other.as_bytes(), self.as_bytes())
    }
}

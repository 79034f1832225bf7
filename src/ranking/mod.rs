//! Ordering of public keys by desirability.
//!
//! Keys whose bytes are lexicographically smaller invert to longer runs of
//! leading ones, which the address scheme compresses into more identifier bits.

mod ordering;

pub use ordering::{is_better, WORST_KEY};

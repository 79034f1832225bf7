//! # ygg_vanity
//!
//! Parallel search for Yggdrasil node keys with dense addresses.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation and address derivation
//! - `ranking`: The "is-better" ordering over public keys
//! - `worker`: Parallel key generation and the worker pool
//! - `coordinator`: Global-best aggregation and stopping policy
//! - `output`: Plain and JSON rendering of the result
//! - `config`: Runtime configuration

pub mod config;
pub mod coordinator;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod output;
pub mod ranking;
pub mod worker;

pub use config::{Config, ConfigError};
pub use coordinator::{Coordinator, SearchMode, SearchReport};
pub use crypto::{Address, KeySource, Keypair, OsKeySource, PublicKey};
pub use error::SearchError;
pub use output::{KeyReport, OutputFormat};
pub use ranking::{is_better, WORST_KEY};
pub use worker::{Candidate, WorkerPool};

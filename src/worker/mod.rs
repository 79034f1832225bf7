//! Parallel key generation.
//!
//! This module provides:
//! - CPU workers that report only strict local improvements
//! - A pool that spawns one worker per core onto a bounded channel

mod cpu;
mod pool;

pub use cpu::{Candidate, Worker, WorkerMessage};
pub use pool::WorkerPool;

#[cfg(test)]
pub(crate) use cpu::tests as testing;

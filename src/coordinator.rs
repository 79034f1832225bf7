//! Aggregation of worker candidates into a single answer.
//!
//! The coordinator is the only reader of the candidate channel and the only
//! owner of the running best, so no locking is involved. It never talks back
//! to the workers; once it returns, the caller decides their fate.

use std::time::{Duration, Instant};

use crossbeam_channel::{after, select, Receiver};
use tracing::{debug, info, warn};

use crate::error::{Result, SearchError};
use crate::worker::{Candidate, WorkerMessage};

/// How long the coordinator keeps listening. Fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Take the first candidate any worker reports
    SingleShot,
    /// Keep the best candidate seen within the window
    BestOf(Duration),
}

/// The final answer of a search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// The winning candidate
    pub candidate: Candidate,
    /// Keys generated up to and including each received candidate.
    /// Keys a worker tried after its last candidate are not included.
    pub total_trials: u64,
    /// Time spent waiting on workers
    pub elapsed: Duration,
}

/// Why a best-of search stopped listening.
enum Stop {
    Deadline,
    Interrupted,
    Disconnected,
}

/// Tracks the globally best candidate across all workers.
#[derive(Debug)]
pub struct Coordinator {
    mode: SearchMode,
    best: Option<Candidate>,
    total_trials: u64,
}

impl Coordinator {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            best: None,
            total_trials: 0,
        }
    }

    /// Consumes candidates until the mode's stopping condition holds.
    ///
    /// Any message on `interrupt` ends the search early. In best-of mode
    /// the best candidate so far is still reported.
    pub fn run(
        mut self,
        candidates: &Receiver<WorkerMessage>,
        interrupt: &Receiver<()>,
    ) -> Result<SearchReport> {
        let start = Instant::now();

        match self.mode {
            SearchMode::SingleShot => {
                select! {
                    recv(candidates) -> msg => {
                        let candidate = msg.map_err(|_| SearchError::WorkersExited)??;
                        self.consider(candidate);
                    }
                    recv(interrupt) -> _ => return Err(SearchError::Interrupted),
                }
            }
            SearchMode::BestOf(window) => {
                let deadline = after(window);
                let stop = loop {
                    select! {
                        recv(candidates) -> msg => match msg {
                            Ok(message) => {
                                self.consider(message?);
                            }
                            Err(_) => break Stop::Disconnected,
                        },
                        recv(deadline) -> _ => break Stop::Deadline,
                        recv(interrupt) -> _ => break Stop::Interrupted,
                    }
                };

                if self.best.is_none() {
                    return Err(match stop {
                        Stop::Deadline => SearchError::NoCandidate(window),
                        Stop::Interrupted => SearchError::Interrupted,
                        Stop::Disconnected => SearchError::WorkersExited,
                    });
                }
                match stop {
                    Stop::Deadline => {}
                    Stop::Interrupted => info!("interrupted, reporting best key so far"),
                    Stop::Disconnected => warn!("all workers exited early, reporting best key so far"),
                }
            }
        }

        let elapsed = start.elapsed();
        let total_trials = self.total_trials;
        // Both arms above either set a best candidate or returned
        let candidate = self.best.ok_or(SearchError::WorkersExited)?;

        Ok(SearchReport {
            candidate,
            total_trials,
            elapsed,
        })
    }

    /// Folds one candidate into the running state.
    ///
    /// Every candidate counts toward `total_trials`, whether or not it
    /// replaces the current best. Returns true if it became the new best.
    pub fn consider(&mut self, candidate: Candidate) -> bool {
        self.total_trials += candidate.trials;

        let improves = match &self.best {
            None => true,
            Some(best) => candidate
                .keypair
                .public_key()
                .is_better_than(best.keypair.public_key()),
        };

        if improves {
            debug!(
                public_key = %candidate.keypair.public_key(),
                total_trials = self.total_trials,
                "new global best"
            );
            self.best = Some(candidate);
        }
        improves
    }

    /// Returns the best candidate seen so far.
    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    pub fn total_trials(&self) -> u64 {
        self.total_trials
    }
}

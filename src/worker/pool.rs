//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver};

use crate::crypto::{KeySource, OsKeySource};
use crate::error::Result;

use super::cpu::{Worker, WorkerMessage};

/// A set of worker threads feeding one bounded candidate channel.
///
/// Dropping the pool detaches the threads. They keep running until the
/// receiver is dropped, the stop flag is set, or the process exits.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles
    handles: Vec<JoinHandle<()>>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
}

impl WorkerPool {
    /// Spawns `num_workers` workers, each with its own key source.
    ///
    /// The returned channel holds at most one pending candidate per worker,
    /// so a slow consumer throttles the workers.
    pub fn spawn<S, F>(
        num_workers: usize,
        mut make_source: F,
    ) -> Result<(Self, Receiver<WorkerMessage>)>
    where
        S: KeySource + Send + 'static,
        F: FnMut(usize) -> S,
    {
        let (candidate_tx, candidate_rx) = bounded(num_workers.max(1));
        let stop_flag = Arc::new(AtomicBool::new(false));

        let handles = (0..num_workers)
            .map(|id| {
                let worker = Worker::new(
                    id,
                    make_source(id),
                    candidate_tx.clone(),
                    stop_flag.clone(),
                );

                thread::Builder::new()
                    .name(format!("ygg-worker-{}", id))
                    .spawn(move || worker.run())
            })
            .collect::<std::io::Result<Vec<_>>>();

        let handles = match handles {
            Ok(handles) => handles,
            Err(e) => {
                // Wind down whatever did start
                stop_flag.store(true, Ordering::Relaxed);
                return Err(e.into());
            }
        };

        let pool = Self {
            num_workers,
            handles,
            stop_flag,
        };
        Ok((pool, candidate_rx))
    }

    /// Spawns workers that draw keys from the OS random source.
    pub fn spawn_os(num_workers: usize) -> Result<(Self, Receiver<WorkerMessage>)> {
        Self::spawn(num_workers, |_| OsKeySource)
    }

    /// Signals all workers to stop after their current key.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops the workers and waits for them to finish.
    ///
    /// The candidate receiver must be drained or dropped first, otherwise a
    /// worker blocked on a full channel never sees the stop flag.
    pub fn shutdown(self) {
        self.stop();
        for handle in self.handles {
            let _ = handle.join();
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

//! CPU worker that keeps generating keys and reports local improvements.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use tracing::{debug, error};

use crate::crypto::{KeySource, Keypair};
use crate::error::SearchError;
use crate::ranking::WORST_KEY;

/// A keypair that beat everything its worker had produced before it.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The generated keypair
    pub keypair: Keypair,
    /// Keys generated by the worker since its previous candidate, this one included
    pub trials: u64,
}

/// What a worker sends to the coordinator.
pub type WorkerMessage = Result<Candidate, SearchError>;

/// A worker that generates keypairs and forwards strict improvements.
pub struct Worker<S> {
    /// Worker ID
    id: usize,
    /// Where keypairs come from
    source: S,
    /// Channel to send candidates
    candidate_tx: Sender<WorkerMessage>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
}

impl<S: KeySource> Worker<S> {
    pub fn new(
        id: usize,
        source: S,
        candidate_tx: Sender<WorkerMessage>,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        Self {
            id,
            source,
            candidate_tx,
            stop_flag,
        }
    }

    /// Runs the worker loop.
    ///
    /// Generates keypairs until:
    /// - The stop flag is set
    /// - The coordinator hangs up (send fails)
    /// - The key source fails (the error is forwarded first)
    ///
    /// Sends block while the channel is full.
    pub fn run(mut self) {
        let mut best_seen = WORST_KEY;
        let mut trials: u64 = 0;

        while !self.stop_flag.load(Ordering::Relaxed) {
            let keypair = match self.source.generate() {
                Ok(keypair) => keypair,
                Err(e) => {
                    error!(worker = self.id, error = %e, "key source failed");
                    let _ = self.candidate_tx.send(Err(e));
                    return;
                }
            };
            trials += 1;

            if !keypair.public_key().is_better_than(&best_seen) {
                continue;
            }

            best_seen = *keypair.public_key();
            debug!(worker = self.id, trials, public_key = %best_seen, "local improvement");

            if self
                .candidate_tx
                .send(Ok(Candidate { keypair, trials }))
                .is_err()
            {
                break;
            }
            trials = 0;
        }

        debug!(worker = self.id, "worker stopped");
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::thread;
    use std::time::Duration;

    use crossbeam_channel::bounded;

    use crate::crypto::{PublicKey, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};

    /// Key source that replays a fixed list of public keys, then repeats the
    /// last one forever so no further candidates are emitted.
    pub(crate) struct ScriptedSource {
        script: VecDeque<PublicKey>,
        last: PublicKey,
    }

    impl ScriptedSource {
        pub(crate) fn new(first_bytes: &[u8]) -> Self {
            let script: VecDeque<_> = first_bytes.iter().map(|&b| uniform_key(b)).collect();
            let last = script.back().copied().unwrap_or(WORST_KEY);
            Self { script, last }
        }
    }

    impl KeySource for ScriptedSource {
        fn generate(&mut self) -> crate::error::Result<Keypair> {
            let public_key = match self.script.pop_front() {
                Some(key) => key,
                None => {
                    thread::yield_now();
                    self.last
                }
            };
            Ok(Keypair::from_parts([0u8; PRIVATE_KEY_LEN], public_key))
        }
    }

    /// Key source whose random generator is broken.
    struct FailingSource;

    impl KeySource for FailingSource {
        fn generate(&mut self) -> crate::error::Result<Keypair> {
            Err(SearchError::KeyGeneration(rand::Error::new(
                std::io::Error::other("entropy source unavailable"),
            )))
        }
    }

    /// A key with every byte set to `byte`; `0xff` gives the worst key.
    pub(crate) fn uniform_key(byte: u8) -> PublicKey {
        PublicKey::from_bytes([byte; PUBLIC_KEY_LEN])
    }

    fn spawn_worker<S: KeySource + Send + 'static>(
        source: S,
    ) -> (
        crossbeam_channel::Receiver<WorkerMessage>,
        Arc<AtomicBool>,
        thread::JoinHandle<()>,
    ) {
        let (tx, rx) = bounded(1);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let worker = Worker::new(0, source, tx, stop_flag.clone());
        let handle = thread::spawn(move || worker.run());
        (rx, stop_flag, handle)
    }

    #[test]
    fn test_emits_only_improvements() {
        let (rx, stop_flag, handle) = spawn_worker(ScriptedSource::new(&[0xff, 0x01, 0x00]));

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        let second = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();

        assert_eq!(*first.keypair.public_key(), uniform_key(0x01));
        assert_eq!(first.trials, 2);
        assert_eq!(*second.keypair.public_key(), uniform_key(0x00));
        assert_eq!(second.trials, 1);

        // The repeated tail never improves, so nothing more arrives
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        stop_flag.store(true, Ordering::Relaxed);
        drop(rx);
        handle.join().unwrap();
    }

    #[test]
    fn test_emissions_strictly_improve() {
        let script = [0xf0, 0xf8, 0x90, 0x90, 0xa0, 0x30, 0x31, 0x05];
        let (rx, stop_flag, handle) = spawn_worker(ScriptedSource::new(&script));

        let emitted: Vec<PublicKey> = (0..4)
            .map(|_| {
                *rx.recv_timeout(Duration::from_secs(5))
                    .unwrap()
                    .unwrap()
                    .keypair
                    .public_key()
            })
            .collect();

        assert_eq!(
            emitted,
            vec![
                uniform_key(0xf0),
                uniform_key(0x90),
                uniform_key(0x30),
                uniform_key(0x05),
            ]
        );
        for pair in emitted.windows(2) {
            assert!(pair[1].is_better_than(&pair[0]));
        }

        stop_flag.store(true, Ordering::Relaxed);
        drop(rx);
        handle.join().unwrap();
    }

    #[test]
    fn test_sentinel_never_emitted() {
        let (rx, stop_flag, handle) = spawn_worker(ScriptedSource::new(&[0xff, 0xff]));

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        stop_flag.store(true, Ordering::Relaxed);
        drop(rx);
        handle.join().unwrap();
    }

    #[test]
    fn test_exits_when_receiver_dropped() {
        let (rx, _stop_flag, handle) = spawn_worker(ScriptedSource::new(&[0x80, 0x40, 0x20]));
        drop(rx);
        handle.join().unwrap();
    }

    #[test]
    fn test_source_failure_is_forwarded() {
        let (rx, _stop_flag, handle) = spawn_worker(FailingSource);

        let message = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(message, Err(SearchError::KeyGeneration(_))));

        handle.join().unwrap();
    }
}

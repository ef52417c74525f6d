//! Worker loop and coordinator lifecycle for the parallel search.
//!
//! The search space is the non-negative integers, partitioned into
//! residue classes: worker `i` of `N` tries counters `i, i+N, i+2N, ...`
//! so the classes are pairwise disjoint and jointly exhaustive. Workers
//! race; the first match reported through a one-shot channel wins and
//! the rest are cancelled cooperatively.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{Sender, bounded};
use thiserror::Error;

use crate::object::CommitObject;
use crate::params::{CANCEL_CHECK_INTERVAL, DIGEST_LEN};
use crate::prefix::DigestPrefix;

/// Errors surfaced by search validation and setup.
///
/// Everything except [`SearchError::Spawn`] and
/// [`SearchError::WorkersExited`] is raised before any buffer is
/// allocated or thread created.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("digest prefix must be at most 20 bytes, got {len}")]
    PrefixTooLong { len: usize },

    #[error("half-digit matching requires a non-empty prefix")]
    EmptyHalfDigit,

    #[error("invalid hex digit {0:?} in prefix")]
    InvalidHex(char),

    #[error("failed to spawn search worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("all search workers exited without finding a match")]
    WorkersExited,
}

/// The result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The full commit object whose digest satisfies the target
    /// prefix, in git's serialized form (header included).
    pub object: Vec<u8>,
    /// The SHA-1 digest of `object`.
    pub digest: [u8; DIGEST_LEN],
}

/// A validated search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    content: Vec<u8>,
    prefix: DigestPrefix,
    workers: usize,
}

impl SearchRequest {
    /// Validate the request parameters.
    ///
    /// The commit body is treated as an opaque byte string; the caller
    /// is responsible for making sure a trailing nonce is cosmetically
    /// inert in it.
    pub fn new(
        content: impl Into<Vec<u8>>,
        prefix: DigestPrefix,
        workers: usize,
    ) -> Result<Self, SearchError> {
        if workers == 0 {
            return Err(SearchError::NoWorkers);
        }
        Ok(Self {
            content: content.into(),
            prefix,
            workers,
        })
    }

    /// Run the search, blocking until a worker finds a matching nonce.
    ///
    /// There is no timeout and no "not found" outcome; an unreachable
    /// prefix blocks forever.
    pub fn run(self) -> Result<Match, SearchError> {
        let cancel = Arc::new(AtomicBool::new(false));
        // Single-slot result channel: the first send wins, later sends
        // from straggler workers are dropped by `try_send`.
        let (tx, rx) = bounded::<Match>(1);

        let mut handles = Vec::with_capacity(self.workers);
        for index in 0..self.workers {
            let worker = Worker {
                object: CommitObject::build(&self.content),
                prefix: self.prefix.clone(),
                counter: index as u64,
                stride: self.workers as u64,
                cancel: Arc::clone(&cancel),
                results: tx.clone(),
            };
            let spawned = thread::Builder::new()
                .name(format!("shaforge-{index}"))
                .spawn(move || worker.run());
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    // Aborting condition: reclaim what already started,
                    // then give up. No retry semantics exist.
                    cancel.store(true, Ordering::Relaxed);
                    join_all(handles);
                    return Err(SearchError::Spawn(err));
                }
            }
        }

        // Drop the coordinator's sender so a mass worker exit (only
        // possible via panic) closes the channel instead of
        // deadlocking the receive below.
        drop(tx);

        let found = rx.recv().map_err(|_| SearchError::WorkersExited);
        cancel.store(true, Ordering::Relaxed);
        join_all(handles);
        found
    }
}

/// One search worker: a private buffer plus one residue class of the
/// counter space.
struct Worker {
    object: CommitObject,
    prefix: DigestPrefix,
    counter: u64,
    stride: u64,
    cancel: Arc<AtomicBool>,
    results: Sender<Match>,
}

impl Worker {
    /// The digest-and-test loop.
    ///
    /// The cancel flag is polled once per `CANCEL_CHECK_INTERVAL`
    /// iterations so the hot path stays free of synchronization.
    fn run(mut self) {
        loop {
            for _ in 0..CANCEL_CHECK_INTERVAL {
                self.object.write_nonce(self.counter);
                let digest = self.object.digest();
                if self.prefix.matches(&digest) {
                    let _ = self.results.try_send(Match {
                        object: self.object.into_bytes(),
                        digest,
                    });
                    return;
                }
                // Wraparound would restart another worker's residue
                // class; at realistic digest rates it is unreachable.
                self.counter = self.counter.wrapping_add(self.stride);
            }
            if self.cancel.load(Ordering::Relaxed) {
                return;
            }
        }
    }
}

fn join_all(handles: Vec<thread::JoinHandle<()>>) {
    for handle in handles {
        let _ = handle.join();
    }
}

/// Brute-force a commit object whose SHA-1 digest starts with
/// `target_prefix`.
///
/// Convenience wrapper over [`SearchRequest`]; blocks until a match is
/// found. With `half_digit` set, the last byte of `target_prefix`
/// contributes only its upper nibble as the final desired hex digit.
pub fn bruteforce(
    content: &[u8],
    target_prefix: &[u8],
    half_digit: bool,
    workers: usize,
) -> Result<Match, SearchError> {
    let prefix = DigestPrefix::new(target_prefix, half_digit)?;
    SearchRequest::new(content, prefix, workers)?.run()
}

//! Bounded worker pool for pair comparisons.
//!
//! ```text
//! producer ──► bounded chan (cap = N) ──► worker 0..N ──► results chan
//!    │                                        │
//!    └─ drop(tx) when all pairs are sent      └─ exit once the queue drains
//! ```
//!
//! `run` joins every worker before returning, so every pair yields exactly
//! one [`PairResult`].

use crate::compare::{ComparisonOutcome, FailureStage, PairComparator, PairResult};
use crate::model::ComparisonPair;
use crossbeam_channel as chan;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Default number of concurrent comparisons.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Runs comparisons on a fixed set of worker threads.
pub struct ComparisonPool<'a> {
    comparator: &'a dyn PairComparator,
    concurrency: usize,
    stop: Arc<AtomicBool>,
}

impl<'a> ComparisonPool<'a> {
    /// Pool with `concurrency` workers; zero is treated as one.
    pub fn new(comparator: &'a dyn PairComparator, concurrency: usize) -> Self {
        Self {
            comparator,
            concurrency: concurrency.max(1),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Flag that, once set, makes workers skip every pair not yet started.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Compare every pair and return one result per pair, in completion order.
    pub fn run(&self, pairs: Vec<ComparisonPair>) -> Vec<PairResult> {
        let total = pairs.len();
        let workers = self.concurrency.min(total.max(1));
        let (tx, rx) = chan::bounded::<ComparisonPair>(self.concurrency);
        let (result_tx, result_rx) = chan::unbounded::<PairResult>();

        tracing::info!("launching {} comparison workers", workers);

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            for wid in 0..workers {
                let rx = rx.clone();
                let result_tx = result_tx.clone();
                let comparator = self.comparator;
                let stop = &self.stop;
                handles.push(scope.spawn(move || worker_loop(wid, comparator, stop, &rx, &result_tx)));
            }
            // Only workers hold receivers and result senders from here on.
            drop(rx);
            drop(result_tx);

            for pair in pairs {
                if tx.send(pair).is_err() {
                    tracing::error!("all comparison workers exited early");
                    break;
                }
            }
            // End of work: workers exit once the queue drains.
            drop(tx);

            for handle in handles {
                if handle.join().is_err() {
                    tracing::error!("comparison worker panicked");
                }
            }
        });

        let results: Vec<PairResult> = result_rx.into_iter().collect();
        debug_assert_eq!(results.len(), total);
        results
    }
}

fn worker_loop(
    wid: usize,
    comparator: &dyn PairComparator,
    stop: &AtomicBool,
    rx: &chan::Receiver<ComparisonPair>,
    results: &chan::Sender<PairResult>,
) {
    let mut processed = 0usize;

    while let Ok(pair) = rx.recv() {
        let outcome = if stop.load(Ordering::Relaxed) {
            ComparisonOutcome::Skipped {
                reason: "cancelled".to_string(),
            }
        } else {
            catch_unwind(AssertUnwindSafe(|| comparator.compare(&pair))).unwrap_or_else(|_| {
                tracing::error!("comparison of {} panicked", pair.identity());
                ComparisonOutcome::Failed {
                    stage: FailureStage::Internal,
                    reason: "comparison panicked".to_string(),
                }
            })
        };

        processed += 1;
        // The receiver outlives every worker; a send can only fail if the
        // pool itself is being torn down.
        let _ = results.send(PairResult {
            project: pair.identity(),
            outcome,
        });
    }

    tracing::debug!("worker {} finished after {} pairs", wid, processed);
}

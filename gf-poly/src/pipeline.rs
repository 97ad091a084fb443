//! A bespoke producer/consumer pool for chained predicate searches.
//!
//! The driver owns a fixed set of long-lived worker threads, each with a
//! private job channel and one pending slot; completed results funnel back
//! through a single shared channel. The driver seeds every worker, then
//! blocks only while all workers are busy, re-feeding each worker as its
//! result arrives until the caller's callback accepts a result and stops the
//! run. Inputs are generated lazily and owned by value per task; the payload
//! is shared by all workers.
//!
//! Dispatch is eager, so when a run stops there may be results that finished
//! but were never delivered. In strict mode they are discarded; in non-strict
//! mode every such result is flushed through the callback before `run`
//! returns, which lets callers reconstruct the exact sequential outcome after
//! re-sorting.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// One unit of work: an input plus the shared payload to apply to it.
struct Job<I, O> {
    input: I,
    payload: Arc<dyn Fn(&I) -> O + Send + Sync>,
}

struct Worker<I, O> {
    jobs: Option<Sender<Job<I, O>>>,
    handle: Option<JoinHandle<()>>,
}

/// Fixed pool of `threads - 1` workers; with one thread (or none available)
/// every run degrades to a synchronous loop with identical semantics.
pub struct Pipeline<I, O> {
    workers: Vec<Worker<I, O>>,
    // Stays connected as long as any worker holds its sender clone.
    results: Receiver<(usize, I, O)>,
}

impl<I, O> Pipeline<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// Pool sized from the machine's available parallelism.
    pub fn new() -> Pipeline<I, O> {
        let threads = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Pipeline::with_threads(threads)
    }

    /// Pool with `threads - 1` workers; the remaining thread is the driver.
    pub fn with_threads(threads: usize) -> Pipeline<I, O> {
        let (results_tx, results) = channel();
        let worker_count = threads.saturating_sub(1);
        log::debug!("pipeline: spawning {} worker(s)", worker_count);

        let workers = (0..worker_count)
            .map(|index| {
                let results_tx = results_tx.clone();
                let (jobs_tx, jobs_rx) = channel::<Job<I, O>>();
                let handle = thread::spawn(move || {
                    while let Ok(job) = jobs_rx.recv() {
                        let output = (job.payload)(&job.input);
                        if results_tx.send((index, job.input, output)).is_err() {
                            break;
                        }
                    }
                });
                Worker {
                    jobs: Some(jobs_tx),
                    handle: Some(handle),
                }
            })
            .collect();

        Pipeline { workers, results }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Drives a search until the callback accepts a result.
    ///
    /// `input` produces candidates on demand, `payload` evaluates one
    /// candidate, and `callback` receives each `(input, output)` pair and
    /// returns `true` to accept it and stop the run. With `strict` false,
    /// results that had already completed when the run stopped are also
    /// flushed through the callback (its return value is ignored during the
    /// flush).
    pub fn run<G, F, C>(&mut self, mut input: G, payload: F, mut callback: C, strict: bool)
    where
        G: FnMut() -> I,
        F: Fn(&I) -> O + Send + Sync + 'static,
        C: FnMut(&I, &O) -> bool,
    {
        if self.workers.is_empty() {
            // Synchronous degradation: same contract, no handoff.
            loop {
                let candidate = input();
                let output = payload(&candidate);
                if callback(&candidate, &output) {
                    return;
                }
            }
        }

        let payload: Arc<dyn Fn(&I) -> O + Send + Sync> = Arc::new(payload);
        let mut busy = vec![false; self.workers.len()];

        for (index, worker) in self.workers.iter().enumerate() {
            Self::dispatch(worker, input(), &payload);
            busy[index] = true;
        }

        loop {
            // All workers hold work here, so this blocks only while nothing
            // is ready.
            let (index, candidate, output) = self
                .results
                .recv()
                .expect("pipeline worker terminated unexpectedly");
            busy[index] = false;
            if callback(&candidate, &output) {
                break;
            }
            Self::dispatch(&self.workers[index], input(), &payload);
            busy[index] = true;
        }

        // Drain stragglers; deliver them only in non-strict mode.
        let mut undelivered = Vec::new();
        while busy.iter().any(|&b| b) {
            let (index, candidate, output) = self
                .results
                .recv()
                .expect("pipeline worker terminated unexpectedly");
            busy[index] = false;
            if !strict {
                undelivered.push((candidate, output));
            }
        }
        for (candidate, output) in undelivered {
            callback(&candidate, &output);
        }
    }

    fn dispatch(worker: &Worker<I, O>, input: I, payload: &Arc<dyn Fn(&I) -> O + Send + Sync>) {
        if let Some(jobs) = &worker.jobs {
            // A send error means the worker is gone; the driver notices at
            // the next recv.
            let _ = jobs.send(Job {
                input,
                payload: Arc::clone(payload),
            });
        }
    }
}

impl<I, O> Default for Pipeline<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn default() -> Self {
        Pipeline::new()
    }
}

impl<I, O> Drop for Pipeline<I, O> {
    /// Teardown is the only cancellation: closing each job channel stops its
    /// worker, then all threads are joined.
    fn drop(&mut self) {
        for worker in &mut self.workers {
            worker.jobs = None;
        }
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn is_prime(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        let mut d = 2;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 1;
        }
        true
    }

    /// Runs a find-first-k-primes search and returns the accepted set.
    fn search(threads: usize, wanted: usize, strict: bool) -> BTreeSet<u64> {
        let mut pipeline: Pipeline<u64, bool> = Pipeline::with_threads(threads);
        let mut next = 0u64;
        let mut accepted = BTreeSet::new();
        pipeline.run(
            || {
                let n = next;
                next += 1;
                n
            },
            |&n| is_prime(n),
            |&n, &prime| {
                if prime {
                    accepted.insert(n);
                }
                accepted.len() >= wanted
            },
            strict,
        );
        accepted
    }

    #[test]
    fn test_synchronous_degradation_finds_first_primes() {
        for threads in [0usize, 1] {
            let found = search(threads, 5, true);
            assert_eq!(found, BTreeSet::from([2, 3, 5, 7, 11]));
        }
    }

    #[test]
    fn test_nonstrict_contains_leading_primes() {
        // Every candidate dispatched before the stop is flushed in
        // non-strict mode, so the first primes are always present.
        let found = search(4, 5, false);
        assert!(
            found.is_superset(&BTreeSet::from([2, 3, 5, 7, 11])),
            "non-strict run lost leading primes: {:?}",
            found
        );
    }

    #[test]
    fn test_strict_accepts_exactly_requested_amount() {
        let found = search(4, 5, true);
        assert_eq!(found.len(), 5);
        assert!(found.iter().all(|&n| is_prime(n)));
    }

    #[test]
    fn test_single_thread_strict_equals_nonstrict() {
        // Without workers there is nothing to flush, so the modes coincide.
        assert_eq!(search(1, 7, true), search(1, 7, false));
    }

    #[test]
    fn test_pool_reuse_across_runs() {
        let mut pipeline: Pipeline<u64, bool> = Pipeline::with_threads(3);
        for wanted in [1usize, 3] {
            let mut next = 0u64;
            let mut count = 0usize;
            pipeline.run(
                || {
                    let n = next;
                    next += 1;
                    n
                },
                |&n| is_prime(n),
                |_, &prime| {
                    if prime {
                        count += 1;
                    }
                    count >= wanted
                },
                false,
            );
            assert!(count >= wanted);
        }
    }

    #[test]
    fn test_drop_joins_cleanly() {
        let pipeline: Pipeline<u64, u64> = Pipeline::with_threads(8);
        assert_eq!(pipeline.worker_count(), 7);
        drop(pipeline);
    }
}

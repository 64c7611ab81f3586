//! Fixed-size parallel batch execution.
//!
//! [`run_in_threads`] splits a slice into `workers` contiguous batches and
//! runs every batch on a dedicated worker thread. Each worker writes only
//! into its own slice of the pre-allocated output, so results come back in
//! input order without any locking. The call returns once every worker has
//! finished; there is no cancellation.

use crate::error::{IsochroneError, Result};
use crate::validation::validate_worker_count;
use rayon::prelude::*;
use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

/// Number of items each worker receives: `ceil(len / workers)`.
#[inline]
pub fn batch_size(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.max(1))
}

/// Half-open index range processed by `worker`.
///
/// Trailing workers get an empty range when there are more workers than
/// items.
///
/// # Examples
///
/// ```
/// use isochrones::parallel::batch_range;
///
/// assert_eq!(batch_range(10, 3, 0), 0..4);
/// assert_eq!(batch_range(10, 3, 2), 8..10);
/// assert!(batch_range(2, 4, 3).is_empty());
/// ```
pub fn batch_range(len: usize, workers: usize, worker: usize) -> Range<usize> {
    let size = batch_size(len, workers);
    let start = worker.saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

/// Apply `task` to every item on `workers` threads.
///
/// `output[i] == task(&items[i], worker)` where `worker` is the index of the
/// batch containing `i`. Output slots are pre-filled with `O::default()`.
///
/// A task error stops its own worker; the other workers run to completion
/// and the first failure, in worker order, is returned. A panicking task is
/// caught at the worker boundary and reported as
/// [`IsochroneError::WorkerPanicked`].
///
/// # Examples
///
/// ```
/// use isochrones::parallel::run_in_threads;
///
/// let items: Vec<u64> = (0..1000).collect();
/// let squares = run_in_threads(&items, 4, |x, _worker| Ok(x * x))?;
/// assert_eq!(squares[31], 961);
/// # Ok::<(), isochrones::IsochroneError>(())
/// ```
pub fn run_in_threads<I, O, F>(items: &[I], workers: usize, task: F) -> Result<Vec<O>>
where
    I: Sync,
    O: Default + Send,
    F: Fn(&I, usize) -> Result<O> + Sync,
{
    validate_worker_count(workers)?;

    let mut results: Vec<O> = Vec::with_capacity(items.len());
    results.resize_with(items.len(), O::default);

    if items.is_empty() {
        return Ok(results);
    }

    let batch = batch_size(items.len(), workers);
    log::debug!(
        "Running {} items on {} workers, batch size {}",
        items.len(),
        workers,
        batch
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("isochrones-worker-{}", index))
        .build()?;

    let outcomes: Vec<Result<()>> = pool.install(|| {
        results
            .par_chunks_mut(batch)
            .zip(items.par_chunks(batch))
            .enumerate()
            .map(|(worker, (output, input))| run_batch(worker, input, output, &task))
            .collect()
    });

    for outcome in outcomes {
        if let Err(e) = outcome {
            log::debug!("Batch run failed: {}", e);
            return Err(e);
        }
    }

    Ok(results)
}

fn run_batch<I, O, F>(worker: usize, input: &[I], output: &mut [O], task: &F) -> Result<()>
where
    F: Fn(&I, usize) -> Result<O>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<()> {
        for (item, slot) in input.iter().zip(output.iter_mut()) {
            *slot = task(item, worker)?;
        }
        Ok(())
    }));

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(IsochroneError::WorkerPanicked {
            worker,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[test]
    fn test_batch_ranges_cover_input() {
        for len in [0usize, 1, 7, 16, 100, 101] {
            for workers in 1..=20 {
                let mut next = 0;
                for worker in 0..workers {
                    let range = batch_range(len, workers, worker);
                    assert_eq!(range.start, next.min(len));
                    next = range.end;
                }
                assert_eq!(next, len, "len {} workers {}", len, workers);
            }
        }
    }

    #[test]
    fn test_batch_size_rounds_up() {
        assert_eq!(batch_size(10, 3), 4);
        assert_eq!(batch_size(9, 3), 3);
        assert_eq!(batch_size(1, 16), 1);
        assert_eq!(batch_size(0, 4), 0);
    }

    #[test]
    fn test_worker_index_matches_partition() {
        let items: Vec<usize> = (0..103).collect();
        let workers = 8;
        let seen = run_in_threads(&items, workers, |&i, worker| Ok((i, worker))).unwrap();

        for (i, worker) in seen {
            assert!(batch_range(items.len(), workers, worker).contains(&i));
        }
    }

    #[test]
    fn test_more_workers_than_items() {
        let items = vec![1, 2, 3];
        let out = run_in_threads(&items, 10, |x, _| Ok(x * 10)).unwrap();
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<i32> = Vec::new();
        let out: Vec<i32> = run_in_threads(&items, 4, |x, _| Ok(*x)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let items = vec![1];
        let err = run_in_threads(&items, 0, |x, _| Ok(*x)).unwrap_err();
        assert!(matches!(err, IsochroneError::InvalidInput(_)));
    }

    #[test]
    fn test_error_waits_for_other_workers() {
        let items: Vec<usize> = (0..40).collect();
        let finished = Mutex::new(HashSet::new());

        let err = run_in_threads(&items, 4, |&i, worker| {
            if i == 0 {
                return Err(IsochroneError::InvalidInput("item 0".to_string()));
            }
            if worker != 0 {
                finished.lock().unwrap().insert(i);
            }
            Ok(i)
        })
        .unwrap_err();

        assert!(matches!(err, IsochroneError::InvalidInput(ref m) if m == "item 0"));
        // Workers 1..4 own items 10..40 and all ran to completion.
        assert_eq!(finished.lock().unwrap().len(), 30);
    }

    #[test]
    fn test_first_failure_in_worker_order() {
        let items: Vec<usize> = (0..20).collect();
        let err = run_in_threads(&items, 4, |&i, worker| {
            if i % 5 == 4 {
                return Err(IsochroneError::InvalidInput(format!("worker {}", worker)));
            }
            Ok(i)
        })
        .unwrap_err();

        assert!(matches!(err, IsochroneError::InvalidInput(ref m) if m == "worker 0"));
    }

    #[test]
    fn test_panic_is_reported() {
        let items: Vec<usize> = (0..8).collect();
        let err = run_in_threads(&items, 2, |&i, _| {
            if i == 6 {
                panic!("bad item {}", i);
            }
            Ok(i)
        })
        .unwrap_err();

        match err {
            IsochroneError::WorkerPanicked { worker, message } => {
                assert_eq!(worker, 1);
                assert_eq!(message, "bad item 6");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}

// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Bounded worker pool over chunk ranges.
//!
//! Work on m items is balanced into at most `limit` contiguous ranges,
//! each handled by one scoped OS thread. Workers own their per-range
//! state (big-integer contexts are not thread-safe) and hand results back
//! by move; the caller reassembles them in natural index order. The first
//! error cancels the pool: remaining workers stop at their next
//! iteration and only the first error is reported.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::errors::{Error, Result};

/// Splits [0, length) into ⌈length/chunks⌉-sized ranges. The final range
/// may be shorter.
pub(crate) fn balance_indices(length: usize, chunks: usize) -> Vec<Range<usize>> {
    let chunks = chunks.max(1);
    let chunk_size = (length + chunks - 1) / chunks;
    let mut ranges = Vec::new();

    let mut start = 0;
    while start < length {
        let end = (start + chunk_size).min(length);
        ranges.push(start..end);
        start = end;
    }

    ranges
}

/// Runs `work` over every index in [0, length) with at most `limit`
/// concurrent workers, returning the results in index order.
///
/// `init` builds the per-worker state inside the worker's thread; the
/// state never crosses thread boundaries and is dropped on every exit
/// path.
pub(crate) fn run_chunks<S, T, I, F>(limit: usize, length: usize, init: I, work: F) -> Result<Vec<T>>
where
    T: Send,
    I: Fn() -> Result<S> + Sync,
    F: Fn(&mut S, usize) -> Result<T> + Sync,
{
    if length == 0 {
        return Ok(Vec::new());
    }

    let ranges = balance_indices(length, limit.min(length));
    let cancelled = AtomicBool::new(false);

    let outputs = thread::scope(|scope| {
        let handles = ranges
            .into_iter()
            .map(|range| {
                let cancelled = &cancelled;
                let init = &init;
                let work = &work;

                scope.spawn(move || -> Result<Vec<(usize, T)>> {
                    let mut state = match init() {
                        Ok(state) => state,
                        Err(err) => {
                            cancelled.store(true, Ordering::Relaxed);
                            return Err(err);
                        }
                    };

                    let mut values = Vec::with_capacity(range.len());

                    for index in range {
                        if cancelled.load(Ordering::Relaxed) {
                            break;
                        }

                        match work(&mut state, index) {
                            Ok(value) => values.push((index, value)),
                            Err(err) => {
                                cancelled.store(true, Ordering::Relaxed);
                                return Err(err);
                            }
                        }
                    }

                    Ok(values)
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect::<Vec<_>>()
    });

    let mut slots: Vec<Option<T>> = Vec::with_capacity(length);
    slots.resize_with(length, || None);

    for output in outputs {
        for (index, value) in output? {
            slots[index] = Some(value);
        }
    }

    // all workers succeeded, so every slot has been written
    slots
        .into_iter()
        .map(|slot| slot.ok_or(Error::backend("worker_pool", "missing result slot")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_indices_covers_range() {
        for (length, chunks) in [(10, 3), (10, 10), (1, 4), (7, 2), (16, 16), (5, 1)] {
            let ranges = balance_indices(length, chunks);

            assert!(ranges.len() <= chunks);

            let mut next = 0;
            for range in &ranges {
                assert_eq!(range.start, next);
                next = range.end;
            }
            assert_eq!(next, length);
        }
    }

    #[test]
    fn test_balance_indices_empty() {
        assert!(balance_indices(0, 4).is_empty());
    }

    #[test]
    fn test_run_chunks_in_order() {
        let values = run_chunks(4, 100, || Ok(()), |_, index| Ok(index * 2)).unwrap();

        assert_eq!(values.len(), 100);
        for (index, value) in values.iter().enumerate() {
            assert_eq!(*value, index * 2);
        }
    }

    #[test]
    fn test_run_chunks_single_worker_matches() {
        let serial = run_chunks(1, 37, || Ok(()), |_, index| Ok(index + 1)).unwrap();
        let parallel = run_chunks(8, 37, || Ok(()), |_, index| Ok(index + 1)).unwrap();

        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_run_chunks_reports_error() {
        let result: Result<Vec<usize>> = run_chunks(
            4,
            64,
            || Ok(()),
            |_, index| {
                if index == 5 {
                    Err(Error::EmptySecret)
                } else {
                    Ok(index)
                }
            },
        );

        assert!(matches!(result, Err(Error::EmptySecret)));
    }

    #[test]
    fn test_run_chunks_init_error() {
        let result: Result<Vec<usize>> =
            run_chunks(4, 8, || Err(Error::InvalidPrime), |_: &mut (), index| Ok(index));

        assert!(matches!(result, Err(Error::InvalidPrime)));
    }
}

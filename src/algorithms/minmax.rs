//! `min_element`, `max_element`, and `minmax_element`.
//!
//! Index semantics follow the classic sequential definitions: the *first*
//! smallest element, the *first* largest element, and for `minmax_element`
//! the pair (first smallest, last largest). Per-chunk candidates are combined
//! in chunk order, so ties resolve identically for every chunk count.

use crate::{
    partition::{plan, run, split_ref},
    result::AlgorithmResult,
    Error, Policy,
};

/// Returns the index of the first smallest element, or `None` if empty.
pub fn min_element<T>(policy: &Policy, data: &[T]) -> AlgorithmResult<Option<usize>>
where
    T: Ord + Sync,
{
    AlgorithmResult::wrap(policy, min_inner(policy, data))
}

/// Returns the index of the first largest element, or `None` if empty.
pub fn max_element<T>(policy: &Policy, data: &[T]) -> AlgorithmResult<Option<usize>>
where
    T: Ord + Sync,
{
    AlgorithmResult::wrap(policy, max_inner(policy, data))
}

/// Returns the indices of the first smallest and the last largest element,
/// or `None` if empty.
pub fn minmax_element<T>(policy: &Policy, data: &[T]) -> AlgorithmResult<Option<(usize, usize)>>
where
    T: Ord + Sync,
{
    AlgorithmResult::wrap(policy, minmax_inner(policy, data))
}

fn offset_jobs<'a, T>(policy: &Policy, data: &'a [T]) -> Vec<(usize, &'a [T])> {
    let chunks = plan(policy, data.len());
    chunks
        .iter()
        .map(|chunk| chunk.offset)
        .zip(split_ref(&chunks, data))
        .collect()
}

fn min_inner<T>(policy: &Policy, data: &[T]) -> Result<Option<usize>, Error>
where
    T: Ord + Sync,
{
    run(
        policy,
        offset_jobs(policy, data),
        |(offset, chunk): (usize, &[T])| {
            let mut best = 0;
            for (i, item) in chunk.iter().enumerate().skip(1) {
                if *item < chunk[best] {
                    best = i;
                }
            }
            offset + best
        },
        |candidates| {
            candidates.into_iter().reduce(|best, next| {
                if data[next] < data[best] {
                    next
                } else {
                    best
                }
            })
        },
    )
}

fn max_inner<T>(policy: &Policy, data: &[T]) -> Result<Option<usize>, Error>
where
    T: Ord + Sync,
{
    run(
        policy,
        offset_jobs(policy, data),
        |(offset, chunk): (usize, &[T])| {
            let mut best = 0;
            for (i, item) in chunk.iter().enumerate().skip(1) {
                if *item > chunk[best] {
                    best = i;
                }
            }
            offset + best
        },
        |candidates| {
            candidates.into_iter().reduce(|best, next| {
                if data[next] > data[best] {
                    next
                } else {
                    best
                }
            })
        },
    )
}

fn minmax_inner<T>(policy: &Policy, data: &[T]) -> Result<Option<(usize, usize)>, Error>
where
    T: Ord + Sync,
{
    run(
        policy,
        offset_jobs(policy, data),
        |(offset, chunk): (usize, &[T])| {
            let (mut min, mut max) = (0, 0);
            for (i, item) in chunk.iter().enumerate().skip(1) {
                if *item < chunk[min] {
                    min = i;
                }
                if *item >= chunk[max] {
                    max = i;
                }
            }
            (offset + min, offset + max)
        },
        |candidates| {
            candidates
                .into_iter()
                .reduce(|(best_min, best_max), (min, max)| {
                    (
                        if data[min] < data[best_min] {
                            min
                        } else {
                            best_min
                        },
                        if data[max] >= data[best_max] {
                            max
                        } else {
                            best_max
                        },
                    )
                })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::ThreadPoolBuilder;
    use std::sync::Arc;

    fn par() -> Policy {
        let pool = Arc::new(ThreadPoolBuilder::new().num_threads(4).build().unwrap());
        Policy::par(pool)
    }

    #[test]
    fn first_minimum_wins_ties_across_chunks() {
        let data = [3, 1, 2, 1, 5];
        for chunk_size in 1..=5 {
            let found = min_element(&par().with_chunk_size(chunk_size), &data)
                .wait()
                .unwrap();
            assert_eq!(found, Some(1));
        }
    }

    #[test]
    fn first_maximum_wins_ties_across_chunks() {
        let data = [3, 5, 2, 5, 1];
        for chunk_size in 1..=5 {
            let found = max_element(&par().with_chunk_size(chunk_size), &data)
                .wait()
                .unwrap();
            assert_eq!(found, Some(1));
        }
    }

    #[test]
    fn minmax_takes_first_min_and_last_max() {
        let data = [2, 1, 5, 1, 5, 3];
        for chunk_size in 1..=6 {
            let found = minmax_element(&par().with_chunk_size(chunk_size), &data)
                .wait()
                .unwrap();
            assert_eq!(found, Some((1, 4)));
        }
    }

    #[test]
    fn empty_range_yields_none() {
        let data: [u32; 0] = [];
        assert_eq!(min_element(&par(), &data).wait().unwrap(), None);
        assert_eq!(max_element(&par(), &data).wait().unwrap(), None);
        assert_eq!(minmax_element(&par(), &data).wait().unwrap(), None);
    }
}

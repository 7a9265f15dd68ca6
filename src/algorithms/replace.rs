//! `replace`, `replace_if`, `replace_copy`, and `replace_copy_if`.
//!
//! Exactly one comparison (or predicate application) happens per element;
//! non-matching elements are left untouched.

use super::check_dst;
use crate::{
    partition::{plan, run, split_mut, split_ref},
    result::AlgorithmResult,
    Error, Policy,
};

/// Replaces every element equal to `old` with a clone of `new`, in place.
pub fn replace<T>(policy: &Policy, data: &mut [T], old: &T, new: &T) -> AlgorithmResult<()>
where
    T: Clone + PartialEq + Send + Sync,
{
    AlgorithmResult::wrap(policy, replace_if_inner(policy, data, &|x| x == old, new))
}

/// Replaces every element satisfying `pred` with a clone of `new`, in place.
pub fn replace_if<T, F>(policy: &Policy, data: &mut [T], pred: F, new: &T) -> AlgorithmResult<()>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    AlgorithmResult::wrap(policy, replace_if_inner(policy, data, &pred, new))
}

/// Copies `src` into `dst`, substituting a clone of `new` for every element
/// equal to `old`. Returns the number of elements written.
pub fn replace_copy<T>(
    policy: &Policy,
    src: &[T],
    dst: &mut [T],
    old: &T,
    new: &T,
) -> AlgorithmResult<usize>
where
    T: Clone + PartialEq + Send + Sync,
{
    AlgorithmResult::wrap(
        policy,
        replace_copy_if_inner(policy, src, dst, &|x| x == old, new),
    )
}

/// Copies `src` into `dst`, substituting a clone of `new` for every element
/// satisfying `pred`. Returns the number of elements written.
pub fn replace_copy_if<T, F>(
    policy: &Policy,
    src: &[T],
    dst: &mut [T],
    pred: F,
    new: &T,
) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    AlgorithmResult::wrap(policy, replace_copy_if_inner(policy, src, dst, &pred, new))
}

fn replace_if_inner<T, F>(
    policy: &Policy,
    data: &mut [T],
    pred: &F,
    new: &T,
) -> Result<(), Error>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    let chunks = plan(policy, data.len());
    let jobs = split_mut(&chunks, data);
    run(
        policy,
        jobs,
        |chunk| {
            for item in chunk.iter_mut() {
                if pred(item) {
                    *item = new.clone();
                }
            }
        },
        |_| (),
    )
}

fn replace_copy_if_inner<T, F>(
    policy: &Policy,
    src: &[T],
    dst: &mut [T],
    pred: &F,
    new: &T,
) -> Result<usize, Error>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    let count = src.len();
    check_dst(count, dst.len())?;
    let chunks = plan(policy, count);
    let jobs: Vec<(&[T], &mut [T])> = split_ref(&chunks, src)
        .into_iter()
        .zip(split_mut(&chunks, &mut dst[..count]))
        .collect();
    run(
        policy,
        jobs,
        |(src, dst)| {
            for (item, out) in src.iter().zip(dst.iter_mut()) {
                *out = if pred(item) { new.clone() } else { item.clone() };
            }
            src.len()
        },
        |counts| counts.into_iter().sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::ThreadPoolBuilder;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn par() -> Policy {
        let pool = Arc::new(ThreadPoolBuilder::new().num_threads(4).build().unwrap());
        Policy::par(pool)
    }

    #[test]
    fn replace_touches_only_matches() {
        let mut data = [1, 2, 1, 3, 1];
        replace(&par().with_chunk_size(2), &mut data, &1, &9)
            .wait()
            .unwrap();
        assert_eq!(data, [9, 2, 9, 3, 9]);
    }

    #[test]
    fn replace_if_applies_predicate_exactly_once_per_element() {
        let mut data: Vec<u32> = (0..1000).collect();
        let calls = AtomicUsize::new(0);
        replace_if(
            &par().with_chunk_size(17),
            &mut data,
            |&x| {
                calls.fetch_add(1, Ordering::SeqCst);
                x % 3 == 0
            },
            &0,
        )
        .wait()
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1000);
        assert!(data.iter().enumerate().all(|(i, &x)| {
            if i % 3 == 0 {
                x == 0
            } else {
                x == i as u32
            }
        }));
    }

    #[test]
    fn replace_copy_leaves_source_untouched() {
        let src = ["a", "b", "a"];
        let mut dst = [""; 3];
        let written = replace_copy(&Policy::seq(), &src, &mut dst, &"a", &"z")
            .wait()
            .unwrap();
        assert_eq!(written, 3);
        assert_eq!(src, ["a", "b", "a"]);
        assert_eq!(dst, ["z", "b", "z"]);
    }

    #[test]
    fn replace_copy_if_on_empty_range() {
        let src: [i32; 0] = [];
        let mut dst: [i32; 0] = [];
        let written = replace_copy_if(&par(), &src, &mut dst, |_| true, &0)
            .wait()
            .unwrap();
        assert_eq!(written, 0);
    }
}

//! `merge`, `merge_by`, and `inplace_merge`.
//!
//! Stable: when elements compare equal, those from the first range come
//! first. Parallelization chunks the first range and binary-searches the
//! matching split point in the second (hence both inputs must be random
//! access), so the chunk boundaries land identically regardless of pool size
//! and stability is independent of chunk count.

use super::check_dst;
use crate::{
    partition::{plan, run},
    result::AlgorithmResult,
    Error, Policy,
};
use std::cmp::Ordering;

/// Merges two sorted slices into `dst`. Returns the number of elements
/// written (`a.len() + b.len()`).
pub fn merge<T>(policy: &Policy, a: &[T], b: &[T], dst: &mut [T]) -> AlgorithmResult<usize>
where
    T: Ord + Clone + Send + Sync,
{
    AlgorithmResult::wrap(policy, merge_inner(policy, a, b, dst, &T::cmp))
}

/// Merges two slices sorted under `cmp` into `dst`.
pub fn merge_by<T, F>(
    policy: &Policy,
    a: &[T],
    b: &[T],
    dst: &mut [T],
    cmp: F,
) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    AlgorithmResult::wrap(policy, merge_inner(policy, a, b, dst, &cmp))
}

/// Merges the two sorted halves `data[..mid]` and `data[mid..]` in place.
///
/// Parallelized via an extra buffer: the slice is snapshotted, then merged
/// back chunk-wise.
pub fn inplace_merge<T>(policy: &Policy, data: &mut [T], mid: usize) -> AlgorithmResult<()>
where
    T: Ord + Clone + Send + Sync,
{
    AlgorithmResult::wrap(policy, inplace_merge_inner(policy, data, mid))
}

fn inplace_merge_inner<T>(policy: &Policy, data: &mut [T], mid: usize) -> Result<(), Error>
where
    T: Ord + Clone + Send + Sync,
{
    if mid > data.len() {
        return Err(Error::InvalidMidpoint {
            mid,
            len: data.len(),
        });
    }
    let buf = data.to_vec();
    let (a, b) = buf.split_at(mid);
    merge_inner(policy, a, b, data, &T::cmp)?;
    Ok(())
}

fn merge_inner<T, F>(
    policy: &Policy,
    a: &[T],
    b: &[T],
    dst: &mut [T],
    cmp: &F,
) -> Result<usize, Error>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    let total = a.len() + b.len();
    check_dst(total, dst.len())?;
    let chunks = plan(policy, a.len());
    if chunks.is_empty() {
        dst[..b.len()].clone_from_slice(b);
        return Ok(total);
    }

    // For each chunk boundary in `a`, everything in `b` strictly less than
    // the boundary element merges before it; equal elements of `b` sort after
    // (ties favor `a`). The thresholds are non-decreasing, so the splits are
    // too; the `max` guards against a comparator that is not a strict weak
    // ordering.
    let mut splits = Vec::with_capacity(chunks.len() + 1);
    splits.push(0);
    for chunk in &chunks[1..] {
        let pivot = &a[chunk.offset];
        let bound = b.partition_point(|item| cmp(item, pivot) == Ordering::Less);
        splits.push(bound.max(*splits.last().unwrap_or(&0)));
    }
    splits.push(b.len());

    // Destination segments are contiguous and ascending, so successive
    // split_at_mut calls hand each chunk its own output window.
    let mut jobs = Vec::with_capacity(chunks.len());
    let mut rest = &mut dst[..total];
    for (i, chunk) in chunks.iter().enumerate() {
        let a_part = &a[chunk.offset..chunk.end()];
        let b_part = &b[splits[i]..splits[i + 1]];
        let (out, tail) = std::mem::take(&mut rest).split_at_mut(a_part.len() + b_part.len());
        jobs.push((a_part, b_part, out));
        rest = tail;
    }
    run(
        policy,
        jobs,
        |(a_part, b_part, out): (&[T], &[T], &mut [T])| seq_merge(a_part, b_part, out, cmp),
        |counts| counts.into_iter().sum(),
    )
}

/// Stable sequential merge of one chunk.
fn seq_merge<T, F>(a: &[T], b: &[T], out: &mut [T], cmp: &F) -> usize
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_b = i == a.len() || (j < b.len() && cmp(&b[j], &a[i]) == Ordering::Less);
        if take_b {
            *slot = b[j].clone();
            j += 1;
        } else {
            *slot = a[i].clone();
            i += 1;
        }
    }
    a.len() + b.len()
}

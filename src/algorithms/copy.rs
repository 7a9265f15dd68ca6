//! `copy`, `copy_n`, and `copy_if`.

use super::check_dst;
use crate::{
    partition::{plan, run, split_mut, split_ref},
    result::AlgorithmResult,
    scan, Error, Policy,
};

/// Copies `src` into the front of `dst`.
///
/// Performs exactly `src.len()` element assignments and returns that count
/// (the index one past the last element written).
pub fn copy<T>(policy: &Policy, src: &[T], dst: &mut [T]) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
{
    AlgorithmResult::wrap(policy, copy_inner(policy, src, dst))
}

/// Copies the first `count` elements of `src` into the front of `dst`.
///
/// A negative or zero `count` performs zero operations and returns 0; this
/// is a deliberate leniency, not a failure. A `count` beyond `src.len()` is
/// clamped.
pub fn copy_n<T>(policy: &Policy, src: &[T], count: isize, dst: &mut [T]) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
{
    let count = usize::try_from(count).unwrap_or(0).min(src.len());
    AlgorithmResult::wrap(policy, copy_inner(policy, &src[..count], dst))
}

/// Copies the elements of `src` satisfying `pred` into the front of `dst`,
/// preserving their relative order, and returns how many were written.
///
/// Parallelized with the scan partitioner: each chunk first records which of
/// its elements to keep (in its own slice of one shared flag buffer), the
/// per-chunk keep counts are carried left-to-right to fix each chunk's
/// destination offset, and only then does each chunk write its survivors.
pub fn copy_if<T, F>(policy: &Policy, src: &[T], dst: &mut [T], pred: F) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    AlgorithmResult::wrap(policy, copy_if_inner(policy, src, dst, &pred))
}

fn copy_inner<T>(policy: &Policy, src: &[T], dst: &mut [T]) -> Result<usize, Error>
where
    T: Clone + Send + Sync,
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
        |(src, dst)| seq_copy(src, dst),
        |counts| counts.into_iter().sum(),
    )
}

fn copy_if_inner<T, F>(
    policy: &Policy,
    src: &[T],
    dst: &mut [T],
    pred: &F,
) -> Result<usize, Error>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    let chunks = plan(policy, src.len());
    let mut flags = vec![false; src.len()];
    let jobs: Vec<(&[T], &mut [bool])> = split_ref(&chunks, src)
        .into_iter()
        .zip(split_mut(&chunks, &mut flags))
        .collect();
    scan::run(
        policy,
        jobs,
        |job| {
            let (chunk, flags) = job;
            let mut kept = 0;
            for (flag, item) in flags.iter_mut().zip(chunk.iter()) {
                *flag = pred(item);
                kept += *flag as usize;
            }
            kept
        },
        |a, b| a + b,
        0usize,
        |jobs, kept_counts, _carries, total| {
            check_dst(*total, dst.len())?;
            // Split the destination at the carry offsets: chunk i writes
            // exactly kept_counts[i] elements starting where the survivors of
            // all earlier chunks end.
            let mut segments = Vec::with_capacity(jobs.len());
            let mut rest = &mut dst[..*total];
            for &kept in kept_counts {
                let (segment, tail) = std::mem::take(&mut rest).split_at_mut(kept);
                segments.push(segment);
                rest = tail;
            }
            Ok(jobs
                .into_iter()
                .zip(segments)
                .map(|((chunk, flags), segment)| (chunk, flags, segment))
                .collect::<Vec<_>>())
        },
        |(chunk, flags, segment): (&[T], &mut [bool], &mut [T])| {
            let mut written = 0;
            for (item, &keep) in chunk.iter().zip(flags.iter()) {
                if keep {
                    segment[written] = item.clone();
                    written += 1;
                }
            }
            written
        },
        |total, _written| *total,
    )
}

/// The direct single-chunk loop.
fn seq_copy<T: Clone>(src: &[T], dst: &mut [T]) -> usize {
    dst.clone_from_slice(src);
    src.len()
}

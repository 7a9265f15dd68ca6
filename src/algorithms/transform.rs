//! `transform` and its binary variant.

use super::check_dst;
use crate::{
    partition::{plan, run, split_mut, split_ref},
    result::AlgorithmResult,
    Error, Policy,
};

/// Applies `f` to every element of `src`, writing results into the front of
/// `dst`. Returns the number of elements written.
pub fn transform<T, U, F>(policy: &Policy, src: &[T], dst: &mut [U], f: F) -> AlgorithmResult<usize>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Send + Sync,
{
    AlgorithmResult::wrap(policy, transform_inner(policy, src, dst, &f))
}

/// Applies `f` elementwise to the common prefix of `a` and `b`, writing
/// results into the front of `dst`. Returns `min(a.len(), b.len())`; a
/// length mismatch is treated as "stop at the shorter range", never a failure.
pub fn transform2<T, S, U, F>(
    policy: &Policy,
    a: &[T],
    b: &[S],
    dst: &mut [U],
    f: F,
) -> AlgorithmResult<usize>
where
    T: Sync,
    S: Sync,
    U: Send,
    F: Fn(&T, &S) -> U + Send + Sync,
{
    AlgorithmResult::wrap(policy, transform2_inner(policy, a, b, dst, &f))
}

fn transform_inner<T, U, F>(
    policy: &Policy,
    src: &[T],
    dst: &mut [U],
    f: &F,
) -> Result<usize, Error>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Send + Sync,
{
    let count = src.len();
    check_dst(count, dst.len())?;
    let chunks = plan(policy, count);
    let jobs: Vec<(&[T], &mut [U])> = split_ref(&chunks, src)
        .into_iter()
        .zip(split_mut(&chunks, &mut dst[..count]))
        .collect();
    run(
        policy,
        jobs,
        |(src, dst)| {
            for (item, out) in src.iter().zip(dst.iter_mut()) {
                *out = f(item);
            }
            src.len()
        },
        |counts| counts.into_iter().sum(),
    )
}

fn transform2_inner<T, S, U, F>(
    policy: &Policy,
    a: &[T],
    b: &[S],
    dst: &mut [U],
    f: &F,
) -> Result<usize, Error>
where
    T: Sync,
    S: Sync,
    U: Send,
    F: Fn(&T, &S) -> U + Send + Sync,
{
    let count = a.len().min(b.len());
    check_dst(count, dst.len())?;
    let chunks = plan(policy, count);
    let jobs: Vec<((&[T], &[S]), &mut [U])> = split_ref(&chunks, &a[..count])
        .into_iter()
        .zip(split_ref(&chunks, &b[..count]))
        .zip(split_mut(&chunks, &mut dst[..count]))
        .collect();
    run(
        policy,
        jobs,
        |((a, b), dst)| {
            for ((x, y), out) in a.iter().zip(b.iter()).zip(dst.iter_mut()) {
                *out = f(x, y);
            }
            a.len()
        },
        |counts| counts.into_iter().sum(),
    )
}

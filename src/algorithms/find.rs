//! `find` and `find_if`.

use crate::{
    partition::{plan, run, split_ref},
    result::AlgorithmResult,
    Error, Policy,
};

/// Returns the index of the first element equal to `value`, if any.
pub fn find<T>(policy: &Policy, src: &[T], value: &T) -> AlgorithmResult<Option<usize>>
where
    T: PartialEq + Sync,
{
    AlgorithmResult::wrap(policy, find_inner(policy, src, &|x| x == value))
}

/// Returns the index of the first element satisfying `pred`, if any.
///
/// Chunks past the first match still run to completion (there is no
/// cancellation); the lowest matching index always wins because hits are
/// combined in chunk order.
pub fn find_if<T, F>(policy: &Policy, src: &[T], pred: F) -> AlgorithmResult<Option<usize>>
where
    T: Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    AlgorithmResult::wrap(policy, find_inner(policy, src, &pred))
}

fn find_inner<T, F>(policy: &Policy, src: &[T], pred: &F) -> Result<Option<usize>, Error>
where
    T: Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    let chunks = plan(policy, src.len());
    let jobs: Vec<(usize, &[T])> = chunks
        .iter()
        .map(|chunk| chunk.offset)
        .zip(split_ref(&chunks, src))
        .collect();
    run(
        policy,
        jobs,
        |(offset, chunk)| {
            chunk
                .iter()
                .position(|item| pred(item))
                .map(|local| offset + local)
        },
        |hits| hits.into_iter().flatten().next(),
    )
}

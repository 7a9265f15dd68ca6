//! `is_sorted` and `is_sorted_until`.

use crate::{
    partition::{plan, run},
    result::AlgorithmResult,
    Error, Policy,
};

/// Whether `data` is sorted in non-descending order.
pub fn is_sorted<T>(policy: &Policy, data: &[T]) -> AlgorithmResult<bool>
where
    T: PartialOrd + Sync,
{
    AlgorithmResult::wrap(
        policy,
        first_violation(policy, data).map(|violation| violation.is_none()),
    )
}

/// Returns the length of the longest sorted prefix: the index of the first
/// element that is smaller than its predecessor, or `data.len()` if the whole
/// slice is sorted.
pub fn is_sorted_until<T>(policy: &Policy, data: &[T]) -> AlgorithmResult<usize>
where
    T: PartialOrd + Sync,
{
    AlgorithmResult::wrap(
        policy,
        first_violation(policy, data).map(|violation| violation.unwrap_or(data.len())),
    )
}

fn first_violation<T>(policy: &Policy, data: &[T]) -> Result<Option<usize>, Error>
where
    T: PartialOrd + Sync,
{
    let chunks = plan(policy, data.len());
    // Every chunk except the first starts one element early so the pair
    // spanning the boundary is checked too; the overlap is read-only.
    let jobs: Vec<(usize, &[T])> = chunks
        .iter()
        .map(|chunk| {
            let start = chunk.offset.saturating_sub(1);
            (start, &data[start..chunk.end()])
        })
        .collect();
    run(
        policy,
        jobs,
        |(start, window): (usize, &[T])| {
            window
                .windows(2)
                .position(|pair| pair[1] < pair[0])
                .map(|local| start + local + 1)
        },
        |violations| violations.into_iter().flatten().next(),
    )
}

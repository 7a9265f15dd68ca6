//! `partition` and `stable_partition`.

use crate::{
    partition::{execute, plan, split_ref},
    result::AlgorithmResult,
    Error, Policy,
};

/// Reorders `data` so every element satisfying `pred` precedes every element
/// that does not, returning the boundary index.
///
/// The unstable variant is allowed to reorder elements within each group but
/// is not required to; this implementation shares the stable one.
pub fn partition<T, F>(policy: &Policy, data: &mut [T], pred: F) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    AlgorithmResult::wrap(policy, partition_inner(policy, data, &pred))
}

/// Like [`partition`], but preserves the relative order of elements within
/// both groups for every chunk count.
///
/// Parallelized with extra buffering rather than in-place swaps: each chunk
/// splits its own elements into the two groups, then the groups are laid back
/// down in chunk order.
pub fn stable_partition<T, F>(policy: &Policy, data: &mut [T], pred: F) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    AlgorithmResult::wrap(policy, partition_inner(policy, data, &pred))
}

fn partition_inner<T, F>(policy: &Policy, data: &mut [T], pred: &F) -> Result<usize, Error>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    let chunks = plan(policy, data.len());
    let jobs = split_ref(&chunks, data);
    let mut groups: Vec<(Vec<T>, Vec<T>)> = execute(policy, jobs, |chunk| {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for item in chunk {
            if pred(item) {
                accepted.push(item.clone());
            } else {
                rejected.push(item.clone());
            }
        }
        (accepted, rejected)
    })?;

    // Lay the accepted runs back down in chunk order, then the rejected runs.
    let mut write = 0;
    for (accepted, _) in groups.iter_mut() {
        for item in accepted.drain(..) {
            data[write] = item;
            write += 1;
        }
    }
    let boundary = write;
    for (_, rejected) in groups.iter_mut() {
        for item in rejected.drain(..) {
            data[write] = item;
            write += 1;
        }
    }
    Ok(boundary)
}

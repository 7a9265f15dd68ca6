//! `remove` and `remove_if`.

use crate::{
    partition::{execute, plan, split_ref},
    result::AlgorithmResult,
    Error, Policy,
};

/// Compacts all elements not equal to `value` to the front of `data`,
/// preserving their relative order, and returns the new length.
///
/// Elements past the returned length keep their previous values (valid but
/// unspecified, as with the classic remove/erase idiom).
pub fn remove<T>(policy: &Policy, data: &mut [T], value: &T) -> AlgorithmResult<usize>
where
    T: Clone + PartialEq + Send + Sync,
{
    AlgorithmResult::wrap(policy, remove_inner(policy, data, &|x| x == value))
}

/// Compacts all elements not satisfying `pred` to the front of `data`,
/// preserving their relative order, and returns the new length.
pub fn remove_if<T, F>(policy: &Policy, data: &mut [T], pred: F) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    AlgorithmResult::wrap(policy, remove_inner(policy, data, &pred))
}

fn remove_inner<T, F>(policy: &Policy, data: &mut [T], pred: &F) -> Result<usize, Error>
where
    T: Clone + Send + Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    let chunks = plan(policy, data.len());
    let jobs = split_ref(&chunks, data);
    // Each chunk gathers its survivors independently; the gathered runs are
    // already in chunk order, so the write-back is a single ordered pass.
    let survivors: Vec<Vec<T>> = execute(policy, jobs, |chunk| {
        chunk
            .iter()
            .filter(|item| !pred(item))
            .cloned()
            .collect()
    })?;
    let mut write = 0;
    for run in survivors {
        for item in run {
            data[write] = item;
            write += 1;
        }
    }
    Ok(write)
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
    fn remove_compacts_survivors_in_order() {
        for chunk_size in 1..=6 {
            let mut data = [1, 2, 1, 3, 1, 4];
            let len = remove(&par().with_chunk_size(chunk_size), &mut data, &1)
                .wait()
                .unwrap();
            assert_eq!(len, 3);
            assert_eq!(&data[..len], &[2, 3, 4]);
        }
    }

    #[test]
    fn remove_if_nothing_matches() {
        let mut data = [1, 2, 3];
        let len = remove_if(&par(), &mut data, |&x| x > 10).wait().unwrap();
        assert_eq!(len, 3);
        assert_eq!(data, [1, 2, 3]);
    }

    #[test]
    fn remove_if_everything_matches() {
        let mut data = [1, 2, 3];
        let len = remove_if(&Policy::seq(), &mut data, |_| true).wait().unwrap();
        assert_eq!(len, 0);
    }

    #[test]
    fn empty_range_keeps_length_zero() {
        let mut data: [u8; 0] = [];
        assert_eq!(remove(&par(), &mut data, &0).wait().unwrap(), 0);
    }
}

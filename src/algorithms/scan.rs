//! `exclusive_scan` and `inclusive_scan`.
//!
//! Prefix sums over a binary operation. `op` must be associative; the scan
//! partitioner applies it strictly left-to-right both within and across
//! chunks, never reassociated, so even operations that are only approximately
//! associative (e.g. float addition) produce the same result for every chunk
//! placement.

use super::check_dst;
use crate::{
    partition::{plan, split_mut, split_ref},
    result::AlgorithmResult,
    scan, Error, Policy,
};

/// Writes exclusive prefix sums of `src` into `dst`: `dst[i]` combines `init`
/// with `src[..i]`, so `dst[0] == init` and `src[len-1]` never contributes.
/// Returns the number of elements written.
pub fn exclusive_scan<T, F>(
    policy: &Policy,
    src: &[T],
    dst: &mut [T],
    init: T,
    op: F,
) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> T + Send + Sync,
{
    AlgorithmResult::wrap(policy, exclusive_scan_inner(policy, src, dst, init, &op))
}

/// Writes inclusive prefix sums of `src` into `dst`: `dst[i]` combines
/// `src[..=i]`. Returns the number of elements written.
pub fn inclusive_scan<T, F>(
    policy: &Policy,
    src: &[T],
    dst: &mut [T],
    op: F,
) -> AlgorithmResult<usize>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> T + Send + Sync,
{
    AlgorithmResult::wrap(policy, inclusive_scan_inner(policy, src, dst, &op))
}

fn exclusive_scan_inner<T, F>(
    policy: &Policy,
    src: &[T],
    dst: &mut [T],
    init: T,
    op: &F,
) -> Result<usize, Error>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> T + Send + Sync,
{
    let count = src.len();
    check_dst(count, dst.len())?;
    let chunks = plan(policy, count);
    let jobs = split_ref(&chunks, src);
    scan::run(
        policy,
        jobs,
        |chunk| fold_chunk(chunk, op),
        |a, b| op(a, b),
        init,
        |jobs, _partials, carries, _total| {
            let segments = split_mut(&chunks, &mut dst[..count]);
            Ok(jobs
                .into_iter()
                .zip(segments)
                .zip(carries.iter().cloned())
                .map(|((src, dst), carry)| (src, dst, carry))
                .collect::<Vec<_>>())
        },
        |(src, dst, carry): (&[T], &mut [T], T)| {
            let mut acc = carry;
            for (item, out) in src.iter().zip(dst.iter_mut()) {
                *out = acc.clone();
                acc = op(&acc, item);
            }
        },
        |_total, _| count,
    )
}

fn inclusive_scan_inner<T, F>(
    policy: &Policy,
    src: &[T],
    dst: &mut [T],
    op: &F,
) -> Result<usize, Error>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> T + Send + Sync,
{
    let count = src.len();
    check_dst(count, dst.len())?;
    let chunks = plan(policy, count);
    let jobs = split_ref(&chunks, src);
    // The first chunk has no carry, so the carried value is an Option with
    // `op` lifted over absence.
    scan::run(
        policy,
        jobs,
        |chunk| Some(fold_chunk(chunk, op)),
        |a: &Option<T>, b: &Option<T>| match (a, b) {
            (None, x) | (x, None) => x.clone(),
            (Some(a), Some(b)) => Some(op(a, b)),
        },
        None,
        |jobs, _partials, carries, _total| {
            let segments = split_mut(&chunks, &mut dst[..count]);
            Ok(jobs
                .into_iter()
                .zip(segments)
                .zip(carries.iter().cloned())
                .map(|((src, dst), carry)| (src, dst, carry))
                .collect::<Vec<_>>())
        },
        |(src, dst, carry): (&[T], &mut [T], Option<T>)| {
            let mut acc = carry;
            for (item, out) in src.iter().zip(dst.iter_mut()) {
                let next = match &acc {
                    None => item.clone(),
                    Some(prev) => op(prev, item),
                };
                *out = next.clone();
                acc = Some(next);
            }
        },
        |_total, _| count,
    )
}

/// Folds one (non-empty) chunk left-to-right.
fn fold_chunk<T: Clone, F: Fn(&T, &T) -> T>(chunk: &[T], op: &F) -> T {
    let mut acc = chunk[0].clone();
    for item in &chunk[1..] {
        acc = op(&acc, item);
    }
    acc
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
    fn exclusive_scan_is_chunk_placement_independent() {
        let src = [1, 1, 1, 1];
        for chunk_size in 1..=4 {
            let mut dst = [0; 4];
            let written = exclusive_scan(
                &par().with_chunk_size(chunk_size),
                &src,
                &mut dst,
                0,
                |a, b| a + b,
            )
            .wait()
            .unwrap();
            assert_eq!(written, 4);
            assert_eq!(dst, [0, 1, 2, 3]);
        }
    }

    #[test]
    fn inclusive_scan_includes_each_element() {
        let src = [1, 2, 3, 4, 5];
        for chunk_size in 1..=5 {
            let mut dst = [0; 5];
            inclusive_scan(&par().with_chunk_size(chunk_size), &src, &mut dst, |a, b| {
                a + b
            })
            .wait()
            .unwrap();
            assert_eq!(dst, [1, 3, 6, 10, 15]);
        }
    }

    #[test]
    fn exclusive_scan_empty_range_writes_nothing() {
        let src: [i32; 0] = [];
        let mut dst = [9; 2];
        let written = exclusive_scan(&par(), &src, &mut dst, 5, |a, b| a + b)
            .wait()
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(dst, [9, 9]);
    }

    #[test]
    fn scan_with_non_commutative_operation() {
        // String concatenation is associative but not commutative; a scan
        // must keep the left-to-right order regardless of chunking.
        let src: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut dst: Vec<String> = vec![String::new(); 5];
        inclusive_scan(&par().with_chunk_size(2), &src, &mut dst, |a, b| {
            format!("{a}{b}")
        })
        .wait()
        .unwrap();
        assert_eq!(dst, ["a", "ab", "abc", "abcd", "abcde"]);
    }
}

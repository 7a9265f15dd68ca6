//! `transform_reduce` and `reduce`.

use crate::{
    partition::{plan, run, split_ref},
    result::AlgorithmResult,
    Error, Policy,
};

/// Applies `conv` to every element and combines the results with `red`,
/// seeded with `init`.
///
/// The result is the generalized sum: each chunk folds its own elements in
/// order, then the chunk partials are folded onto `init` left-to-right. `red`
/// should be associative; for an exact match with a single sequential fold it
/// should be commutative with `conv` as well, which all the usual reductions
/// (sum, min, max, count) are.
///
/// An empty range returns `init` without invoking either callable.
pub fn transform_reduce<T, A, R, C>(
    policy: &Policy,
    src: &[T],
    init: A,
    red: R,
    conv: C,
) -> AlgorithmResult<A>
where
    T: Sync,
    A: Send,
    R: Fn(A, A) -> A + Send + Sync,
    C: Fn(&T) -> A + Send + Sync,
{
    AlgorithmResult::wrap(policy, transform_reduce_inner(policy, src, init, &red, &conv))
}

/// Combines the elements of `src` with `red`, seeded with `init`.
pub fn reduce<T, R>(policy: &Policy, src: &[T], init: T, red: R) -> AlgorithmResult<T>
where
    T: Clone + Send + Sync,
    R: Fn(T, T) -> T + Send + Sync,
{
    transform_reduce(policy, src, init, red, |item| item.clone())
}

fn transform_reduce_inner<T, A, R, C>(
    policy: &Policy,
    src: &[T],
    init: A,
    red: &R,
    conv: &C,
) -> Result<A, Error>
where
    T: Sync,
    A: Send,
    R: Fn(A, A) -> A + Send + Sync,
    C: Fn(&T) -> A + Send + Sync,
{
    let chunks = plan(policy, src.len());
    let jobs = split_ref(&chunks, src);
    run(
        policy,
        jobs,
        |chunk| {
            let mut acc = conv(&chunk[0]);
            for item in &chunk[1..] {
                acc = red(acc, conv(item));
            }
            acc
        },
        |partials| partials.into_iter().fold(init, red),
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
    fn empty_range_returns_init_without_invoking_callables() {
        let src: [i32; 0] = [];
        let result = transform_reduce(
            &par(),
            &src,
            42i64,
            |_, _| panic!("red invoked on empty range"),
            |_: &i32| -> i64 { panic!("conv invoked on empty range") },
        )
        .wait()
        .unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn sum_of_squares_matches_sequential() {
        let data: Vec<i64> = (1..=1000).collect();
        let expected: i64 = data.iter().map(|&x| x * x).sum();
        for policy in [Policy::seq(), par().with_chunk_size(13)] {
            let total = transform_reduce(&policy, &data, 0i64, |a, b| a + b, |&x| x * x)
                .wait()
                .unwrap();
            assert_eq!(total, expected);
        }
    }

    #[test]
    fn reduce_folds_with_init() {
        let data = [3u64, 1, 4, 1, 5];
        let product = reduce(&par().with_chunk_size(2), &data, 1u64, |a, b| a * b)
            .wait()
            .unwrap();
        assert_eq!(product, 60);
    }

    #[test]
    fn single_element_range() {
        let data = [7i32];
        let total = reduce(&Policy::seq(), &data, 0, |a, b| a + b).wait().unwrap();
        assert_eq!(total, 7);
    }
}

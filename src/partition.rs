//! The core partitioner.
//!
//! Splits `[0, count)` into contiguous chunks, drives one worker per chunk
//! (in the calling thread for the sequential policy, on the policy's pool
//! otherwise), and folds the per-chunk results back into a single value.
//! Chunk *submission* order always follows increasing offset; execution order
//! across chunks is unordered for parallel policies, but collected results are
//! in chunk order.

use crate::{policy::Chunking, Error, Policy};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, trace};

/// Chunks per worker when the chunk size is chosen automatically. Slight
/// oversubscription keeps the pool busy when chunk costs are uneven.
const OVERSUBSCRIPTION: usize = 4;

/// A contiguous sub-range of `[0, count)` assigned to one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Chunk {
    pub offset: usize,
    pub len: usize,
}

impl Chunk {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Plans the chunks for `count` elements under the given policy.
///
/// Returns no chunks for an empty range. Otherwise the chunks are disjoint,
/// contiguous, in ascending offset order, and exactly cover `[0, count)`. The
/// sequential policy always gets a single chunk.
pub(crate) fn plan(policy: &Policy, count: usize) -> Vec<Chunk> {
    if count == 0 {
        return Vec::new();
    }
    let grain = match policy.par_cfg().map(|par| par.chunking()) {
        None => count,
        Some(Chunking::Fixed(size)) => size.get(),
        Some(Chunking::Auto) => {
            let target = (policy.workers() * OVERSUBSCRIPTION).min(count);
            count.div_ceil(target)
        }
    };
    let mut chunks = Vec::with_capacity(count.div_ceil(grain));
    let mut offset = 0;
    while offset < count {
        let len = grain.min(count - offset);
        chunks.push(Chunk { offset, len });
        offset += len;
    }
    trace!(count, grain, chunks = chunks.len(), "planned chunks");
    chunks
}

/// Splits `data` into one shared slice per chunk.
pub(crate) fn split_ref<'a, T>(chunks: &[Chunk], data: &'a [T]) -> Vec<&'a [T]> {
    chunks
        .iter()
        .map(|chunk| &data[chunk.offset..chunk.end()])
        .collect()
}

/// Splits `data` into one exclusive slice per chunk.
///
/// The chunks are disjoint and ascending, so successive `split_at_mut` calls
/// hand each worker sole access to its own elements.
pub(crate) fn split_mut<'a, T>(chunks: &[Chunk], mut data: &'a mut [T]) -> Vec<&'a mut [T]> {
    let mut consumed = 0;
    let mut out = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        // Move the remainder out of `data` so the pushed head outlives the loop.
        let (head, tail) = std::mem::take(&mut data).split_at_mut(chunk.end() - consumed);
        out.push(&mut head[chunk.offset - consumed..]);
        consumed = chunk.end();
        data = tail;
    }
    out
}

/// Runs one job per chunk and returns the results in chunk order.
///
/// Each worker invocation is isolated with `catch_unwind`; if any chunk
/// panics, the failure with the lowest chunk index is surfaced as
/// [`Error::Worker`] and the rest are dropped. Already-running workers are
/// never cancelled.
pub(crate) fn execute<J, R, W>(policy: &Policy, jobs: Vec<J>, worker: W) -> Result<Vec<R>, Error>
where
    J: Send,
    R: Send,
    W: Fn(J) -> R + Send + Sync,
{
    let results: Vec<Result<R, Error>> = match policy.par_cfg() {
        None => jobs.into_iter().map(|job| guard(|| worker(job))).collect(),
        Some(par) => par.pool().install(|| {
            jobs.into_par_iter()
                .map(|job| guard(|| worker(job)))
                .collect()
        }),
    };
    first_failure(results)
}

/// Runs one job per chunk, then folds the ordered results with `combine`.
///
/// `combine` always runs when every chunk succeeded, including over an empty
/// result list for a zero-size range, so it can produce the identity result.
pub(crate) fn run<J, R, T, W, C>(
    policy: &Policy,
    jobs: Vec<J>,
    worker: W,
    combine: C,
) -> Result<T, Error>
where
    J: Send,
    R: Send,
    W: Fn(J) -> R + Send + Sync,
    C: FnOnce(Vec<R>) -> T,
{
    let results = execute(policy, jobs, worker)?;
    guard(|| combine(results))
}

/// Isolates a single worker invocation, converting a panic into an error.
pub(crate) fn guard<R>(f: impl FnOnce() -> R) -> Result<R, Error> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(&*payload);
        error!(err = %message, "chunk worker panicked");
        Error::Worker(message)
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        format!("{:?}", payload)
    }
}

/// Keeps the successes if every chunk succeeded, otherwise surfaces the
/// failure with the lowest chunk index.
fn first_failure<R>(results: Vec<Result<R, Error>>) -> Result<Vec<R>, Error> {
    results.into_iter().collect()
}

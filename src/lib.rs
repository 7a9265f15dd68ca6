//! Chunk-partitioned parallel variants of standard sequence algorithms.
//!
//! This crate provides slice algorithms (`copy`, `replace`, `transform`,
//! `transform_reduce`, scans, `merge`, `partition`, `remove`, min/max,
//! `is_sorted`, and friends) written once and executed under a caller-chosen
//! [`Policy`]: sequentially in the calling thread, in parallel on a rayon
//! thread pool, or in parallel with a deferred result [`Handle`].
//!
//! # Overview
//!
//! All algorithms share one work-partitioning core: the input range is split
//! into contiguous chunks, one worker runs per chunk, and the per-chunk
//! results are folded back together in chunk order. Prefix-shaped algorithms
//! (`copy_if`, the scans) run a four-phase protocol that propagates a carry
//! value left-to-right across chunk boundaries before any chunk writes its
//! final output.
//!
//! Results are shaped by the policy: [`AlgorithmResult::Immediate`] for the
//! sequential and blocking-parallel policies, [`AlgorithmResult::Deferred`]
//! for the task policy. [`AlgorithmResult::wait`] retrieves the value either
//! way. The slice algorithms borrow their inputs, so even under the task
//! policy they compute before returning (the handle is pre-fulfilled); an
//! owned-input task submitted through [`spawn`] genuinely returns before it
//! completes.
//!
//! # Example
//!
//! ```
//! use chunkwise::{transform_reduce, Policy};
//! use rayon::ThreadPoolBuilder;
//! use std::sync::Arc;
//!
//! let pool = Arc::new(ThreadPoolBuilder::new().num_threads(2).build().unwrap());
//! let policy = Policy::par(pool);
//!
//! let data: Vec<i64> = (1..=100).collect();
//! let sum_of_squares = transform_reduce(&policy, &data, 0i64, |a, b| a + b, |&x| x * x)
//!     .wait()
//!     .unwrap();
//! assert_eq!(sum_of_squares, 338_350);
//! ```
//!
//! # Failure semantics
//!
//! A panic in a caller-supplied predicate, transform, or comparison is caught
//! at the chunk level and surfaced as [`Error::Worker`]: synchronously for
//! the sequential and blocking-parallel policies, or stored in the handle and
//! raised on force for the task policy. When several chunks fail, the failure
//! with the lowest chunk index wins. There is no partial-result mode and no
//! cancellation of in-flight chunks.

use thiserror::Error;

pub mod algorithms;
mod partition;
pub mod policy;
pub mod result;
mod scan;

pub use algorithms::{
    copy::{copy, copy_if, copy_n},
    find::{find, find_if},
    merge::{inplace_merge, merge, merge_by},
    minmax::{max_element, min_element, minmax_element},
    partition::{partition, stable_partition},
    reduce::{reduce, transform_reduce},
    remove::{remove, remove_if},
    replace::{replace, replace_copy, replace_copy_if, replace_if},
    scan::{exclusive_scan, inclusive_scan},
    sorted::{is_sorted, is_sorted_until},
    transform::{transform, transform2},
};
pub use policy::{Chunking, Par, Policy};
pub use result::{spawn, AlgorithmResult, Handle};

/// Errors surfaced by algorithm invocations.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied callable panicked inside a chunk worker.
    #[error("chunk worker panicked: {0}")]
    Worker(String),
    /// The result channel of a deferred handle was dropped before completion.
    #[error("result handle dropped before completion")]
    Dropped,
    /// The destination slice cannot hold the algorithm's output.
    #[error("destination too short: need {need}, have {have}")]
    DestinationTooShort { need: usize, have: usize },
    /// The midpoint passed to `inplace_merge` exceeds the slice length.
    #[error("invalid midpoint: mid {mid} exceeds len {len}")]
    InvalidMidpoint { mid: usize, len: usize },
}

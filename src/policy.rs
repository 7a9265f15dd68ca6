//! Execution policies.
//!
//! A [`Policy`] is a pure value describing *how* an algorithm should run:
//! sequentially in the calling thread, in parallel (blocking until all chunk
//! workers finish), or in parallel with a deferred result handle. Policies
//! carry no mutable state; the parallel flavors hold a shared [`ThreadPool`]
//! and an optional chunk-size hint.

use rayon::ThreadPool;
use std::{num::NonZeroUsize, sync::Arc};

/// How an algorithm invocation should execute.
///
/// # Examples
///
/// ```
/// use chunkwise::Policy;
/// use rayon::ThreadPoolBuilder;
/// use std::sync::Arc;
///
/// let pool = Arc::new(ThreadPoolBuilder::new().num_threads(2).build().unwrap());
/// let seq = Policy::seq();
/// let par = Policy::par(pool).with_chunk_size(1024);
/// assert!(!seq.is_parallel());
/// assert!(par.is_parallel());
/// ```
#[derive(Clone, Debug)]
pub enum Policy {
    /// Execute in the calling thread as a single chunk.
    Sequential,
    /// Fan chunks out on a thread pool; the call returns once all chunks finish.
    Parallel(Par),
    /// Like [`Policy::Parallel`], but the caller receives a handle and
    /// observes the outcome (value or stored failure) only when forcing it.
    ///
    /// Slice-borrowing algorithm calls under this policy still compute before
    /// returning (the handle they hand back is already fulfilled); only the
    /// outcome observation is deferred. For return-before-completion, move
    /// owned input into [`spawn`](crate::spawn), which submits the task to the
    /// pool and returns while it is in flight.
    ParallelTask(Par),
}

/// Configuration shared by the parallel policy flavors.
#[derive(Clone, Debug)]
pub struct Par {
    pool: Arc<ThreadPool>,
    chunking: Chunking,
}

/// Chunk-size hint for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chunking {
    /// Let the partitioner pick a chunk size from the worker count.
    Auto,
    /// Use chunks of exactly this many elements (the last chunk may be short).
    Fixed(NonZeroUsize),
}

impl Par {
    /// Creates a parallel configuration backed by the given pool.
    pub const fn new(pool: Arc<ThreadPool>) -> Self {
        Self {
            pool,
            chunking: Chunking::Auto,
        }
    }

    pub(crate) fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    pub(crate) fn chunking(&self) -> Chunking {
        self.chunking
    }
}

impl From<Arc<ThreadPool>> for Par {
    fn from(pool: Arc<ThreadPool>) -> Self {
        Self::new(pool)
    }
}

impl Policy {
    /// The sequential policy.
    pub const fn seq() -> Self {
        Self::Sequential
    }

    /// A parallel policy that blocks until all chunk workers complete.
    pub fn par(pool: Arc<ThreadPool>) -> Self {
        Self::Parallel(Par::new(pool))
    }

    /// A parallel policy whose algorithms return a [`Handle`] instead of an
    /// immediate outcome. See [`Policy::ParallelTask`] for what is and is not
    /// deferred under this policy.
    ///
    /// [`Handle`]: crate::Handle
    pub fn par_task(pool: Arc<ThreadPool>) -> Self {
        Self::ParallelTask(Par::new(pool))
    }

    /// Sets a fixed chunk size on the parallel flavors.
    ///
    /// A size of zero resets to [`Chunking::Auto`]. No-op for the sequential
    /// policy, which always runs as one chunk.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        let chunking = match NonZeroUsize::new(size) {
            Some(size) => Chunking::Fixed(size),
            None => Chunking::Auto,
        };
        match &mut self {
            Self::Sequential => {}
            Self::Parallel(par) | Self::ParallelTask(par) => par.chunking = chunking,
        }
        self
    }

    /// Whether this policy fans work out on a thread pool.
    pub fn is_parallel(&self) -> bool {
        self.par_cfg().is_some()
    }

    /// Whether results produced under this policy are deferred.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::ParallelTask(_))
    }

    pub(crate) fn par_cfg(&self) -> Option<&Par> {
        match self {
            Self::Sequential => None,
            Self::Parallel(par) | Self::ParallelTask(par) => Some(par),
        }
    }

    /// Number of workers available to this policy.
    pub(crate) fn workers(&self) -> usize {
        match self.par_cfg() {
            Some(par) => par.pool().current_num_threads().max(1),
            None => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::ThreadPoolBuilder;

    fn pool() -> Arc<ThreadPool> {
        Arc::new(ThreadPoolBuilder::new().num_threads(2).build().unwrap())
    }

    #[test]
    fn chunk_size_hint_applies_to_parallel_flavors() {
        let par = Policy::par(pool()).with_chunk_size(16);
        match par.par_cfg() {
            Some(cfg) => assert_eq!(
                cfg.chunking(),
                Chunking::Fixed(NonZeroUsize::new(16).unwrap())
            ),
            None => panic!("expected parallel config"),
        }
    }

    #[test]
    fn zero_chunk_size_resets_to_auto() {
        let par = Policy::par(pool()).with_chunk_size(16).with_chunk_size(0);
        assert_eq!(par.par_cfg().unwrap().chunking(), Chunking::Auto);
    }

    #[test]
    fn sequential_ignores_chunk_size() {
        let seq = Policy::seq().with_chunk_size(16);
        assert!(seq.par_cfg().is_none());
        assert_eq!(seq.workers(), 1);
    }

    #[test]
    fn deferred_flag_tracks_flavor() {
        assert!(!Policy::seq().is_deferred());
        assert!(!Policy::par(pool()).is_deferred());
        assert!(Policy::par_task(pool()).is_deferred());
    }
}

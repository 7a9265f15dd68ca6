//! Policy-shaped algorithm results.
//!
//! Every algorithm returns an [`AlgorithmResult`]: an immediate value for the
//! sequential and blocking-parallel policies, or a deferred [`Handle`] for the
//! task policy. The variant depends only on the policy kind, never on runtime
//! values, so callers can branch once (or not at all, via
//! [`AlgorithmResult::wait`]).

use crate::{partition::guard, policy::Policy, Error};
use futures::channel::oneshot;
use rayon::ThreadPool;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// Deferred outcome of an algorithm run or [`spawn`]ed task under
/// [`Policy::ParallelTask`].
///
/// Forcing the handle (by awaiting it or calling [`Handle::wait`]) yields the
/// value or the stored failure. Dropping a handle without forcing it discards
/// any stored failure.
pub struct Handle<T> {
    receiver: oneshot::Receiver<Result<T, Error>>,
}

impl<T> Handle<T> {
    /// Creates a handle already holding the given outcome.
    pub(crate) fn fulfilled(outcome: Result<T, Error>) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(outcome);
        Self { receiver }
    }

    /// Submits `task` to the pool and returns immediately; the outcome
    /// (including a panic, stored as [`Error::Worker`]) arrives through the
    /// channel. If the channel is torn down before the task completes,
    /// forcing the handle yields [`Error::Dropped`].
    pub(crate) fn spawn<F>(pool: &ThreadPool, task: F) -> Self
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, Error> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        pool.spawn(move || {
            let outcome = guard(task).and_then(|result| result);
            let _ = sender.send(outcome);
        });
        Self { receiver }
    }

    /// Blocks until the outcome is available and returns it.
    pub fn wait(self) -> Result<T, Error> {
        futures::executor::block_on(self)
    }
}

impl<T> Future for Handle<T> {
    type Output = Result<T, Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|outcome| outcome.map_err(|_| Error::Dropped).and_then(|r| r))
    }
}

/// Caller-visible result of an algorithm invocation.
pub enum AlgorithmResult<T> {
    /// The outcome, available now (sequential and blocking-parallel policies).
    Immediate(Result<T, Error>),
    /// A handle resolving to the outcome (task policy).
    Deferred(Handle<T>),
}

impl<T> AlgorithmResult<T> {
    /// Shapes an outcome according to the policy kind.
    ///
    /// Wrapping never fails and never blocks; a stored failure in a deferred
    /// result surfaces only when the handle is forced.
    pub(crate) fn wrap(policy: &Policy, outcome: Result<T, Error>) -> Self {
        if policy.is_deferred() {
            Self::Deferred(Handle::fulfilled(outcome))
        } else {
            Self::Immediate(outcome)
        }
    }

    /// Whether this result is a deferred handle.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Returns the outcome, forcing a deferred handle if necessary.
    pub fn wait(self) -> Result<T, Error> {
        match self {
            Self::Immediate(outcome) => outcome,
            Self::Deferred(handle) => handle.wait(),
        }
    }

    /// Returns the deferred handle, if any.
    pub fn into_handle(self) -> Option<Handle<T>> {
        match self {
            Self::Immediate(_) => None,
            Self::Deferred(handle) => Some(handle),
        }
    }
}

/// Runs an owned-input task under the policy, returning before it completes
/// when the policy is [`Policy::ParallelTask`].
///
/// The slice algorithms borrow their inputs, so even under the task policy
/// they must finish computing before they can return; only the outcome
/// observation is deferred there. A task that owns its data has no such
/// constraint: under [`Policy::ParallelTask`] it is submitted to the pool and
/// the call returns a live handle while the task is in flight. Under the
/// other policies the task runs in the calling thread and the result is
/// immediate.
///
/// ```
/// use chunkwise::{spawn, transform_reduce, Policy};
/// use rayon::ThreadPoolBuilder;
/// use std::sync::Arc;
///
/// let pool = Arc::new(ThreadPoolBuilder::new().num_threads(2).build().unwrap());
/// let policy = Policy::par_task(pool.clone());
/// let inner = Policy::par(pool);
///
/// let data: Vec<i64> = (1..=100).collect();
/// let handle = spawn(&policy, move || {
///     transform_reduce(&inner, &data, 0i64, |a, b| a + b, |&x| x * x).wait()
/// });
/// assert_eq!(handle.wait().unwrap(), 338_350);
/// ```
pub fn spawn<T, F>(policy: &Policy, task: F) -> AlgorithmResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, Error> + Send + 'static,
{
    match policy {
        Policy::ParallelTask(par) => AlgorithmResult::Deferred(Handle::spawn(par.pool(), task)),
        _ => AlgorithmResult::Immediate(guard(task).and_then(|result| result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::ThreadPoolBuilder;
    use std::sync::Arc;

    fn par_task() -> Policy {
        let pool = Arc::new(ThreadPoolBuilder::new().num_threads(2).build().unwrap());
        Policy::par_task(pool)
    }

    #[test]
    fn shape_follows_policy_kind() {
        let ok: Result<u32, Error> = Ok(7);
        assert!(!AlgorithmResult::wrap(&Policy::seq(), ok).is_deferred());
        let ok: Result<u32, Error> = Ok(7);
        assert!(AlgorithmResult::wrap(&par_task(), ok).is_deferred());
    }

    #[test]
    fn deferred_value_surfaces_on_wait() {
        let result = AlgorithmResult::wrap(&par_task(), Ok(42u32));
        assert_eq!(result.wait().unwrap(), 42);
    }

    #[test]
    fn deferred_failure_surfaces_only_on_wait() {
        let result: AlgorithmResult<u32> =
            AlgorithmResult::wrap(&par_task(), Err(Error::Worker("boom".into())));
        let handle = result.into_handle().unwrap();
        match handle.wait() {
            Err(Error::Worker(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn handle_is_a_future() {
        let handle = Handle::fulfilled(Ok::<_, Error>("hello"));
        let value = futures::executor::block_on(handle).unwrap();
        assert_eq!(value, "hello");
    }

    #[test]
    fn spawn_returns_while_task_is_in_flight() {
        let (tx, rx) = std::sync::mpsc::channel();
        let result = spawn(&par_task(), move || Ok(rx.recv().unwrap() + 1));
        assert!(result.is_deferred());
        // The task is parked on the channel until this send, so reaching it
        // proves the call did not wait for completion.
        tx.send(41).unwrap();
        assert_eq!(result.wait().unwrap(), 42);
    }

    #[test]
    fn spawned_panic_is_stored_as_worker_failure() {
        let result: AlgorithmResult<()> = spawn(&par_task(), || panic!("task exploded"));
        match result.wait() {
            Err(Error::Worker(msg)) => assert_eq!(msg, "task exploded"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn spawn_is_immediate_under_blocking_policies() {
        let result = spawn(&Policy::seq(), || Ok(7));
        assert!(!result.is_deferred());
        assert_eq!(result.wait().unwrap(), 7);
    }
}

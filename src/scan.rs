//! The scan partitioner.
//!
//! Prefix-shaped algorithms (`copy_if`, `exclusive_scan`, stream compaction)
//! cannot combine chunk results in arbitrary order: every chunk needs the
//! accumulated contribution of all strictly-earlier chunks before it can
//! produce its final output. This module drives the four-phase protocol:
//!
//! 1. run `step1` over every chunk (parallel), yielding one partial per chunk;
//! 2. fold the partials strictly left-to-right with `op` (sequentially, never
//!    reassociated), producing each chunk's carry-in and the grand total;
//! 3. build the step-3 jobs (destinations are split at the now-known carry
//!    offsets here) and run `step3` over them (parallel);
//! 4. hand the total and the ordered step-3 results to `finish`.
//!
//! No chunk's step 3 begins before its carry-in is fully known: phase 2
//! completes before any step-3 job is even constructed.

use crate::{
    partition::{execute, guard},
    Error, Policy,
};
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

/// Runs the four-phase scan protocol.
///
/// `make_step3` receives the step-1 jobs back (so borrowed buffers can flow
/// into phase 3), the per-chunk partials, the per-chunk carry-ins, and the
/// total; it may fail (e.g. an undersized destination discovered only once
/// the total is known).
///
/// A zero-size range (no jobs) skips phases 1–3; `finish` still runs with the
/// initial value and an empty result list so it can produce the identity
/// result. Failures in step 1 or step 3 follow the partitioner's rules: the
/// lowest-chunk-index failure is surfaced and `finish` never runs.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run<J1, P, J3, R, T, S1, OP, M3, S3, F4>(
    policy: &Policy,
    mut jobs: Vec<J1>,
    step1: S1,
    op: OP,
    init: P,
    make_step3: M3,
    step3: S3,
    finish: F4,
) -> Result<T, Error>
where
    J1: Send,
    J3: Send,
    P: Send,
    R: Send,
    S1: Fn(&mut J1) -> P + Send + Sync,
    OP: Fn(&P, &P) -> P,
    M3: FnOnce(Vec<J1>, &[P], &[P], &P) -> Result<Vec<J3>, Error>,
    S3: Fn(J3) -> R + Send + Sync,
    F4: FnOnce(&P, Vec<R>) -> T,
{
    if jobs.is_empty() {
        return Ok(finish(&init, Vec::new()));
    }

    // Phase 1: independent per-chunk pass.
    let partials = step1_pass(policy, &mut jobs, &step1)?;

    // Phase 2: strict left-to-right carry propagation. carries[i] is the
    // combined contribution of all chunks before i, seeded with `init`.
    let (carries, total) = guard(|| {
        let mut carries = Vec::with_capacity(partials.len());
        carries.push(init);
        for i in 1..partials.len() {
            let next = op(&carries[i - 1], &partials[i - 1]);
            carries.push(next);
        }
        let total = op(
            &carries[carries.len() - 1],
            &partials[partials.len() - 1],
        );
        (carries, total)
    })?;

    // Phase 3: per-chunk final pass, each chunk holding its own carry-in.
    let jobs = make_step3(jobs, &partials, &carries, &total)?;
    let results = execute(policy, jobs, step3)?;

    // Phase 4: terminal combination.
    Ok(finish(&total, results))
}

/// Runs step 1 over every chunk, returning the partials in chunk order.
fn step1_pass<J1, P, S1>(policy: &Policy, jobs: &mut [J1], step1: &S1) -> Result<Vec<P>, Error>
where
    J1: Send,
    P: Send,
    S1: Fn(&mut J1) -> P + Send + Sync,
{
    let partials: Vec<Result<P, Error>> = match policy.par_cfg() {
        None => jobs.iter_mut().map(|job| guard(|| step1(job))).collect(),
        Some(par) => par.pool().install(|| {
            jobs.par_iter_mut()
                .map(|job| guard(|| step1(job)))
                .collect()
        }),
    };
    partials.into_iter().collect()
}

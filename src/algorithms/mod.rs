//! Algorithm strategy objects and public front ends.
//!
//! Each module pairs the straightforward sequential loop (which doubles as
//! the per-chunk worker body) with a parallel strategy that splits the input
//! along the planned chunk boundaries and hands the jobs to the partitioner
//! (or, for prefix-shaped algorithms, the scan partitioner). Every front end
//! takes a [`Policy`](crate::Policy) first and returns an
//! [`AlgorithmResult`](crate::AlgorithmResult) shaped by that policy.

use crate::Error;

pub mod copy;
pub mod find;
pub mod merge;
pub mod minmax;
pub mod partition;
pub mod reduce;
pub mod remove;
pub mod replace;
pub mod scan;
pub mod sorted;
pub mod transform;

/// Rejects an undersized destination before any chunk is dispatched.
pub(crate) fn check_dst(need: usize, have: usize) -> Result<(), Error> {
    if have < need {
        return Err(Error::DestinationTooShort { need, have });
    }
    Ok(())
}

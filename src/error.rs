use std::collections::TryReserveError;
use thiserror::Error;

/// Failures a [`Table`](crate::Table) can report.
///
/// A missing key is not an error; lookups return `Option` and removals `bool`.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("table capacity must be at least 1")]
    ZeroCapacity,
    #[error("cannot grow a table of {capacity} slots without overflowing usize")]
    CapacityOverflow { capacity: usize },
    #[error("failed to allocate {capacity} slots")]
    AllocationFailed {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}

//! Error and warning tallies.
//!
//! [`Counts`] is the plain per-instance tally a boundary keeps for itself.
//! [`FaultCounters`] is the shared, atomic tally every boundary also feeds;
//! unless a boundary is given its own, it uses the process-wide instance
//! returned by [`FaultCounters::global`], which lives from first use until the
//! process ends and is never reset.

use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::types::Classification;

static GLOBAL: Lazy<Arc<FaultCounters>> = Lazy::new(|| Arc::new(FaultCounters::new()));

/// Per-instance error and warning tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub errors: u64,
    pub warnings: u64,
}

impl Counts {
    /// Bumps the tally matching `classification`; transparent faults are not counted.
    #[inline]
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Error => self.errors += 1,
            Classification::Warning => self.warnings += 1,
            Classification::Transparent => {},
        }
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.errors + self.warnings
    }

    /// `(errors, warnings)`
    #[inline]
    pub fn as_tuple(&self) -> (u64, u64) {
        (self.errors, self.warnings)
    }
}

/// Shared monotonic error and warning tally.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fault_boundary::{Classification, FaultCounters};
///
/// let counters = Arc::new(FaultCounters::new());
/// counters.record(Classification::Error);
/// counters.record(Classification::Warning);
/// assert_eq!(counters.counts(), (1, 1));
/// ```
#[derive(Debug, Default)]
pub struct FaultCounters {
    errors: AtomicU64,
    warnings: AtomicU64,
}

impl FaultCounters {
    /// Creates a zeroed, independent tally.
    #[inline]
    pub const fn new() -> Self {
        Self { errors: AtomicU64::new(0), warnings: AtomicU64::new(0) }
    }

    /// The process-wide tally shared by every boundary built without an
    /// explicit counter object.
    #[inline]
    pub fn global() -> Arc<FaultCounters> {
        Arc::clone(&GLOBAL)
    }

    /// Atomically bumps the tally matching `classification`.
    #[inline]
    pub fn record(&self, classification: Classification) {
        match classification {
            Classification::Error => {
                self.errors.fetch_add(1, Ordering::Relaxed);
            },
            Classification::Warning => {
                self.warnings.fetch_add(1, Ordering::Relaxed);
            },
            Classification::Transparent => {},
        }
    }

    #[inline]
    pub fn errors_count(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn warnings_count(&self) -> u64 {
        self.warnings.load(Ordering::Relaxed)
    }

    /// `(errors, warnings)` snapshot; the two loads are not taken atomically together.
    #[inline]
    pub fn counts(&self) -> (u64, u64) {
        (self.errors_count(), self.warnings_count())
    }
}

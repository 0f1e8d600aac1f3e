//! A fault boundary: one place that decides what happens to the failures of a
//! wrapped region of code.
//!
//! Code inside a boundary returns `Result<T, Fault>`. When it fails, the
//! boundary classifies the [`Fault`] by its [`FaultKind`], counts it, logs it
//! and then picks exactly one disposition: suppress it, re-raise it verbatim,
//! or replace it with a terminal exit signal. Control-flow signals (interrupts,
//! exit requests, end of iteration) pass through untouched.
//!
//! # Examples
//!
//! ## Scoped block
//!
//! ```
//! use fault_boundary::{Fault, FaultBoundary};
//!
//! let mut boundary = FaultBoundary::new();
//! let outcome = boundary.run(|| -> Result<u32, Fault> { Err(Fault::warning("stale cache entry")) });
//!
//! assert_eq!(outcome, Ok(None));
//! assert_eq!(boundary.counts(), (0, 1));
//! ```
//!
//! ## Wrapped callable
//!
//! ```
//! use fault_boundary::{Fault, FaultBoundary};
//!
//! let mut import = FaultBoundary::new().wrap(|path: &str| -> Result<usize, Fault> {
//!     if path.ends_with(".csv") {
//!         Ok(path.len())
//!     } else {
//!         Err(Fault::error(format!("unsupported file {path}")))
//!     }
//! });
//!
//! assert_eq!(import.call("a.csv"), Ok(Some(5)));
//! assert_eq!(import.call("a.xls"), Ok(None));
//! assert_eq!(import.context().errors_count(), 1);
//! ```
//!
//! ## Top-level command
//!
//! ```
//! use fault_boundary::{BoundaryConfig, Fault, FaultBoundary, FaultKind};
//!
//! let mut command = FaultBoundary::with_config(BoundaryConfig::cli_command()).unwrap();
//! let escaped = command
//!     .run(|| -> Result<(), Fault> { Err(Fault::error("bad input").with_exit_code(2)) })
//!     .unwrap_err();
//!
//! assert_eq!(escaped.kind(), &FaultKind::CliExit);
//! assert_eq!(escaped.exit_code(), Some(2));
//! ```

/// The boundary state machine and its scoped / wrapped-callable adapters
pub mod boundary;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Logging sink and result conversion traits
pub mod traits;
/// Faults, fault kinds, counters and configuration
pub mod types;

pub use boundary::{
    Disposition, FaultBoundary, FaultBoundaryBuilder, FaultFormatter, Guarded, PostHandler, Scope,
};
pub use traits::{FaultLogger, FaultResultExt, Severity};
pub use types::*;

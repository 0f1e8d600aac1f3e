//! Data types of a fault boundary.
//!
//! # Examples
//!
//! ```
//! use fault_boundary::{Fault, FaultKind, KindSet};
//!
//! let fault = Fault::new(FaultKind::named_warning("deprecated"), "flag --legacy is deprecated");
//! assert!(fault.is_warning());
//! assert!(!KindSet::control_flow().matches(fault.kind()));
//! ```

pub mod config;
pub mod counters;
pub mod fault;
pub mod fault_kind;

pub use config::*;
pub use counters::*;
pub use fault::*;
pub use fault_kind::*;

/// Outcome of a boundary exit.
///
/// `Ok(Some(value))` is a normal completion, `Ok(None)` a suppressed fault and
/// `Err(fault)` a fault that left the boundary (re-raised or escalated).
pub type BoundaryResult<T> = Result<Option<T>, Fault>;

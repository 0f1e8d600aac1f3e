//! Collaborator traits of a fault boundary.
//!
//! - [`FaultLogger`]: leveled sink receiving the boundary's log lines
//! - [`FaultResultExt`]: conversions from foreign errors into [`Fault`](crate::Fault)s
//!
//! # Examples
//!
//! ```
//! use fault_boundary::traits::{FaultLogger, NullLogger, FaultResultExt};
//!
//! NullLogger.error("nobody hears this");
//!
//! let result: Result<(), std::fmt::Error> = Err(std::fmt::Error);
//! assert!(result.or_warning().unwrap_err().is_warning());
//! ```

pub mod logger;
pub mod result_ext;

pub use logger::{FaultLogger, NullLogger, Severity, TracingLogger};
pub use result_ext::FaultResultExt;

//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use fault_boundary::prelude::*;
//!
//! fn read_settings(path: &str) -> Result<String, Fault> {
//!     std::fs::read_to_string(path).or_fault(FaultKind::named_error("io"))
//! }
//!
//! let mut boundary = FaultBoundary::builder().logger(NullLogger).build().unwrap();
//! assert_eq!(boundary.run(|| read_settings("/nonexistent/settings.toml")), Ok(None));
//! assert_eq!(boundary.exception().map(|f| f.kind().clone()), Some(FaultKind::named_error("io")));
//! ```

pub use crate::boundary::{Disposition, FaultBoundary, Guarded};
pub use crate::traits::{FaultLogger, FaultResultExt, NullLogger, TracingLogger};
pub use crate::types::{BoundaryConfig, BoundaryResult, Escalation, Fault, FaultKind, KindSet};

//! Extension trait for turning ordinary `Result`s into fault results.
//!
//! Code running inside a boundary returns `Result<T, Fault>`. [`FaultResultExt`]
//! converts foreign errors at the point they occur, choosing the kind that
//! drives the boundary's classification.
//!
//! # Examples
//!
//! ```
//! use fault_boundary::traits::FaultResultExt;
//! use fault_boundary::{Fault, FaultKind};
//!
//! fn parse_port(raw: &str) -> Result<u16, Fault> {
//!     raw.parse::<u16>().or_fault(FaultKind::named_error("parse"))
//! }
//!
//! let fault = parse_port("http").unwrap_err();
//! assert_eq!(fault.kind(), &FaultKind::named_error("parse"));
//! assert!(std::error::Error::source(&fault).is_some());
//! ```

use std::borrow::Cow;
use std::error::Error;

use crate::types::{Fault, FaultKind};

/// Conversion helpers from `Result<T, E>` to `Result<T, Fault>`.
pub trait FaultResultExt<T> {
    /// Wraps the error as a fault of `kind`, keeping it as the cause.
    fn or_fault(self, kind: FaultKind) -> Result<T, Fault>;

    /// Wraps the error as a generic error-family fault.
    fn or_error(self) -> Result<T, Fault>;

    /// Downgrades the error to a generic warning-family fault.
    fn or_warning(self) -> Result<T, Fault>;

    /// Replaces the message with `message`, keeping the error as the cause.
    fn or_fault_with<M, F>(self, kind: FaultKind, message: F) -> Result<T, Fault>
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M;
}

impl<T, E> FaultResultExt<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    #[inline]
    fn or_fault(self, kind: FaultKind) -> Result<T, Fault> {
        self.map_err(|error| Fault::from_error(kind, error))
    }

    #[inline]
    fn or_error(self) -> Result<T, Fault> {
        self.or_fault(FaultKind::Error)
    }

    #[inline]
    fn or_warning(self) -> Result<T, Fault> {
        self.or_fault(FaultKind::Warning)
    }

    #[inline]
    fn or_fault_with<M, F>(self, kind: FaultKind, message: F) -> Result<T, Fault>
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M,
    {
        self.map_err(|error| Fault::new(kind, message()).with_source(error))
    }
}

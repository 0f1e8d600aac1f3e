//! The structured fault carried through a boundary.
//!
//! A [`Fault`] couples a [`FaultKind`] with a human-readable message, an
//! optional process exit code and an optional underlying cause. Wrapped
//! regions return `Result<T, Fault>`; the boundary inspects the kind to choose
//! a disposition and hands the fault back unchanged whenever it re-raises.

use core::fmt::{self, Display};
use std::borrow::Cow;
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use crate::types::FaultKind;

/// Shared, thread-safe cause attached to a [`Fault`].
pub type FaultSource = Arc<dyn Error + Send + Sync + 'static>;

/// A classified failure raised inside a boundary.
///
/// Equality compares kind, message and exit code; the cause is ignored.
///
/// # Examples
///
/// ```
/// use fault_boundary::{Fault, FaultKind};
///
/// let fault = Fault::error("disk full").with_exit_code(28);
/// assert_eq!(fault.kind(), &FaultKind::Error);
/// assert_eq!(fault.exit_code(), Some(28));
/// assert_eq!(fault.to_string(), "disk full");
/// ```
#[derive(Clone)]
#[must_use]
pub struct Fault {
    kind: FaultKind,
    message: Cow<'static, str>,
    exit_code: Option<i32>,
    source: Option<FaultSource>,
}

impl Fault {
    /// Creates a fault of the given kind.
    #[inline]
    pub fn new<M: Into<Cow<'static, str>>>(kind: FaultKind, message: M) -> Self {
        Self { kind, message: message.into(), exit_code: None, source: None }
    }

    /// Creates a generic error-family fault.
    #[inline]
    pub fn error<M: Into<Cow<'static, str>>>(message: M) -> Self {
        Self::new(FaultKind::Error, message)
    }

    /// Creates a generic warning-family fault.
    #[inline]
    pub fn warning<M: Into<Cow<'static, str>>>(message: M) -> Self {
        Self::new(FaultKind::Warning, message)
    }

    /// Creates a terminal exit signal of kind [`FaultKind::SystemExit`].
    #[inline]
    pub fn system_exit(code: i32) -> Self {
        Self::new(FaultKind::SystemExit, format!("exit status {code}")).with_exit_code(code)
    }

    /// Creates a terminal exit signal of kind [`FaultKind::CliExit`].
    #[inline]
    pub fn cli_exit(code: i32) -> Self {
        Self::new(FaultKind::CliExit, format!("exit status {code}")).with_exit_code(code)
    }

    /// Wraps an arbitrary error as a fault of `kind`, keeping it as the cause.
    pub fn from_error<E>(kind: FaultKind, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::new(kind, error.to_string()).with_source(error)
    }

    /// Sets the exit code used when this fault ends the process.
    #[inline]
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Attaches an underlying cause.
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Attaches an already shared cause.
    #[inline]
    pub fn with_shared_source(mut self, source: FaultSource) -> Self {
        self.source = Some(source);
        self
    }

    #[inline]
    pub fn kind(&self) -> &FaultKind {
        &self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Returns the attached cause, if any.
    #[inline]
    pub fn cause(&self) -> Option<&FaultSource> {
        self.source.as_ref()
    }

    #[inline]
    pub fn is_warning(&self) -> bool {
        self.kind.is_warning()
    }

    /// Returns `true` for [`FaultKind::SystemExit`] and [`FaultKind::CliExit`].
    #[inline]
    pub fn is_exit_signal(&self) -> bool {
        matches!(self.kind, FaultKind::SystemExit | FaultKind::CliExit)
    }

    /// Process status byte for this fault.
    ///
    /// Codes wrap modulo 256 the way a POSIX shell reports them, so `-1`
    /// becomes `255`. A fault without an exit code maps to `1`.
    #[inline]
    pub fn status_byte(&self) -> u8 {
        self.exit_code.map_or(1, |code| code.rem_euclid(256) as u8)
    }

    /// [`Fault::status_byte`] as an [`ExitCode`], for returning from `main`.
    #[inline]
    pub fn process_exit_code(&self) -> ExitCode {
        ExitCode::from(self.status_byte())
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Fault");
        s.field("kind", &self.kind).field("message", &self.message);
        if let Some(code) = self.exit_code {
            s.field("exit_code", &code);
        }
        if let Some(source) = &self.source {
            s.field("source", &format_args!("{source}"));
        }
        s.finish()
    }
}

impl Display for Fault {
    /// Plain form is the message; `{:#}` prefixes the kind name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}: {}", self.kind.name(), self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message && self.exit_code == other.exit_code
    }
}

impl Eq for Fault {}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|source| source as &(dyn Error + 'static))
    }
}

impl From<std::io::Error> for Fault {
    #[inline]
    fn from(error: std::io::Error) -> Self {
        Self::from_error(FaultKind::named_error("io"), error)
    }
}

impl From<core::fmt::Error> for Fault {
    #[inline]
    fn from(error: core::fmt::Error) -> Self {
        Self::from_error(FaultKind::named_error("fmt"), error)
    }
}

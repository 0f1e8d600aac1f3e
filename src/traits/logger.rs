//! Logging sinks for boundary output.
//!
//! A boundary writes at most three kinds of lines: informational entry/exit
//! lines, one warning line per warning-family fault and one error line per
//! error-family fault. Anything implementing [`FaultLogger`] can receive them.
//!
//! [`TracingLogger`] is the default and forwards every line as a `tracing`
//! event under the `fault_boundary` target. [`NullLogger`] discards output.

use core::fmt;

use tracing::{error, info, warn};

/// Severity of a boundary log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// Leveled sink used by a boundary.
///
/// Only [`FaultLogger::log`] is required; the leveled helpers forward to it.
///
/// # Examples
///
/// ```
/// use std::sync::Mutex;
/// use fault_boundary::traits::{FaultLogger, Severity};
///
/// #[derive(Default)]
/// struct Lines(Mutex<Vec<String>>);
///
/// impl FaultLogger for Lines {
///     fn log(&self, severity: Severity, message: &str) {
///         self.0.lock().unwrap().push(format!("{severity}: {message}"));
///     }
/// }
///
/// let lines = Lines::default();
/// lines.warning("disk almost full");
/// assert_eq!(lines.0.lock().unwrap()[0], "WARNING: disk almost full");
/// ```
pub trait FaultLogger: Send + Sync {
    fn log(&self, severity: Severity, message: &str);

    #[inline]
    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    #[inline]
    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    #[inline]
    fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }
}

/// Forwards boundary lines to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl FaultLogger for TracingLogger {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!(target: "fault_boundary", "{message}"),
            Severity::Warning => warn!(target: "fault_boundary", "{message}"),
            Severity::Error => error!(target: "fault_boundary", "{message}"),
        }
    }
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl FaultLogger for NullLogger {
    #[inline]
    fn log(&self, _severity: Severity, _message: &str) {}
}

impl<L: FaultLogger + ?Sized> FaultLogger for std::sync::Arc<L> {
    #[inline]
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message);
    }
}

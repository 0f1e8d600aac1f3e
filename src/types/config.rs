//! Boundary configuration.
//!
//! [`BoundaryConfig`] holds every plain-data option of a boundary. It is
//! cheap to clone, comparable, and (with the `serde` feature) can be loaded
//! from any serde format, fault kinds being written by name:
//!
//! ```json
//! { "exit_message": "done", "reraise_types": ["error:io"], "debug": 1 }
//! ```
//!
//! Callables (logger, formatter, post-handler) are attached on
//! [`FaultBoundaryBuilder`](crate::FaultBoundaryBuilder) instead.

use thiserror::Error;

use crate::types::{Fault, FaultKind, KindSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exit code used when neither the fault nor the escalation supplies one.
pub const DEFAULT_EXIT_CODE: i32 = -1;

/// Raised when a boundary is built from malformed options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown fault kind `{name}`")]
    UnknownKind { name: String },
    #[error("escalation exit code must be non-zero")]
    ZeroExitCode,
}

/// Which terminal signal an escalation produces.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitTarget {
    SystemExit,
    CliExit,
}

/// Turns a boundary that has counted errors into a terminal exit signal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Escalation {
    pub target: ExitTarget,
    /// Fallback code when the fault carries none.
    #[cfg_attr(feature = "serde", serde(default))]
    pub code: Option<i32>,
}

impl Escalation {
    #[inline]
    pub const fn system_exit() -> Self {
        Self { target: ExitTarget::SystemExit, code: None }
    }

    #[inline]
    pub const fn cli_exit() -> Self {
        Self { target: ExitTarget::CliExit, code: None }
    }

    #[inline]
    pub const fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }

    /// Kind of the exit signal this escalation produces.
    #[inline]
    pub fn kind(&self) -> FaultKind {
        match self.target {
            ExitTarget::SystemExit => FaultKind::SystemExit,
            ExitTarget::CliExit => FaultKind::CliExit,
        }
    }

    /// The fault's own non-zero code wins, then the configured fallback, then
    /// [`DEFAULT_EXIT_CODE`].
    #[inline]
    pub fn resolve_code(&self, fault: &Fault) -> i32 {
        fault.exit_code().filter(|code| *code != 0).or(self.code).unwrap_or(DEFAULT_EXIT_CODE)
    }

    /// Builds the exit signal replacing `fault`; the original becomes its cause.
    pub fn signal(&self, fault: &Fault, errors: u64) -> Fault {
        self.exit_signal(self.resolve_code(fault), errors).with_source(fault.clone())
    }

    /// Exit signal for a region that completed after errors were swallowed
    /// inside it. There is no fault to take a code from, so the configured
    /// code or [`DEFAULT_EXIT_CODE`] applies.
    pub fn completion_signal(&self, errors: u64) -> Fault {
        self.exit_signal(self.code.unwrap_or(DEFAULT_EXIT_CODE), errors)
    }

    fn exit_signal(&self, code: i32, errors: u64) -> Fault {
        let plural = if errors == 1 { "" } else { "s" };
        Fault::new(self.kind(), format!("exiting with status {code} after {errors} error{plural}"))
            .with_exit_code(code)
    }
}

/// Plain-data options of a fault boundary.
///
/// # Examples
///
/// ```
/// use fault_boundary::{BoundaryConfig, FaultKind};
///
/// let config = BoundaryConfig::default()
///     .with_exit_message("import finished")
///     .with_report_counts(true)
///     .with_reraise_kind(FaultKind::named_error("io"));
///
/// assert!(config.report_counts);
/// assert!(config.reraise_types.contains(&FaultKind::named_error("io")));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryConfig {
    /// Logged at info level when the boundary is entered.
    pub enter_message: Option<String>,
    /// Logged at info level when the boundary exits without re-raising.
    pub exit_message: Option<String>,
    /// Append the instance counts to the exit line.
    pub report_counts: bool,
    /// Escalate to an exit signal once errors were counted inside the boundary.
    pub on_errors_raise: Option<Escalation>,
    /// Escalate to a [`FaultKind::CliExit`] signal; `on_errors_raise` wins
    /// when both are set.
    pub on_errors_raise_click_exit: bool,
    #[cfg_attr(feature = "serde", serde(alias = "reraise"))]
    pub reraise_error: bool,
    pub reraise_warning: bool,
    /// Kinds that always propagate verbatim, uncounted and unlogged.
    pub reraise_types: KindSet,
    /// Kinds that always propagate verbatim; defaults to every control-flow signal.
    pub transparent: KindSet,
    /// `>= 2` re-raises errors, `>= 3` re-raises warnings as well.
    pub debug: u8,
    /// Include the kind name in log lines.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub show_type: bool,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            enter_message: None,
            exit_message: None,
            report_counts: false,
            on_errors_raise: None,
            on_errors_raise_click_exit: false,
            reraise_error: false,
            reraise_warning: false,
            reraise_types: KindSet::new(),
            transparent: KindSet::control_flow(),
            debug: 0,
            show_type: false,
        }
    }
}

impl BoundaryConfig {
    /// Top-level command preset: counts are reported and any counted error
    /// ends the command with a CLI exit signal.
    #[inline]
    pub fn cli_command() -> Self {
        Self { report_counts: true, on_errors_raise: Some(Escalation::cli_exit()), ..Default::default() }
    }

    /// Logs and counts, then re-raises every error and warning.
    #[inline]
    pub fn strict() -> Self {
        Self { reraise_error: true, reraise_warning: true, ..Default::default() }
    }

    #[inline]
    pub fn with_enter_message<S: Into<String>>(mut self, message: S) -> Self {
        self.enter_message = Some(message.into());
        self
    }

    #[inline]
    pub fn with_exit_message<S: Into<String>>(mut self, message: S) -> Self {
        self.exit_message = Some(message.into());
        self
    }

    #[inline]
    pub fn with_report_counts(mut self, enabled: bool) -> Self {
        self.report_counts = enabled;
        self
    }

    #[inline]
    pub fn with_on_errors_raise(mut self, escalation: Escalation) -> Self {
        self.on_errors_raise = Some(escalation);
        self
    }

    /// Shorthand for escalating to a [`FaultKind::CliExit`] signal.
    #[inline]
    pub fn with_on_errors_raise_click_exit(mut self, enabled: bool) -> Self {
        self.on_errors_raise_click_exit = enabled;
        self
    }

    /// Alias of [`BoundaryConfig::with_reraise_error`].
    #[inline]
    pub fn with_reraise(self, enabled: bool) -> Self {
        self.with_reraise_error(enabled)
    }

    #[inline]
    pub fn with_reraise_error(mut self, enabled: bool) -> Self {
        self.reraise_error = enabled;
        self
    }

    #[inline]
    pub fn with_reraise_warning(mut self, enabled: bool) -> Self {
        self.reraise_warning = enabled;
        self
    }

    #[inline]
    pub fn with_reraise_types(mut self, kinds: KindSet) -> Self {
        self.reraise_types = kinds;
        self
    }

    #[inline]
    pub fn with_reraise_kind(mut self, kind: FaultKind) -> Self {
        self.reraise_types.insert(kind);
        self
    }

    #[inline]
    pub fn with_transparent(mut self, kinds: KindSet) -> Self {
        self.transparent = kinds;
        self
    }

    #[inline]
    pub fn with_debug(mut self, level: u8) -> Self {
        self.debug = level;
        self
    }

    #[inline]
    pub fn with_show_type(mut self, enabled: bool) -> Self {
        self.show_type = enabled;
        self
    }

    /// Checks the structural options.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.on_errors_raise, Some(Escalation { code: Some(0), .. })) {
            return Err(ConfigurationError::ZeroExitCode);
        }
        Ok(())
    }

    /// The effective escalation, folding in the click-exit flag.
    #[inline]
    pub fn escalation(&self) -> Option<Escalation> {
        self.on_errors_raise.or_else(|| self.on_errors_raise_click_exit.then(Escalation::cli_exit))
    }

    /// Whether error-family faults are re-raised after logging.
    #[inline]
    pub fn reraises_errors(&self) -> bool {
        self.reraise_error || self.debug >= 2
    }

    /// Whether warning-family faults are re-raised after logging.
    #[inline]
    pub fn reraises_warnings(&self) -> bool {
        self.reraise_warning || self.debug >= 3
    }
}

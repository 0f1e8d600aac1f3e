//! The fault boundary state machine.
//!
//! A [`FaultBoundary`] owns its configuration, its collaborators and its
//! per-instance state (`exception`, error and warning counts). Every entry
//! goes through the same protocol no matter which adapter triggers it:
//!
//! 1. entry: clear the last fault, log the enter message;
//! 2. normal exit: escalate if errors were counted inside the boundary,
//!    log the exit line;
//! 3. fault exit: record, pass through transparent and allow-listed kinds,
//!    classify, count, log, run the post-handler, then pick exactly one of
//!    re-raise, escalate or suppress.
//!
//! "Counted inside the boundary" covers this instance's own counts across all
//! its entries plus whatever nested boundaries fed into the shared counters
//! during the current entry.
//!
//! Two adapters drive the protocol: [`FaultBoundary::enter`] /
//! [`FaultBoundary::run`] for scoped blocks and [`FaultBoundary::wrap`] for
//! long-lived wrapped callables.

use std::sync::Arc;

use tracing::trace;

use crate::traits::{FaultLogger, TracingLogger};
use crate::types::{
    BoundaryConfig, BoundaryResult, Classification, ConfigurationError, Counts, Escalation, Fault,
    FaultCounters, FaultKind, KindSet,
};

mod guarded;
mod scope;

pub use guarded::Guarded;
pub use scope::Scope;

/// Renders a fault into the text of its log line.
pub type FaultFormatter = Arc<dyn Fn(&Fault) -> String + Send + Sync>;

/// Invoked with every counted fault; a returned fault escapes the boundary as-is.
pub type PostHandler = Arc<dyn Fn(&Fault) -> Result<(), Fault> + Send + Sync>;

/// What happened at the last exit of a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// The region returned normally.
    Completed,
    /// A transparent fault or a panic passed through untouched.
    PassedThrough,
    /// The fault was re-raised verbatim.
    Reraised,
    /// The fault was replaced by a terminal exit signal.
    Escalated,
    /// The fault was swallowed.
    Suppressed,
    /// The post-handler failed and its fault escaped instead.
    HandlerFailed,
}

/// Classifies, logs, counts and dispatches the faults of a wrapped region.
///
/// # Examples
///
/// ```
/// use fault_boundary::{Fault, FaultBoundary};
///
/// let mut boundary = FaultBoundary::new();
///
/// let outcome: Result<Option<()>, Fault> = boundary.run(|| Err(Fault::error("no route to host")));
/// assert_eq!(outcome, Ok(None));
/// assert_eq!(boundary.counts(), (1, 0));
/// assert_eq!(boundary.exception().map(Fault::message), Some("no route to host"));
/// ```
pub struct FaultBoundary {
    config: BoundaryConfig,
    logger: Arc<dyn FaultLogger>,
    formatter: Option<FaultFormatter>,
    post_handler: Option<PostHandler>,
    counters: Arc<FaultCounters>,
    counts: Counts,
    // (shared errors, own errors) when the current entry began
    entry_errors: (u64, u64),
    last_fault: Option<Fault>,
    last_disposition: Option<Disposition>,
}

impl FaultBoundary {
    /// Creates a boundary with default options, logging through `tracing`
    /// and counting into the process-wide counters.
    pub fn new() -> Self {
        Self {
            config: BoundaryConfig::default(),
            logger: Arc::new(TracingLogger),
            formatter: None,
            post_handler: None,
            counters: FaultCounters::global(),
            counts: Counts::default(),
            entry_errors: (0, 0),
            last_fault: None,
            last_disposition: None,
        }
    }

    /// Starts a builder for a customised boundary.
    #[inline]
    pub fn builder() -> FaultBoundaryBuilder {
        FaultBoundaryBuilder::default()
    }

    /// Creates a boundary from plain options and default collaborators.
    #[inline]
    pub fn with_config(config: BoundaryConfig) -> Result<Self, ConfigurationError> {
        Self::builder().config(config).build()
    }

    #[inline]
    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// The fault intercepted during the last entry, if any.
    #[inline]
    pub fn exception(&self) -> Option<&Fault> {
        self.last_fault.as_ref()
    }

    #[inline]
    pub fn errors_count(&self) -> u64 {
        self.counts.errors
    }

    #[inline]
    pub fn warnings_count(&self) -> u64 {
        self.counts.warnings
    }

    /// `(errors, warnings)` counted by this instance across all entries.
    #[inline]
    pub fn counts(&self) -> (u64, u64) {
        self.counts.as_tuple()
    }

    /// The shared counters this instance feeds.
    #[inline]
    pub fn counters(&self) -> &Arc<FaultCounters> {
        &self.counters
    }

    /// `(errors, warnings)` of the shared counters.
    #[inline]
    pub fn global_counts(&self) -> (u64, u64) {
        self.counters.counts()
    }

    #[inline]
    pub fn last_disposition(&self) -> Option<Disposition> {
        self.last_disposition
    }

    /// Classification this boundary assigns to `kind`.
    pub fn classify(&self, kind: &FaultKind) -> Classification {
        if self.config.transparent.matches(kind) {
            Classification::Transparent
        } else {
            kind.family()
        }
    }

    /// Enters the boundary, returning a guard that must be exited with the
    /// region's result.
    ///
    /// Dropping the guard without exiting counts as a normal completion,
    /// unless the thread is panicking, in which case the panic passes
    /// through untouched.
    ///
    /// ```
    /// use fault_boundary::{Fault, FaultBoundary};
    ///
    /// let mut boundary = FaultBoundary::new();
    /// let scope = boundary.enter();
    /// let region: Result<u32, Fault> = Err(Fault::warning("cache is cold"));
    /// assert_eq!(scope.exit(region), Ok(None));
    /// assert_eq!(boundary.warnings_count(), 1);
    /// ```
    pub fn enter(&mut self) -> Scope<'_> {
        self.on_enter();
        Scope::new(self)
    }

    /// Runs `region` inside the boundary.
    #[inline]
    pub fn run<T, F>(&mut self, region: F) -> BoundaryResult<T>
    where
        F: FnOnce() -> Result<T, Fault>,
    {
        let scope = self.enter();
        let result = region();
        scope.exit(result)
    }

    /// Binds this boundary to `func`; each call of the returned wrapper is
    /// one entry, and counts persist across calls.
    #[inline]
    pub fn wrap<F>(self, func: F) -> Guarded<F> {
        Guarded::new(self, func)
    }

    fn on_enter(&mut self) {
        self.last_fault = None;
        self.last_disposition = None;
        self.entry_errors = (self.counters.errors_count(), self.counts.errors);
        if let Some(message) = &self.config.enter_message {
            self.logger.info(message);
        }
    }

    fn on_exit<T>(&mut self, result: Result<T, Fault>) -> BoundaryResult<T> {
        match result {
            Ok(value) => {
                if let Some(escalation) = self.escalation() {
                    let signal = escalation.completion_signal(self.errors_seen());
                    self.settle(Disposition::Escalated, Some(signal.kind()));
                    self.log_exit_line();
                    return Err(signal);
                }
                self.settle(Disposition::Completed, None);
                self.log_exit_line();
                Ok(Some(value))
            },
            Err(fault) => self.intercept(fault).map(|()| None),
        }
    }

    fn on_panic(&mut self) {
        let fault = Fault::new(FaultKind::Unrecoverable, "panicked inside the boundary");
        self.settle(Disposition::PassedThrough, Some(fault.kind()));
        self.last_fault = Some(fault);
    }

    /// Fault path; `Ok(())` means the fault was suppressed.
    fn intercept(&mut self, fault: Fault) -> Result<(), Fault> {
        self.last_fault = Some(fault.clone());

        let classification = self.classify(fault.kind());
        if classification == Classification::Transparent {
            return Err(self.propagate(Disposition::PassedThrough, fault));
        }
        if self.config.reraise_types.matches(fault.kind()) {
            return Err(self.propagate(Disposition::Reraised, fault));
        }

        self.counts.record(classification);
        self.counters.record(classification);
        self.log_fault(classification, &fault);

        let handled = self.post_handler.as_ref().map_or(Ok(()), |handler| handler(&fault));
        if let Err(handler_fault) = handled {
            return Err(self.propagate(Disposition::HandlerFailed, handler_fault));
        }

        let reraise = if fault.is_warning() {
            self.config.reraises_warnings()
        } else {
            self.config.reraises_errors()
        };
        if reraise {
            return Err(self.propagate(Disposition::Reraised, fault));
        }

        if let Some(escalation) = self.escalation() {
            let signal = escalation.signal(&fault, self.errors_seen());
            self.settle(Disposition::Escalated, Some(signal.kind()));
            self.log_exit_line();
            return Err(signal);
        }

        self.settle(Disposition::Suppressed, Some(fault.kind()));
        self.log_exit_line();
        Ok(())
    }

    /// The configured escalation, if any error was counted inside the boundary.
    #[inline]
    fn escalation(&self) -> Option<Escalation> {
        self.config.escalation().filter(|_| self.errors_seen() > 0)
    }

    /// Own errors plus those nested boundaries counted during this entry.
    fn errors_seen(&self) -> u64 {
        let (shared_mark, own_mark) = self.entry_errors;
        let shared = self.counters.errors_count().saturating_sub(shared_mark);
        let own = self.counts.errors.saturating_sub(own_mark);
        self.counts.errors + shared.saturating_sub(own)
    }

    /// Settles a fault that leaves the boundary as the caller's to handle.
    fn propagate(&mut self, disposition: Disposition, fault: Fault) -> Fault {
        self.settle(disposition, Some(fault.kind()));
        if self.config.report_counts {
            self.log_count_summary();
        }
        fault
    }

    fn settle(&mut self, disposition: Disposition, kind: Option<&FaultKind>) {
        match kind {
            Some(kind) => trace!(target: "fault_boundary", %kind, ?disposition, "boundary exit"),
            None => trace!(target: "fault_boundary", ?disposition, "boundary exit"),
        }
        self.last_disposition = Some(disposition);
    }

    fn render(&self, fault: &Fault) -> String {
        match &self.formatter {
            Some(formatter) => formatter(fault),
            None if self.config.show_type => format!("{fault:#}"),
            None => fault.to_string(),
        }
    }

    fn log_fault(&self, classification: Classification, fault: &Fault) {
        let message = self.render(fault);
        match classification {
            Classification::Warning => self.logger.warning(&message),
            _ => self.logger.error(&message),
        }
    }

    fn log_exit_line(&self) {
        let (errors, warnings) = self.counts();
        match (&self.config.exit_message, self.config.report_counts) {
            (Some(message), false) => self.logger.info(message),
            (Some(message), true) => {
                self.logger.info(&format!("{message} (errors: {errors}, warnings: {warnings})"))
            },
            (None, true) => self.log_count_summary(),
            (None, false) => {},
        }
    }

    fn log_count_summary(&self) {
        let errors = self.counts.errors;
        let total = self.counters.errors_count();
        self.logger.info(&format!(
            "encountered {errors} error{} in the current context.",
            plural(errors)
        ));
        self.logger.info(&format!("encountered {total} total error{}.", plural(total)));
    }
}

#[inline]
fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl Default for FaultBoundary {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FaultBoundary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FaultBoundary")
            .field("config", &self.config)
            .field("counts", &self.counts)
            .field("last_fault", &self.last_fault)
            .field("last_disposition", &self.last_disposition)
            .field("formatter", &self.formatter.is_some())
            .field("post_handler", &self.post_handler.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`FaultBoundary`].
///
/// Plain options can be set one by one or all at once through
/// [`FaultBoundaryBuilder::config`]; callables and the counter object are
/// only available here.
///
/// # Examples
///
/// ```
/// use fault_boundary::traits::NullLogger;
/// use fault_boundary::{Fault, FaultBoundary};
///
/// let boundary = FaultBoundary::builder()
///     .logger(NullLogger)
///     .reraise_type_names(["error:io"])
///     .debug(1)
///     .build()
///     .unwrap();
/// assert_eq!(boundary.config().debug, 1);
///
/// let err = FaultBoundary::builder().reraise_type_names(["bogus"]).build().unwrap_err();
/// assert_eq!(err.to_string(), "unknown fault kind `bogus`");
/// ```
#[derive(Default)]
#[must_use]
pub struct FaultBoundaryBuilder {
    config: BoundaryConfig,
    reraise_names: Vec<String>,
    logger: Option<Arc<dyn FaultLogger>>,
    formatter: Option<FaultFormatter>,
    post_handler: Option<PostHandler>,
    counters: Option<Arc<FaultCounters>>,
}

impl FaultBoundaryBuilder {
    /// Replaces every plain option at once.
    #[inline]
    pub fn config(mut self, config: BoundaryConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn enter_message<S: Into<String>>(mut self, message: S) -> Self {
        self.config.enter_message = Some(message.into());
        self
    }

    #[inline]
    pub fn exit_message<S: Into<String>>(mut self, message: S) -> Self {
        self.config.exit_message = Some(message.into());
        self
    }

    #[inline]
    pub fn report_counts(mut self, enabled: bool) -> Self {
        self.config.report_counts = enabled;
        self
    }

    #[inline]
    pub fn on_errors_raise(mut self, escalation: Escalation) -> Self {
        self.config.on_errors_raise = Some(escalation);
        self
    }

    #[inline]
    pub fn on_errors_raise_click_exit(mut self, enabled: bool) -> Self {
        self.config = self.config.with_on_errors_raise_click_exit(enabled);
        self
    }

    #[inline]
    pub fn reraise(self, enabled: bool) -> Self {
        self.reraise_error(enabled)
    }

    #[inline]
    pub fn reraise_error(mut self, enabled: bool) -> Self {
        self.config.reraise_error = enabled;
        self
    }

    #[inline]
    pub fn reraise_warning(mut self, enabled: bool) -> Self {
        self.config.reraise_warning = enabled;
        self
    }

    #[inline]
    pub fn reraise_types(mut self, kinds: KindSet) -> Self {
        self.config.reraise_types = kinds;
        self
    }

    #[inline]
    pub fn reraise_kind(mut self, kind: FaultKind) -> Self {
        self.config.reraise_types.insert(kind);
        self
    }

    /// Adds allow-listed kinds by name; unknown names fail [`build`](Self::build).
    pub fn reraise_type_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reraise_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Replaces the transparent set.
    #[inline]
    pub fn transparent(mut self, kinds: KindSet) -> Self {
        self.config.transparent = kinds;
        self
    }

    #[inline]
    pub fn debug(mut self, level: u8) -> Self {
        self.config.debug = level;
        self
    }

    /// Includes the kind name in log lines.
    #[inline]
    pub fn show_type(mut self, enabled: bool) -> Self {
        self.config.show_type = enabled;
        self
    }

    #[inline]
    pub fn logger<L: FaultLogger + 'static>(mut self, logger: L) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Uses an already shared sink.
    #[inline]
    pub fn shared_logger(mut self, logger: Arc<dyn FaultLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    #[inline]
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Fault) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    #[inline]
    pub fn post_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Fault) -> Result<(), Fault> + Send + Sync + 'static,
    {
        self.post_handler = Some(Arc::new(handler));
        self
    }

    /// Feeds `counters` instead of the process-wide counters.
    #[inline]
    pub fn counters(mut self, counters: Arc<FaultCounters>) -> Self {
        self.counters = Some(counters);
        self
    }

    /// Validates the options and builds the boundary.
    pub fn build(self) -> Result<FaultBoundary, ConfigurationError> {
        let mut config = self.config;
        let named = KindSet::from_names(&self.reraise_names)?;
        config.reraise_types.extend(named);
        config.validate()?;

        Ok(FaultBoundary {
            config,
            logger: self.logger.unwrap_or_else(|| Arc::new(TracingLogger)),
            formatter: self.formatter,
            post_handler: self.post_handler,
            counters: self.counters.unwrap_or_else(FaultCounters::global),
            counts: Counts::default(),
            entry_errors: (0, 0),
            last_fault: None,
            last_disposition: None,
        })
    }
}

//! Fault kinds and kind collections.
//!
//! A [`FaultKind`] is the typed tag a boundary inspects to decide how a fault is
//! handled. Six built-in tags describe control-flow signals that are normally
//! passed through untouched; the remaining tags form the error and warning
//! families, each with a generic member ([`FaultKind::Error`],
//! [`FaultKind::Warning`]) and open-ended named members.
//!
//! # Examples
//!
//! ```
//! use fault_boundary::{FaultKind, KindSet};
//!
//! let io = FaultKind::named_error("io");
//! assert!(io.is_error());
//! assert!(io.matches(&FaultKind::Error));
//! assert!(!io.matches(&FaultKind::Warning));
//!
//! let transparent = KindSet::control_flow();
//! assert!(transparent.matches(&FaultKind::Interrupt));
//! assert!(!transparent.matches(&io));
//! ```

use core::fmt::{self, Display};
use core::str::FromStr;
use std::borrow::Cow;

use smallvec::SmallVec;

use crate::types::ConfigurationError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Typed tag identifying what kind of fault was raised.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// End of an iteration; not a failure.
    StopIteration,
    /// Unrecoverable runtime condition (the analogue of a panic).
    Unrecoverable,
    /// Intentional process termination.
    SystemExit,
    /// Interactive interrupt (Ctrl-C).
    Interrupt,
    /// Abort signal of a command-line front end.
    CliAbort,
    /// Clean-exit signal of a command-line front end.
    CliExit,
    /// Generic member of the error family.
    Error,
    /// Generic member of the warning family.
    Warning,
    /// Named member of the error family.
    NamedError(Cow<'static, str>),
    /// Named member of the warning family.
    NamedWarning(Cow<'static, str>),
}

/// Classification assigned to an intercepted fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Warning,
    Error,
    Transparent,
}

impl FaultKind {
    /// The control-flow tags, in declaration order.
    pub const CONTROL_FLOW: [FaultKind; 6] = [
        FaultKind::StopIteration,
        FaultKind::Unrecoverable,
        FaultKind::SystemExit,
        FaultKind::Interrupt,
        FaultKind::CliAbort,
        FaultKind::CliExit,
    ];

    /// Creates a named member of the error family.
    #[inline]
    pub fn named_error<S: Into<Cow<'static, str>>>(name: S) -> Self {
        Self::NamedError(name.into())
    }

    /// Creates a named member of the warning family.
    #[inline]
    pub fn named_warning<S: Into<Cow<'static, str>>>(name: S) -> Self {
        Self::NamedWarning(name.into())
    }

    /// Returns `true` for members of the warning family.
    #[inline]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning | Self::NamedWarning(_))
    }

    /// Returns `true` for members of the error family.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error | Self::NamedError(_))
    }

    /// Returns `true` for the built-in control-flow signals.
    #[inline]
    pub fn is_control_flow(&self) -> bool {
        !self.is_warning() && !self.is_error()
    }

    /// Returns `true` when `self` is, or derives from, `pattern`.
    ///
    /// The generic [`FaultKind::Error`] and [`FaultKind::Warning`] tags match
    /// every member of their family; all other tags match only themselves.
    pub fn matches(&self, pattern: &FaultKind) -> bool {
        match pattern {
            Self::Error => self.is_error(),
            Self::Warning => self.is_warning(),
            other => self == other,
        }
    }

    /// Family-based classification, ignoring any transparent set.
    ///
    /// Control-flow tags that reach classification (because a caller removed
    /// them from the transparent set) count as errors.
    #[inline]
    pub fn family(&self) -> Classification {
        if self.is_warning() {
            Classification::Warning
        } else {
            Classification::Error
        }
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &str {
        match self {
            Self::StopIteration => "StopIteration",
            Self::Unrecoverable => "Unrecoverable",
            Self::SystemExit => "SystemExit",
            Self::Interrupt => "Interrupt",
            Self::CliAbort => "CliAbort",
            Self::CliExit => "CliExit",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::NamedError(name) | Self::NamedWarning(name) => name.as_ref(),
        }
    }
}

impl Display for FaultKind {
    /// Writes the parseable form: built-in names verbatim, named kinds as
    /// `error:<name>` / `warning:<name>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedError(name) => write!(f, "error:{name}"),
            Self::NamedWarning(name) => write!(f, "warning:{name}"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for FaultKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "StopIteration" => Self::StopIteration,
            "Unrecoverable" => Self::Unrecoverable,
            "SystemExit" => Self::SystemExit,
            "Interrupt" => Self::Interrupt,
            "CliAbort" => Self::CliAbort,
            "CliExit" => Self::CliExit,
            "Error" => Self::Error,
            "Warning" => Self::Warning,
            _ => match s.split_once(':') {
                Some(("error", name)) if !name.is_empty() => Self::named_error(name.to_owned()),
                Some(("warning", name)) if !name.is_empty() => {
                    Self::named_warning(name.to_owned())
                },
                _ => return Err(ConfigurationError::UnknownKind { name: s.to_owned() }),
            },
        };
        Ok(kind)
    }
}

impl TryFrom<String> for FaultKind {
    type Error = ConfigurationError;

    #[inline]
    fn try_from(value: String) -> Result<Self, ConfigurationError> {
        value.parse()
    }
}

impl From<FaultKind> for String {
    #[inline]
    fn from(kind: FaultKind) -> Self {
        kind.to_string()
    }
}

/// Small collection of fault-kind patterns.
///
/// Membership is tested with [`KindSet::matches`], which honours the family
/// semantics of [`FaultKind::matches`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<FaultKind>", into = "Vec<FaultKind>"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindSet {
    kinds: SmallVec<[FaultKind; 6]>,
}

impl KindSet {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self { kinds: SmallVec::new() }
    }

    /// The default transparent set: every control-flow signal.
    pub fn control_flow() -> Self {
        FaultKind::CONTROL_FLOW.into_iter().collect()
    }

    /// Parses a set from kind names, failing on the first unknown name.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().map(|name| name.as_ref().parse()).collect()
    }

    /// Adds a kind; duplicates are ignored.
    pub fn insert(&mut self, kind: FaultKind) {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
    }

    /// Builder-style [`KindSet::insert`].
    #[inline]
    pub fn with(mut self, kind: FaultKind) -> Self {
        self.insert(kind);
        self
    }

    /// Removes a kind, returning whether it was present.
    pub fn remove(&mut self, kind: &FaultKind) -> bool {
        match self.kinds.iter().position(|k| k == kind) {
            Some(index) => {
                self.kinds.remove(index);
                true
            },
            None => false,
        }
    }

    /// Exact membership test.
    #[inline]
    pub fn contains(&self, kind: &FaultKind) -> bool {
        self.kinds.contains(kind)
    }

    /// Returns `true` if any pattern in the set matches `kind`.
    #[inline]
    pub fn matches(&self, kind: &FaultKind) -> bool {
        self.kinds.iter().any(|pattern| kind.matches(pattern))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FaultKind> {
        self.kinds.iter()
    }
}

impl FromIterator<FaultKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = FaultKind>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<FaultKind> for KindSet {
    fn extend<I: IntoIterator<Item = FaultKind>>(&mut self, iter: I) {
        for kind in iter {
            self.insert(kind);
        }
    }
}

impl<'a> IntoIterator for &'a KindSet {
    type Item = &'a FaultKind;
    type IntoIter = core::slice::Iter<'a, FaultKind>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for KindSet {
    type Item = FaultKind;
    type IntoIter = smallvec::IntoIter<[FaultKind; 6]>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.kinds.into_iter()
    }
}

impl From<Vec<FaultKind>> for KindSet {
    #[inline]
    fn from(kinds: Vec<FaultKind>) -> Self {
        kinds.into_iter().collect()
    }
}

impl From<KindSet> for Vec<FaultKind> {
    #[inline]
    fn from(set: KindSet) -> Self {
        set.kinds.into_vec()
    }
}

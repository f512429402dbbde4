//! Diagnostics recorded while loading, and the trackers that collect them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

use crate::load::LoadItem;
use crate::location::{LoadLocation, LocationFile};
use crate::origin::TableOrigin;

/// Severity of a recorded issue. Ordered: `Warning < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// The matching `tracing` level, used when issues are mirrored to the
    /// log stream.
    pub fn tracing_level(self) -> Level {
        match self {
            Self::Warning => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong: a plain message or an underlying error.
#[derive(Debug)]
pub enum IssueDetail {
    Message(String),
    Error(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for IssueDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Error(error) => write!(f, "{error}"),
        }
    }
}

impl From<String> for IssueDetail {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for IssueDetail {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for IssueDetail {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Error(error)
    }
}

/// One diagnostic discovered while loading, tagged with whichever of
/// (request, location, origin) was available at the point of report.
#[derive(Debug)]
pub struct InputIssue {
    detail: IssueDetail,
    severity: Severity,
    load_item: Option<LoadItem>,
    location_file: Option<Arc<dyn LocationFile>>,
    origin: Option<TableOrigin>,
}

impl InputIssue {
    pub fn new(detail: impl Into<IssueDetail>, severity: Severity) -> Self {
        Self {
            detail: detail.into(),
            severity,
            load_item: None,
            location_file: None,
            origin: None,
        }
    }

    pub fn error(detail: impl Into<IssueDetail>) -> Self {
        Self::new(detail, Severity::Error)
    }

    pub fn warning(detail: impl Into<IssueDetail>) -> Self {
        Self::new(detail, Severity::Warning)
    }

    /// Tag with the request that was being resolved.
    #[must_use]
    pub fn with_load_item(mut self, load_item: LoadItem) -> Self {
        self.load_item = Some(load_item);
        self
    }

    /// Tag with the file that was being read.
    #[must_use]
    pub fn with_location_file(mut self, location_file: Arc<dyn LocationFile>) -> Self {
        self.location_file = Some(location_file);
        self
    }

    /// Tag with the origin of the table under processing.
    #[must_use]
    pub fn with_origin(mut self, origin: TableOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn detail(&self) -> &IssueDetail {
        &self.detail
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn load_item(&self) -> Option<&LoadItem> {
        self.load_item.as_ref()
    }

    pub fn location_file(&self) -> Option<&Arc<dyn LocationFile>> {
        self.location_file.as_ref()
    }

    pub fn origin(&self) -> Option<&TableOrigin> {
        self.origin.as_ref()
    }

    /// The most precise context identifier attached to this issue, if any.
    fn context_identifier(&self) -> Option<String> {
        if let Some(origin) = &self.origin
            && let Some(location) = origin.input_ancestors().next()
        {
            return Some(location.interactive_identifier());
        }
        if let Some(file) = &self.location_file {
            return Some(file.interactive_identifier());
        }
        self.load_item.as_ref().map(ToString::to_string)
    }
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.detail)?;
        if let Some(context) = self.context_identifier() {
            write!(f, " [{context}]")?;
        }
        Ok(())
    }
}

/// Irrecoverable failure of input processing.
///
/// Returned by a fail-fast tracker on any reported issue; propagating it
/// with `?` aborts the pipeline at the first problem.
#[derive(Debug, Error)]
#[error("input processing failed: {issue}")]
pub struct InputError {
    issue: InputIssue,
}

impl InputError {
    pub fn new(issue: InputIssue) -> Self {
        Self { issue }
    }

    pub fn issue(&self) -> &InputIssue {
        &self.issue
    }

    pub fn into_issue(self) -> InputIssue {
        self.issue
    }
}

/// An issue wrapped in an error to bubble up through layers that have no
/// tracker in scope.
///
/// Must always be intercepted (see [`IssueTracker::intercept`]) and turned
/// into a tracked issue before the load pipeline returns; observing one
/// outside the pipeline is a bug. For errors where tracking makes no
/// sense, use a different error type.
#[derive(Debug, Error)]
#[error("unhandled input issue: {issue}")]
pub struct PendingIssue {
    issue: InputIssue,
}

impl PendingIssue {
    pub fn new(issue: InputIssue) -> Self {
        Self { issue }
    }

    pub fn into_issue(self) -> InputIssue {
        self.issue
    }
}

/// Tracks issues across inputs.
///
/// `add_issue` is the sole primitive; the severity-fixing wrappers and the
/// derived `is_ok` are defined on top of it. The two strategies -- abort
/// on first issue vs. accumulate for batch reporting -- are two
/// implementations chosen by the caller.
pub trait IssueTracker {
    /// Record one issue. A fail-fast implementation returns `Err` instead
    /// of recording.
    fn add_issue(&mut self, issue: InputIssue) -> Result<(), InputError>;

    /// The recorded issues, in report order.
    fn issues(&self) -> &[InputIssue];

    /// Record an error-severity issue.
    fn add_error(&mut self, detail: IssueDetail) -> Result<(), InputError> {
        self.add_issue(InputIssue::new(detail, Severity::Error))
    }

    /// Record a warning about a non-critical input issue, e.g. additional
    /// columns or tables compared to a template.
    fn add_warning(&mut self, detail: IssueDetail) -> Result<(), InputError> {
        self.add_issue(InputIssue::new(detail, Severity::Warning))
    }

    /// True if no recorded issue has error severity.
    fn is_ok(&self) -> bool {
        !self
            .issues()
            .iter()
            .any(|issue| issue.severity() >= Severity::Error)
    }

    /// Convert a ferried issue into a tracked one. Every [`PendingIssue`]
    /// raised inside the pipeline must pass through here.
    fn intercept(&mut self, pending: PendingIssue) -> Result<(), InputError> {
        self.add_issue(pending.into_issue())
    }
}

/// Tracker that aborts processing on the first reported issue.
///
/// Nothing is ever recorded: `issues()` stays empty and `is_ok()` stays
/// true, because the pipeline terminates before recording.
#[derive(Debug, Default)]
pub struct FailFastTracker;

impl FailFastTracker {
    pub fn new() -> Self {
        Self
    }
}

impl IssueTracker for FailFastTracker {
    fn add_issue(&mut self, issue: InputIssue) -> Result<(), InputError> {
        Err(InputError::new(issue))
    }

    fn issues(&self) -> &[InputIssue] {
        &[]
    }
}

/// Tracker that collects issues for batch reporting.
///
/// Issues are appended in report order and mirrored to the log stream at
/// the level matching their severity; the caller inspects `is_ok()` and
/// `issues()` after a full pass.
#[derive(Debug, Default)]
pub struct AccumulatingTracker {
    issues: Vec<InputIssue>,
}

impl AccumulatingTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IssueTracker for AccumulatingTracker {
    fn add_issue(&mut self, issue: InputIssue) -> Result<(), InputError> {
        match issue.severity() {
            Severity::Warning => tracing::warn!(%issue, "input issue"),
            Severity::Error => tracing::error!(%issue, "input issue"),
        }
        self.issues.push(issue);
        Ok(())
    }

    fn issues(&self) -> &[InputIssue] {
        &self.issues
    }
}

use std::fmt;

use archiver_core::RunResult;

/// Terminal failure of one archival run, with a locale-appropriate message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    pub kind: FailureKind,
    pub message: String,
}

impl DriverError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DriverError {}

/// Why a run failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// A required element never appeared within its timeout.
    ElementTimeout { selector: String },
    /// The bulk archive control was never located. Fatal and not retried:
    /// it means the host interface's structure no longer matches.
    ActionNotFound,
    /// The control was found but invoking it failed.
    ActionFailed { reason: String },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ElementTimeout { selector } => {
                write!(f, "element timeout: {selector}")
            }
            FailureKind::ActionNotFound => write!(f, "archive control not found"),
            FailureKind::ActionFailed { reason } => {
                write!(f, "archive control invocation failed: {reason}")
            }
        }
    }
}

/// Outbound events from the driver worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// One more item was selected; carries the running total.
    Progress { count: u64 },
    /// The run reached `Done`.
    RunCompleted {
        result: Result<RunResult, DriverError>,
    },
}

/// Synchronous answer to a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The run was queued on the worker.
    Accepted,
    /// A run is already active; the request was dropped.
    AlreadyRunning,
}

use std::fmt;

/// Output of the selection phase, aggregated across all passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionResult {
    /// Number of items successfully toggled across all passes.
    pub total_selected: u64,
    /// Whether the final recount found zero unselected items.
    pub all_selected: bool,
}

/// How a run ended. Stopping and finding nothing to do are normal outcomes,
/// not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every eligible item was selected and the bulk control invoked.
    Archived,
    /// The bulk control was invoked but some items were never selected.
    Partial,
    /// The stop signal ended the run early.
    Stopped,
    /// No eligible items were found.
    NothingToDo,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunOutcome::Archived => "archived",
            RunOutcome::Partial => "partial",
            RunOutcome::Stopped => "stopped",
            RunOutcome::NothingToDo => "nothing to do",
        };
        write!(f, "{name}")
    }
}

/// Terminal, externally visible result of one archival run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Final progress count at the moment the run reached `Done`.
    pub count: u64,
    pub outcome: RunOutcome,
    /// Human-readable status in the run's locale.
    pub message: String,
}

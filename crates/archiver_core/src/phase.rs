use std::fmt;

/// Phase of one archival run.
///
/// `Paused` is deliberately not a phase: pausing is an orthogonal flag that
/// only the selection phase honors. Stop short-circuits any phase to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Loading,
    Selecting,
    Verifying,
    Locating,
    Acting,
    Done,
}

impl RunPhase {
    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: RunPhase) -> bool {
        use RunPhase::*;
        // The stop signal may collapse any phase straight to Done.
        if next == Done {
            return true;
        }
        matches!(
            (self, next),
            (Idle, Loading)
                | (Loading, Selecting)
                | (Selecting, Verifying)
                | (Verifying, Selecting)
                | (Verifying, Locating)
                | (Locating, Acting)
                | (Done, Idle)
        )
    }

    /// True once the run has reached its terminal phase.
    pub fn is_terminal(self) -> bool {
        self == RunPhase::Done
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Loading => "loading",
            RunPhase::Selecting => "selecting",
            RunPhase::Verifying => "verifying",
            RunPhase::Locating => "locating",
            RunPhase::Acting => "acting",
            RunPhase::Done => "done",
        };
        write!(f, "{name}")
    }
}

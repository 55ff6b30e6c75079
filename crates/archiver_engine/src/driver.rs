use std::time::Duration;

use archiver_core::{MessageKey, RunOutcome, RunPhase, RunResult};
use archiver_logging::{driver_debug, driver_error};

use crate::context::RunContext;
use crate::dom::DomSurface;
use crate::locate::find_archive_control;
use crate::probe::wait_for_element;
use crate::scroll::load_entire_list;
use crate::select::select_all;
use crate::types::{DriverError, FailureKind};

/// Orchestrates one archival run through the phase machine:
/// load, select with bounded retries, verify, locate, act.
pub struct ArchiveDriver {
    phase: RunPhase,
}

impl ArchiveDriver {
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Idle,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Execute one run. `action_delay` is the per-run wait after invoking
    /// the control (the start command's delay parameter).
    ///
    /// Always produces a structured outcome: stopped and nothing-to-do are
    /// ordinary results, while probe timeouts and a missing control map to
    /// locale-appropriate errors.
    pub async fn run(
        &mut self,
        ctx: &RunContext,
        dom: &dyn DomSurface,
        action_delay: Duration,
    ) -> Result<RunResult, DriverError> {
        ctx.state.reset_for_run();
        self.phase = RunPhase::Idle;
        self.advance(RunPhase::Loading);

        let list_selector = ctx.config.selectors.list_container.clone();
        if let Err(kind) = wait_for_element(dom, &list_selector, ctx.config.timing.element_timeout)
            .await
        {
            let message = ctx.message(MessageKey::ElementTimeout, &[&list_selector]);
            driver_error!("{message}");
            self.advance(RunPhase::Done);
            return Err(DriverError::new(kind, message));
        }

        load_entire_list(ctx, dom).await;

        self.advance(RunPhase::Selecting);
        let selection = select_all(ctx, dom, ctx.config.max_selection_attempts).await;
        self.advance(RunPhase::Verifying);

        if ctx.state.is_stopped() {
            return Ok(self.stopped_result(ctx));
        }

        if selection.total_selected == 0 {
            self.advance(RunPhase::Done);
            return Ok(RunResult {
                count: 0,
                outcome: RunOutcome::NothingToDo,
                message: ctx.message(MessageKey::NoConversations, &[]),
            });
        }

        self.advance(RunPhase::Locating);
        let Some(control) = find_archive_control(ctx, dom).await else {
            let message = ctx.message(MessageKey::ArchiveControlMissing, &[]);
            driver_error!("{message}");
            self.advance(RunPhase::Done);
            return Err(DriverError::new(FailureKind::ActionNotFound, message));
        };

        if ctx.state.is_stopped() {
            return Ok(self.stopped_result(ctx));
        }

        self.advance(RunPhase::Acting);
        if let Err(err) = dom.click(control) {
            let message = ctx.message(MessageKey::ActionFailed, &[&err.reason]);
            driver_error!("{message}");
            self.advance(RunPhase::Done);
            return Err(DriverError::new(
                FailureKind::ActionFailed { reason: err.reason },
                message,
            ));
        }
        tokio::time::sleep(action_delay).await;

        self.advance(RunPhase::Done);
        let count = selection.total_selected;
        let mut message = ctx.message(MessageKey::ArchiveSuccess, &[&count.to_string()]);
        let outcome = if selection.all_selected {
            RunOutcome::Archived
        } else {
            message.push_str(&ctx.message(MessageKey::IncompleteWarning, &[]));
            RunOutcome::Partial
        };
        Ok(RunResult {
            count,
            outcome,
            message,
        })
    }

    fn stopped_result(&mut self, ctx: &RunContext) -> RunResult {
        self.advance(RunPhase::Done);
        RunResult {
            count: ctx.state.progress(),
            outcome: RunOutcome::Stopped,
            message: ctx.message(MessageKey::ProcessStopped, &[]),
        }
    }

    fn advance(&mut self, next: RunPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal phase transition {} -> {next}",
            self.phase
        );
        driver_debug!("run phase {} -> {next}", self.phase);
        self.phase = next;
    }
}

impl Default for ArchiveDriver {
    fn default() -> Self {
        Self::new()
    }
}

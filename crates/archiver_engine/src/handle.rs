use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use archiver_core::{DriverConfig, Locale, MessageKey};
use archiver_logging::driver_info;

use crate::context::{RunContext, RunState};
use crate::dom::DomSurface;
use crate::driver::ArchiveDriver;
use crate::settings::SettingsStore;
use crate::types::{DriverEvent, StartOutcome};

enum DriverCommand {
    Start { action_delay: Duration },
}

/// Host-facing handle: the asynchronous command channel in, the progress and
/// completion events out.
///
/// Runs execute on a dedicated worker thread owning a tokio runtime, one at
/// a time. `pause`, `resume`, `stop` and `set_language` are plain flag or
/// locale writes acknowledged by returning; only `start` crosses the channel
/// and answers later through a `RunCompleted` event.
pub struct DriverHandle {
    cmd_tx: mpsc::Sender<DriverCommand>,
    event_rx: mpsc::Receiver<DriverEvent>,
    state: Arc<RunState>,
    settings: Arc<dyn SettingsStore>,
    running: Arc<AtomicBool>,
    default_delay: Duration,
}

impl DriverHandle {
    pub fn new(
        dom: Arc<dyn DomSurface>,
        config: DriverConfig,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        let loaded = settings.load();
        let default_delay = Duration::from_millis(loaded.action_delay_ms);
        let state = Arc::new(RunState::new(loaded.locale));
        let config = Arc::new(config);

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(false));

        let ctx = RunContext::new(state.clone(), config, event_tx);
        let worker_running = running.clone();
        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut driver = ArchiveDriver::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    DriverCommand::Start { action_delay } => {
                        let result =
                            runtime.block_on(driver.run(&ctx, dom.as_ref(), action_delay));
                        worker_running.store(false, Ordering::Release);
                        ctx.emit(DriverEvent::RunCompleted { result });
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx,
            state,
            settings,
            running,
            default_delay,
        }
    }

    /// Queue a run. `action_delay` overrides the persisted default for the
    /// wait after the control is invoked. At most one run is active; a
    /// second start while one is running is rejected, not queued.
    pub fn start(&self, action_delay: Option<Duration>) -> StartOutcome {
        if self.running.swap(true, Ordering::AcqRel) {
            return StartOutcome::AlreadyRunning;
        }
        let action_delay = action_delay.unwrap_or(self.default_delay);
        let _ = self.cmd_tx.send(DriverCommand::Start { action_delay });
        StartOutcome::Accepted
    }

    /// Suspend item processing at the next checkpoint. Progress is kept.
    pub fn pause(&self) {
        self.state.pause();
    }

    pub fn resume(&self) {
        self.state.resume();
    }

    /// Raise the stop signal; the run unwinds to `Done` at its next
    /// checkpoint and reports a stopped result.
    pub fn stop(&self) {
        self.state.stop();
        driver_info!(
            "{}",
            archiver_core::lookup(self.state.locale(), MessageKey::ProcessStopped, &[])
        );
    }

    /// Switch the locale used for all subsequent messages and persist it as
    /// the default for future sessions.
    pub fn set_language(&self, locale: Locale) {
        self.state.set_locale(locale);
        let mut settings = self.settings.load();
        settings.locale = locale;
        self.settings.save(&settings);
    }

    /// Non-blocking event drain for hosts polling from their own loop.
    pub fn try_recv(&self) -> Option<DriverEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocking event receive with a deadline.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<DriverEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use archiver_core::{lookup, DriverConfig, Locale, MessageKey};
use archiver_logging::driver_info;

use crate::types::DriverEvent;

/// Mutable state shared between one run and the external command side.
///
/// Commands write `paused`/`stopped`/`locale`; the selection engine writes
/// `progress`. All fields are independent flags or a counter, so plain
/// atomics (plus a mutex for the locale tag) are enough.
#[derive(Debug)]
pub struct RunState {
    paused: AtomicBool,
    stopped: AtomicBool,
    progress: AtomicU64,
    locale: Mutex<Locale>,
}

impl RunState {
    pub fn new(locale: Locale) -> Self {
        Self {
            paused: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            progress: AtomicU64::new(0),
            locale: Mutex::new(locale),
        }
    }

    /// Clear flags and progress at the start of a run. The locale carries
    /// over from the previous run unless a command changed it.
    pub fn reset_for_run(&self) {
        self.paused.store(false, Ordering::Relaxed);
        self.stopped.store(false, Ordering::Relaxed);
        self.progress.store(0, Ordering::Relaxed);
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    /// Raise the stop signal. Also clears pause so a paused run can unwind.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
        self.paused.store(false, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub fn progress(&self) -> u64 {
        self.progress.load(Ordering::Relaxed)
    }

    /// Record one successful selection and return the new running total.
    pub fn record_selection(&self) -> u64 {
        self.progress.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn locale(&self) -> Locale {
        *self.locale.lock().expect("locale lock")
    }

    pub fn set_locale(&self, locale: Locale) {
        *self.locale.lock().expect("locale lock") = locale;
    }
}

/// Everything a collaborator needs for one run: shared state, configuration
/// and the outbound event channel. Passed explicitly instead of living in
/// module globals so tests can drive arbitrary pause/stop sequences.
#[derive(Clone)]
pub struct RunContext {
    pub state: Arc<RunState>,
    pub config: Arc<DriverConfig>,
    events: mpsc::Sender<DriverEvent>,
}

impl RunContext {
    pub fn new(
        state: Arc<RunState>,
        config: Arc<DriverConfig>,
        events: mpsc::Sender<DriverEvent>,
    ) -> Self {
        Self {
            state,
            config,
            events,
        }
    }

    /// Fire-and-forget progress notification. A closed receiver is not an
    /// error: progress display is optional.
    pub fn emit_progress(&self, count: u64) {
        let _ = self.events.send(DriverEvent::Progress { count });
    }

    pub(crate) fn emit(&self, event: DriverEvent) {
        let _ = self.events.send(event);
    }

    /// Catalog lookup in the run's current locale.
    pub fn message(&self, key: MessageKey, args: &[&str]) -> String {
        lookup(self.state.locale(), key, args)
    }

    /// Cooperative checkpoint: suspends while paused, returns immediately
    /// once resumed or stopped. Progress accumulated so far is untouched.
    pub async fn pause_point(&self) {
        let mut logged = false;
        while self.state.is_paused() && !self.state.is_stopped() {
            if !logged {
                driver_info!("{}", self.message(MessageKey::ProcessPaused, &[]));
                logged = true;
            }
            tokio::time::sleep(self.config.timing.settle_delay).await;
        }
        if logged && !self.state.is_stopped() {
            driver_info!("{}", self.message(MessageKey::ProcessResumed, &[]));
        }
    }
}

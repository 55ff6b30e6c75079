use std::time::Duration;

use crate::VisibilityPolicy;

/// Selectors for the host messaging interface.
///
/// The defaults target the conversation list markup the driver was written
/// for; tests and alternative hosts inject their own set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// The scrollable list container.
    pub list_container: String,
    /// Selection checkbox inside an item.
    pub checkbox: String,
    /// Clickable wrapper around a checkbox. Clicks go here, not to the
    /// input itself, which does not reliably accept synthetic clicks.
    pub checkbox_container: String,
    /// An eligible (not yet archived) list item.
    pub eligible_item: String,
    /// The bulk-operations action bar.
    pub action_bar: String,
    /// Page-wide fallbacks for the archive control, tried in order.
    pub control_fallbacks: Vec<String>,
}

impl SelectorConfig {
    /// Combined selector for checkboxes of eligible items.
    pub fn item_checkboxes(&self) -> String {
        format!("{} {}", self.eligible_item, self.checkbox)
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            list_container: ".msg-conversations-container__conversations-list".to_string(),
            checkbox: ".msg-selectable-entity__input[type=\"checkbox\"]".to_string(),
            checkbox_container: ".msg-selectable-entity__checkbox-container".to_string(),
            eligible_item: ".msg-conversation-listitem:not(.msg-conversation-card--archived)"
                .to_string(),
            action_bar: ".msg-multisend-action-bar".to_string(),
            control_fallbacks: vec![
                "button[data-control-name=\"archive_selected\"]".to_string(),
                "button[aria-label*=\"Archive\"]".to_string(),
                "button[aria-label*=\"Archivar\"]".to_string(),
                ".msg-multisend-action-button[aria-label*=\"Archive\"]".to_string(),
                ".msg-multisend-action-button[aria-label*=\"Archivar\"]".to_string(),
            ],
        }
    }
}

/// Delays and timeouts for the run's suspension points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// How long the presence probe waits for a required element.
    pub element_timeout: Duration,
    /// Shorter probe budget for the action bar before falling back.
    pub action_bar_timeout: Duration,
    /// Settle time after each scroll step.
    pub scroll_delay: Duration,
    /// Settle time before each click, also the pause-poll interval.
    pub settle_delay: Duration,
    /// Delay between selection passes and after invoking the control.
    pub action_delay: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            element_timeout: Duration::from_millis(5000),
            action_bar_timeout: Duration::from_millis(2000),
            scroll_delay: Duration::from_millis(500),
            settle_delay: Duration::from_millis(100),
            action_delay: Duration::from_millis(1000),
        }
    }
}

/// Immutable configuration injected into the driver at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub selectors: SelectorConfig,
    pub timing: TimingConfig,
    /// Maximum number of whole selection passes per run.
    pub max_selection_attempts: u32,
    /// Consecutive unchanged height measurements that count as "fully loaded".
    pub scroll_convergence: u32,
    pub visibility: VisibilityPolicy,
    /// Lowercase substrings that identify the archive control's label or text.
    pub archive_tokens: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            timing: TimingConfig::default(),
            max_selection_attempts: 3,
            scroll_convergence: 3,
            visibility: VisibilityPolicy::default(),
            archive_tokens: vec!["archive".to_string(), "archivar".to_string()],
        }
    }
}

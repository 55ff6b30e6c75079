//! Archiver core: pure run-lifecycle types, configuration and message catalog.
mod catalog;
mod config;
mod matcher;
mod outcome;
mod phase;
mod visibility;

pub use catalog::{lookup, Locale, MessageKey};
pub use config::{DriverConfig, SelectorConfig, TimingConfig};
pub use matcher::is_archive_control_label;
pub use outcome::{RunOutcome, RunResult, SelectionResult};
pub use phase::RunPhase;
pub use visibility::{ElementRect, VisibilityPolicy};

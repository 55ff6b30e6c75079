//! Archiver engine: DOM-driving collaborators and the archival run driver.
mod context;
mod dom;
mod driver;
mod handle;
mod locate;
mod probe;
mod scroll;
mod select;
mod settings;
mod types;

pub use context::{RunContext, RunState};
pub use dom::{ClickError, DomSurface, NodeId};
pub use driver::ArchiveDriver;
pub use handle::DriverHandle;
pub use locate::find_archive_control;
pub use probe::wait_for_element;
pub use scroll::load_entire_list;
pub use select::{count_unselected, select_all};
pub use settings::{ArchiverSettings, PersistError, RonSettingsStore, SettingsStore};
pub use types::{DriverError, DriverEvent, FailureKind, StartOutcome};

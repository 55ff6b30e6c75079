use archiver_core::ElementRect;
use thiserror::Error;
use tokio::sync::watch;

/// Opaque handle to a currently rendered element.
///
/// Handles are ephemeral: the host page re-renders freely, so a `NodeId`
/// must never be kept across a suspension point. Collaborators re-resolve
/// by query at the top of each loop body instead.
pub type NodeId = u64;

/// A synthetic click that the host page rejected or that hit a stale node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("synthetic click failed: {reason}")]
pub struct ClickError {
    pub reason: String,
}

impl ClickError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Narrow capability surface over the host page's DOM.
///
/// This is the only seam between the driver and a live host; tests supply a
/// scripted fake. Queries on a stale `NodeId` return empty/`None` results
/// rather than panicking, mirroring how a re-rendered page behaves.
pub trait DomSurface: Send + Sync {
    /// First element matching `selector`, if any.
    fn query(&self, selector: &str) -> Option<NodeId>;
    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<NodeId>;
    /// All elements matching `selector` inside `node`.
    fn query_within(&self, node: NodeId, selector: &str) -> Vec<NodeId>;
    /// Nearest ancestor (or self) of `node` matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId>;
    /// Attribute value on `node`.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    /// Concatenated visible text of `node`.
    fn text(&self, node: NodeId) -> String;
    /// Checked state of a checkbox input. Stale nodes read as checked so
    /// they are skipped rather than re-clicked.
    fn is_checked(&self, node: NodeId) -> bool;
    /// Viewport-relative bounds of `node`, if it is still rendered.
    fn rect(&self, node: NodeId) -> Option<ElementRect>;
    /// Height of the viewport in CSS pixels.
    fn viewport_height(&self) -> f64;
    /// Total scrollable height of `node`.
    fn scroll_height(&self, node: NodeId) -> f64;
    /// Set the vertical scroll offset of `node`.
    fn scroll_to(&self, node: NodeId, y: f64);
    /// Adjust the vertical scroll offset of `node` by `dy`.
    fn scroll_by(&self, node: NodeId, dy: f64);
    /// Dispatch a synthetic click on `node`.
    fn click(&self, node: NodeId) -> Result<(), ClickError>;
    /// Change feed bumped on every DOM mutation batch. The presence probe
    /// awaits this instead of polling.
    fn mutations(&self) -> watch::Receiver<u64>;
}

use std::time::Duration;

use tokio::time::Instant;

use crate::dom::{DomSurface, NodeId};
use crate::types::FailureKind;

/// Wait for the first element matching `selector`.
///
/// Checks synchronously first so an already-present element is never missed,
/// then awaits the DOM mutation feed instead of polling, re-querying after
/// each notification. Gives up when `timeout` elapses. Retry policy belongs
/// to callers; the probe itself never retries past the deadline.
pub async fn wait_for_element(
    dom: &dyn DomSurface,
    selector: &str,
    timeout: Duration,
) -> Result<NodeId, FailureKind> {
    if let Some(node) = dom.query(selector) {
        return Ok(node);
    }

    let mut feed = dom.mutations();
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(FailureKind::ElementTimeout {
                selector: selector.to_string(),
            });
        }

        match tokio::time::timeout(remaining, feed.changed()).await {
            Ok(Ok(())) => {
                if let Some(node) = dom.query(selector) {
                    return Ok(node);
                }
            }
            // Feed closed: no further mutations can produce the element.
            Ok(Err(_)) | Err(_) => {
                return Err(FailureKind::ElementTimeout {
                    selector: selector.to_string(),
                });
            }
        }
    }
}

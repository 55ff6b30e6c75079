use archiver_core::{is_archive_control_label, MessageKey};
use archiver_logging::{driver_debug, driver_info};

use crate::context::RunContext;
use crate::dom::{DomSurface, NodeId};
use crate::probe::wait_for_element;

/// Locate the bulk archive control.
///
/// The action bar is the primary region: it is given a short probe budget,
/// and the first button inside it whose accessible label or visible text
/// fuzzily matches an archive token wins. Only if the bar never appears or
/// holds no matching button does the locator fall back to the page-wide
/// selector list, in declared order.
///
/// `None` is fatal to the run: the caller maps it to a non-retried error,
/// since it indicates the host interface's structure changed.
pub async fn find_archive_control(ctx: &RunContext, dom: &dyn DomSurface) -> Option<NodeId> {
    driver_info!("{}", ctx.message(MessageKey::SearchingArchiveControl, &[]));

    let bar = wait_for_element(
        dom,
        &ctx.config.selectors.action_bar,
        ctx.config.timing.action_bar_timeout,
    )
    .await
    .ok();

    if let Some(bar) = bar {
        for button in dom.query_within(bar, "button") {
            let label = dom.attribute(button, "aria-label");
            let text = dom.text(button);
            if is_archive_control_label(&ctx.config.archive_tokens, label.as_deref(), &text) {
                driver_info!("{}", ctx.message(MessageKey::ArchiveControlFound, &[]));
                return Some(button);
            }
        }
    }

    for selector in &ctx.config.selectors.control_fallbacks {
        if let Some(button) = dom.query(selector) {
            driver_debug!("archive control matched fallback selector `{selector}`");
            return Some(button);
        }
    }

    None
}

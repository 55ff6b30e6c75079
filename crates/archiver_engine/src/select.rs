use archiver_core::{DriverConfig, MessageKey, SelectionResult};
use archiver_logging::{driver_debug, driver_info, driver_warn};

use crate::context::RunContext;
use crate::dom::{ClickError, DomSurface, NodeId};

/// Completion verifier: count of rendered eligible items whose checkbox is
/// still unchecked, at call time. Pure snapshot, no side effects.
pub fn count_unselected(dom: &dyn DomSurface, config: &DriverConfig) -> usize {
    let selector = config.selectors.item_checkboxes();
    dom.query_all(&selector)
        .into_iter()
        .filter(|&node| !dom.is_checked(node))
        .count()
}

/// Select every eligible item, retrying whole passes up to `max_attempts`.
///
/// Each pass walks the list in half-viewport steps, re-querying the
/// container and checkbox set on every step: the page virtualizes and
/// re-renders on scroll, so handles from a previous step are stale. The
/// host commonly fails to mark some items during a click storm, which is
/// why recovery is a whole new scan rather than per-item retries.
///
/// Pause and stop are consulted between every item and every scroll step.
/// A failed click is logged and skipped; one bad item must not block the
/// rest of the pass.
pub async fn select_all(
    ctx: &RunContext,
    dom: &dyn DomSurface,
    max_attempts: u32,
) -> SelectionResult {
    let mut attempt = 0u32;
    let mut all_selected = false;
    let mut total_selected = 0u64;

    while !all_selected && attempt < max_attempts && !ctx.state.is_stopped() {
        attempt += 1;
        driver_info!(
            "{}",
            ctx.message(MessageKey::StartingSelection, &[&attempt.to_string()])
        );

        run_pass(ctx, dom, &mut total_selected).await;
        if ctx.state.is_stopped() {
            break;
        }

        let unselected = count_unselected(dom, &ctx.config);
        all_selected = unselected == 0;

        if !all_selected && attempt < max_attempts {
            driver_info!(
                "{}",
                ctx.message(MessageKey::RetryingSelection, &[&unselected.to_string()])
            );
            tokio::time::sleep(ctx.config.timing.action_delay).await;
        }
    }

    SelectionResult {
        total_selected,
        all_selected,
    }
}

/// One scan over the list in half-viewport increments.
async fn run_pass(ctx: &RunContext, dom: &dyn DomSurface, total_selected: &mut u64) {
    let list_selector = &ctx.config.selectors.list_container;
    let checkbox_selector = ctx.config.selectors.item_checkboxes();
    let scroll_step = dom.viewport_height() / 2.0;
    let mut current_scroll = 0.0_f64;

    loop {
        ctx.pause_point().await;
        if ctx.state.is_stopped() {
            return;
        }
        let Some(list) = dom.query(list_selector) else {
            return;
        };
        if current_scroll >= dom.scroll_height(list) {
            return;
        }

        for checkbox in dom.query_all(&checkbox_selector) {
            ctx.pause_point().await;
            if ctx.state.is_stopped() {
                return;
            }
            match select_single_item(ctx, dom, checkbox).await {
                Ok(true) => {
                    let count = ctx.state.record_selection();
                    *total_selected = count;
                    ctx.emit_progress(count);
                    driver_debug!(
                        "{}",
                        ctx.message(MessageKey::ConversationSelected, &[&count.to_string()])
                    );
                }
                Ok(false) => {}
                Err(err) => {
                    driver_warn!(
                        "{} ({})",
                        ctx.message(MessageKey::SelectionItemFailed, &[]),
                        err
                    );
                }
            }
        }

        if ctx.state.is_stopped() {
            return;
        }
        let Some(list) = dom.query(list_selector) else {
            return;
        };
        dom.scroll_by(list, scroll_step);
        tokio::time::sleep(ctx.config.timing.scroll_delay).await;
        current_scroll += scroll_step;
    }
}

/// Attempt to select one item. Returns `Ok(true)` only when a click was
/// actually dispatched; checked, container-less and off-screen items are
/// skipped without error.
async fn select_single_item(
    ctx: &RunContext,
    dom: &dyn DomSurface,
    checkbox: NodeId,
) -> Result<bool, ClickError> {
    if dom.is_checked(checkbox) {
        return Ok(false);
    }
    let Some(container) = dom.closest(checkbox, &ctx.config.selectors.checkbox_container) else {
        return Ok(false);
    };
    let Some(rect) = dom.rect(container) else {
        return Ok(false);
    };
    if !ctx.config.visibility.admits(rect, dom.viewport_height()) {
        return Ok(false);
    }

    // The wrapper, not the input, takes the click; give the row a moment to
    // settle first so the host's own handlers see a stable item.
    tokio::time::sleep(ctx.config.timing.settle_delay).await;
    dom.click(container)?;
    Ok(true)
}

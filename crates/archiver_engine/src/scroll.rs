use archiver_core::MessageKey;
use archiver_logging::driver_info;

use crate::context::RunContext;
use crate::dom::DomSurface;

/// Drive the list container to its full extent by repeated scroll-and-wait.
///
/// Convergence: the total scrollable height must be unchanged for
/// `scroll_convergence` consecutive measurements, which tolerates transient
/// stalls in lazy loading without looping forever. Afterwards the list is
/// reset to the top (selection does not register reliably otherwise) and
/// given one more settle delay.
///
/// An absent container is a silent no-op; the driver discovers a truly
/// missing list when selection finds nothing.
pub async fn load_entire_list(ctx: &RunContext, dom: &dyn DomSurface) {
    driver_info!("{}", ctx.message(MessageKey::LoadingConversations, &[]));

    let selector = &ctx.config.selectors.list_container;
    let delay = ctx.config.timing.scroll_delay;

    let mut previous_height = 0.0_f64;
    let mut stable_count = 0u32;

    while stable_count < ctx.config.scroll_convergence {
        if ctx.state.is_stopped() {
            return;
        }
        // Re-resolve the container every iteration; lazy loading re-renders it.
        let Some(list) = dom.query(selector) else {
            return;
        };
        dom.scroll_to(list, dom.scroll_height(list));
        tokio::time::sleep(delay).await;

        let Some(list) = dom.query(selector) else {
            return;
        };
        let current_height = dom.scroll_height(list);
        if current_height == previous_height {
            stable_count += 1;
        } else {
            stable_count = 0;
        }
        previous_height = current_height;
    }

    if let Some(list) = dom.query(selector) {
        dom.scroll_to(list, 0.0);
    }
    tokio::time::sleep(delay).await;
    driver_info!("{}", ctx.message(MessageKey::ScrollCompleted, &[]));
}

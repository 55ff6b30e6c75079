//! Scripted page model implementing `DomSurface` for driver tests.
#![allow(dead_code)]

use std::sync::{mpsc, Arc, Mutex};

use archiver_core::{DriverConfig, ElementRect, Locale, SelectorConfig};
use archiver_engine::{
    ClickError, DomSurface, DriverEvent, NodeId, RunContext, RunState,
};
use tokio::sync::watch;

pub const VIEWPORT_HEIGHT: f64 = 900.0;

const LIST_NODE: NodeId = 1;
const ACTION_BAR_NODE: NodeId = 2;
const FIRST_DYNAMIC_NODE: NodeId = 100;

/// A recorded scroll operation on the list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOp {
    ToBottom,
    ToTop,
    By,
}

struct ItemModel {
    checkbox: NodeId,
    container: NodeId,
    checked: bool,
    rect: ElementRect,
    /// Clicks are accepted but the host never marks the box.
    stubborn: bool,
    /// This many clicks error out before one succeeds.
    failing_clicks: u32,
}

struct ButtonModel {
    id: NodeId,
    aria_label: Option<String>,
    text: String,
    in_action_bar: bool,
    /// Page-wide selectors this button matches.
    matches: Vec<String>,
}

struct ListModel {
    /// Scrollable height observed after n scrolls to the bottom;
    /// the last entry repeats once lazy loading is exhausted.
    heights: Vec<f64>,
    bottom_scrolls: usize,
}

impl ListModel {
    fn current_height(&self) -> f64 {
        let index = self.bottom_scrolls.min(self.heights.len() - 1);
        self.heights[index]
    }
}

#[derive(Default)]
struct PageModel {
    list: Option<ListModel>,
    action_bar: bool,
    items: Vec<ItemModel>,
    buttons: Vec<ButtonModel>,
    scroll_ops: Vec<ScrollOp>,
    archive_clicks: u32,
    /// Re-mint every item's node ids on each scroll step, invalidating any
    /// handle a caller might have cached.
    rerender_on_scroll: bool,
    next_id: NodeId,
}

/// In-memory page with a mutation feed, shared behind a mutex so the test
/// can mutate it while a run is in flight.
pub struct FakeDom {
    selectors: SelectorConfig,
    page: Mutex<PageModel>,
    mutations_tx: watch::Sender<u64>,
}

impl FakeDom {
    pub fn new(selectors: SelectorConfig) -> Arc<Self> {
        let (mutations_tx, _) = watch::channel(0);
        Arc::new(Self {
            selectors,
            page: Mutex::new(PageModel {
                next_id: FIRST_DYNAMIC_NODE,
                ..PageModel::default()
            }),
            mutations_tx,
        })
    }

    fn bump_mutations(&self) {
        self.mutations_tx.send_modify(|n| *n += 1);
    }

    /// Attach the list container. `heights[n]` is the scrollable height
    /// observed after `n` scrolls to the bottom.
    pub fn add_list(&self, heights: Vec<f64>) {
        assert!(!heights.is_empty(), "list needs at least one height");
        self.page.lock().unwrap().list = Some(ListModel {
            heights,
            bottom_scrolls: 0,
        });
        self.bump_mutations();
    }

    /// Add `count` unchecked items, fully inside the viewport.
    pub fn add_items(&self, count: usize) {
        for index in 0..count {
            let top = 10.0 + 70.0 * index as f64 % (VIEWPORT_HEIGHT - 80.0);
            self.add_item_with_rect(ElementRect {
                top,
                bottom: top + 50.0,
            });
        }
    }

    pub fn add_item_with_rect(&self, rect: ElementRect) {
        let mut page = self.page.lock().unwrap();
        let checkbox = page.next_id;
        let container = page.next_id + 1;
        page.next_id += 2;
        page.items.push(ItemModel {
            checkbox,
            container,
            checked: false,
            rect,
            stubborn: false,
            failing_clicks: 0,
        });
        drop(page);
        self.bump_mutations();
    }

    pub fn check_all_items(&self) {
        for item in &mut self.page.lock().unwrap().items {
            item.checked = true;
        }
        self.bump_mutations();
    }

    /// Item `index` accepts clicks but never becomes checked.
    pub fn set_item_stubborn(&self, index: usize) {
        self.page.lock().unwrap().items[index].stubborn = true;
    }

    /// The next `count` clicks on item `index` fail.
    pub fn fail_clicks(&self, index: usize, count: u32) {
        self.page.lock().unwrap().items[index].failing_clicks = count;
    }

    pub fn set_rerender_on_scroll(&self, enabled: bool) {
        self.page.lock().unwrap().rerender_on_scroll = enabled;
    }

    pub fn show_action_bar(&self) {
        self.page.lock().unwrap().action_bar = true;
        self.bump_mutations();
    }

    /// Add a button; `matches` lists the page-wide selectors it resolves
    /// under for fallback lookups.
    pub fn add_button(
        &self,
        aria_label: Option<&str>,
        text: &str,
        in_action_bar: bool,
        matches: &[&str],
    ) -> NodeId {
        let mut page = self.page.lock().unwrap();
        let id = page.next_id;
        page.next_id += 1;
        page.buttons.push(ButtonModel {
            id,
            aria_label: aria_label.map(str::to_string),
            text: text.to_string(),
            in_action_bar,
            matches: matches.iter().map(|s| s.to_string()).collect(),
        });
        drop(page);
        self.bump_mutations();
        id
    }

    pub fn scroll_ops(&self) -> Vec<ScrollOp> {
        self.page.lock().unwrap().scroll_ops.clone()
    }

    pub fn bottom_scroll_count(&self) -> usize {
        self.page
            .lock()
            .unwrap()
            .scroll_ops
            .iter()
            .filter(|op| **op == ScrollOp::ToBottom)
            .count()
    }

    pub fn archive_clicks(&self) -> u32 {
        self.page.lock().unwrap().archive_clicks
    }

    pub fn checked_count(&self) -> usize {
        self.page
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|item| item.checked)
            .count()
    }
}

impl DomSurface for FakeDom {
    fn query(&self, selector: &str) -> Option<NodeId> {
        let page = self.page.lock().unwrap();
        if selector == self.selectors.list_container {
            return page.list.as_ref().map(|_| LIST_NODE);
        }
        if selector == self.selectors.action_bar {
            return page.action_bar.then_some(ACTION_BAR_NODE);
        }
        page.buttons
            .iter()
            .find(|button| button.matches.iter().any(|m| m == selector))
            .map(|button| button.id)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        if selector == self.selectors.item_checkboxes() {
            return self
                .page
                .lock()
                .unwrap()
                .items
                .iter()
                .map(|item| item.checkbox)
                .collect();
        }
        self.query(selector).into_iter().collect()
    }

    fn query_within(&self, node: NodeId, selector: &str) -> Vec<NodeId> {
        let page = self.page.lock().unwrap();
        if node == ACTION_BAR_NODE && page.action_bar && selector == "button" {
            return page
                .buttons
                .iter()
                .filter(|button| button.in_action_bar)
                .map(|button| button.id)
                .collect();
        }
        Vec::new()
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        if selector != self.selectors.checkbox_container {
            return None;
        }
        self.page
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|item| item.checkbox == node)
            .map(|item| item.container)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        if name != "aria-label" {
            return None;
        }
        self.page
            .lock()
            .unwrap()
            .buttons
            .iter()
            .find(|button| button.id == node)
            .and_then(|button| button.aria_label.clone())
    }

    fn text(&self, node: NodeId) -> String {
        self.page
            .lock()
            .unwrap()
            .buttons
            .iter()
            .find(|button| button.id == node)
            .map(|button| button.text.clone())
            .unwrap_or_default()
    }

    fn is_checked(&self, node: NodeId) -> bool {
        // Stale handles read as checked so callers skip them.
        self.page
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|item| item.checkbox == node)
            .map_or(true, |item| item.checked)
    }

    fn rect(&self, node: NodeId) -> Option<ElementRect> {
        self.page
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|item| item.container == node)
            .map(|item| item.rect)
    }

    fn viewport_height(&self) -> f64 {
        VIEWPORT_HEIGHT
    }

    fn scroll_height(&self, node: NodeId) -> f64 {
        let page = self.page.lock().unwrap();
        if node == LIST_NODE {
            return page.list.as_ref().map_or(0.0, ListModel::current_height);
        }
        0.0
    }

    fn scroll_to(&self, node: NodeId, y: f64) {
        if node != LIST_NODE {
            return;
        }
        let mut page = self.page.lock().unwrap();
        if y > 0.0 {
            page.scroll_ops.push(ScrollOp::ToBottom);
            if let Some(list) = page.list.as_mut() {
                list.bottom_scrolls += 1;
            }
        } else {
            page.scroll_ops.push(ScrollOp::ToTop);
        }
    }

    fn scroll_by(&self, node: NodeId, _dy: f64) {
        if node != LIST_NODE {
            return;
        }
        let mut page = self.page.lock().unwrap();
        page.scroll_ops.push(ScrollOp::By);
        if page.rerender_on_scroll {
            let mut next_id = page.next_id;
            for item in &mut page.items {
                item.checkbox = next_id;
                item.container = next_id + 1;
                next_id += 2;
            }
            page.next_id = next_id;
        }
        drop(page);
        self.bump_mutations();
    }

    fn click(&self, node: NodeId) -> Result<(), ClickError> {
        let mut page = self.page.lock().unwrap();
        if let Some(item) = page.items.iter_mut().find(|item| item.container == node) {
            if item.failing_clicks > 0 {
                item.failing_clicks -= 1;
                return Err(ClickError::new("host rejected the click"));
            }
            if !item.stubborn {
                item.checked = true;
            }
            drop(page);
            self.bump_mutations();
            return Ok(());
        }
        if page.buttons.iter().any(|button| button.id == node) {
            page.archive_clicks += 1;
            return Ok(());
        }
        Err(ClickError::new("stale node"))
    }

    fn mutations(&self) -> watch::Receiver<u64> {
        self.mutations_tx.subscribe()
    }
}

/// Millisecond-scale timing for tests that run against the real clock
/// (the handle's worker owns its own runtime, so the paused test clock
/// cannot reach it).
pub fn fast_config() -> DriverConfig {
    use std::time::Duration;

    let mut config = DriverConfig::default();
    config.timing.element_timeout = Duration::from_millis(200);
    config.timing.action_bar_timeout = Duration::from_millis(50);
    config.timing.scroll_delay = Duration::from_millis(5);
    config.timing.settle_delay = Duration::from_millis(2);
    config.timing.action_delay = Duration::from_millis(10);
    config
}

/// Run context wired to a fresh state and an inspectable event channel.
pub fn test_context(
    config: DriverConfig,
) -> (RunContext, Arc<RunState>, mpsc::Receiver<DriverEvent>) {
    let state = Arc::new(RunState::new(Locale::En));
    let (events_tx, events_rx) = mpsc::channel();
    let ctx = RunContext::new(state.clone(), Arc::new(config), events_tx);
    (ctx, state, events_rx)
}

/// Drain the event channel, keeping only progress counts.
pub fn progress_counts(events: &mpsc::Receiver<DriverEvent>) -> Vec<u64> {
    let mut counts = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let DriverEvent::Progress { count } = event {
            counts.push(count);
        }
    }
    counts
}

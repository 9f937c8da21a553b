use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::erx::ResultE;
use crate::listing::source::PageSource;
use crate::web::messages::pagination::{compute_window, PageState, PaginationControls};
use crate::web::url::{build_query_string, page_of, parse_query_state, FilterState, SEARCH_KEY};

/// Navigation sink, typically the client side router of the hosting page.
/// Changing the location is expected to re-render the page and refetch.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str, query: &str);
}

/// A location change requested by a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    pub query: String,
}

impl Navigation {
    pub fn location(&self) -> String {
        format!("{}?{}", self.path, self.query)
    }
}

/// forwards navigations to whoever owns the receiving end (router loop, tests)
impl Navigator for UnboundedSender<Navigation> {
    fn navigate_to(&self, path: &str, query: &str) {
        if self.send(Navigation { path: path.to_string(), query: query.to_string() }).is_err() {
            warn!("navigation to {}?{} dropped, receiver is gone", path, query);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerState {
    Idle,
    /// a debounced search navigation is armed
    PendingSearch,
}

/// What a listing page renders after a load
#[derive(Debug, Clone, Serialize)]
pub struct ListingView<T> {
    pub items: Vec<T>,
    pub page: PageState,
    pub controls: Option<PaginationControls>,
    pub search: String,
}

/// Page change and debounced search orchestration of one listing page.
///
/// The URL stays the single source of truth: the controller never changes its
/// own page or filters, it asks the navigator for a new location and is
/// resynchronised through `sync_location`.
///
/// At most one search timer is armed at a time. Re-arming and teardown abort it.
/// The timer reads the filters current when it fires, not those seen while typing.
pub struct PagedListController {
    path: String,
    filters: watch::Sender<FilterState>,
    page: PageState,
    search_input: String,
    debounce: Duration,
    navigator: Arc<dyn Navigator>,
    pending: Option<JoinHandle<()>>,
}

impl PagedListController {
    pub fn new(path: &str, query: &str, page_size: usize, navigator: Arc<dyn Navigator>) -> Self {
        let mut controller = Self {
            path: path.to_string(),
            filters: watch::Sender::new(FilterState::new()),
            page: PageState::new(1, 0, page_size.max(1)),
            search_input: String::new(),
            debounce: Duration::from_millis(300),
            navigator,
            pending: None,
        };
        controller.sync_location(query);
        controller
    }

    /// controller using the page size and debounce of the `listing` config section
    pub fn configured(path: &str, query: &str, navigator: Arc<dyn Navigator>) -> Self {
        let listing = crate::conf::listing();
        Self::new(path, query, listing.page_size, navigator).with_debounce(listing.debounce())
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Rebuild filters and current page from the location query after a navigation.
    /// The displayed search input is left alone while the user is still typing.
    pub fn sync_location(&mut self, query: &str) {
        let filters = parse_query_state(query);
        self.page.current_page = page_of(&filters);
        if self.state() == ControllerState::Idle {
            self.search_input = filters.get(SEARCH_KEY).cloned().unwrap_or_default();
        }
        self.filters.send_replace(filters);
    }

    /// Derive the page count from the item count reported by the data source
    pub fn set_total_items(&mut self, total_items: usize) {
        self.page = self.page.with_total_items(total_items);
    }

    /// Navigate to `target` immediately. Out of range pages are ignored.
    pub fn on_page_select(&self, target: usize) -> bool {
        if !self.page.contains(target) {
            debug!("page {} ignored, listing has {} pages", target, self.page.total_pages);
            return false;
        }

        let query = build_query_string(&self.filters.borrow(), target, None);
        self.navigator.navigate_to(&self.path, &query);
        true
    }

    /// Record the typed value and (re)arm the search timer.
    /// The navigation fires once typing pauses for the debounce period, always back on page 1.
    ///
    /// # Panics
    /// * outside of a tokio runtime
    pub fn on_search_input(&mut self, raw: &str) {
        self.search_input = raw.to_string();
        self.cancel_pending();

        let mut changes = FilterState::new();
        changes.insert(SEARCH_KEY.to_string(), raw.to_string());

        let filters = self.filters.subscribe();
        let navigator = Arc::clone(&self.navigator);
        let path = self.path.clone();
        let debounce = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let query = build_query_string(&filters.borrow(), 1, Some(&changes));
            debug!("search settled, navigating to {}?{}", path, query);
            navigator.navigate_to(&path, &query);
        }));
    }

    /// Abort the armed search timer, true when one was still pending
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            },
            _ => false,
        }
    }

    /// Release the controller, an armed search never fires afterwards
    pub fn teardown(mut self) {
        self.cancel_pending();
    }

    pub fn state(&self) -> ControllerState {
        match &self.pending {
            Some(handle) if !handle.is_finished() => ControllerState::PendingSearch,
            _ => ControllerState::Idle,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn filters(&self) -> FilterState {
        self.filters.borrow().clone()
    }

    /// canonical query of the current location
    pub fn query(&self) -> String {
        build_query_string(&self.filters.borrow(), self.page.current_page, None)
    }

    /// page numbers to render, empty when the control is suppressed
    pub fn window(&self, max_visible: usize) -> Vec<usize> {
        if !self.page.should_render() {
            return Vec::new();
        }
        let page = self.page.clamped();
        compute_window(page.current_page, page.total_pages, max_visible)
    }

    pub fn controls(&self, max_visible: usize) -> Option<PaginationControls> {
        PaginationControls::build(&self.path, &self.filters.borrow(), &self.page, max_visible)
    }

    /// Fetch the current location from `source` and refresh the page count.
    /// Source errors are returned as is.
    pub async fn load<T>(&mut self, source: &dyn PageSource<T>, max_visible: usize) -> ResultE<ListingView<T>> {
        let query = self.query();
        let list = source.fetch_page(&query).await?;

        self.page = PageState::new(self.page.current_page, list.total_count, list.page_size.max(1)).clamped();
        debug!("{} loaded {} of {} items", self.path, list.items.len(), list.total_count);

        Ok(ListingView {
            items: list.items,
            page: self.page,
            controls: self.controls(max_visible),
            search: self.search_input.clone(),
        })
    }
}

impl Drop for PagedListController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

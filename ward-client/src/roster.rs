//! Roster page controller: pagination, sorting and debounced search.

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

use tracing::debug;
use ward_core::{
    Endpoints, FetchError, Pagination, QueryState, RequestSequencer, RosterPage, RosterView,
    SortField, SortOrder, WardConfig,
};

use crate::http::{get_json, PATIENTS};
use crate::transport::{Timer, Transport};

type Observer = Box<dyn Fn(&QueryState, &RosterView)>;

/// Owns the roster [`QueryState`] and the view rendered from it.
///
/// Only the response to the most recent query is committed. Search input is
/// debounced: each keystroke restarts the quiet period and only the last one
/// issues a query.
pub struct RosterController<T, C> {
    transport: T,
    timer: C,
    endpoints: Endpoints,
    debounce: Duration,
    query: RefCell<QueryState>,
    view: RefCell<RosterView>,
    requests: RequestSequencer,
    keystrokes: RequestSequencer,
    observer: Option<Observer>,
}

impl<T: Transport, C: Timer> RosterController<T, C> {
    pub fn new(transport: T, timer: C, config: &WardConfig) -> Self {
        Self {
            transport,
            timer,
            endpoints: Endpoints::new(&config.base_url),
            debounce: Duration::from_millis(config.search_debounce_ms),
            query: RefCell::new(QueryState::new(config.page_limit)),
            view: RefCell::new(RosterView::loading()),
            requests: RequestSequencer::new(),
            keystrokes: RequestSequencer::new(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: impl Fn(&QueryState, &RosterView) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn query(&self) -> QueryState {
        self.query.borrow().clone()
    }

    pub fn view(&self) -> RosterView {
        self.view.borrow().clone()
    }

    /// Adopt `state` and fetch it.
    ///
    /// The table switches to its loading placeholder with both pager buttons
    /// disabled before this returns.
    pub fn issue_query(&self, state: QueryState) -> impl Future<Output = RosterView> + '_ {
        let token = self.requests.issue();
        *self.query.borrow_mut() = state.clone();
        self.publish(RosterView::loading());

        async move {
            let view = match self.fetch_page(&state).await {
                Ok(page) => RosterView::from_page(
                    &page.patients,
                    Pagination::new(page.page, page.total_pages),
                    &self.endpoints,
                ),
                Err(err) => RosterView::error(err.to_string()),
            };

            if self.requests.is_current(token) {
                self.publish(view.clone());
            } else {
                debug!(token = token.value(), "discarding superseded roster response");
            }
            view
        }
    }

    /// Re-run the current query.
    pub async fn refresh(&self) -> RosterView {
        self.issue_query(self.query()).await
    }

    pub async fn set_sort_by(&self, sort_by: SortField) -> RosterView {
        self.issue_query(self.query().with_sort_by(sort_by)).await
    }

    pub async fn set_sort_order(&self, sort_order: SortOrder) -> RosterView {
        self.issue_query(self.query().with_sort_order(sort_order)).await
    }

    /// `None` when the pager has no next page to go to.
    pub async fn next_page(&self) -> Option<RosterView> {
        if !self.view.borrow().pager.next_enabled() {
            return None;
        }
        Some(self.issue_query(self.query().next_page()).await)
    }

    /// `None` when already on the first page.
    pub async fn prev_page(&self) -> Option<RosterView> {
        if self.query.borrow().page() <= 1 {
            return None;
        }
        Some(self.issue_query(self.query().prev_page()).await)
    }

    /// Feed one change of the search box.
    ///
    /// Resolves to `None` when a later keystroke arrived during the quiet
    /// period; otherwise to the view for the new search.
    pub async fn search_input(&self, text: &str) -> Option<RosterView> {
        let keystroke = self.keystrokes.issue();
        self.timer.sleep(self.debounce).await;
        if !self.keystrokes.is_current(keystroke) {
            return None;
        }
        Some(self.issue_query(self.query().with_search(text)).await)
    }

    async fn fetch_page(&self, state: &QueryState) -> Result<RosterPage, FetchError> {
        let url = self.endpoints.all_patients(state);
        get_json(&self.transport, &url, PATIENTS)
            .await
            .map_err(|err| match err {
                FetchError::Http { status: 404, .. } => FetchError::NotFound,
                other => other,
            })
    }

    fn publish(&self, view: RosterView) {
        *self.view.borrow_mut() = view;
        if let Some(observer) = &self.observer {
            let query = self.query.borrow();
            let view = self.view.borrow();
            observer(&query, &view);
        }
    }
}

//! Detail page search.

use std::cell::RefCell;
use std::future::Future;

use tracing::{debug, info};
use ward_core::{Endpoints, FetchError, PatientRecord, RequestSequencer, RequestToken, ViewState};

use crate::http::{get_json, PATIENT};
use crate::transport::Transport;

type Observer<S> = Box<dyn Fn(&S)>;

/// Runs patient searches and keeps the detail view in exactly one state.
///
/// Every call supersedes the previous one. A response that arrives after a
/// newer search was started is returned to its caller but never committed.
pub struct PatientFetcher<T> {
    transport: T,
    endpoints: Endpoints,
    sequencer: RequestSequencer,
    state: RefCell<Option<ViewState>>,
    observer: Option<Observer<ViewState>>,
}

impl<T: Transport> PatientFetcher<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            sequencer: RequestSequencer::new(),
            state: RefCell::new(None),
            observer: None,
        }
    }

    /// Called with every committed state, e.g. to repaint the container.
    pub fn with_observer(mut self, observer: impl Fn(&ViewState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Committed state; `None` before the first search.
    pub fn current(&self) -> Option<ViewState> {
        self.state.borrow().clone()
    }

    /// Start a search for `query`.
    ///
    /// The view switches to `Loading` (or to the blank-query error) before this
    /// returns; the network call only starts once the future is polled.
    pub fn fetch_patient(&self, query: &str) -> impl Future<Output = ViewState> + '_ {
        let query = query.trim().to_string();
        let token = self.sequencer.issue();

        let immediate = if query.is_empty() {
            Some(ViewState::from(Err(FetchError::EmptyQuery)))
        } else {
            None
        };
        self.commit(token, immediate.clone().unwrap_or(ViewState::Loading));

        async move {
            if let Some(state) = immediate {
                return state;
            }

            let url = self.endpoints.patient_search(&query);
            let result: Result<PatientRecord, FetchError> =
                get_json(&self.transport, &url, PATIENT).await;
            let state = ViewState::from(result);

            if !self.commit(token, state.clone()) {
                debug!(token = token.value(), %query, "discarding superseded patient response");
            } else if state.record().is_some() {
                info!(%query, "patient loaded");
            }
            state
        }
    }

    fn commit(&self, token: RequestToken, state: ViewState) -> bool {
        if !self.sequencer.is_current(token) {
            return false;
        }
        *self.state.borrow_mut() = Some(state.clone());
        if let Some(observer) = &self.observer {
            observer(&state);
        }
        true
    }
}

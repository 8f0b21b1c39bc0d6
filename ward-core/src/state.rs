//! What the detail view currently shows, and the token that decides which
//! response is still allowed to change it.

use std::cell::Cell;

use crate::error::FetchError;
use crate::model::PatientRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    Loaded(Box<PatientRecord>),
}

impl ViewState {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&PatientRecord> {
        match self {
            ViewState::Loaded(record) => Some(record),
            _ => None,
        }
    }
}

impl From<Result<PatientRecord, FetchError>> for ViewState {
    fn from(result: Result<PatientRecord, FetchError>) -> Self {
        match result {
            Ok(record) => ViewState::Loaded(Box::new(record)),
            Err(err) => ViewState::Error(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Hands out increasing tokens; only the latest one is current.
///
/// Single-threaded on purpose: every view owns one and all checks happen on
/// the UI task.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: Cell<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestToken {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestToken(next)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.get() == token.0
    }

    pub fn latest(&self) -> Option<RequestToken> {
        match self.latest.get() {
            0 => None,
            n => Some(RequestToken(n)),
        }
    }
}

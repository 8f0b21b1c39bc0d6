#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use tokio::sync::oneshot;
use ward_client::{HttpResponse, Transport, TransportError};

type Reply = Result<HttpResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// In-memory transport answering exact URLs from a script.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: RefCell<HashMap<String, VecDeque<Scripted>>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, url: &str, status: u16, body: &str) {
        self.push(url, Scripted::Ready(Ok(HttpResponse::new(status, body))));
    }

    pub fn fail(&self, url: &str) {
        self.push(
            url,
            Scripted::Ready(Err(TransportError::Request("connection refused".into()))),
        );
    }

    /// Reply that is held back until the returned sender fires.
    pub fn gate(&self, url: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(url, Scripted::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn push(&self, url: &str, reply: Scripted) {
        self.routes
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
    }
}

impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        let next = self
            .routes
            .borrow_mut()
            .get_mut(url)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Request("gate dropped".into()))),
            None => Err(TransportError::Request(format!("no scripted reply for {url}"))),
        }
    }
}

pub fn ok(body: &str) -> Reply {
    Ok(HttpResponse::new(200, body))
}

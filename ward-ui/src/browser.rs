#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use ward_client::{HttpResponse, Timer, Transport, TransportError};
use web_sys::{console, Response};

/// `window.fetch`, relative to the page origin unless the URL says otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let window =
            web_sys::window().ok_or_else(|| TransportError::Request("no window".to_string()))?;

        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|err| TransportError::Request(js_message(&err)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| TransportError::Request("fetch did not return a Response".to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|err| TransportError::Body(js_message(&err)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|err| TransportError::Body(js_message(&err)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// `location.search` of the current page, empty when unavailable.
pub fn page_query() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

/// Fire-and-forget; the opened tab is not tracked.
pub fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.open_with_url_and_target(url, "_blank") {
        console::error_1(&err);
    }
}

fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

//! Framework-neutral WASM <-> JavaScript bridge.
//!
//! Pages that fetch on their own can hand the parsed JSON to these functions
//! and get back escaped markup or the view-model.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use ward_core::{
    format, render_view_state, Endpoints, Pagination, PatientRecord, PatientView, RosterPage,
    RosterView, ViewState, WardConfig,
};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsWardConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    page_limit: Option<u32>,
    #[serde(default)]
    search_debounce_ms: Option<u64>,
}

impl From<JsWardConfig> for WardConfig {
    fn from(cfg: JsWardConfig) -> Self {
        let mut base = WardConfig::default();
        if let Some(base_url) = cfg.base_url {
            base.base_url = base_url;
        }
        if let Some(limit) = cfg.page_limit {
            base.page_limit = limit.max(1);
        }
        if let Some(ms) = cfg.search_debounce_ms {
            base.search_debounce_ms = ms;
        }
        base
    }
}

fn read_config(config: Option<JsValue>) -> Result<WardConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsWardConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Invalid config: {err}")))?;
            Ok(WardConfig::from(cfg))
        }
        _ => Ok(WardConfig::default()),
    }
}

fn read_record(record: JsValue) -> Result<PatientRecord, JsValue> {
    from_value::<PatientRecord>(record)
        .map_err(|err| JsValue::from_str(&format!("Invalid patient record: {err}")))
}

/// Detail-page markup for a patient record.
#[wasm_bindgen(js_name = renderPatient)]
pub fn render_patient(record: JsValue, config: Option<JsValue>) -> Result<String, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cfg = read_config(config)?;
    let record = read_record(record)?;
    Ok(render_view_state(
        &ViewState::Loaded(Box::new(record)),
        &Endpoints::new(&cfg.base_url),
    ))
}

/// Detail-page view-model for a patient record.
#[wasm_bindgen(js_name = patientView)]
pub fn patient_view(record: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let cfg = read_config(config)?;
    let record = read_record(record)?;
    let view = PatientView::from_record(&record, &Endpoints::new(&cfg.base_url));
    to_value(&view).map_err(|err| JsValue::from_str(&format!("Could not serialize view: {err}")))
}

/// Error alert markup, escaped.
#[wasm_bindgen(js_name = renderError)]
pub fn render_error(message: &str) -> String {
    ward_core::view::render_error(message)
}

/// Roster `<tbody>` markup plus pager state for a roster page body.
#[wasm_bindgen(js_name = renderRoster)]
pub fn render_roster(page: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let cfg = read_config(config)?;
    let page: RosterPage = from_value(page)
        .map_err(|err| JsValue::from_str(&format!("Invalid roster page: {err}")))?;
    let view = RosterView::from_page(
        &page.patients,
        Pagination::new(page.page, page.total_pages),
        &Endpoints::new(&cfg.base_url),
    );
    to_value(&RenderedRoster::from(&view))
        .map_err(|err| JsValue::from_str(&format!("Could not serialize roster: {err}")))
}

#[derive(serde::Serialize)]
struct RenderedRoster {
    rows_html: String,
    pagination_label: String,
    prev_enabled: bool,
    next_enabled: bool,
}

impl From<&RosterView> for RenderedRoster {
    fn from(view: &RosterView) -> Self {
        Self {
            rows_html: view.rows_html(),
            pagination_label: view.pager.label(),
            prev_enabled: view.pager.prev_enabled(),
            next_enabled: view.pager.next_enabled(),
        }
    }
}

#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(raw: Option<String>) -> String {
    format::format_time(raw.as_deref())
}

#[wasm_bindgen(js_name = formatContact)]
pub fn format_contact(address: Option<String>, mobile: Option<String>) -> String {
    format::format_contact(address.as_deref(), mobile.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_config_overrides_only_given_fields() {
        let cfg = WardConfig::from(JsWardConfig {
            base_url: Some("https://ward.example".into()),
            page_limit: Some(0),
            search_debounce_ms: None,
        });
        assert_eq!(cfg.base_url, "https://ward.example");
        assert_eq!(cfg.page_limit, 1);
        assert_eq!(cfg.search_debounce_ms, 300);
    }

    #[test]
    fn rendered_roster_mirrors_pager() {
        let view = RosterView::from_page(&[], Pagination::new(Some(1), Some(3)), &Endpoints::new(""));
        let rendered = RenderedRoster::from(&view);
        assert_eq!(rendered.pagination_label, "Page 1 of 3");
        assert!(!rendered.prev_enabled);
        assert!(rendered.next_enabled);
    }

    #[test]
    fn formatters_are_reexported() {
        assert_eq!(format_time(Some("745".into())), "07:45");
        assert_eq!(format_contact(None, None), "No phone registered.");
    }
}

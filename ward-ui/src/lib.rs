//! Yew front end for the ward viewer, built for WebAssembly.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod detail;
#[cfg(target_arch = "wasm32")]
mod recent;
#[cfg(target_arch = "wasm32")]
mod roster;
#[cfg(target_arch = "wasm32")]
mod sidebar;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use serde_wasm_bindgen::from_value;
    use ward_core::WardConfig;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Window};

    use crate::detail::{PatientDetail, PatientDetailProps};
    use crate::recent::{RecentPatients, RecentPatientsProps};
    use crate::roster::{RosterPage, RosterPageProps};
    use crate::sidebar::{Sidebar, SidebarProps};

    fn find_root(selector: &str) -> Result<Element, JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;

        document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Bad selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches the selector"))
    }

    fn read_config(config: Option<JsValue>) -> Result<WardConfig, JsValue> {
        let cfg = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                from_value::<WardConfig>(value)?
            }
            _ => WardConfig::default(),
        };
        cfg.validate()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(cfg)
    }

    #[wasm_bindgen]
    pub fn mount_patient_detail(selector: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let cfg = read_config(config)?;
        yew::Renderer::<PatientDetail>::with_root_and_props(
            find_root(selector)?,
            PatientDetailProps {
                base_url: cfg.base_url.into(),
            },
        )
        .render();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn mount_roster(selector: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let config = read_config(config)?;
        yew::Renderer::<RosterPage>::with_root_and_props(
            find_root(selector)?,
            RosterPageProps { config },
        )
        .render();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn mount_recent_patients(selector: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let cfg = read_config(config)?;
        yew::Renderer::<RecentPatients>::with_root_and_props(
            find_root(selector)?,
            RecentPatientsProps {
                base_url: cfg.base_url.into(),
            },
        )
        .render();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn mount_sidebar(selector: &str, title: &str) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        yew::Renderer::<Sidebar>::with_root_and_props(
            find_root(selector)?,
            SidebarProps {
                title: title.to_string().into(),
                children: Default::default(),
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{mount_patient_detail, mount_recent_patients, mount_roster, mount_sidebar};

#[cfg(not(target_arch = "wasm32"))]
mod native_stub {
    use wasm_bindgen::JsValue;

    fn unsupported() -> Result<(), JsValue> {
        Err(JsValue::from_str("ward-ui only supports the wasm32 target"))
    }

    pub fn mount_patient_detail(_: &str, _: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }

    pub fn mount_roster(_: &str, _: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }

    pub fn mount_recent_patients(_: &str, _: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }

    pub fn mount_sidebar(_: &str, _: &str) -> Result<(), JsValue> {
        unsupported()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native_stub::{mount_patient_detail, mount_recent_patients, mount_roster, mount_sidebar};

#![cfg(target_arch = "wasm32")]

use ward_client::fetch_recent_patients;
use ward_core::{Endpoints, RecentRow};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;
use yew::prelude::*;

use crate::browser::{open_in_new_tab, BrowserTransport};

#[derive(Properties, PartialEq)]
pub struct RecentPatientsProps {
    #[prop_or_default]
    pub base_url: AttrValue,
}

/// Dashboard table of recently admitted patients. Load failures only reach
/// the console.
#[function_component(RecentPatients)]
pub fn recent_patients(props: &RecentPatientsProps) -> Html {
    let rows = use_state(Vec::<RecentRow>::new);

    {
        let rows = rows.clone();
        use_effect_with(props.base_url.clone(), move |base_url| {
            let endpoints = Endpoints::new(base_url);
            spawn_local(async move {
                match fetch_recent_patients(&BrowserTransport, &endpoints).await {
                    Ok(list) => rows.set(list),
                    Err(err) => console::error_1(&JsValue::from_str(&format!(
                        "Error fetching recent patients: {err}"
                    ))),
                }
            });
            || ()
        });
    }

    html! {
        <table class="table table-sm">
            <thead>
                <tr>
                    <th>{"Episode ID"}</th>
                    <th>{"Name"}</th>
                    <th>{"Room"}</th>
                    <th>{"Bed"}</th>
                    <th></th>
                </tr>
            </thead>
            <tbody id="recentPatientsTableBody">
                { for rows.iter().map(render_row) }
            </tbody>
        </table>
    }
}

fn render_row(row: &RecentRow) -> Html {
    let pdf_url = row.pdf_url.clone();
    let on_pdf = Callback::from(move |_: MouseEvent| open_in_new_tab(&pdf_url));

    html! {
        <tr>
            <td><a href={row.detail_url.clone()}>{ row.id.clone() }</a></td>
            <td><a href={row.detail_url.clone()}>{ row.name.clone() }</a></td>
            <td>{ row.room.clone() }</td>
            <td>{ row.bed.clone() }</td>
            <td>
                <button type="button" class="btn btn-sm btn-pdf" onclick={on_pdf}>{"Generate PDF"}</button>
            </td>
        </tr>
    }
}

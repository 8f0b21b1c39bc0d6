#![cfg(target_arch = "wasm32")]

use ward_client::PatientFetcher;
use ward_core::api::id_from_query;
use ward_core::sections::Table;
use ward_core::view::LOADING_MESSAGE;
use ward_core::{Endpoints, PatientView, Section, SectionBody, ViewState};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::browser::{open_in_new_tab, page_query, BrowserTransport};

#[derive(Properties, PartialEq)]
pub struct PatientDetailProps {
    #[prop_or_default]
    pub base_url: AttrValue,
}

/// Search box plus detail container. A `?id=` in the page URL is searched
/// once on mount.
#[function_component(PatientDetail)]
pub fn patient_detail(props: &PatientDetailProps) -> Html {
    let view_state = use_state(|| None::<ViewState>);
    let search = use_state(String::new);

    let fetcher = {
        let view_state = view_state.clone();
        use_memo(props.base_url.clone(), move |base_url| {
            PatientFetcher::new(BrowserTransport, Endpoints::new(base_url))
                .with_observer(move |state| view_state.set(Some(state.clone())))
        })
    };

    let run_search = {
        let fetcher = fetcher.clone();
        Callback::from(move |query: String| {
            let fetcher = fetcher.clone();
            spawn_local(async move {
                fetcher.fetch_patient(&query).await;
            });
        })
    };

    {
        let run_search = run_search.clone();
        let search = search.clone();
        use_effect_with((), move |_| {
            if let Some(id) = id_from_query(&page_query()) {
                search.set(id.clone());
                run_search.emit(id);
            }
            || ()
        });
    }

    let on_input = {
        let search = search.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_click = {
        let search = search.clone();
        let run_search = run_search.clone();
        Callback::from(move |_: MouseEvent| run_search.emit((*search).clone()))
    };

    let on_keypress = {
        let search = search.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                run_search.emit((*search).clone());
            }
        })
    };

    html! {
        <div class="patient-search">
            <div class="search-bar">
                <input
                    id="search-input"
                    type="search"
                    placeholder="Episode ID or patient name"
                    aria-label="Search patient"
                    value={(*search).clone()}
                    oninput={on_input}
                    onkeypress={on_keypress}
                />
                <button id="search-btn" type="button" onclick={on_click}>{"Search"}</button>
            </div>
            <div id="patientInfo" aria-live="polite">
                { render_state((*view_state).as_ref(), fetcher.endpoints()) }
            </div>
        </div>
    }
}

fn render_state(state: Option<&ViewState>, endpoints: &Endpoints) -> Html {
    match state {
        None => Html::default(),
        Some(ViewState::Loading) => html! {
            <div class="loading" role="status"><span>{ LOADING_MESSAGE }</span></div>
        },
        Some(ViewState::Error(message)) => html! {
            <div class="alert alert-danger text-center" role="alert">{ message.clone() }</div>
        },
        Some(ViewState::Loaded(record)) => {
            render_patient(&PatientView::from_record(record, endpoints))
        }
    }
}

fn render_patient(view: &PatientView) -> Html {
    let pdf_button = view.pdf_url.clone().map(|url| {
        let onclick = Callback::from(move |_: MouseEvent| open_in_new_tab(&url));
        html! {
            <button type="button" class="btn btn-sm btn-search" {onclick}>{"Generate PDF"}</button>
        }
    });

    html! {
        <div class="patient-info">
            <div class="patient-info-header">
                <div class="personal-info">
                    { for view.personal_fields().into_iter().map(|(label, value)| render_field(label, value)) }
                </div>
                <div class="local-info">
                    { for view.location_fields().into_iter().map(|(label, value)| render_field(label, value)) }
                    { pdf_button.unwrap_or_default() }
                </div>
            </div>
            <hr />
            <div class="additional-info">
                { for view.sections.values().map(render_section) }
            </div>
        </div>
    }
}

fn render_field(label: &str, value: &str) -> Html {
    html! {
        <div class="field">
            <strong>{ format!("{label}:") }</strong>
            {" "}
            <span>{ value.to_string() }</span>
        </div>
    }
}

fn render_section(section: &Section) -> Html {
    let body = match &section.body {
        SectionBody::Placeholder(text) => html! { <p>{ *text }</p> },
        SectionBody::Table(table) => render_table(table),
        SectionBody::Cards(cards) => html! {
            <>
                {
                    for cards.iter().map(|card| html! {
                        <>
                            <strong class="diagnostico">{ card.heading.clone() }</strong>
                            { render_table(&card.table) }
                        </>
                    })
                }
            </>
        },
    };

    html! {
        <div class="card-section">
            <strong>{ section.title }</strong>
            <div class="card p-3 mb-3">{ body }</div>
        </div>
    }
}

fn render_table(table: &Table) -> Html {
    html! {
        <table class="table table-striped table-sm">
            <thead>
                <tr>{ for table.headers.iter().map(|header| html! { <th>{ *header }</th> }) }</tr>
            </thead>
            <tbody>
                {
                    for table.rows.iter().map(|row| html! {
                        <tr>{ for row.iter().map(|cell| html! { <td>{ cell.clone() }</td> }) }</tr>
                    })
                }
            </tbody>
        </table>
    }
}

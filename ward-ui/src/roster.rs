#![cfg(target_arch = "wasm32")]

use ward_client::RosterController;
use ward_core::roster::NO_MATCHES;
use ward_core::{QueryState, RosterBody, RosterRow, RosterView, SortField, SortOrder, WardConfig};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::browser::{open_in_new_tab, BrowserTransport, GlooTimer};

const SORT_FIELDS: [(SortField, &str); 4] = [
    (SortField::AdmissionDate, "Admission date"),
    (SortField::Name, "Name"),
    (SortField::Room, "Room"),
    (SortField::Bed, "Bed"),
];

const SORT_ORDERS: [(SortOrder, &str); 2] =
    [(SortOrder::Desc, "Descending"), (SortOrder::Asc, "Ascending")];

#[derive(Properties, PartialEq)]
pub struct RosterPageProps {
    #[prop_or_default]
    pub config: WardConfig,
}

#[function_component(RosterPage)]
pub fn roster_page(props: &RosterPageProps) -> Html {
    let snapshot = use_state({
        let limit = props.config.page_limit;
        move || (QueryState::new(limit), RosterView::loading())
    });

    let controller = {
        let snapshot = snapshot.clone();
        use_memo(props.config.clone(), move |config| {
            RosterController::new(BrowserTransport, GlooTimer, config).with_observer(
                move |query, view| snapshot.set((query.clone(), view.clone())),
            )
        })
    };

    {
        let controller = controller.clone();
        use_effect_with(props.config.clone(), move |_| {
            spawn_local(async move {
                controller.refresh().await;
            });
            || ()
        });
    }

    let on_search = {
        let controller = controller.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let text = input.value();
            let controller = controller.clone();
            spawn_local(async move {
                controller.search_input(&text).await;
            });
        })
    };

    let on_sort_by = {
        let controller = controller.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let Some(field) = SortField::parse(&select.value()) else {
                return;
            };
            let controller = controller.clone();
            spawn_local(async move {
                controller.set_sort_by(field).await;
            });
        })
    };

    let on_sort_order = {
        let controller = controller.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let Some(order) = SortOrder::parse(&select.value()) else {
                return;
            };
            let controller = controller.clone();
            spawn_local(async move {
                controller.set_sort_order(order).await;
            });
        })
    };

    let on_prev = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.prev_page().await;
            });
        })
    };

    let on_next = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.next_page().await;
            });
        })
    };

    let (query, view) = &*snapshot;

    html! {
        <div class="roster">
            <div class="roster-toolbar">
                <input
                    id="search-input"
                    type="search"
                    placeholder="Search patients"
                    aria-label="Search patients"
                    oninput={on_search}
                />
                <select id="sort-by" aria-label="Sort by" onchange={on_sort_by}>
                    {
                        for SORT_FIELDS.iter().map(|(field, label)| html! {
                            <option value={field.as_str()} selected={*field == query.sort_by()}>{ *label }</option>
                        })
                    }
                </select>
                <select id="sort-order" aria-label="Sort order" onchange={on_sort_order}>
                    {
                        for SORT_ORDERS.iter().map(|(order, label)| html! {
                            <option value={order.as_str()} selected={*order == query.sort_order()}>{ *label }</option>
                        })
                    }
                </select>
            </div>
            <table class="table table-striped">
                <thead>
                    <tr>
                        <th>{"Episode ID"}</th>
                        <th>{"Name"}</th>
                        <th>{"Room"}</th>
                        <th>{"Bed"}</th>
                        <th>{"Admission Date"}</th>
                        <th>{"Last Diary"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody id="patientsTableBody">{ render_body(&view.body) }</tbody>
            </table>
            <div class="pager">
                <button id="prev-page" type="button" disabled={!view.pager.prev_enabled()} onclick={on_prev}>
                    {"Previous"}
                </button>
                <span id="pagination-info">{ view.pager.label() }</span>
                <button id="next-page" type="button" disabled={!view.pager.next_enabled()} onclick={on_next}>
                    {"Next"}
                </button>
            </div>
        </div>
    }
}

fn render_body(body: &RosterBody) -> Html {
    match body {
        RosterBody::Loading => message_row("text-center", "Loading..."),
        RosterBody::Empty => message_row("text-center", NO_MATCHES),
        RosterBody::Error(message) => message_row("text-center text-danger", message),
        RosterBody::Rows(rows) => html! { <>{ for rows.iter().map(render_row) }</> },
    }
}

fn message_row(class: &'static str, text: &str) -> Html {
    html! {
        <tr><td colspan="7" class={class}>{ text.to_string() }</td></tr>
    }
}

fn render_row(row: &RosterRow) -> Html {
    let pdf_url = row.pdf_url.clone();
    let on_pdf = Callback::from(move |_: MouseEvent| open_in_new_tab(&pdf_url));

    html! {
        <tr>
            <td><a href={row.detail_url.clone()}>{ row.id.clone() }</a></td>
            <td><a href={row.detail_url.clone()}>{ row.name.clone() }</a></td>
            <td>{ row.room.clone() }</td>
            <td>{ row.bed.clone() }</td>
            <td>{ row.admission_date.clone() }</td>
            <td class="diario">{ row.last_diary.clone() }</td>
            <td>
                <button type="button" class="btn btn-sm btn-pdf" onclick={on_pdf}>{"Generate PDF"}</button>
            </td>
        </tr>
    }
}

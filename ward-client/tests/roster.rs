mod common;

use std::rc::Rc;
use std::time::Duration;

use common::{ok, ScriptedTransport};
use pretty_assertions::assert_eq;
use ward_client::{fetch_recent_patients, RosterController, TokioTimer};
use ward_core::{
    Endpoints, FetchError, Pager, Pagination, QueryState, RosterBody, SortField, WardConfig,
};

fn url(state: &QueryState) -> String {
    Endpoints::new("").all_patients(state)
}

fn controller(transport: &Rc<ScriptedTransport>) -> RosterController<Rc<ScriptedTransport>, TokioTimer> {
    RosterController::new(Rc::clone(transport), TokioTimer, &WardConfig::default())
}

const TWO_PATIENTS: &str = r#"{
    "patients": [
        {"episode_id": "1", "patient_name": "Ana", "sala": "A", "cama": "1"},
        {"patient_id": "2", "ultimo_diario": "Slept well"}
    ],
    "page": 2,
    "total_pages": 2
}"#;

#[tokio::test]
async fn last_page_enables_prev_and_disables_next() {
    let transport = Rc::new(ScriptedTransport::new());
    let state = QueryState::new(10).with_page(2);
    transport.reply(&url(&state), 200, TWO_PATIENTS);

    let controller = controller(&transport);
    let pending = controller.issue_query(state.clone());
    assert_eq!(controller.view().pager, Pager::Loading);
    assert!(!controller.view().pager.prev_enabled());
    assert!(!controller.view().pager.next_enabled());

    let view = pending.await;
    assert_eq!(view.pager.label(), "Page 2 of 2");
    assert!(view.pager.prev_enabled());
    assert!(!view.pager.next_enabled());

    let RosterBody::Rows(rows) = &view.body else {
        panic!("expected rows");
    };
    assert_eq!(rows[1].id, "2");
    assert_eq!(rows[1].last_diary, "Slept well");
    assert_eq!(controller.query(), state);

    assert_eq!(controller.next_page().await, None);
}

#[tokio::test]
async fn not_found_is_reported_as_configuration_problem() {
    let transport = Rc::new(ScriptedTransport::new());
    let state = QueryState::new(10);
    transport.reply(&url(&state), 404, r#"{"error":"ignored"}"#);

    let view = controller(&transport).issue_query(state).await;
    assert_eq!(view.body, RosterBody::Error(FetchError::NotFound.to_string()));
    assert_eq!(view.pager, Pager::Ready(Pagination::reset()));
    assert_eq!(view.pager.label(), "Page 1 of 1");
}

#[tokio::test]
async fn other_failures_render_an_error_row() {
    let transport = Rc::new(ScriptedTransport::new());
    let state = QueryState::new(10);
    transport.reply(&url(&state), 503, "");
    transport.fail(&url(&state));

    let controller = controller(&transport);
    let view = controller.issue_query(state.clone()).await;
    assert_eq!(view.body, RosterBody::Error("Error 503 fetching patients.".into()));

    let view = controller.refresh().await;
    assert_eq!(
        view.body,
        RosterBody::Error("Network error or error processing response.".into())
    );
    assert_eq!(view.pager.label(), "Page 1 of 1");
}

#[tokio::test]
async fn sort_change_goes_back_to_first_page() {
    let transport = Rc::new(ScriptedTransport::new());
    let start = QueryState::new(10).with_page(3);
    let sorted = start.with_sort_by(SortField::Name);
    transport.reply(&url(&start), 200, r#"{"patients":[],"page":3,"total_pages":4}"#);
    transport.reply(&url(&sorted), 200, r#"{"patients":[],"page":1,"total_pages":4}"#);

    let controller = controller(&transport);
    controller.issue_query(start).await;
    let view = controller.set_sort_by(SortField::Name).await;

    assert_eq!(controller.query().page(), 1);
    assert_eq!(view.body, RosterBody::Empty);
    assert_eq!(transport.requests().last(), Some(&url(&sorted)));
}

#[tokio::test]
async fn previous_page_steps_back_once_and_stops_at_first() {
    let transport = Rc::new(ScriptedTransport::new());
    let second = QueryState::new(10).with_page(2);
    let first = second.prev_page();
    transport.reply(&url(&second), 200, r#"{"patients":[],"page":2,"total_pages":2}"#);
    transport.reply(&url(&first), 200, r#"{"patients":[],"page":1,"total_pages":2}"#);

    let controller = controller(&transport);
    controller.issue_query(second).await;
    let view = controller.prev_page().await.expect("page 2 has a previous page");

    assert_eq!(controller.query().page(), 1);
    assert_eq!(view.pager.label(), "Page 1 of 2");
    assert!(url(&first).contains("page=1"));
    assert_eq!(transport.requests().last(), Some(&url(&first)));

    assert_eq!(controller.prev_page().await, None);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn search_is_debounced_to_the_last_keystroke() {
    let transport = Rc::new(ScriptedTransport::new());
    let expected = QueryState::new(10).with_search("abc");
    transport.reply(&url(&expected), 200, r#"{"patients":[],"page":1,"total_pages":1}"#);

    let controller = controller(&transport);
    let second = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.search_input("ab").await
    };
    let third = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        controller.search_input("abc").await
    };

    let (a, ab, abc) = tokio::join!(controller.search_input("a"), second, third);

    assert_eq!(a, None);
    assert_eq!(ab, None);
    assert!(abc.is_some());
    assert_eq!(transport.requests(), vec![url(&expected)]);
    assert_eq!(controller.query().search(), "abc");
}

#[tokio::test]
async fn stale_roster_response_is_ignored() {
    let transport = Rc::new(ScriptedTransport::new());
    let first = QueryState::new(10);
    let second = first.with_search("silva");
    let gate_first = transport.gate(&url(&first));
    let gate_second = transport.gate(&url(&second));

    let controller = controller(&transport);
    let release = async {
        tokio::task::yield_now().await;
        gate_second
            .send(ok(r#"{"patients":[{"episode_id":"2"}],"page":1,"total_pages":1}"#))
            .unwrap();
        tokio::task::yield_now().await;
        gate_first
            .send(ok(r#"{"patients":[{"episode_id":"1"}],"page":1,"total_pages":9}"#))
            .unwrap();
    };

    tokio::join!(
        controller.issue_query(first),
        controller.issue_query(second.clone()),
        release
    );

    let RosterBody::Rows(rows) = controller.view().body else {
        panic!("expected rows");
    };
    assert_eq!(rows[0].id, "2");
    assert_eq!(controller.view().pager.label(), "Page 1 of 1");
    assert_eq!(controller.query(), second);
}

#[tokio::test]
async fn recent_patients_map_to_rows() {
    let transport = ScriptedTransport::new();
    let endpoints = Endpoints::new("");
    transport.reply(
        &endpoints.recent_patients(),
        200,
        r#"[{"episode_id":"5","patient_name":"Rui","sala":"C"}]"#,
    );

    let rows = fetch_recent_patients(&transport, &endpoints).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].room, "C");
    assert_eq!(rows[0].bed, "-");
    assert_eq!(rows[0].detail_url, "/info-patient/?id=5");

    let err = fetch_recent_patients(&transport, &endpoints).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}

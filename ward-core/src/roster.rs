//! Roster page: query state, pagination and row view-models.

use serde::{Deserialize, Serialize};

use crate::api::Endpoints;
use crate::format::or_default;
use crate::markup::HtmlWriter;
use crate::model::PatientRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    AdmissionDate,
    Name,
    Room,
    Bed,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::AdmissionDate => "admission_date",
            SortField::Name => "name",
            SortField::Room => "room",
            SortField::Bed => "bed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admission_date" => Some(SortField::AdmissionDate),
            "name" => Some(SortField::Name),
            "room" => Some(SortField::Room),
            "bed" => Some(SortField::Bed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Roster query. Values are immutable; every transition returns a new state,
/// and changing the sort or the search text goes back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    limit: u32,
    sort_by: SortField,
    sort_order: SortOrder,
    search: String,
}

impl QueryState {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            search: String::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_sort_by(&self, sort_by: SortField) -> Self {
        Self {
            sort_by,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_sort_order(&self, sort_order: SortOrder) -> Self {
        Self {
            sort_order,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn next_page(&self) -> Self {
        self.with_page(self.page.saturating_add(1))
    }

    /// Stays on page 1 when already there.
    pub fn prev_page(&self) -> Self {
        self.with_page(self.page.saturating_sub(1))
    }

    /// Query-string pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 5] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort_by", self.sort_by.as_str().to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
            ("search", self.search.trim().to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// Missing or zero values fall back to 1.
    pub fn new(page: Option<u32>, total_pages: Option<u32>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            total_pages: total_pages.unwrap_or(1).max(1),
        }
    }

    pub fn reset() -> Self {
        Self::new(None, None)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }

    pub fn prev_enabled(&self) -> bool {
        self.page > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "pagination", rename_all = "snake_case")]
pub enum Pager {
    /// Request in flight; both buttons disabled.
    Loading,
    Ready(Pagination),
}

impl Pager {
    pub fn label(&self) -> String {
        match self {
            Pager::Loading => "Loading...".to_string(),
            Pager::Ready(pagination) => pagination.label(),
        }
    }

    pub fn prev_enabled(&self) -> bool {
        matches!(self, Pager::Ready(p) if p.prev_enabled())
    }

    pub fn next_enabled(&self) -> bool {
        matches!(self, Pager::Ready(p) if p.next_enabled())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    pub id: String,
    pub name: String,
    pub room: String,
    pub bed: String,
    pub admission_date: String,
    pub last_diary: String,
    pub detail_url: String,
    pub pdf_url: String,
}

impl RosterRow {
    pub fn from_record(record: &PatientRecord, endpoints: &Endpoints) -> Self {
        let id = record.display_id().unwrap_or("-").to_string();
        Self {
            detail_url: endpoints.detail_page(&id),
            pdf_url: endpoints.pdf(&id),
            name: or_default(record.patient_name.as_deref(), "Name missing"),
            room: or_default(record.room.as_deref(), "N/A"),
            bed: or_default(record.bed.as_deref(), "N/A"),
            admission_date: or_default(record.admission_date.as_deref(), "N/A"),
            last_diary: or_default(record.last_diary.as_deref(), "No records"),
            id,
        }
    }
}

pub const NO_MATCHES: &str = "No patients found matching the criteria.";
const ROSTER_COLUMNS: &str = "7";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RosterBody {
    Loading,
    Rows(Vec<RosterRow>),
    Empty,
    Error(String),
}

/// Everything the roster table and pager show for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub body: RosterBody,
    pub pager: Pager,
}

impl RosterView {
    pub fn loading() -> Self {
        Self {
            body: RosterBody::Loading,
            pager: Pager::Loading,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            body: RosterBody::Error(message.into()),
            pager: Pager::Ready(Pagination::reset()),
        }
    }

    pub fn from_page(
        patients: &[PatientRecord],
        pagination: Pagination,
        endpoints: &Endpoints,
    ) -> Self {
        let body = if patients.is_empty() {
            RosterBody::Empty
        } else {
            RosterBody::Rows(
                patients
                    .iter()
                    .map(|record| RosterRow::from_record(record, endpoints))
                    .collect(),
            )
        };
        Self {
            body,
            pager: Pager::Ready(pagination),
        }
    }

    /// Contents of the roster `<tbody>`.
    pub fn rows_html(&self) -> String {
        let mut w = HtmlWriter::new();
        match &self.body {
            RosterBody::Loading => message_row(&mut w, "text-center", "Loading..."),
            RosterBody::Empty => message_row(&mut w, "text-center", NO_MATCHES),
            RosterBody::Error(message) => message_row(&mut w, "text-center text-danger", message),
            RosterBody::Rows(rows) => {
                for row in rows {
                    w.open("tr", &[]);
                    w.open("td", &[]).element("a", &[("href", row.detail_url.as_str())], &row.id);
                    w.close("td");
                    w.open("td", &[]).element("a", &[("href", row.detail_url.as_str())], &row.name);
                    w.close("td");
                    w.element("td", &[], &row.room);
                    w.element("td", &[], &row.bed);
                    w.element("td", &[], &row.admission_date);
                    w.element("td", &[("class", "diario")], &row.last_diary);
                    w.open("td", &[]).element(
                        "a",
                        &[
                            ("class", "btn btn-sm btn-pdf"),
                            ("href", row.pdf_url.as_str()),
                            ("target", "_blank"),
                        ],
                        "Generate PDF",
                    );
                    w.close("td").close("tr");
                }
            }
        }
        w.finish()
    }
}

fn message_row(w: &mut HtmlWriter, class: &str, text: &str) {
    w.open("tr", &[])
        .element("td", &[("colspan", ROSTER_COLUMNS), ("class", class)], text)
        .close("tr");
}

/// Row of the recent-patients widget on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentRow {
    pub id: String,
    pub name: String,
    pub room: String,
    pub bed: String,
    pub detail_url: String,
    pub pdf_url: String,
}

impl RecentRow {
    pub fn from_record(record: &PatientRecord, endpoints: &Endpoints) -> Self {
        let id = record.display_id().unwrap_or("-").to_string();
        Self {
            detail_url: endpoints.detail_page(&id),
            pdf_url: endpoints.pdf(&id),
            name: or_default(record.patient_name.as_deref(), "Name missing"),
            room: or_default(record.room.as_deref(), "-"),
            bed: or_default(record.bed.as_deref(), "-"),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changing_sort_or_search_resets_page() {
        let state = QueryState::new(10).with_page(4);
        assert_eq!(state.page(), 4);
        assert_eq!(state.with_search("silva").page(), 1);
        assert_eq!(state.with_sort_by(SortField::Name).page(), 1);
        assert_eq!(state.with_sort_order(SortOrder::Asc).page(), 1);
        assert_eq!(state.next_page().page(), 5);
    }

    #[test]
    fn prev_page_never_goes_below_one() {
        let state = QueryState::new(10);
        assert_eq!(state.prev_page().page(), 1);
        assert_eq!(QueryState::new(0).limit(), 1);
    }

    #[test]
    fn last_page_disables_next_only() {
        let pagination = Pagination::new(Some(2), Some(2));
        assert_eq!(pagination.label(), "Page 2 of 2");
        assert!(pagination.prev_enabled());
        assert!(!pagination.next_enabled());
    }

    #[test]
    fn loading_pager_disables_both_buttons() {
        let view = RosterView::loading();
        assert_eq!(view.pager.label(), "Loading...");
        assert!(!view.pager.prev_enabled());
        assert!(!view.pager.next_enabled());
        assert!(view.rows_html().contains("Loading..."));
    }

    #[test]
    fn error_view_resets_pagination() {
        let view = RosterView::error("boom");
        assert_eq!(view.pager.label(), "Page 1 of 1");
        assert!(!view.pager.prev_enabled());
        assert!(!view.pager.next_enabled());
        assert!(view.rows_html().contains("text-danger"));
    }

    #[test]
    fn pagination_normalizes_missing_values() {
        let pagination = Pagination::new(Some(0), Some(0));
        assert_eq!(pagination, Pagination::reset());
        assert_eq!(Pagination::new(None, Some(3)).label(), "Page 1 of 3");
    }

    #[test]
    fn row_defaults_and_links() {
        let endpoints = Endpoints::new("");
        let row = RosterRow::from_record(
            &PatientRecord {
                patient_id: Some("77".into()),
                ..PatientRecord::default()
            },
            &endpoints,
        );
        assert_eq!(row.id, "77");
        assert_eq!(row.name, "Name missing");
        assert_eq!(row.room, "N/A");
        assert_eq!(row.last_diary, "No records");
        assert_eq!(row.detail_url, "/info-patient/?id=77");
        assert_eq!(row.pdf_url, "/generate_pdf/77");

        let empty = RosterView::from_page(&[], Pagination::reset(), &endpoints);
        assert_eq!(empty.body, RosterBody::Empty);
        assert!(empty.rows_html().contains(NO_MATCHES));
    }

    #[test]
    fn recent_rows_use_dashes() {
        let row = RecentRow::from_record(&PatientRecord::default(), &Endpoints::new(""));
        assert_eq!(row.id, "-");
        assert_eq!(row.name, "Name missing");
        assert_eq!(row.room, "-");
        assert_eq!(row.bed, "-");
    }
}

//! URLs of the backend endpoints and of the pages the views link to.

use url::form_urlencoded::{byte_serialize, Serializer};

use crate::roster::QueryState;

pub const PATIENT_INFO_PATH: &str = "/api/patient_info/";
pub const ALL_PATIENTS_PATH: &str = "/api/all_patients/";
pub const RECENT_PATIENTS_PATH: &str = "/api/recent_patients_api/";
pub const DETAIL_PAGE_PATH: &str = "/info-patient/";
pub const PDF_PATH: &str = "/generate_pdf/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `base` is prefixed to every path; an empty base keeps URLs relative.
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn patient_search(&self, query: &str) -> String {
        let qs = Serializer::new(String::new())
            .append_pair("search", query)
            .finish();
        format!("{}{PATIENT_INFO_PATH}?{qs}", self.base)
    }

    pub fn all_patients(&self, state: &QueryState) -> String {
        let mut qs = Serializer::new(String::new());
        for (key, value) in state.query_pairs() {
            qs.append_pair(key, &value);
        }
        format!("{}{ALL_PATIENTS_PATH}?{}", self.base, qs.finish())
    }

    pub fn recent_patients(&self) -> String {
        format!("{}{RECENT_PATIENTS_PATH}", self.base)
    }

    pub fn detail_page(&self, id: &str) -> String {
        let qs = Serializer::new(String::new()).append_pair("id", id).finish();
        format!("{}{DETAIL_PAGE_PATH}?{qs}", self.base)
    }

    pub fn pdf(&self, id: &str) -> String {
        let segment: String = byte_serialize(id.as_bytes()).collect();
        format!("{}{PDF_PATH}{segment}", self.base)
    }
}

/// Value of the `id` parameter in a page query string (with or without the
/// leading `?`). Blank values count as missing.
pub fn id_from_query(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

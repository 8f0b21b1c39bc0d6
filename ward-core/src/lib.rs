//! Model and rendering logic for the ward patient viewer.
//!
//! Everything here is pure: records come in as parsed JSON, view-models and
//! escaped markup come out. Fetching lives in `ward-client`.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod markup;
pub mod model;
pub mod roster;
pub mod sections;
pub mod state;
pub mod view;

pub use api::Endpoints;
pub use config::WardConfig;
pub use error::{ConfigError, FetchError};
pub use model::{
    ContactNumbers, ContactPerson, DiaryEntry, ErrorBody, Exam, LabAnalysis, Observation,
    PatientRecord, Phenomenon, Prescription, RosterPage, TherapeuticIntervention,
};
pub use roster::{
    Pager, Pagination, QueryState, RecentRow, RosterBody, RosterRow, RosterView, SortField,
    SortOrder,
};
pub use sections::{render_section, render_sections, Section, SectionBody, SectionKind};
pub use state::{RequestSequencer, RequestToken, ViewState};
pub use view::{render_view_state, PatientView};

/// Parse a patient record from a JSON string.
pub fn parse_patient_str(json: &str) -> Result<PatientRecord, serde_json::Error> {
    serde_json::from_str(json)
}

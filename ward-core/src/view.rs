//! Patient detail page: record → view-model → escaped markup.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::api::Endpoints;
use crate::format::{
    format_contact, format_time, is_compact_time, join_or_default, join_trimmed_or_default,
    or_default,
};
use crate::markup::HtmlWriter;
use crate::model::PatientRecord;
use crate::sections::{render_sections, Section, SectionKind};
use crate::state::ViewState;

pub const LOADING_MESSAGE: &str = "Loading patient data...";

/// Display-ready detail page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatientView {
    pub episode_id: String,
    pub name: String,
    pub phone: String,
    pub observations: String,
    pub diagnosis: String,
    pub history: String,
    pub contact_person: String,
    pub admission: String,
    pub room: String,
    pub bed: String,
    /// Only set when the record has an identifier.
    pub pdf_url: Option<String>,
    pub sections: BTreeMap<SectionKind, Section>,
}

impl PatientView {
    pub fn from_record(record: &PatientRecord, endpoints: &Endpoints) -> Self {
        let id = record.display_id();
        let contact = record.contact();

        Self {
            episode_id: id.unwrap_or("Unknown ID").to_string(),
            name: or_default(record.patient_name.as_deref(), "Name missing."),
            phone: format_contact(
                contact.and_then(|c| c.address_phone.as_deref()),
                contact.and_then(|c| c.mobile.as_deref()),
            ),
            observations: join_trimmed_or_default(
                record.observations.iter().map(|o| o.text.as_deref()),
                "No observations registered.",
            ),
            diagnosis: join_or_default(&record.diagnosis, "No medical diagnosis registered."),
            history: join_or_default(&record.history, "No history registered."),
            contact_person: join_trimmed_or_default(
                record.contact_persons.iter().map(|p| p.name.as_deref()),
                "",
            ),
            admission: admission_line(record),
            room: or_default(record.room.as_deref(), "N/A"),
            bed: or_default(record.bed.as_deref(), "N/A"),
            pdf_url: id.map(|id| endpoints.pdf(id)),
            sections: render_sections(record),
        }
    }

    /// Left-hand header column, in display order.
    pub fn personal_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("Episode ID", self.episode_id.as_str()),
            ("Name", self.name.as_str()),
            ("Phone", self.phone.as_str()),
            ("Observations", self.observations.as_str()),
            ("Medical Diagnosis", self.diagnosis.as_str()),
            ("History", self.history.as_str()),
            ("Contact Person", self.contact_person.as_str()),
            ("Admission Date", self.admission.as_str()),
        ]
    }

    pub fn location_fields(&self) -> [(&'static str, &str); 2] {
        [("Room", self.room.as_str()), ("Bed", self.bed.as_str())]
    }

    pub fn to_html(&self) -> String {
        let mut w = HtmlWriter::new();
        w.open("div", &[("class", "patient-info")]);

        w.open("div", &[("class", "patient-info-header")]);
        w.open("div", &[("class", "personal-info")]);
        for (label, value) in self.personal_fields() {
            write_field(&mut w, label, value);
        }
        w.close("div");

        w.open("div", &[("class", "local-info")]);
        for (label, value) in self.location_fields() {
            write_field(&mut w, label, value);
        }
        if let Some(pdf_url) = &self.pdf_url {
            w.element(
                "a",
                &[
                    ("class", "btn btn-sm btn-search"),
                    ("href", pdf_url.as_str()),
                    ("target", "_blank"),
                ],
                "Generate PDF",
            );
        }
        w.close("div").close("div");

        w.open("hr", &[]);
        w.open("div", &[("class", "additional-info")]);
        for section in self.sections.values() {
            w.open("div", &[("class", "card-section")]);
            w.element("strong", &[], section.title);
            section.write_html(&mut w);
            w.close("div");
        }
        w.close("div").close("div");

        w.finish()
    }

    /// Plain-text rendering, one `Label: value` line per header field followed
    /// by each section.
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = self
            .personal_fields()
            .into_iter()
            .chain(self.location_fields())
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();

        for section in self.sections.values() {
            lines.push(String::new());
            lines.push(format!("[{}]", section.title));
            lines.extend(section_text(section));
        }
        lines.join("\n")
    }
}

fn write_field(w: &mut HtmlWriter, label: &str, value: &str) {
    w.open("div", &[("class", "field")]);
    w.element("strong", &[], &format!("{label}:"));
    w.text(" ");
    w.element("span", &[], value);
    w.close("div");
}

fn section_text(section: &Section) -> Vec<String> {
    use crate::sections::SectionBody;

    match &section.body {
        SectionBody::Placeholder(text) => vec![text.to_string()],
        SectionBody::Table(table) => table.rows.iter().map(|row| row.join(" | ")).collect(),
        SectionBody::Cards(cards) => cards
            .iter()
            .flat_map(|card| {
                card.table
                    .rows
                    .iter()
                    .map(move |row| format!("{}: {}", card.heading, row.join(" | ")))
            })
            .collect(),
    }
}

/// `"{date} {time}"`, with `---` for a missing date. Compact numeric times are
/// expanded to `HH:MM`.
fn admission_line(record: &PatientRecord) -> String {
    let date = or_default(record.admission_date.as_deref(), "---");
    let time = match record.admission_time.as_deref() {
        Some(raw) if is_compact_time(raw) => format_time(Some(raw)),
        Some(raw) => raw.to_string(),
        None => String::new(),
    };
    format!("{date} {time}").trim().to_string()
}

/// Markup for whatever the detail view is currently in. Each call produces
/// the complete content of the view container.
pub fn render_view_state(state: &ViewState, endpoints: &Endpoints) -> String {
    match state {
        ViewState::Loading => {
            let mut w = HtmlWriter::new();
            w.open("div", &[("class", "loading"), ("role", "status")])
                .element("span", &[], LOADING_MESSAGE)
                .close("div");
            w.finish()
        }
        ViewState::Error(message) => render_error(message),
        ViewState::Loaded(record) => PatientView::from_record(record, endpoints).to_html(),
    }
}

pub fn render_error(message: &str) -> String {
    let mut w = HtmlWriter::new();
    w.element(
        "div",
        &[("class", "alert alert-danger text-center"), ("role", "alert")],
        message,
    );
    w.finish()
}

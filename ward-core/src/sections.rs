//! Tables for the six repeated sub-collections of a patient record.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::format::or_default;
use crate::markup::HtmlWriter;
use crate::model::{PatientRecord, Phenomenon};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    NursingDiagnoses,
    Prescriptions,
    LabAnalyses,
    Exams,
    TherapeuticInterventions,
    ClinicalDiary,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::NursingDiagnoses,
        SectionKind::Prescriptions,
        SectionKind::LabAnalyses,
        SectionKind::Exams,
        SectionKind::TherapeuticInterventions,
        SectionKind::ClinicalDiary,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::NursingDiagnoses => "Nursing Diagnoses",
            SectionKind::Prescriptions => "Medical Prescription",
            SectionKind::LabAnalyses => "Lab Results",
            SectionKind::Exams => "Exams",
            SectionKind::TherapeuticInterventions => "Therapeutic Interventions",
            SectionKind::ClinicalDiary => "Clinical Diary",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SectionKind::NursingDiagnoses => "No nursing diagnoses registered.",
            SectionKind::Prescriptions => "No medication registered.",
            SectionKind::LabAnalyses => "No lab analysis registered.",
            SectionKind::Exams => "No exams registered.",
            SectionKind::TherapeuticInterventions => "No therapeutic interventions registered.",
            SectionKind::ClinicalDiary => "No diary entries registered.",
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            SectionKind::NursingDiagnoses => &["Date", "Time", "Diagnosis"],
            SectionKind::Prescriptions => &["Drug", "Route", "Dose", "Schedule"],
            SectionKind::LabAnalyses => &["Analysis", "Start Date", "Time"],
            SectionKind::Exams => &["Exam", "Scheduled Date"],
            SectionKind::TherapeuticInterventions => &["Intervention", "Schedule"],
            SectionKind::ClinicalDiary => &["Date", "Time", "Entry"],
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Table {
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

/// One nursing diagnosis: a heading followed by a single-row table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosisCard {
    pub heading: String,
    pub table: Table,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Placeholder(&'static str),
    Table(Table),
    Cards(Vec<DiagnosisCard>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
}

impl Section {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, SectionBody::Placeholder(_))
    }

    pub fn write_html(&self, w: &mut HtmlWriter) {
        w.open("div", &[("class", "card p-3 mb-3")]);
        match &self.body {
            SectionBody::Placeholder(text) => {
                w.element("p", &[], text);
            }
            SectionBody::Table(table) => write_table(w, table),
            SectionBody::Cards(cards) => {
                for card in cards {
                    w.element("strong", &[("class", "diagnostico")], &card.heading);
                    write_table(w, &card.table);
                }
            }
        }
        w.close("div");
    }

    pub fn to_html(&self) -> String {
        let mut w = HtmlWriter::new();
        self.write_html(&mut w);
        w.finish()
    }
}

fn write_table(w: &mut HtmlWriter, table: &Table) {
    w.open("table", &[("class", "table table-striped table-sm")]);
    w.open("thead", &[]).open("tr", &[]);
    for header in table.headers {
        w.element("th", &[], header);
    }
    w.close("tr").close("thead").open("tbody", &[]);
    for row in &table.rows {
        w.open("tr", &[]);
        for cell in row {
            w.element("td", &[], cell);
        }
        w.close("tr");
    }
    w.close("tbody").close("table");
}

/// Build the section for `kind` from the matching sub-collection of `record`.
pub fn render_section(kind: SectionKind, record: &PatientRecord) -> Section {
    let rows: Vec<Vec<String>> = match kind {
        SectionKind::NursingDiagnoses => {
            return Section {
                kind,
                title: kind.title(),
                body: diagnosis_body(&record.phenomena),
            };
        }
        SectionKind::Prescriptions => record
            .prescriptions
            .iter()
            .map(|p| {
                vec![
                    or_default(p.drug.as_deref(), NOT_AVAILABLE),
                    or_default(p.route.as_deref(), NOT_AVAILABLE),
                    or_default(p.dose.as_deref(), NOT_AVAILABLE),
                    or_default(p.schedule.as_deref(), NOT_AVAILABLE),
                ]
            })
            .collect(),
        SectionKind::LabAnalyses => record
            .analyses
            .iter()
            .map(|a| {
                vec![
                    or_default(a.name.as_deref(), "OTHER ANALYSIS"),
                    or_default(a.date.as_deref(), NOT_AVAILABLE),
                    or_default(a.time.as_deref(), NOT_AVAILABLE),
                ]
            })
            .collect(),
        SectionKind::Exams => record
            .exams
            .iter()
            .map(|e| {
                vec![
                    or_default(e.name.as_deref(), "OTHER EXAM"),
                    or_default(e.date.as_deref(), NOT_AVAILABLE),
                ]
            })
            .collect(),
        SectionKind::TherapeuticInterventions => record
            .interventions
            .iter()
            .map(|t| {
                vec![
                    or_default(t.intervention.as_deref(), "OTHER INTERVENTION"),
                    or_default(t.time.as_deref(), NOT_AVAILABLE),
                ]
            })
            .collect(),
        SectionKind::ClinicalDiary => record
            .diaries
            .iter()
            .map(|d| {
                vec![
                    or_default(d.date.as_deref(), NOT_AVAILABLE),
                    or_default(d.time.as_deref(), NOT_AVAILABLE),
                    or_default(d.text.as_deref(), "Empty entry"),
                ]
            })
            .collect(),
    };

    let body = if rows.is_empty() {
        SectionBody::Placeholder(kind.placeholder())
    } else {
        SectionBody::Table(Table {
            headers: kind.headers(),
            rows,
        })
    };

    Section {
        kind,
        title: kind.title(),
        body,
    }
}

/// All six sections, keyed by kind.
pub fn render_sections(record: &PatientRecord) -> BTreeMap<SectionKind, Section> {
    SectionKind::ALL
        .into_iter()
        .map(|kind| (kind, render_section(kind, record)))
        .collect()
}

fn diagnosis_body(phenomena: &[Phenomenon]) -> SectionBody {
    if phenomena.is_empty() {
        return SectionBody::Placeholder(SectionKind::NursingDiagnoses.placeholder());
    }

    let cards = sort_phenomena(phenomena)
        .into_iter()
        .map(|p| DiagnosisCard {
            heading: or_default(p.name.as_deref(), "Unknown diagnosis"),
            table: Table {
                headers: SectionKind::NursingDiagnoses.headers(),
                rows: vec![vec![
                    or_default(p.date.as_deref(), "-"),
                    or_default(p.time.as_deref(), "-"),
                    or_default(p.definition.as_deref(), "-"),
                ]],
            },
        })
        .collect();

    SectionBody::Cards(cards)
}

/// Most recent first; entries without a usable date and time go last.
/// Equal keys keep their input order.
pub fn sort_phenomena(phenomena: &[Phenomenon]) -> Vec<&Phenomenon> {
    let mut keyed: Vec<(Option<NaiveDateTime>, &Phenomenon)> = phenomena
        .iter()
        .map(|p| (phenomenon_timestamp(p), p))
        .collect();

    let undated = keyed.iter().filter(|(ts, _)| ts.is_none()).count();
    if undated > 0 {
        tracing::debug!(undated, "phenomena without a usable timestamp sorted last");
    }

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Combine a `DD-MM-YYYY` date and an `HH:MM` time.
pub fn phenomenon_timestamp(phenomenon: &Phenomenon) -> Option<NaiveDateTime> {
    let date = parse_day_month_year(phenomenon.date.as_deref()?)?;
    let time = parse_hour_minute(phenomenon.time.as_deref()?)?;
    Some(date.and_time(time))
}

fn parse_day_month_year(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('-').map(|part| part.trim().parse::<u32>().ok());
    let day = parts.next()??;
    let month = parts.next()??;
    let year = i32::try_from(parts.next()??).ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_hour_minute(raw: &str) -> Option<NaiveTime> {
    let mut parts = raw.trim().split(':').map(|part| part.trim().parse::<u32>().ok());
    let hour = parts.next()??;
    let minute = parts.next()??;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DiaryEntry, Exam, LabAnalysis, Prescription};
    use proptest::prelude::*;

    fn phenomenon(name: &str, date: Option<&str>, time: Option<&str>) -> Phenomenon {
        Phenomenon {
            name: Some(name.to_string()),
            definition: None,
            date: date.map(str::to_string),
            time: time.map(str::to_string),
        }
    }

    fn names(sorted: &[&Phenomenon]) -> Vec<String> {
        sorted.iter().filter_map(|p| p.name.clone()).collect()
    }

    #[test]
    fn empty_collections_render_placeholders() {
        let record = PatientRecord::default();
        for (kind, section) in render_sections(&record) {
            assert_eq!(section.body, SectionBody::Placeholder(kind.placeholder()));
            let html = section.to_html();
            assert!(html.contains(kind.placeholder()));
            assert!(!html.contains("<table"));
        }
    }

    #[test]
    fn missing_fields_use_kind_defaults() {
        let record = PatientRecord {
            prescriptions: vec![Prescription {
                drug: Some("Paracetamol".into()),
                ..Prescription::default()
            }],
            exams: vec![Exam::default()],
            analyses: vec![LabAnalysis::default()],
            diaries: vec![DiaryEntry::default()],
            ..PatientRecord::default()
        };

        let prescriptions = render_section(SectionKind::Prescriptions, &record);
        let SectionBody::Table(table) = prescriptions.body else {
            panic!("expected table");
        };
        assert_eq!(table.headers, ["Drug", "Route", "Dose", "Schedule"]);
        assert_eq!(table.rows, vec![vec!["Paracetamol", "N/A", "N/A", "N/A"]]);

        let exams = render_section(SectionKind::Exams, &record);
        let SectionBody::Table(table) = exams.body else {
            panic!("expected table");
        };
        assert_eq!(table.rows, vec![vec!["OTHER EXAM", "N/A"]]);

        let analyses = render_section(SectionKind::LabAnalyses, &record);
        let SectionBody::Table(table) = analyses.body else {
            panic!("expected table");
        };
        assert_eq!(table.rows, vec![vec!["OTHER ANALYSIS", "N/A", "N/A"]]);

        let diary = render_section(SectionKind::ClinicalDiary, &record);
        let SectionBody::Table(table) = diary.body else {
            panic!("expected table");
        };
        assert_eq!(table.rows, vec![vec!["N/A", "N/A", "Empty entry"]]);
    }

    #[test]
    fn diagnoses_sort_recent_first_and_malformed_last() {
        let input = vec![
            phenomenon("no-time", Some("01-01-2024"), None),
            phenomenon("old", Some("01-01-2024"), Some("08:00")),
            phenomenon("new", Some("02-01-2024"), Some("07:30")),
            phenomenon("garbage", Some("yesterday"), Some("08:00")),
            phenomenon("same-day-later", Some("01-01-2024"), Some("20:15")),
        ];

        let sorted = sort_phenomena(&input);
        assert_eq!(
            names(&sorted),
            vec!["new", "same-day-later", "old", "no-time", "garbage"]
        );
    }

    #[test]
    fn diagnoses_ties_keep_input_order() {
        let input = vec![
            phenomenon("first", Some("05-03-2024"), Some("10:00")),
            phenomenon("second", Some("05-03-2024"), Some("10:00")),
        ];
        assert_eq!(names(&sort_phenomena(&input)), vec!["first", "second"]);
    }

    #[test]
    fn diagnosis_card_defaults() {
        let record = PatientRecord {
            phenomena: vec![Phenomenon::default()],
            ..PatientRecord::default()
        };
        let section = render_section(SectionKind::NursingDiagnoses, &record);
        let SectionBody::Cards(cards) = section.body else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].heading, "Unknown diagnosis");
        assert_eq!(cards[0].table.rows, vec![vec!["-", "-", "-"]]);
    }

    #[test]
    fn rows_are_escaped_in_html() {
        let record = PatientRecord {
            exams: vec![Exam {
                name: Some("<script>alert(1)</script>".into()),
                date: None,
            }],
            ..PatientRecord::default()
        };
        let html = render_section(SectionKind::Exams, &record).to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    fn arb_phenomenon() -> impl Strategy<Value = Phenomenon> {
        let well_formed = (1u32..=28, 1u32..=12, 2000u32..=2030, 0u32..24, 0u32..60).prop_map(
            |(d, m, y, h, min)| {
                phenomenon(
                    "ok",
                    Some(&format!("{d:02}-{m:02}-{y}")),
                    Some(&format!("{h:02}:{min:02}")),
                )
            },
        );
        let malformed = prop_oneof![
            Just(phenomenon("bad", None, Some("10:00"))),
            Just(phenomenon("bad", Some("12-12-2024"), None)),
            "[a-z]{0,6}".prop_map(|s| phenomenon("bad", Some(&s), Some("10:00"))),
        ];
        prop_oneof![well_formed, malformed]
    }

    proptest! {
        #[test]
        fn malformed_after_well_formed_and_descending(
            input in proptest::collection::vec(arb_phenomenon(), 0..24)
        ) {
            let sorted = sort_phenomena(&input);
            let keys: Vec<Option<NaiveDateTime>> =
                sorted.iter().map(|p| phenomenon_timestamp(p)).collect();

            if let Some(first_none) = keys.iter().position(Option::is_none) {
                prop_assert!(keys[first_none..].iter().all(Option::is_none));
            }
            let parsed: Vec<NaiveDateTime> = keys.into_iter().flatten().collect();
            prop_assert!(parsed.windows(2).all(|pair| pair[0] >= pair[1]));
        }
    }
}

//! Ward records as served by the backend API.
//!
//! Every field is optional. Scalars may arrive as strings, numbers or `null`;
//! an empty string is treated the same as a missing value.

use serde::{Deserialize, Serialize};

/// Episode record returned by `/api/patient_info/`, and one row of the roster
/// and recent-patients endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub episode_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub patient_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub patient_name: Option<String>,
    #[serde(rename = "sala", default, deserialize_with = "lenient::text")]
    pub room: Option<String>,
    #[serde(rename = "cama", default, deserialize_with = "lenient::text")]
    pub bed: Option<String>,
    #[serde(rename = "data_entrada", default, deserialize_with = "lenient::text")]
    pub admission_date: Option<String>,
    #[serde(rename = "hora_entrada", default, deserialize_with = "lenient::text")]
    pub admission_time: Option<String>,
    #[serde(rename = "ultimo_diario", default, deserialize_with = "lenient::text")]
    pub last_diary: Option<String>,
    #[serde(rename = "telefone", default, deserialize_with = "lenient::list")]
    pub phones: Vec<ContactNumbers>,
    #[serde(rename = "antecedentes", default, deserialize_with = "lenient::text_list")]
    pub history: Vec<String>,
    #[serde(rename = "diagnostico", default, deserialize_with = "lenient::text_list")]
    pub diagnosis: Vec<String>,
    #[serde(rename = "observacoes", default, deserialize_with = "lenient::list")]
    pub observations: Vec<Observation>,
    #[serde(rename = "pessoa_signif", default, deserialize_with = "lenient::list")]
    pub contact_persons: Vec<ContactPerson>,
    #[serde(rename = "fenomenos", default, deserialize_with = "lenient::list")]
    pub phenomena: Vec<Phenomenon>,
    #[serde(rename = "medicacao", default, deserialize_with = "lenient::list")]
    pub prescriptions: Vec<Prescription>,
    #[serde(rename = "atitudes_terapeuticas", default, deserialize_with = "lenient::list")]
    pub interventions: Vec<TherapeuticIntervention>,
    #[serde(rename = "analises", default, deserialize_with = "lenient::list")]
    pub analyses: Vec<LabAnalysis>,
    #[serde(rename = "exames", default, deserialize_with = "lenient::list")]
    pub exams: Vec<Exam>,
    #[serde(rename = "diarios", default, deserialize_with = "lenient::list")]
    pub diaries: Vec<DiaryEntry>,
}

impl PatientRecord {
    /// First non-empty identifier among `episode_id`, `patient_id`, `id`.
    pub fn display_id(&self) -> Option<&str> {
        [&self.episode_id, &self.patient_id, &self.id]
            .into_iter()
            .find_map(|candidate| candidate.as_deref())
    }

    /// The record carries at most one contact entry worth showing.
    pub fn contact(&self) -> Option<&ContactNumbers> {
        self.phones.first()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactNumbers {
    #[serde(rename = "telefone_morada", default, deserialize_with = "lenient::text")]
    pub address_phone: Option<String>,
    #[serde(rename = "telemovel", default, deserialize_with = "lenient::text")]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    #[serde(rename = "observacoes", default, deserialize_with = "lenient::text")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactPerson {
    #[serde(rename = "pessoa_signif", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

/// Nursing diagnosis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Phenomenon {
    #[serde(rename = "fenomeno", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "def_fenom", default, deserialize_with = "lenient::text")]
    pub definition: Option<String>,
    /// `DD-MM-YYYY`
    #[serde(rename = "dta_fenom", default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    /// `HH:MM`
    #[serde(rename = "hora_fenom", default, deserialize_with = "lenient::text")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    #[serde(rename = "farmaco", default, deserialize_with = "lenient::text")]
    pub drug: Option<String>,
    #[serde(rename = "via", default, deserialize_with = "lenient::text")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub dose: Option<String>,
    #[serde(rename = "horario", default, deserialize_with = "lenient::text")]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TherapeuticIntervention {
    #[serde(rename = "atitude", default, deserialize_with = "lenient::text")]
    pub intervention: Option<String>,
    #[serde(rename = "hora_at", default, deserialize_with = "lenient::text")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabAnalysis {
    #[serde(rename = "analise", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "dta_anl", default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(rename = "hora_anl", default, deserialize_with = "lenient::text")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Exam {
    #[serde(rename = "exame", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "dta_exm", default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiaryEntry {
    #[serde(rename = "dta_dir", default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(rename = "hora_dir", default, deserialize_with = "lenient::text")]
    pub time: Option<String>,
    #[serde(rename = "diario", default, deserialize_with = "lenient::text")]
    pub text: Option<String>,
}

/// Body of a successful `/api/all_patients/` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RosterPage {
    #[serde(default, deserialize_with = "lenient::list")]
    pub patients: Vec<PatientRecord>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_pages: Option<u32>,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "lenient::text")]
    pub error: Option<String>,
}

pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_text))
    }

    pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Option::<Vec<Value>>::deserialize(deserializer)?;
        Ok(values
            .unwrap_or_default()
            .iter()
            .filter_map(value_text)
            .collect())
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }

    fn value_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

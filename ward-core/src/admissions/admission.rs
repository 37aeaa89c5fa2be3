use crate::dates::Timestamped;
use crate::filter::Filterable;
use crate::store::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionStatus {
    Admitted,
    Discharged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admission {
    pub id: Option<u64>,
    pub patient_id: Option<u64>,
    /// Attending doctor, if one was assigned.
    pub doctor_id: Option<u64>,
    pub reason: Option<String>,
    pub admitted_at: Option<NaiveDateTime>,
    pub discharged_at: Option<NaiveDateTime>,
    pub status: AdmissionStatus,
}

/// Form input for a new admission.
#[derive(Debug, Clone, Default)]
pub struct AdmitRequest {
    pub patient_id: u64,
    pub doctor_id: Option<u64>,
    pub reason: Option<String>,
    /// Raw admission time. Missing means "now".
    pub admitted_at: Option<String>,
}

impl Record for Admission {
    const TABLE: &'static str = "admissions";
    const KIND: &'static str = "Admission";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl Timestamped for Admission {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.admitted_at
    }
}

impl Filterable for Admission {
    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_ref())
    }
    fn patient_id(&self) -> Option<u64> {
        self.patient_id
    }
    fn doctor_id(&self) -> Option<u64> {
        self.doctor_id
    }
}

use crate::dates::Timestamped;
use crate::filter::Filterable;
use crate::store::Record;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// When the patient was registered.
    pub created_at: Option<NaiveDateTime>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Properties to register a new patient
#[derive(Debug, Clone, Default)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl Record for Patient {
    const TABLE: &'static str = "patients";
    const KIND: &'static str = "Patient";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl Timestamped for Patient {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.created_at
    }
}

impl Filterable for Patient {
    fn patient_id(&self) -> Option<u64> {
        self.id
    }
}

use crate::dates::Timestamped;
use crate::filter::Filterable;
use crate::store::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Option<u64>,
    pub patient_id: Option<u64>,
    pub doctor_id: Option<u64>,
    pub medication: String,
    pub dosage: Option<String>,
    pub issued_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
pub struct NewPrescription {
    pub patient_id: u64,
    pub doctor_id: Option<u64>,
    pub medication: String,
    pub dosage: Option<String>,
}

impl Record for Prescription {
    const TABLE: &'static str = "prescriptions";
    const KIND: &'static str = "Prescription";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl Timestamped for Prescription {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.issued_at
    }
}

impl Filterable for Prescription {
    fn patient_id(&self) -> Option<u64> {
        self.patient_id
    }
    fn doctor_id(&self) -> Option<u64> {
        self.doctor_id
    }
}

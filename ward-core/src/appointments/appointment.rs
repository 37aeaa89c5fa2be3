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
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Option<u64>,
    pub patient_id: Option<u64>,
    pub doctor_id: Option<u64>,
    pub appointment_date_time: Option<NaiveDateTime>,
    pub purpose: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

/// Booking form. `date_time` is kept exactly as the picker sent it.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    pub patient_id: u64,
    pub doctor_id: Option<u64>,
    pub date_time: String,
    pub purpose: String,
    pub notes: Option<String>,
}

/// Edit form for an existing appointment.
#[derive(Debug, Clone, Default)]
pub struct AppointmentChanges {
    pub date_time: String,
    pub purpose: String,
    pub notes: Option<String>,
}

impl Record for Appointment {
    const TABLE: &'static str = "appointments";
    const KIND: &'static str = "Appointment";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl Timestamped for Appointment {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.appointment_date_time
    }
}

impl Filterable for Appointment {
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

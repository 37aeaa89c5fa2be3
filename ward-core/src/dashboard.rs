//! Front-page summaries. Reads only; never changes a table.

use crate::admissions::Admissions;
use crate::appointments::{Appointment, Appointments};
use crate::billing::Billing;
use crate::doctors::Doctors;
use crate::error::Result;
use crate::filter::ListFilter;
use crate::patients::Patients;
use crate::prescriptions::Prescriptions;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub patients: usize,
    pub doctors: usize,
    pub admissions: usize,
    pub prescriptions: usize,
    pub invoices: usize,
    pub todays_appointments: Vec<Appointment>,
    pub upcoming_appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub new_patients_today: usize,
    pub todays_appointments: usize,
    /// Two decimals, e.g. `"125.50"`.
    pub unpaid_total: String,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub patients: Patients,
    pub doctors: Doctors,
    pub admissions: Admissions,
    pub billing: Billing,
    pub appointments: Appointments,
    pub prescriptions: Prescriptions,
}

impl Dashboard {
    fn reference_time(&self) -> NaiveDateTime {
        self.appointments.reference_time
    }

    pub fn overview(&self) -> Result<Overview> {
        let everything = ListFilter::default();
        Ok(Overview {
            patients: self.patients.all()?.len(),
            doctors: self.doctors.list()?.len(),
            admissions: self.admissions.list(&everything)?.len(),
            prescriptions: self.prescriptions.list(&everything)?.len(),
            invoices: self.billing.list(&everything)?.len(),
            todays_appointments: self.appointments.todays()?,
            upcoming_appointments: self.appointments.upcoming()?,
        })
    }

    /// Headline numbers. The new-patient count and the unpaid total fall back
    /// to zero when their tables cannot be read.
    pub fn stats(&self) -> Result<DashboardStats> {
        let total_patients = self.patients.all()?.len();

        let start = self.reference_time().date().and_time(NaiveTime::MIN);
        let end = start + Duration::days(1);
        let new_patients_today = self
            .patients
            .count_created_between(start, end)
            .unwrap_or_else(|error| {
                warn!(%error, "counting today's registrations failed");
                0
            });

        let todays_appointments = self.appointments.todays()?.len();

        let unpaid = self.billing.unpaid_total().unwrap_or_else(|error| {
            warn!(%error, "summing unpaid invoices failed");
            0.0
        });

        Ok(DashboardStats {
            total_patients,
            new_patients_today,
            todays_appointments,
            unpaid_total: format!("{unpaid:.2}"),
        })
    }

    /// [`stats`](Self::stats) as a JSON document with an `ok` flag.
    pub fn stats_report(&self) -> Value {
        match self.stats() {
            Ok(stats) => json!({ "ok": true, "stats": stats }),
            Err(error) => {
                warn!(%error, "dashboard stats unavailable");
                json!({ "ok": false, "error": error.to_string() })
            }
        }
    }
}

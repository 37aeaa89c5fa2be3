use super::appointment::{Appointment, AppointmentChanges, AppointmentStatus, ScheduleRequest};
use crate::dates::Normalizer;
use crate::doctors::Doctor;
use crate::error::{Result, WardError, require_text};
use crate::filter::{ListFilter, warn_unknown_status};
use crate::patients::Patient;
use crate::store::{JsonTable, Repository, Store};
use chrono::NaiveDateTime;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Appointments {
    store: Store,
    /// "Now" for the past check and for today/upcoming.
    pub reference_time: NaiveDateTime,
    normalizer: Normalizer,
}

impl Appointments {
    pub fn new(store: Store, reference_time: NaiveDateTime, normalizer: Normalizer) -> Self {
        Self {
            store,
            reference_time,
            normalizer,
        }
    }

    fn table(&self) -> JsonTable<Appointment> {
        self.store.table()
    }

    /// Books a new appointment.
    ///
    /// The raw date-time is normalized and must not be earlier than the
    /// reference time. Only then are the patient and doctor looked up, so a bad
    /// date is reported ahead of a bad reference.
    ///
    /// # Errors
    ///
    /// - [`WardError::MalformedDateTime`] when the date-time cannot be read.
    /// - [`WardError::InPast`] when it lies before the reference time.
    /// - [`WardError::NotFound`] for an unknown patient or doctor.
    /// - [`WardError::Validation`] for a blank purpose.
    pub fn schedule(&self, request: ScheduleRequest) -> Result<Appointment> {
        let when = self.future_date_time(&request.date_time)?;
        require_text("purpose", &request.purpose)?;
        self.store.table::<Patient>().get(request.patient_id)?;
        if let Some(doctor_id) = request.doctor_id {
            self.store.table::<Doctor>().get(doctor_id)?;
        }

        let appointment = self.table().save(Appointment {
            id: None,
            patient_id: Some(request.patient_id),
            doctor_id: request.doctor_id,
            appointment_date_time: Some(when),
            purpose: request.purpose.trim().to_string(),
            notes: request.notes.filter(|n| !n.trim().is_empty()),
            status: AppointmentStatus::Scheduled,
        })?;
        info!(
            id = ?appointment.id,
            patient_id = request.patient_id,
            %when,
            "appointment scheduled"
        );
        Ok(appointment)
    }

    /// Replaces date-time, purpose and notes of an existing appointment.
    pub fn update(&self, id: u64, changes: AppointmentChanges) -> Result<Appointment> {
        let table = self.table();
        let mut appointment = table.get(id)?;
        let when = self.future_date_time(&changes.date_time)?;
        require_text("purpose", &changes.purpose)?;

        appointment.appointment_date_time = Some(when);
        appointment.purpose = changes.purpose.trim().to_string();
        appointment.notes = changes.notes.filter(|n| !n.trim().is_empty());
        let appointment = table.save(appointment)?;
        info!(id, %when, "appointment updated");
        Ok(appointment)
    }

    pub fn cancel(&self, id: u64) -> Result<Appointment> {
        self.transition(id, AppointmentStatus::Cancelled)
    }

    pub fn complete(&self, id: u64) -> Result<Appointment> {
        self.transition(id, AppointmentStatus::Completed)
    }

    pub fn get(&self, id: u64) -> Result<Appointment> {
        self.table().get(id)
    }

    /// Scheduled appointments on the reference date, earliest first.
    pub fn todays(&self) -> Result<Vec<Appointment>> {
        let today = self.reference_time.date();
        self.scheduled_where(|when| when.date() == today)
    }

    /// Scheduled appointments on any later date, earliest first.
    pub fn upcoming(&self) -> Result<Vec<Appointment>> {
        let today = self.reference_time.date();
        self.scheduled_where(|when| when.date() > today)
    }

    /// Appointments matching `filter`, in booking order.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Appointment>> {
        warn_unknown_status::<AppointmentStatus>(filter);
        Ok(filter.apply(self.table().find_all()?))
    }

    fn future_date_time(&self, raw: &str) -> Result<NaiveDateTime> {
        // Pickers sometimes wrap the value, or parts of it, in quotes.
        let unquoted = raw.replace('\'', "");
        let when = self.normalizer.normalize(&unquoted).map_err(|mut error| {
            error.input = raw.to_string();
            error
        })?;
        if when < self.reference_time {
            debug!(%when, reference = %self.reference_time, "rejecting past date-time");
            return Err(WardError::InPast { requested: when });
        }
        Ok(when)
    }

    fn transition(&self, id: u64, to: AppointmentStatus) -> Result<Appointment> {
        let table = self.table();
        let mut appointment = table.get(id)?;
        if appointment.status != AppointmentStatus::Scheduled {
            return Err(WardError::InvalidTransition {
                kind: "Appointment",
                id,
                from: appointment.status.as_ref().to_string(),
                to: to.as_ref().to_string(),
            });
        }
        appointment.status = to;
        let appointment = table.save(appointment)?;
        info!(id, status = to.as_ref(), "appointment status changed");
        Ok(appointment)
    }

    fn scheduled_where(&self, keep: impl Fn(NaiveDateTime) -> bool) -> Result<Vec<Appointment>> {
        let mut found: Vec<Appointment> = self
            .table()
            .find_all()?
            .into_iter()
            .filter(|a| a.status == AppointmentStatus::Scheduled)
            .filter(|a| a.appointment_date_time.is_some_and(&keep))
            .collect();
        found.sort_by_key(|a| a.appointment_date_time);
        Ok(found)
    }
}

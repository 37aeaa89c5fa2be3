use super::admission::{AdmitRequest, Admission, AdmissionStatus};
use crate::dates::Normalizer;
use crate::doctors::Doctor;
use crate::error::{Result, WardError};
use crate::filter::{ListFilter, warn_unknown_status};
use crate::patients::Patient;
use crate::store::{JsonTable, Repository, Store};
use chrono::NaiveDateTime;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Admissions {
    store: Store,
    pub reference_time: NaiveDateTime,
    normalizer: Normalizer,
}

impl Admissions {
    pub fn new(store: Store, reference_time: NaiveDateTime, normalizer: Normalizer) -> Self {
        Self {
            store,
            reference_time,
            normalizer,
        }
    }

    fn table(&self) -> JsonTable<Admission> {
        self.store.table()
    }

    /// Admissions matching `filter`; the date window applies to admission time.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Admission>> {
        warn_unknown_status::<AdmissionStatus>(filter);
        Ok(filter.apply(self.table().find_all()?))
    }

    pub fn get(&self, id: u64) -> Result<Admission> {
        self.table().get(id)
    }

    /// Admits a patient. Back-dated admissions are allowed.
    pub fn admit(&self, request: AdmitRequest) -> Result<Admission> {
        let admitted_at = match request.admitted_at.as_deref() {
            Some(raw) => self.normalizer.normalize(raw)?,
            None => self.reference_time,
        };
        self.store.table::<Patient>().get(request.patient_id)?;
        if let Some(doctor_id) = request.doctor_id {
            self.store.table::<Doctor>().get(doctor_id)?;
        }

        let admission = self.table().save(Admission {
            id: None,
            patient_id: Some(request.patient_id),
            doctor_id: request.doctor_id,
            reason: request.reason.filter(|r| !r.trim().is_empty()),
            admitted_at: Some(admitted_at),
            discharged_at: None,
            status: AdmissionStatus::Admitted,
        })?;
        info!(
            id = ?admission.id,
            patient_id = request.patient_id,
            %admitted_at,
            "patient admitted"
        );
        Ok(admission)
    }

    pub fn discharge(&self, id: u64) -> Result<Admission> {
        let table = self.table();
        let mut admission = table.get(id)?;
        if admission.status != AdmissionStatus::Admitted {
            return Err(WardError::InvalidTransition {
                kind: "Admission",
                id,
                from: admission.status.as_ref().to_string(),
                to: AdmissionStatus::Discharged.as_ref().to_string(),
            });
        }
        admission.status = AdmissionStatus::Discharged;
        admission.discharged_at = Some(self.reference_time);
        let admission = table.save(admission)?;
        info!(id, "patient discharged");
        Ok(admission)
    }
}

use super::prescription::{NewPrescription, Prescription};
use crate::doctors::Doctor;
use crate::error::{Result, require_text};
use crate::filter::ListFilter;
use crate::patients::Patient;
use crate::store::{JsonTable, Repository, Store};
use chrono::NaiveDateTime;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Prescriptions {
    store: Store,
    pub reference_time: NaiveDateTime,
}

impl Prescriptions {
    pub fn new(store: Store, reference_time: NaiveDateTime) -> Self {
        Self {
            store,
            reference_time,
        }
    }

    fn table(&self) -> JsonTable<Prescription> {
        self.store.table()
    }

    pub fn create(&self, input: NewPrescription) -> Result<Prescription> {
        require_text("medication", &input.medication)?;
        self.store.table::<Patient>().get(input.patient_id)?;
        if let Some(doctor_id) = input.doctor_id {
            self.store.table::<Doctor>().get(doctor_id)?;
        }
        let prescription = self.table().save(Prescription {
            id: None,
            patient_id: Some(input.patient_id),
            doctor_id: input.doctor_id,
            medication: input.medication.trim().to_string(),
            dosage: input.dosage.filter(|d| !d.trim().is_empty()),
            issued_at: Some(self.reference_time),
        })?;
        info!(id = ?prescription.id, medication = %prescription.medication, "prescription issued");
        Ok(prescription)
    }

    /// Prescriptions matching `filter`; the date window applies to issue time.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Prescription>> {
        Ok(filter.apply(self.table().find_all()?))
    }
}

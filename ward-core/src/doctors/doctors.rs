use super::doctor::{Doctor, DoctorDetails};
use crate::admissions::Admission;
use crate::appointments::Appointment;
use crate::departments::Department;
use crate::error::{Result, WardError, require_text};
use crate::store::{JsonTable, Repository, Store};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Doctors {
    store: Store,
}

impl Doctors {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn table(&self) -> JsonTable<Doctor> {
        self.store.table()
    }

    pub fn list(&self) -> Result<Vec<Doctor>> {
        self.table().find_all()
    }

    pub fn find_by_id(&self, id: u64) -> Result<Option<Doctor>> {
        self.table().find_by_id(id)
    }

    pub fn get(&self, id: u64) -> Result<Doctor> {
        self.table().get(id)
    }

    /// Saves a new doctor. An unknown `department_id` leaves the doctor unassigned.
    pub fn create(&self, details: DoctorDetails, department_id: Option<u64>) -> Result<Doctor> {
        validate(&details)?;
        let department_id = self.resolve_department(department_id)?;
        let doctor = self.table().save(Doctor {
            id: None,
            first_name: details.first_name.trim().to_string(),
            last_name: details.last_name.trim().to_string(),
            email: details.email,
            phone: details.phone,
            specialization: details.specialization,
            department_id,
        })?;
        info!(id = ?doctor.id, "doctor saved");
        Ok(doctor)
    }

    /// Replaces every editable field. `department_id: None` clears the assignment.
    pub fn update(
        &self,
        id: u64,
        details: DoctorDetails,
        department_id: Option<u64>,
    ) -> Result<Doctor> {
        validate(&details)?;
        let table = self.table();
        let mut existing = table.get(id)?;
        existing.first_name = details.first_name.trim().to_string();
        existing.last_name = details.last_name.trim().to_string();
        existing.email = details.email;
        existing.phone = details.phone;
        existing.specialization = details.specialization;
        existing.department_id = self.resolve_department(department_id)?;
        let doctor = table.save(existing)?;
        info!(id, "doctor updated");
        Ok(doctor)
    }

    /// Removes a doctor no admission or appointment points at.
    pub fn delete(&self, id: u64) -> Result<()> {
        let table = self.table();
        if !table.exists(id)? {
            return Err(WardError::NotFound { kind: "Doctor", id });
        }
        let admissions = self
            .store
            .table::<Admission>()
            .find_all()?
            .iter()
            .filter(|a| a.doctor_id == Some(id))
            .count();
        let appointments = self
            .store
            .table::<Appointment>()
            .find_all()?
            .iter()
            .filter(|a| a.doctor_id == Some(id))
            .count();
        if admissions + appointments > 0 {
            return Err(WardError::InUse {
                kind: "Doctor",
                id,
                reason: format!("{admissions} admission(s), {appointments} appointment(s)"),
            });
        }
        table.delete(id)?;
        info!(id, "doctor deleted");
        Ok(())
    }

    fn resolve_department(&self, department_id: Option<u64>) -> Result<Option<u64>> {
        let Some(id) = department_id else {
            return Ok(None);
        };
        if self.store.table::<Department>().exists(id)? {
            Ok(Some(id))
        } else {
            warn!(department_id = id, "unknown department, leaving doctor unassigned");
            Ok(None)
        }
    }
}

fn validate(details: &DoctorDetails) -> Result<()> {
    require_text("first name", &details.first_name)?;
    require_text("last name", &details.last_name)
}

use super::patient::{NewPatient, Patient};
use crate::error::{Result, require_text};
use crate::filter::ListFilter;
use crate::store::{JsonTable, Repository, Store};
use chrono::NaiveDateTime;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Patients {
    store: Store,
    /// Registration stamp for new patients.
    pub reference_time: NaiveDateTime,
}

impl Patients {
    pub fn new(store: Store, reference_time: NaiveDateTime) -> Self {
        Self {
            store,
            reference_time,
        }
    }

    fn table(&self) -> JsonTable<Patient> {
        self.store.table()
    }

    pub fn create(&self, input: NewPatient) -> Result<Patient> {
        require_text("first name", &input.first_name)?;
        require_text("last name", &input.last_name)?;
        let patient = self.table().save(Patient {
            id: None,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email,
            phone: input.phone,
            date_of_birth: input.date_of_birth,
            created_at: Some(self.reference_time),
        })?;
        info!(id = ?patient.id, "registered patient");
        Ok(patient)
    }

    /// Patients matching `filter`; the date window applies to registration time.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Patient>> {
        Ok(filter.apply(self.table().find_all()?))
    }

    pub fn all(&self) -> Result<Vec<Patient>> {
        self.table().find_all()
    }

    pub fn get(&self, id: u64) -> Result<Patient> {
        self.table().get(id)
    }

    pub fn find_by_id(&self, id: u64) -> Result<Option<Patient>> {
        self.table().find_by_id(id)
    }

    /// Patients registered in `[start, end)`.
    pub fn count_created_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<usize> {
        Ok(self
            .table()
            .find_all()?
            .iter()
            .filter_map(|p| p.created_at)
            .filter(|created| *created >= start && *created < end)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateRange;
    use crate::error::WardError;
    use crate::tests::{at, default_reference_time, mk_store};
    use chrono::NaiveDate;

    fn new_patient(first: &str, last: &str) -> NewPatient {
        NewPatient {
            first_name: first.to_string(),
            last_name: last.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn create_stamps_registration_time() {
        let (store, _tmp) = mk_store();
        let patients = Patients::new(store, default_reference_time());

        let p = patients.create(new_patient(" Ada ", "Lovelace")).unwrap();
        assert_eq!(p.id, Some(1));
        assert_eq!(p.full_name(), "Ada Lovelace");
        assert_eq!(p.created_at, Some(default_reference_time()));
        assert_eq!(patients.get(1).unwrap(), p);
    }

    #[test]
    fn create_rejects_blank_names() {
        let (store, _tmp) = mk_store();
        let patients = Patients::new(store, default_reference_time());
        assert!(matches!(
            patients.create(new_patient("", "Lovelace")),
            Err(WardError::Validation { field: "first name", .. })
        ));
        assert!(patients.all().unwrap().is_empty());
    }

    #[test]
    fn get_unknown_patient_is_not_found() {
        let (store, _tmp) = mk_store();
        let patients = Patients::new(store, default_reference_time());
        assert!(matches!(
            patients.get(9),
            Err(WardError::NotFound { kind: "Patient", id: 9 })
        ));
    }

    #[test]
    fn count_created_between_is_half_open() {
        let (store, _tmp) = mk_store();
        let early = Patients::new(store.clone(), at(2024, 3, 9, 23, 59));
        let midnight = Patients::new(store.clone(), at(2024, 3, 10, 0, 0));
        let later = Patients::new(store.clone(), at(2024, 3, 11, 0, 0));
        early.create(new_patient("A", "One")).unwrap();
        midnight.create(new_patient("B", "Two")).unwrap();
        later.create(new_patient("C", "Three")).unwrap();

        let count = midnight
            .count_created_between(at(2024, 3, 10, 0, 0), at(2024, 3, 11, 0, 0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn list_filters_by_registration_date() {
        let (store, _tmp) = mk_store();
        Patients::new(store.clone(), at(2024, 1, 5, 9, 0))
            .create(new_patient("A", "One"))
            .unwrap();
        let patients = Patients::new(store, at(2024, 2, 5, 9, 0));
        patients.create(new_patient("B", "Two")).unwrap();

        let filter = ListFilter {
            range: DateRange::new(NaiveDate::from_ymd_opt(2024, 2, 1), None),
            ..Default::default()
        };
        let found = patients.list(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "B");
    }
}

use super::department::{Department, NewDepartment};
use crate::doctors::Doctor;
use crate::error::{Result, WardError, require_text};
use crate::store::{JsonTable, Repository, Store};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Departments {
    store: Store,
}

impl Departments {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn table(&self) -> JsonTable<Department> {
        self.store.table()
    }

    pub fn list(&self) -> Result<Vec<Department>> {
        self.table().find_all()
    }

    pub fn find_by_id(&self, id: u64) -> Result<Option<Department>> {
        self.table().find_by_id(id)
    }

    pub fn create(&self, input: NewDepartment) -> Result<Department> {
        require_text("department name", &input.name)?;
        let department = self.table().save(Department {
            id: None,
            name: input.name.trim().to_string(),
            description: input.description,
        })?;
        info!(id = ?department.id, name = %department.name, "department saved");
        Ok(department)
    }

    /// Removes a department that no doctor is assigned to.
    pub fn delete(&self, id: u64) -> Result<()> {
        let table = self.table();
        if !table.exists(id)? {
            return Err(WardError::NotFound {
                kind: "Department",
                id,
            });
        }
        let assigned = self
            .store
            .table::<Doctor>()
            .find_all()?
            .iter()
            .filter(|d| d.department_id == Some(id))
            .count();
        if assigned > 0 {
            return Err(WardError::InUse {
                kind: "Department",
                id,
                reason: format!("{assigned} doctor(s) assigned"),
            });
        }
        table.delete(id)?;
        info!(id, "department deleted");
        Ok(())
    }
}

use super::CommandOutcome;
use crate::{
    cli::DepartmentAction,
    render::{Renderer, or_dash},
};
use anyhow::Result;
use ward_core::{Ward, departments::NewDepartment};

pub fn run(action: DepartmentAction, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    match action {
        DepartmentAction::List => {
            let rows: Vec<Vec<String>> = ward
                .departments
                .list()?
                .into_iter()
                .map(|d| {
                    vec![
                        d.id.unwrap_or_default().to_string(),
                        d.name,
                        or_dash(d.description.as_deref()),
                    ]
                })
                .collect();
            renderer.print_table(&["ID", "Name", "Description"], &rows);
        }
        DepartmentAction::Add { name, description } => {
            let department = ward
                .departments
                .create(NewDepartment { name, description })?;
            renderer.print_success(&format!(
                "Department {} created with id {}.",
                department.name,
                department.id.unwrap_or_default()
            ));
        }
        DepartmentAction::Delete { id } => {
            ward.departments.delete(id)?;
            renderer.print_success(&format!("Department {id} deleted."));
        }
    }
    Ok(CommandOutcome::Done)
}

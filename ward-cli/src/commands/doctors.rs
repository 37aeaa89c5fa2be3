use super::CommandOutcome;
use crate::{
    cli::{DoctorAction, DoctorArgs},
    render::{Renderer, or_dash},
};
use anyhow::Result;
use std::collections::HashMap;
use ward_core::{Ward, doctors::DoctorDetails};

pub fn run(action: DoctorAction, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    match action {
        DoctorAction::List => {
            let departments: HashMap<u64, String> = ward
                .departments
                .list()?
                .into_iter()
                .filter_map(|d| d.id.map(|id| (id, d.name)))
                .collect();
            let rows: Vec<Vec<String>> = ward
                .doctors
                .list()?
                .into_iter()
                .map(|d| {
                    let department = d.department_id.and_then(|id| departments.get(&id));
                    vec![
                        d.id.unwrap_or_default().to_string(),
                        d.full_name(),
                        or_dash(d.specialization.as_deref()),
                        or_dash(department.map(String::as_str)),
                    ]
                })
                .collect();
            renderer.print_table(&["ID", "Name", "Specialization", "Department"], &rows);
        }
        DoctorAction::Add(args) => {
            let (details, department_id) = split(args);
            let doctor = ward.doctors.create(details, department_id)?;
            if department_id.is_some() && doctor.department_id.is_none() {
                renderer.print_info("Department not found, doctor left unassigned.");
            }
            renderer.print_success(&format!(
                "{} added with id {}.",
                doctor.full_name(),
                doctor.id.unwrap_or_default()
            ));
        }
        DoctorAction::Edit { id, details } => {
            let (details, department_id) = split(details);
            let doctor = ward.doctors.update(id, details, department_id)?;
            renderer.print_success(&format!("{} updated.", doctor.full_name()));
        }
        DoctorAction::Delete { id } => {
            ward.doctors.delete(id)?;
            renderer.print_success(&format!("Doctor {id} deleted."));
        }
    }
    Ok(CommandOutcome::Done)
}

fn split(args: DoctorArgs) -> (DoctorDetails, Option<u64>) {
    (
        DoctorDetails {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            specialization: args.specialization,
        },
        args.department_id,
    )
}

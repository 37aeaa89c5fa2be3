use super::{CommandOutcome, doctor_names, echo_filter, name_of, patient_names, submit};
use crate::{cli::AppointmentAction, render::Renderer};
use anyhow::Result;
use std::collections::HashMap;
use ward_core::{
    Ward,
    appointments::{Appointment, AppointmentChanges, ScheduleRequest},
    filter::ListQuery,
};

pub fn run(action: AppointmentAction, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    match action {
        AppointmentAction::List(args) => {
            let query = ListQuery::from(args);
            let names = Names {
                patients: patient_names(ward)?,
                doctors: doctor_names(ward)?,
            };
            if query.is_empty() {
                renderer.print_md("## Today");
                print_appointments(renderer, &names, &ward.appointments.todays()?);
                renderer.print_md("## Upcoming");
                print_appointments(renderer, &names, &ward.appointments.upcoming()?);
            } else {
                let filter = ward.list_filter(&query);
                echo_filter(ward, renderer, &filter);
                print_appointments(renderer, &names, &ward.appointments.list(&filter)?);
            }
        }
        AppointmentAction::Schedule {
            patient_id,
            at,
            purpose,
            notes,
            doctor_id,
        } => {
            let request = ScheduleRequest {
                patient_id,
                doctor_id,
                date_time: at,
                purpose,
                notes,
            };
            let Some(appointment) = submit(ward.appointments.schedule(request), renderer)? else {
                return Ok(CommandOutcome::Rejected);
            };
            renderer.print_success(&format!(
                "Appointment {} scheduled for {}.",
                appointment.id.unwrap_or_default(),
                renderer.date_time(appointment.appointment_date_time)
            ));
        }
        AppointmentAction::Edit {
            id,
            at,
            purpose,
            notes,
        } => {
            let changes = AppointmentChanges {
                date_time: at,
                purpose,
                notes,
            };
            let Some(appointment) = submit(ward.appointments.update(id, changes), renderer)? else {
                return Ok(CommandOutcome::Rejected);
            };
            renderer.print_success(&format!(
                "Appointment {id} moved to {}.",
                renderer.date_time(appointment.appointment_date_time)
            ));
        }
        AppointmentAction::Cancel { id } => {
            ward.appointments.cancel(id)?;
            renderer.print_success(&format!("Appointment {id} cancelled."));
        }
        AppointmentAction::Complete { id } => {
            ward.appointments.complete(id)?;
            renderer.print_success(&format!("Appointment {id} completed."));
        }
    }
    Ok(CommandOutcome::Done)
}

struct Names {
    patients: HashMap<u64, String>,
    doctors: HashMap<u64, String>,
}

fn print_appointments(renderer: &Renderer, names: &Names, appointments: &[Appointment]) {
    let rows: Vec<Vec<String>> = appointments
        .iter()
        .map(|a| {
            vec![
                a.id.unwrap_or_default().to_string(),
                renderer.date_time(a.appointment_date_time),
                name_of(&names.patients, a.patient_id),
                name_of(&names.doctors, a.doctor_id),
                a.purpose.clone(),
                a.status.as_ref().to_string(),
            ]
        })
        .collect();
    renderer.print_table(&["ID", "When", "Patient", "Doctor", "Purpose", "Status"], &rows);
}

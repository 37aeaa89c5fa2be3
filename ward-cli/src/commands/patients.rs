use super::{CommandOutcome, echo_filter};
use crate::{
    cli::PatientAction,
    render::{Renderer, or_dash},
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use ward_core::{
    Ward,
    filter::{ListFilter, ListQuery},
    patients::{NewPatient, Patient},
};

pub fn run(action: PatientAction, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    match action {
        PatientAction::List(dates) => {
            let filter = ward.list_filter(&ListQuery {
                from: dates.from,
                to: dates.to,
                ..Default::default()
            });
            echo_filter(ward, renderer, &filter);
            let patients = ward.patients.list(&filter)?;
            print_patients(renderer, &patients);
        }
        PatientAction::Add {
            first_name,
            last_name,
            email,
            phone,
            date_of_birth,
        } => {
            let date_of_birth = date_of_birth
                .map(|raw| {
                    NaiveDate::parse_from_str(raw.trim(), &ward.config.boundary_date_format)
                        .with_context(|| format!("reading date of birth '{raw}'"))
                })
                .transpose()?;
            let patient = ward.patients.create(NewPatient {
                first_name,
                last_name,
                email,
                phone,
                date_of_birth,
            })?;
            renderer.print_success(&format!(
                "Patient {} registered with id {}.",
                patient.full_name(),
                patient.id.unwrap_or_default()
            ));
        }
        PatientAction::Show { id } => show(id, ward, renderer)?,
    }
    Ok(CommandOutcome::Done)
}

fn print_patients(renderer: &Renderer, patients: &[Patient]) {
    let rows: Vec<Vec<String>> = patients
        .iter()
        .map(|p| {
            vec![
                p.id.unwrap_or_default().to_string(),
                p.full_name(),
                or_dash(p.email.as_deref()),
                or_dash(p.phone.as_deref()),
                renderer.date_time(p.created_at),
            ]
        })
        .collect();
    renderer.print_table(&["ID", "Name", "Email", "Phone", "Registered"], &rows);
}

fn show(id: u64, ward: &Ward, renderer: &Renderer) -> Result<()> {
    let patient = ward.patients.get(id)?;
    let born = patient
        .date_of_birth
        .map(|d| d.format(&ward.config.boundary_date_format).to_string());
    renderer.print_md(&format!("# {}", patient.full_name()));
    renderer.print_info(&format!(
        "Email: {}  Phone: {}  Born: {}  Registered: {}",
        or_dash(patient.email.as_deref()),
        or_dash(patient.phone.as_deref()),
        or_dash(born.as_deref()),
        renderer.date_time(patient.created_at)
    ));

    let own = ListFilter {
        patient_id: Some(id),
        ..Default::default()
    };

    renderer.print_md("## Appointments");
    let appointments: Vec<Vec<String>> = ward
        .appointments
        .list(&own)?
        .into_iter()
        .map(|a| {
            vec![
                a.id.unwrap_or_default().to_string(),
                renderer.date_time(a.appointment_date_time),
                a.purpose,
                a.status.as_ref().to_string(),
            ]
        })
        .collect();
    renderer.print_table(&["ID", "When", "Purpose", "Status"], &appointments);

    renderer.print_md("## Invoices");
    let invoices: Vec<Vec<String>> = ward
        .billing
        .list(&own)?
        .into_iter()
        .map(|i| {
            vec![
                i.id.unwrap_or_default().to_string(),
                format!("{:.2}", i.amount),
                i.status.as_ref().to_string(),
                renderer.date_time(i.issued_at),
            ]
        })
        .collect();
    renderer.print_table(&["ID", "Amount", "Status", "Issued"], &invoices);
    Ok(())
}

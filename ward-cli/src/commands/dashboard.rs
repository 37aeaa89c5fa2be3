use super::CommandOutcome;
use crate::render::{Renderer, id_or_dash};
use anyhow::Result;
use ward_core::Ward;

pub fn run(json: bool, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    if json {
        let report = ward.dashboard.stats_report();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(CommandOutcome::Done);
    }

    let overview = ward.dashboard.overview()?;
    let stats = ward.dashboard.stats()?;
    renderer.print_md("# Dashboard");
    renderer.print_table(
        &["Patients", "New today", "Doctors", "Admissions", "Prescriptions", "Invoices", "Unpaid"],
        &[vec![
            overview.patients.to_string(),
            stats.new_patients_today.to_string(),
            overview.doctors.to_string(),
            overview.admissions.to_string(),
            overview.prescriptions.to_string(),
            overview.invoices.to_string(),
            stats.unpaid_total,
        ]],
    );

    for (heading, appointments) in [
        ("## Today's appointments", &overview.todays_appointments),
        ("## Upcoming appointments", &overview.upcoming_appointments),
    ] {
        renderer.print_md(heading);
        let rows: Vec<Vec<String>> = appointments
            .iter()
            .map(|a| {
                vec![
                    renderer.date_time(a.appointment_date_time),
                    id_or_dash(a.patient_id),
                    id_or_dash(a.doctor_id),
                    a.purpose.clone(),
                ]
            })
            .collect();
        renderer.print_table(&["When", "Patient", "Doctor", "Purpose"], &rows);
    }
    Ok(CommandOutcome::Done)
}

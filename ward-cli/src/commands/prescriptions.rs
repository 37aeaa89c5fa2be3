use super::{CommandOutcome, doctor_names, echo_filter, name_of, patient_names};
use crate::{
    cli::PrescriptionAction,
    render::{Renderer, or_dash},
};
use anyhow::Result;
use ward_core::{Ward, filter::ListQuery, prescriptions::NewPrescription};

pub fn run(action: PrescriptionAction, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    match action {
        PrescriptionAction::List {
            dates,
            patient_id,
            doctor_id,
        } => {
            let filter = ward.list_filter(&ListQuery {
                status: None,
                from: dates.from,
                to: dates.to,
                patient_id,
                doctor_id,
            });
            echo_filter(ward, renderer, &filter);
            let patients = patient_names(ward)?;
            let doctors = doctor_names(ward)?;
            let rows: Vec<Vec<String>> = ward
                .prescriptions
                .list(&filter)?
                .into_iter()
                .map(|p| {
                    vec![
                        p.id.unwrap_or_default().to_string(),
                        name_of(&patients, p.patient_id),
                        name_of(&doctors, p.doctor_id),
                        p.medication,
                        or_dash(p.dosage.as_deref()),
                        renderer.date_time(p.issued_at),
                    ]
                })
                .collect();
            renderer.print_table(
                &["ID", "Patient", "Doctor", "Medication", "Dosage", "Issued"],
                &rows,
            );
        }
        PrescriptionAction::Add {
            patient_id,
            medication,
            dosage,
            doctor_id,
        } => {
            let prescription = ward.prescriptions.create(NewPrescription {
                patient_id,
                doctor_id,
                medication,
                dosage,
            })?;
            renderer.print_success(&format!(
                "Prescription {} for {} issued.",
                prescription.id.unwrap_or_default(),
                prescription.medication
            ));
        }
    }
    Ok(CommandOutcome::Done)
}

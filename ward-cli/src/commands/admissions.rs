use super::{CommandOutcome, doctor_names, echo_filter, name_of, patient_names, submit};
use crate::{
    cli::AdmissionAction,
    render::{Renderer, or_dash},
};
use anyhow::Result;
use ward_core::{Ward, admissions::AdmitRequest, filter::ListQuery};

pub fn run(action: AdmissionAction, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    match action {
        AdmissionAction::List(args) => {
            let filter = ward.list_filter(&ListQuery::from(args));
            echo_filter(ward, renderer, &filter);
            let patients = patient_names(ward)?;
            let doctors = doctor_names(ward)?;
            let rows: Vec<Vec<String>> = ward
                .admissions
                .list(&filter)?
                .into_iter()
                .map(|a| {
                    vec![
                        a.id.unwrap_or_default().to_string(),
                        name_of(&patients, a.patient_id),
                        name_of(&doctors, a.doctor_id),
                        or_dash(a.reason.as_deref()),
                        renderer.date_time(a.admitted_at),
                        renderer.date_time(a.discharged_at),
                        a.status.as_ref().to_string(),
                    ]
                })
                .collect();
            renderer.print_table(
                &["ID", "Patient", "Doctor", "Reason", "Admitted", "Discharged", "Status"],
                &rows,
            );
        }
        AdmissionAction::Admit {
            patient_id,
            doctor_id,
            reason,
            at,
        } => {
            let request = AdmitRequest {
                patient_id,
                doctor_id,
                reason,
                admitted_at: at,
            };
            let Some(admission) = submit(ward.admissions.admit(request), renderer)? else {
                return Ok(CommandOutcome::Rejected);
            };
            renderer.print_success(&format!(
                "Patient {patient_id} admitted at {} (admission {}).",
                renderer.date_time(admission.admitted_at),
                admission.id.unwrap_or_default()
            ));
        }
        AdmissionAction::Discharge { id } => {
            let admission = ward.admissions.discharge(id)?;
            renderer.print_success(&format!(
                "Admission {id} discharged at {}.",
                renderer.date_time(admission.discharged_at)
            ));
        }
    }
    Ok(CommandOutcome::Done)
}

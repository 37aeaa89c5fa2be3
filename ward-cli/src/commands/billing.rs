use super::{CommandOutcome, echo_filter, name_of, patient_names};
use crate::{
    cli::BillingAction,
    render::{Renderer, or_dash},
};
use anyhow::Result;
use ward_core::{Ward, billing::NewInvoice, filter::ListQuery};

pub fn run(action: BillingAction, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    match action {
        BillingAction::List {
            status,
            dates,
            patient_id,
        } => {
            let filter = ward.list_filter(&ListQuery {
                status,
                from: dates.from,
                to: dates.to,
                patient_id,
                doctor_id: None,
            });
            echo_filter(ward, renderer, &filter);
            let patients = patient_names(ward)?;
            let rows: Vec<Vec<String>> = ward
                .billing
                .list(&filter)?
                .into_iter()
                .map(|i| {
                    vec![
                        i.id.unwrap_or_default().to_string(),
                        name_of(&patients, i.patient_id),
                        format!("{:.2}", i.amount),
                        or_dash(i.description.as_deref()),
                        i.status.as_ref().to_string(),
                        renderer.date_time(i.issued_at),
                    ]
                })
                .collect();
            renderer.print_table(
                &["ID", "Patient", "Amount", "Description", "Status", "Issued"],
                &rows,
            );
        }
        BillingAction::Create {
            patient_id,
            amount,
            description,
        } => {
            let invoice = ward.billing.create(NewInvoice {
                patient_id,
                amount,
                description,
            })?;
            renderer.print_success(&format!(
                "Invoice {} for {:.2} issued.",
                invoice.id.unwrap_or_default(),
                invoice.amount
            ));
        }
        BillingAction::Pay { id } => {
            let invoice = ward.billing.mark_paid(id)?;
            renderer.print_success(&format!(
                "Invoice {id} paid ({:.2}).",
                invoice.amount
            ));
        }
    }
    Ok(CommandOutcome::Done)
}

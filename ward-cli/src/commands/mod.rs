mod admissions;
mod appointments;
mod billing;
mod dashboard;
mod departments;
mod doctors;
mod patients;
mod prescriptions;

use crate::{cli::Command, render::Renderer};
use anyhow::Result;
use std::collections::HashMap;
use ward_core::{Ward, filter::ListFilter};

/// How a command ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    /// The input was turned down and the user was told why.
    Rejected,
}

pub fn run(command: Command, ward: &Ward, renderer: &Renderer) -> Result<CommandOutcome> {
    match command {
        Command::Patients(action) => patients::run(action, ward, renderer),
        Command::Departments(action) => departments::run(action, ward, renderer),
        Command::Doctors(action) => doctors::run(action, ward, renderer),
        Command::Admissions(action) => admissions::run(action, ward, renderer),
        Command::Billing(action) => billing::run(action, ward, renderer),
        Command::Appointments(action) => appointments::run(action, ward, renderer),
        Command::Prescriptions(action) => prescriptions::run(action, ward, renderer),
        Command::Dashboard { json } => dashboard::run(json, ward, renderer),
    }
}

/// Passes a value through, or prints a rejection for a date-time the user can
/// re-enter. Every other error is returned.
fn submit<T>(result: ward_core::Result<T>, renderer: &Renderer) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_user_recoverable() => {
            renderer.print_rejection(&error.to_string());
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

/// One-line summary of the active constraints, `None` when nothing narrows the list.
fn describe_filter(filter: &ListFilter, boundary_format: &str) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(status) = &filter.status {
        parts.push(format!("status={status}"));
    }
    if let Some(from) = filter.range.from {
        parts.push(format!("from={}", from.format(boundary_format)));
    }
    if let Some(to) = filter.range.to {
        parts.push(format!("to={}", to.format(boundary_format)));
    }
    if let Some(id) = filter.patient_id {
        parts.push(format!("patient={id}"));
    }
    if let Some(id) = filter.doctor_id {
        parts.push(format!("doctor={id}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Filters: {}", parts.join(", ")))
    }
}

fn echo_filter(ward: &Ward, renderer: &Renderer, filter: &ListFilter) {
    if let Some(line) = describe_filter(filter, &ward.config.boundary_date_format) {
        renderer.print_info(&line);
    }
}

fn patient_names(ward: &Ward) -> Result<HashMap<u64, String>> {
    Ok(ward
        .patients
        .all()?
        .into_iter()
        .filter_map(|p| p.id.map(|id| (id, p.full_name())))
        .collect())
}

fn doctor_names(ward: &Ward) -> Result<HashMap<u64, String>> {
    Ok(ward
        .doctors
        .list()?
        .into_iter()
        .filter_map(|d| d.id.map(|id| (id, d.full_name())))
        .collect())
}

fn name_of(names: &HashMap<u64, String>, id: Option<u64>) -> String {
    match id {
        Some(id) => names.get(&id).cloned().unwrap_or_else(|| format!("#{id}")),
        None => "-".to_string(),
    }
}

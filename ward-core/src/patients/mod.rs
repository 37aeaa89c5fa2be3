mod patient;
mod patients;

pub use patient::{NewPatient, Patient};
pub use patients::Patients;

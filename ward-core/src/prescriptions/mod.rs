mod prescription;
mod prescriptions;

pub use prescription::{NewPrescription, Prescription};
pub use prescriptions::Prescriptions;

mod admission;
mod admissions;

pub use admission::{AdmitRequest, Admission, AdmissionStatus};
pub use admissions::Admissions;

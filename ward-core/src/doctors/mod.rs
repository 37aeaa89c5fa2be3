mod doctor;
mod doctors;

pub use doctor::{Doctor, DoctorDetails};
pub use doctors::Doctors;

mod appointment;
mod appointments;

pub use appointment::{Appointment, AppointmentChanges, AppointmentStatus, ScheduleRequest};
pub use appointments::Appointments;

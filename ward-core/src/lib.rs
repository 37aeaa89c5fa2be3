pub mod admissions;
pub mod appointments;
pub mod billing;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod departments;
pub mod doctors;
pub mod error;
pub mod filter;
pub mod patients;
pub mod prescriptions;
pub mod store;
pub mod ward;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{Result, WardError};
pub use ward::Ward;

mod department;
mod departments;

pub use department::{Department, NewDepartment};
pub use departments::Departments;

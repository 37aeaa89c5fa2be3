use crate::render::ColorMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use ward_core::filter::ListQuery;

/// ward: hospital records from the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Directory holding the record tables. Overrides `data_dir` from config.toml.
    #[arg(long, global = true, env = "WARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register and look up patients
    #[command(subcommand)]
    Patients(PatientAction),
    /// Manage hospital departments
    #[command(subcommand)]
    Departments(DepartmentAction),
    /// Manage doctors and their department
    #[command(subcommand)]
    Doctors(DoctorAction),
    /// Admit and discharge patients
    #[command(subcommand)]
    Admissions(AdmissionAction),
    /// Issue and settle invoices
    #[command(subcommand)]
    Billing(BillingAction),
    /// Book, edit, cancel and complete appointments
    #[command(subcommand)]
    Appointments(AppointmentAction),
    /// Issue prescriptions
    #[command(subcommand)]
    Prescriptions(PrescriptionAction),
    /// Show totals, today's appointments and outstanding bills
    Dashboard {
        /// Print the headline numbers as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Listing filters. Each one is optional; together they narrow with AND.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Keep records with this status (e.g. `SCHEDULED`, `paid`).
    #[arg(long)]
    pub status: Option<String>,
    /// Keep records on or after this date (`YYYY-MM-DD`). Unreadable dates are ignored.
    #[arg(long)]
    pub from: Option<String>,
    /// Keep records on or before this date (`YYYY-MM-DD`). Unreadable dates are ignored.
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long)]
    pub patient_id: Option<u64>,
    #[arg(long)]
    pub doctor_id: Option<u64>,
}

impl From<ListArgs> for ListQuery {
    fn from(args: ListArgs) -> Self {
        ListQuery {
            status: args.status,
            from: args.from,
            to: args.to,
            patient_id: args.patient_id,
            doctor_id: args.doctor_id,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DateArgs {
    /// Keep records on or after this date (`YYYY-MM-DD`).
    #[arg(long)]
    pub from: Option<String>,
    /// Keep records on or before this date (`YYYY-MM-DD`).
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PatientAction {
    /// List patients, optionally by registration date
    List(DateArgs),
    /// Register a patient
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Date of birth as `YYYY-MM-DD`.
        #[arg(long)]
        date_of_birth: Option<String>,
    },
    /// Show one patient with their appointments and invoices
    Show { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum DepartmentAction {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a department no doctor belongs to
    Delete { id: u64 },
}

#[derive(Args, Debug, Clone)]
pub struct DoctorArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub specialization: Option<String>,
    /// Unknown departments leave the doctor unassigned.
    #[arg(long)]
    pub department_id: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum DoctorAction {
    List,
    Add(DoctorArgs),
    /// Replace a doctor's details
    Edit {
        id: u64,
        #[command(flatten)]
        details: DoctorArgs,
    },
    /// Delete a doctor with no admissions or appointments
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum AdmissionAction {
    List(ListArgs),
    Admit {
        #[arg(long)]
        patient_id: u64,
        #[arg(long)]
        doctor_id: Option<u64>,
        #[arg(long)]
        reason: Option<String>,
        /// Admission time (e.g. `2024-03-15 2:30 PM`). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },
    Discharge { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum BillingAction {
    List {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        dates: DateArgs,
        #[arg(long)]
        patient_id: Option<u64>,
    },
    Create {
        #[arg(long)]
        patient_id: u64,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark an invoice as paid
    Pay { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum AppointmentAction {
    /// List appointments. Without filters shows today's and upcoming ones.
    List(ListArgs),
    Schedule {
        patient_id: u64,
        /// Date and time (e.g. `2024-03-15T14:30`, `'2024-03-15 2:30 PM'`).
        #[arg(long)]
        at: String,
        #[arg(long)]
        purpose: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        doctor_id: Option<u64>,
    },
    /// Move an appointment and replace its purpose and notes
    Edit {
        id: u64,
        #[arg(long)]
        at: String,
        #[arg(long)]
        purpose: String,
        #[arg(long)]
        notes: Option<String>,
    },
    Cancel { id: u64 },
    Complete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum PrescriptionAction {
    List {
        #[command(flatten)]
        dates: DateArgs,
        #[arg(long)]
        patient_id: Option<u64>,
        #[arg(long)]
        doctor_id: Option<u64>,
    },
    Add {
        #[arg(long)]
        patient_id: u64,
        #[arg(long)]
        medication: String,
        #[arg(long)]
        dosage: Option<String>,
        #[arg(long)]
        doctor_id: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ward").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn schedule_keeps_raw_date_time() {
        let cli = parse(&[
            "appointments",
            "schedule",
            "3",
            "--at",
            "'2024-03-15 2:30 PM'",
            "--purpose",
            "Check-up",
        ]);
        match cli.command {
            Command::Appointments(AppointmentAction::Schedule {
                patient_id,
                at,
                doctor_id,
                ..
            }) => {
                assert_eq!(patient_id, 3);
                assert_eq!(at, "'2024-03-15 2:30 PM'");
                assert_eq!(doctor_id, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn list_filters_become_a_query() {
        let cli = parse(&[
            "admissions",
            "list",
            "--status",
            "admitted",
            "--from",
            "2024-01-01",
            "--doctor-id",
            "4",
        ]);
        let Command::Admissions(AdmissionAction::List(args)) = cli.command else {
            panic!("expected admissions list");
        };
        let query = ListQuery::from(args);
        assert_eq!(query.status.as_deref(), Some("admitted"));
        assert_eq!(query.from.as_deref(), Some("2024-01-01"));
        assert_eq!(query.to, None);
        assert_eq!(query.doctor_id, Some(4));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["dashboard", "--json", "-v", "--data-dir", "/tmp/w"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/w")));
        assert!(matches!(cli.command, Command::Dashboard { json: true }));
    }

    #[test]
    fn amount_must_be_numeric() {
        let err = Cli::try_parse_from([
            "ward",
            "billing",
            "create",
            "--patient-id",
            "1",
            "--amount",
            "lots",
        ]);
        assert!(err.is_err());
    }
}

use crate::{
    Config,
    admissions::Admissions,
    appointments::Appointments,
    billing::Billing,
    dashboard::Dashboard,
    departments::Departments,
    doctors::Doctors,
    filter::{ListFilter, ListQuery},
    patients::Patients,
    prescriptions::Prescriptions,
    store::Store,
};
use anyhow::{Context, Result};

/// Every hospital service, sharing one store and one reference time.
pub struct Ward {
    pub config: Config,
    pub store: Store,
    pub patients: Patients,
    pub departments: Departments,
    pub doctors: Doctors,
    pub admissions: Admissions,
    pub billing: Billing,
    pub appointments: Appointments,
    pub prescriptions: Prescriptions,
    pub dashboard: Dashboard,
}

impl Ward {
    /// Creates a new `Ward`, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Ward` with a specific `Config`.
    ///
    /// This also ensures that the data directory exists.
    pub fn with_config(config: Config) -> Result<Self> {
        let store = Store::open(&config.data_dir)
            .with_context(|| format!("opening data dir {}", config.data_dir.display()))?;
        let now = config.reference_time;

        let patients = Patients::new(store.clone(), now);
        let departments = Departments::new(store.clone());
        let doctors = Doctors::new(store.clone());
        let admissions = Admissions::new(store.clone(), now, config.normalizer());
        let billing = Billing::new(store.clone(), now);
        let appointments = Appointments::new(store.clone(), now, config.normalizer());
        let prescriptions = Prescriptions::new(store.clone(), now);
        let dashboard = Dashboard {
            patients: patients.clone(),
            doctors: doctors.clone(),
            admissions: admissions.clone(),
            billing: billing.clone(),
            appointments: appointments.clone(),
            prescriptions: prescriptions.clone(),
        };

        Ok(Self {
            config,
            store,
            patients,
            departments,
            doctors,
            admissions,
            billing,
            appointments,
            prescriptions,
            dashboard,
        })
    }

    /// Parses raw listing parameters with the configured boundary format.
    pub fn list_filter(&self, query: &ListQuery) -> ListFilter {
        ListFilter::from_query(query, &self.config.boundary_date_format)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Ward, filter::ListQuery, tests::mk_config};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn with_config_creates_data_dir() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("nested").join("ward");
        let ward = Ward::with_config(mk_config(root.clone(), None)).unwrap();
        assert!(root.is_dir());
        assert_eq!(ward.store.root(), root.as_path());
    }

    #[test]
    fn list_filter_uses_configured_boundary_format() {
        let tmp = tempdir().unwrap();
        let mut config = mk_config(tmp.path().join("ward"), None);
        config.boundary_date_format = "%d/%m/%Y".to_string();
        let ward = Ward::with_config(config).unwrap();

        let filter = ward.list_filter(&ListQuery {
            from: Some("01/02/2024".into()),
            to: Some("2024-02-29".into()),
            ..Default::default()
        });
        assert_eq!(filter.range.from, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(filter.range.to, None);
    }
}

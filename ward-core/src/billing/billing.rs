use super::invoice::{Invoice, InvoiceStatus, NewInvoice};
use crate::error::{Result, WardError};
use crate::filter::{ListFilter, warn_unknown_status};
use crate::patients::Patient;
use crate::store::{JsonTable, Repository, Store};
use chrono::NaiveDateTime;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Billing {
    store: Store,
    pub reference_time: NaiveDateTime,
}

impl Billing {
    pub fn new(store: Store, reference_time: NaiveDateTime) -> Self {
        Self {
            store,
            reference_time,
        }
    }

    fn table(&self) -> JsonTable<Invoice> {
        self.store.table()
    }

    /// Invoices matching `filter`; the date window applies to issue time.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Invoice>> {
        warn_unknown_status::<InvoiceStatus>(filter);
        Ok(filter.apply(self.table().find_all()?))
    }

    pub fn get(&self, id: u64) -> Result<Invoice> {
        self.table().get(id)
    }

    /// Issues an unpaid invoice dated at the reference time.
    pub fn create(&self, input: NewInvoice) -> Result<Invoice> {
        if !input.amount.is_finite() || input.amount < 0.0 {
            return Err(WardError::Validation {
                field: "amount",
                reason: format!("{} is not a non-negative amount", input.amount),
            });
        }
        self.store.table::<Patient>().get(input.patient_id)?;
        let invoice = self.table().save(Invoice {
            id: None,
            patient_id: Some(input.patient_id),
            amount: input.amount,
            description: input.description.filter(|d| !d.trim().is_empty()),
            status: InvoiceStatus::Unpaid,
            issued_at: Some(self.reference_time),
            paid_at: None,
        })?;
        info!(id = ?invoice.id, amount = invoice.amount, "invoice issued");
        Ok(invoice)
    }

    pub fn mark_paid(&self, id: u64) -> Result<Invoice> {
        let table = self.table();
        let mut invoice = table.get(id)?;
        if invoice.status != InvoiceStatus::Unpaid {
            return Err(WardError::InvalidTransition {
                kind: "Invoice",
                id,
                from: invoice.status.as_ref().to_string(),
                to: InvoiceStatus::Paid.as_ref().to_string(),
            });
        }
        invoice.status = InvoiceStatus::Paid;
        invoice.paid_at = Some(self.reference_time);
        let invoice = table.save(invoice)?;
        info!(id, "invoice paid");
        Ok(invoice)
    }

    /// Sum of every unpaid amount.
    pub fn unpaid_total(&self) -> Result<f64> {
        Ok(self
            .table()
            .find_all()?
            .iter()
            .filter(|i| i.status == InvoiceStatus::Unpaid)
            .map(|i| i.amount)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateRange;
    use crate::patients::{NewPatient, Patients};
    use crate::tests::{at, default_reference_time, mk_store};
    use chrono::NaiveDate;

    fn setup() -> (Billing, u64, tempfile::TempDir) {
        let (store, tmp) = mk_store();
        let patient = Patients::new(store.clone(), default_reference_time())
            .create(NewPatient {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                ..Default::default()
            })
            .unwrap();
        (
            Billing::new(store, default_reference_time()),
            patient.id.unwrap(),
            tmp,
        )
    }

    fn invoice(patient_id: u64, amount: f64) -> NewInvoice {
        NewInvoice {
            patient_id,
            amount,
            description: Some("Consultation".into()),
        }
    }

    #[test]
    fn create_issues_unpaid_invoice() {
        let (billing, patient, _tmp) = setup();
        let inv = billing.create(invoice(patient, 120.5)).unwrap();
        assert_eq!(inv.status, InvoiceStatus::Unpaid);
        assert_eq!(inv.issued_at, Some(default_reference_time()));
        assert_eq!(billing.get(inv.id.unwrap()).unwrap(), inv);
    }

    #[test]
    fn create_validates_amount_and_patient() {
        let (billing, patient, _tmp) = setup();
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                billing.create(invoice(patient, bad)),
                Err(WardError::Validation { field: "amount", .. })
            ));
        }
        assert!(matches!(
            billing.create(invoice(77, 10.0)),
            Err(WardError::NotFound { kind: "Patient", id: 77 })
        ));
        assert!(billing.create(invoice(patient, 0.0)).is_ok());
    }

    #[test]
    fn mark_paid_once_and_totals_follow() {
        let (billing, patient, _tmp) = setup();
        let a = billing.create(invoice(patient, 100.0)).unwrap();
        billing.create(invoice(patient, 25.25)).unwrap();
        assert_eq!(billing.unpaid_total().unwrap(), 125.25);

        let paid = billing.mark_paid(a.id.unwrap()).unwrap();
        assert_eq!(paid.status, InvoiceStatus::Paid);
        assert_eq!(paid.paid_at, Some(default_reference_time()));
        assert_eq!(billing.unpaid_total().unwrap(), 25.25);

        assert!(matches!(
            billing.mark_paid(a.id.unwrap()),
            Err(WardError::InvalidTransition { kind: "Invoice", .. })
        ));
    }

    #[test]
    fn list_by_status_and_issue_date() {
        let (store, _tmp) = mk_store();
        let patient = Patients::new(store.clone(), default_reference_time())
            .create(NewPatient {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                ..Default::default()
            })
            .unwrap()
            .id
            .unwrap();
        let january = Billing::new(store.clone(), at(2024, 1, 31, 23, 30));
        let february = Billing::new(store, at(2024, 2, 1, 8, 0));
        january.create(invoice(patient, 10.0)).unwrap();
        let feb = february.create(invoice(patient, 20.0)).unwrap();
        february.mark_paid(feb.id.unwrap()).unwrap();

        let unpaid = ListFilter {
            status: Some("UNPAID".into()),
            ..Default::default()
        };
        assert_eq!(february.list(&unpaid).unwrap().len(), 1);

        let only_january = ListFilter {
            range: DateRange::new(None, NaiveDate::from_ymd_opt(2024, 1, 31)),
            ..Default::default()
        };
        let found = february.list(&only_january).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 10.0);
    }
}

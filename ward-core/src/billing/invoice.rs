use crate::dates::Timestamped;
use crate::filter::Filterable;
use crate::store::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Option<u64>,
    pub patient_id: Option<u64>,
    pub amount: f64,
    pub description: Option<String>,
    pub status: InvoiceStatus,
    pub issued_at: Option<NaiveDateTime>,
    pub paid_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
pub struct NewInvoice {
    pub patient_id: u64,
    pub amount: f64,
    pub description: Option<String>,
}

impl Record for Invoice {
    const TABLE: &'static str = "invoices";
    const KIND: &'static str = "Invoice";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl Timestamped for Invoice {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.issued_at
    }
}

impl Filterable for Invoice {
    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_ref())
    }
    fn patient_id(&self) -> Option<u64> {
        self.patient_id
    }
}

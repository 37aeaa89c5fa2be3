mod billing;
mod invoice;

pub use billing::Billing;
pub use invoice::{Invoice, InvoiceStatus, NewInvoice};

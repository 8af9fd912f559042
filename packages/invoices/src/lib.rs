//! Invoices: total/balance math, payment status progression, gross-margin
//! analytics, and the backend service.

pub mod calc;
pub mod service;
pub mod types;

/// Invoices whose gross margin falls below this percentage are flagged.
pub const DEFAULT_MARGIN_ALERT_PERCENT: f64 = 25.0;

pub use calc::{
    analyze_margins, invoice_balance, invoice_total, margin_from_items, running_balances,
    status_after_payment, sum_payments,
};
pub use service::InvoicesService;
pub use types::{Invoice, InvoiceItem, InvoiceStatus, MarginSummary, Payment};

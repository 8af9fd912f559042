use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Finalized,
    PartiallyPaid,
    Paid,
    Void,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(rename = "receivedAt", default)]
    pub received_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(rename = "unitPrice", default)]
    pub unit_price: f64,
    /// Shop cost, used for margin analytics.
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default = "default_status")]
    pub status: InvoiceStatus,
    #[serde(rename = "issuedDate", default)]
    pub issued_date: Option<DateTime<Utc>>,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Explicit server-side total; when absent the total is derived.
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(rename = "discountTotal", default)]
    pub discount_total: f64,
    #[serde(rename = "lateFee", default)]
    pub late_fee: f64,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
}

fn default_status() -> InvoiceStatus {
    InvoiceStatus::Draft
}

/// A payment annotated with the balance remaining after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentWithBalance {
    #[serde(flatten)]
    pub payment: Payment,
    #[serde(rename = "runningBalance")]
    pub running_balance: f64,
}

/// Cost/price/margin rollup for one invoice's items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginSummary {
    pub cost: f64,
    pub price: f64,
    /// Gross margin percent, 0 when price is 0.
    pub margin: f64,
}

/// One invoice's margin in the fleet-wide series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginPoint {
    #[serde(rename = "invoiceId")]
    pub invoice_id: String,
    pub number: Option<String>,
    #[serde(rename = "grossMarginPercent")]
    pub gross_margin_percent: f64,
    #[serde(rename = "isBelowThreshold")]
    pub is_below_threshold: bool,
}

/// Fleet-wide margin rollup across finalized invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginAnalytics {
    #[serde(rename = "averageMarginPercent")]
    pub average_margin_percent: f64,
    #[serde(rename = "lowMarginInvoices")]
    pub low_margin_invoices: usize,
    pub threshold: f64,
    pub series: Vec<MarginPoint>,
}

//! Pure invoice math: totals, balances, payment progression, margins.

use bayline_core::round_cents;
use chrono::{DateTime, Utc};

use crate::types::{
    Invoice, InvoiceItem, InvoiceStatus, MarginAnalytics, MarginPoint, MarginSummary, Payment,
    PaymentWithBalance,
};

/// Sum of recorded payment amounts, rounded to cents.
pub fn sum_payments(payments: &[Payment]) -> f64 {
    round_cents(payments.iter().map(|p| p.amount).sum())
}

/// Invoice total. An explicit server-side total wins; otherwise
/// subtotal + tax + late fee − discounts, rounded to cents.
pub fn invoice_total(invoice: &Invoice) -> f64 {
    if let Some(total) = invoice.total.filter(|t| t.is_finite()) {
        return total;
    }
    round_cents(invoice.subtotal + invoice.tax + invoice.late_fee - invoice.discount_total)
}

/// Balance still due: total + late fee − payments, rounded to cents.
pub fn invoice_balance(invoice: &Invoice) -> f64 {
    round_cents(invoice_total(invoice) + invoice.late_fee - sum_payments(&invoice.payments))
}

/// Payments ordered by receipt time, each annotated with the balance
/// remaining after it. Payments without a timestamp sort last.
pub fn running_balances(invoice: &Invoice) -> Vec<PaymentWithBalance> {
    let mut payments: Vec<Payment> = invoice.payments.clone();
    payments.sort_by_key(|p| p.received_at.unwrap_or(DateTime::<Utc>::MAX_UTC));

    let mut balance = invoice_total(invoice) + invoice.late_fee;
    payments
        .into_iter()
        .map(|payment| {
            balance = round_cents(balance - payment.amount);
            PaymentWithBalance {
                payment,
                running_balance: balance,
            }
        })
        .collect()
}

/// Status after a payment posts: fully covered → PAID, else PARTIALLY_PAID.
pub fn status_after_payment(remaining: f64) -> InvoiceStatus {
    if remaining <= 0.0 {
        InvoiceStatus::Paid
    } else {
        InvoiceStatus::PartiallyPaid
    }
}

/// Cost/price/margin rollup over line items. A zero quantity counts as one
/// unit, matching how the backend prices unquantified labor lines.
pub fn margin_from_items(items: &[InvoiceItem]) -> MarginSummary {
    let mut total_cost = 0.0;
    let mut total_price = 0.0;
    for item in items {
        let quantity = if item.quantity == 0.0 { 1.0 } else { item.quantity };
        total_cost += item.cost * quantity;
        total_price += item.unit_price * quantity;
    }
    let margin = if total_price > 0.0 {
        round_cents((total_price - total_cost) / total_price * 100.0)
    } else {
        0.0
    };
    MarginSummary {
        cost: round_cents(total_cost),
        price: round_cents(total_price),
        margin,
    }
}

/// Fleet-wide margin rollup across a list of invoices.
pub fn analyze_margins(invoices: &[Invoice], threshold: f64) -> MarginAnalytics {
    let mut series = Vec::with_capacity(invoices.len());
    let mut margin_sum = 0.0;
    let mut below = 0;

    for invoice in invoices {
        let summary = margin_from_items(&invoice.items);
        let is_below = summary.margin < threshold;
        if is_below {
            below += 1;
        }
        margin_sum += summary.margin;
        series.push(MarginPoint {
            invoice_id: invoice.id.clone(),
            number: invoice.number.clone(),
            gross_margin_percent: summary.margin,
            is_below_threshold: is_below,
        });
    }

    let average = if invoices.is_empty() {
        0.0
    } else {
        round_cents(margin_sum / invoices.len() as f64)
    };

    MarginAnalytics {
        average_margin_percent: average,
        low_margin_invoices: below,
        threshold,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn invoice() -> Invoice {
        Invoice {
            id: "inv-1".to_string(),
            number: Some("1001".to_string()),
            status: InvoiceStatus::Sent,
            issued_date: None,
            due_date: None,
            total: None,
            subtotal: 200.0,
            tax: 16.0,
            discount_total: 10.0,
            late_fee: 5.0,
            items: Vec::new(),
            payments: Vec::new(),
            customer: None,
        }
    }

    fn payment(amount: f64, hour: u32) -> Payment {
        Payment {
            id: None,
            amount,
            method: Some("cash".to_string()),
            received_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_derived_total() {
        // 200 + 16 + 5 - 10
        assert_eq!(invoice_total(&invoice()), 211.0);
    }

    #[test]
    fn test_explicit_total_wins() {
        let mut inv = invoice();
        inv.total = Some(500.0);
        assert_eq!(invoice_total(&inv), 500.0);
    }

    #[test]
    fn test_balance_includes_late_fee_on_top_of_total() {
        let mut inv = invoice();
        inv.payments = vec![payment(100.0, 9)];
        // (211 + 5) - 100
        assert_eq!(invoice_balance(&inv), 116.0);
    }

    #[test]
    fn test_running_balances_sorted_by_receipt() {
        let mut inv = invoice();
        inv.payments = vec![payment(100.0, 12), payment(50.0, 9)];

        let annotated = running_balances(&inv);
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].payment.amount, 50.0);
        assert_eq!(annotated[0].running_balance, 166.0);
        assert_eq!(annotated[1].payment.amount, 100.0);
        assert_eq!(annotated[1].running_balance, 66.0);
    }

    #[test]
    fn test_status_after_payment_boundary() {
        assert_eq!(status_after_payment(0.0), InvoiceStatus::Paid);
        assert_eq!(status_after_payment(-0.01), InvoiceStatus::Paid);
        assert_eq!(status_after_payment(0.01), InvoiceStatus::PartiallyPaid);
    }

    #[test]
    fn test_margin_from_items() {
        let items = vec![
            InvoiceItem {
                id: None,
                description: None,
                quantity: 2.0,
                unit_price: 100.0,
                cost: 60.0,
            },
            // Zero quantity counts as one unit.
            InvoiceItem {
                id: None,
                description: None,
                quantity: 0.0,
                unit_price: 50.0,
                cost: 10.0,
            },
        ];
        let summary = margin_from_items(&items);
        assert_eq!(summary.cost, 130.0);
        assert_eq!(summary.price, 250.0);
        assert_eq!(summary.margin, 48.0);
    }

    #[test]
    fn test_margin_zero_price() {
        let summary = margin_from_items(&[]);
        assert_eq!(summary.margin, 0.0);
    }

    #[test]
    fn test_analyze_margins() {
        let mut low = invoice();
        low.id = "inv-low".to_string();
        low.items = vec![InvoiceItem {
            id: None,
            description: None,
            quantity: 1.0,
            unit_price: 100.0,
            cost: 90.0, // 10% margin
        }];
        let mut high = invoice();
        high.id = "inv-high".to_string();
        high.items = vec![InvoiceItem {
            id: None,
            description: None,
            quantity: 1.0,
            unit_price: 100.0,
            cost: 40.0, // 60% margin
        }];

        let analytics = analyze_margins(&[low, high], 25.0);
        assert_eq!(analytics.low_margin_invoices, 1);
        assert_eq!(analytics.average_margin_percent, 35.0);
        assert!(analytics.series[0].is_below_threshold);
        assert!(!analytics.series[1].is_below_threshold);
    }
}

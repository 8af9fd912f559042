//! Client-side quantity guard rails, run before any request is sent.

use bayline_core::non_negative;

/// Floor and clamp a requested quantity to a usable non-negative integer.
pub fn normalize_quantity(quantity: f64) -> i64 {
    non_negative(quantity).floor() as i64
}

/// Validate a stock-transfer quantity against the units available at the
/// source location. Returns an error message, or `None` when valid.
pub fn validate_transfer_quantity(quantity: f64, available: i64) -> Option<String> {
    let normalized = normalize_quantity(quantity);
    if normalized <= 0 {
        return Some("Quantity must be at least 1".to_string());
    }
    if normalized > available {
        return Some(format!("Cannot transfer more than {} units", available));
    }
    None
}

/// Same shape as transfer validation, with the consumption wording.
pub fn validate_consumption_quantity(quantity: f64, available: i64) -> Option<String> {
    let normalized = normalize_quantity(quantity);
    if normalized <= 0 {
        return Some("Quantity must be at least 1".to_string());
    }
    if normalized > available {
        return Some(format!("Only {} units available", available));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_rejects_non_positive() {
        assert_eq!(
            validate_transfer_quantity(0.0, 10),
            Some("Quantity must be at least 1".to_string())
        );
        assert_eq!(
            validate_transfer_quantity(-3.0, 10),
            Some("Quantity must be at least 1".to_string())
        );
        // 0.9 floors to 0
        assert_eq!(
            validate_transfer_quantity(0.9, 10),
            Some("Quantity must be at least 1".to_string())
        );
    }

    #[test]
    fn test_transfer_rejects_overdraw() {
        assert_eq!(
            validate_transfer_quantity(12.0, 8),
            Some("Cannot transfer more than 8 units".to_string())
        );
    }

    #[test]
    fn test_transfer_accepts_in_range() {
        assert_eq!(validate_transfer_quantity(4.0, 10), None);
        // 4.7 floors to 4
        assert_eq!(validate_transfer_quantity(4.7, 4), None);
    }

    #[test]
    fn test_consumption_wording() {
        assert_eq!(
            validate_consumption_quantity(5.0, 3),
            Some("Only 3 units available".to_string())
        );
        assert_eq!(validate_consumption_quantity(3.0, 3), None);
    }
}

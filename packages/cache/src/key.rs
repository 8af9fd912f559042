use std::fmt;

/// Identifier under which fetched data is stored.
///
/// A key is a namespace plus an optional argument string. All variants of
/// one logical list (e.g. every filtered calendar view) share a namespace
/// and differ only in argument, which is what lets optimistic patches visit
/// all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    namespace: String,
    argument: Option<String>,
}

impl QueryKey {
    pub fn new(namespace: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            argument: Some(argument.into()),
        }
    }

    pub fn bare(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            argument: None,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    // Well-known namespaces consumed across packages.

    pub fn appointments() -> Self {
        Self::bare("appointments")
    }

    pub fn appointments_calendar(technician_id: Option<&str>, day: Option<&str>) -> Self {
        Self::new(
            "appointments/calendar",
            format!(
                "technician={};day={}",
                technician_id.unwrap_or(""),
                day.unwrap_or("")
            ),
        )
    }

    pub fn inventory_parts(location: Option<&str>) -> Self {
        match location {
            Some(location) => Self::new("inventory/parts", location),
            None => Self::bare("inventory/parts"),
        }
    }

    pub fn purchase_orders() -> Self {
        Self::bare("inventory/purchase-orders")
    }

    pub fn estimates() -> Self {
        Self::bare("estimates")
    }

    pub fn invoices() -> Self {
        Self::bare("invoices")
    }

    pub fn warranty_claims() -> Self {
        Self::bare("warranty/claims")
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.argument {
            Some(argument) => write!(f, "{}?{}", self.namespace, argument),
            None => write!(f, "{}", self.namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_keys_differ_by_filter() {
        let a = QueryKey::appointments_calendar(Some("tech-1"), Some("2024-03-01"));
        let b = QueryKey::appointments_calendar(Some("tech-2"), Some("2024-03-01"));
        assert_ne!(a, b);
        assert_eq!(a.namespace(), b.namespace());
    }

    #[test]
    fn test_part_list_variants_share_namespace() {
        let all = QueryKey::inventory_parts(None);
        let main = QueryKey::inventory_parts(Some("MAIN"));
        assert_eq!(all.namespace(), "inventory/parts");
        assert_eq!(main.namespace(), "inventory/parts");
        assert_ne!(all, main);
    }

    #[test]
    fn test_display() {
        let key = QueryKey::appointments_calendar(Some("t1"), None);
        assert_eq!(key.to_string(), "appointments/calendar?technician=t1;day=");
        assert_eq!(QueryKey::appointments().to_string(), "appointments");
    }
}

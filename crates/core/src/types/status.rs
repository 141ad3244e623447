//! Status enums for products and orders.

use serde::{Deserialize, Serialize};

/// Product listing status.
///
/// Stored as TEXT in `PostgreSQL`; repositories convert via `FromStr` and
/// surface bad values as data corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Visible in the dashboard and counted in analytics.
    Active,
    /// Being prepared; not yet published.
    #[default]
    Draft,
    /// Soft-deleted; retained for order history.
    Archived,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Draft => write!(f, "draft"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status still counts toward brand trends.
    ///
    /// Cancelled orders are excluded from the aggregation view.
    #[must_use]
    pub const fn counts_in_trends(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Fulfilled => write!(f, "fulfilled"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "fulfilled" => Ok(Self::Fulfilled),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_product_status_roundtrip() {
        for status in [
            ProductStatus::Active,
            ProductStatus::Draft,
            ProductStatus::Archived,
        ] {
            let parsed = ProductStatus::from_str(&status.to_string()).expect("parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_rejects_unknown() {
        assert!(OrderStatus::from_str("shipped").is_err());
    }

    #[test]
    fn test_cancelled_excluded_from_trends() {
        assert!(!OrderStatus::Cancelled.counts_in_trends());
        assert!(OrderStatus::Paid.counts_in_trends());
    }
}

//! Tenant (company) entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CompanyId;

/// A tenant of the dashboard.
///
/// Every product, order, and trend row is scoped to exactly one company.
/// Companies are addressed in the API by their URL-safe `slug`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    /// Display name (e.g., "Acme Outfitters").
    pub name: String,
    /// URL-safe identifier used in API paths (e.g., "acme-outfitters").
    pub slug: String,
    /// Optional custom domain used for tenant resolution.
    pub domain: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_serializes_with_slug() {
        let company = Company {
            id: CompanyId::new(1),
            name: "Acme Outfitters".to_string(),
            slug: "acme-outfitters".to_string(),
            domain: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&company).expect("serialize");
        assert_eq!(json["slug"], "acme-outfitters");
        assert_eq!(json["id"], 1);
    }
}

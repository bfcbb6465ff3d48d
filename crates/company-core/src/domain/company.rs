// ============================================================================
// Company Core - Company Entity
// File: crates/company-core/src/domain/company.rs
// Description: Company entity with soft-delete state
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::field_update::FieldUpdate;

/// Company entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub established_date: Option<NaiveDate>,
    pub employee_count: Option<i32>,

    // Audit fields
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Applies a partial update. `id`, `code`, and the audit fields are never
    /// touched; the store refreshes `updated_at` when the result is persisted.
    pub fn merged_with(&self, changes: CompanyChanges) -> Company {
        Company {
            id: self.id,
            name: changes.name.apply(self.name.clone()),
            code: self.code.clone(),
            industry: changes.industry.apply_optional(self.industry.clone()),
            website: changes.website.apply_optional(self.website.clone()),
            phone: changes.phone.apply_optional(self.phone.clone()),
            address: changes.address.apply_optional(self.address.clone()),
            established_date: changes.established_date.apply_optional(self.established_date),
            employee_count: changes.employee_count.apply_optional(self.employee_count),
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields supplied when creating a company. The store assigns id and timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub code: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub established_date: Option<NaiveDate>,
    pub employee_count: Option<i32>,
}

impl NewCompany {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn has_negative_employee_count(&self) -> bool {
        self.employee_count.is_some_and(|count| count < 0)
    }
}

/// Partial update of a company's mutable fields. `code` is absent on purpose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyChanges {
    pub name: FieldUpdate<String>,
    pub industry: FieldUpdate<String>,
    pub website: FieldUpdate<String>,
    pub phone: FieldUpdate<String>,
    pub address: FieldUpdate<String>,
    pub established_date: FieldUpdate<NaiveDate>,
    pub employee_count: FieldUpdate<i32>,
}

impl CompanyChanges {
    pub fn has_negative_employee_count(&self) -> bool {
        self.employee_count.as_set().is_some_and(|count| *count < 0)
    }
}

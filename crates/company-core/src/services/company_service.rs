// ============================================================================
// Company Core - Company Lifecycle Service
// File: crates/company-core/src/services/company_service.rs
// ============================================================================
//! Company lifecycle: creation with duplicate-code checks, partial updates,
//! soft delete, restore, and hard delete.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{Company, CompanyChanges, NewCompany};
use crate::error::DomainError;
use crate::i18n::{Locale, MessageLookup, MessageService};
use crate::repositories::{CompanyRepository, CompanyStore, CompanyTransaction};

/// Company service enforcing lifecycle rules on top of a `CompanyStore`.
///
/// Every write runs in one store transaction so the read-check-write
/// sequence sees a consistent row. The store's unique constraint on `code`
/// remains the final guard against concurrent duplicates.
pub struct CompanyService<S: ?Sized, M: ?Sized> {
    store: Arc<S>,
    messages: MessageService<M>,
}

impl<S, M> CompanyService<S, M>
where
    S: CompanyStore + ?Sized,
    M: MessageLookup + ?Sized,
{
    pub fn new(store: Arc<S>, messages: MessageService<M>) -> Self {
        Self { store, messages }
    }

    pub async fn check_store(&self) -> Result<(), DomainError> {
        self.store.ping().await
    }

    pub async fn get_all_companies(&self) -> Result<Vec<Company>, DomainError> {
        self.store.find_all().await
    }

    pub async fn get_active_companies(&self) -> Result<Vec<Company>, DomainError> {
        self.store.find_active_companies().await
    }

    pub async fn get_company_by_id(&self, id: i64) -> Result<Option<Company>, DomainError> {
        self.store.find_by_id(id).await
    }

    pub async fn get_company_by_code(&self, code: &str) -> Result<Option<Company>, DomainError> {
        self.store.find_by_code(code).await
    }

    /// Create a company with a code no other row (deleted or not) uses
    pub async fn create_company(
        &self,
        locale: &Locale,
        new_company: NewCompany,
    ) -> Result<Company, DomainError> {
        info!("Create company attempt for code: {}", new_company.code);

        let tx = self.store.begin().await?;

        // 1. Code must be unused, including by soft-deleted rows
        if tx.find_by_code(&new_company.code).await?.is_some() {
            warn!("Create failed: company code already exists: {}", new_company.code);
            return Err(self.duplicate_code(locale, &new_company.code));
        }

        // 2. Employee count must not be negative
        if new_company.has_negative_employee_count() {
            warn!("Create failed: negative employee count for code: {}", new_company.code);
            return Err(self.invalid_employee_count(locale));
        }

        // 3. Insert; a concurrent insert of the same code loses at the constraint
        let created = tx.create(&new_company).await.map_err(|e| match e {
            DomainError::ConstraintViolation(detail) => {
                warn!("Create failed: unique constraint rejected code {}: {}", new_company.code, detail);
                self.duplicate_code(locale, &new_company.code)
            }
            other => other,
        })?;

        tx.commit().await?;

        info!("Company created: id={} code={}", created.id, created.code);
        Ok(created)
    }

    /// Update the mutable fields of an active company
    pub async fn update_company(
        &self,
        locale: &Locale,
        id: i64,
        changes: CompanyChanges,
    ) -> Result<Company, DomainError> {
        let tx = self.store.begin().await?;

        let existing = self.fetch_existing(tx.as_ref(), locale, id).await?;

        if existing.is_deleted() {
            warn!("Update failed: company {} is soft-deleted", id);
            return Err(DomainError::CannotUpdateDeleted {
                id,
                message: self.messages.business_error(locale, "company.cannot.update.deleted", &[]),
            });
        }

        if changes.has_negative_employee_count() {
            warn!("Update failed: negative employee count for company {}", id);
            return Err(self.invalid_employee_count(locale));
        }

        let merged = existing.merged_with(changes);
        let updated = tx.update(&merged).await?;

        tx.commit().await?;

        info!("Company updated: id={}", updated.id);
        Ok(updated)
    }

    /// Permanently remove a company in any state
    pub async fn delete_company(&self, locale: &Locale, id: i64) -> Result<bool, DomainError> {
        let tx = self.store.begin().await?;

        self.fetch_existing(tx.as_ref(), locale, id).await?;

        // TODO: refuse when teams or users still reference this company once those tables exist
        let deleted = tx.delete(id).await?;

        tx.commit().await?;

        info!("Company hard-deleted: id={} removed={}", id, deleted);
        Ok(deleted)
    }

    pub async fn soft_delete_company(&self, locale: &Locale, id: i64) -> Result<bool, DomainError> {
        let tx = self.store.begin().await?;

        let existing = self.fetch_existing(tx.as_ref(), locale, id).await?;

        if existing.is_deleted() {
            warn!("Soft delete failed: company {} already deleted", id);
            return Err(DomainError::AlreadyDeleted {
                id,
                message: self.messages.business_error(locale, "company.already.deleted", &[]),
            });
        }

        let deleted = tx.soft_delete(id).await?;

        tx.commit().await?;

        info!("Company soft-deleted: id={}", id);
        Ok(deleted)
    }

    pub async fn restore_company(&self, locale: &Locale, id: i64) -> Result<bool, DomainError> {
        let tx = self.store.begin().await?;

        let existing = self.fetch_existing(tx.as_ref(), locale, id).await?;

        if existing.is_active() {
            warn!("Restore failed: company {} is not deleted", id);
            return Err(DomainError::NotDeleted {
                id,
                message: self.messages.business_error(locale, "company.not.deleted", &[]),
            });
        }

        let restored = tx.restore(id).await?;

        tx.commit().await?;

        info!("Company restored: id={}", id);
        Ok(restored)
    }

    async fn fetch_existing(
        &self,
        tx: &dyn CompanyTransaction,
        locale: &Locale,
        id: i64,
    ) -> Result<Company, DomainError> {
        tx.find_by_id(id).await?.ok_or_else(|| {
            warn!("Company not found: {}", id);
            DomainError::NotFound {
                id,
                message: self.messages.business_error(locale, "company.not.found", &[id.to_string()]),
            }
        })
    }

    fn duplicate_code(&self, locale: &Locale, code: &str) -> DomainError {
        DomainError::DuplicateCode {
            code: code.to_string(),
            message: self
                .messages
                .company_validation(locale, "code.duplicate", &[code.to_string()]),
        }
    }

    fn invalid_employee_count(&self, locale: &Locale) -> DomainError {
        DomainError::InvalidEmployeeCount {
            message: self
                .messages
                .company_validation(locale, "employee.count.positive", &[]),
        }
    }
}

//! Company repository traits (port)

use async_trait::async_trait;

use crate::domain::{Company, NewCompany};
use crate::error::DomainError;

/// Persistence operations on the `companies` table. No business rules live
/// here; lifecycle checks belong to `CompanyService`.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// All rows, newest first.
    async fn find_all(&self) -> Result<Vec<Company>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, DomainError>;
    /// Matches soft-deleted rows too.
    async fn find_by_code(&self, code: &str) -> Result<Option<Company>, DomainError>;
    /// Rows with `deleted_at` unset, newest first.
    async fn find_active_companies(&self) -> Result<Vec<Company>, DomainError>;
    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError>;
    /// Overwrites the mutable fields by id and returns the refreshed row.
    async fn update(&self, company: &Company) -> Result<Company, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    async fn soft_delete(&self, id: i64) -> Result<bool, DomainError>;
    /// Only affects rows that are currently soft-deleted.
    async fn restore(&self, id: i64) -> Result<bool, DomainError>;
}

/// A unit of work. Dropping it without calling `commit` discards its writes.
#[async_trait]
pub trait CompanyTransaction: CompanyRepository {
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

#[async_trait]
pub trait CompanyStore: CompanyRepository {
    async fn begin(&self) -> Result<Box<dyn CompanyTransaction>, DomainError>;

    /// Cheap reachability check used by `/health`.
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

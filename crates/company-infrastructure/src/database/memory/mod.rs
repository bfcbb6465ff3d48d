//! In-memory company repository
//!
//! Backs `database.backend = "memory"` and the test suites. Transactions hold
//! the store's async mutex for their whole lifetime, so they are serialized,
//! and write to a working copy that replaces the shared state on commit.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use company_core::domain::{Company, NewCompany};
use company_core::error::DomainError;
use company_core::repositories::{CompanyRepository, CompanyStore, CompanyTransaction};

const CODE_CONSTRAINT: &str = "companies_code_key";

#[derive(Debug, Clone, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Company>,
    last_id: i64,
}

impl MemoryState {
    fn listed(&self, active_only: bool) -> Vec<Company> {
        let mut companies: Vec<Company> = self
            .rows
            .values()
            .filter(|c| !active_only || c.is_active())
            .cloned()
            .collect();
        companies.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        companies
    }

    fn find_by_id(&self, id: i64) -> Option<Company> {
        self.rows.get(&id).cloned()
    }

    fn find_by_code(&self, code: &str) -> Option<Company> {
        self.rows.values().find(|c| c.code == code).cloned()
    }

    fn create(&mut self, company: &NewCompany) -> Result<Company, DomainError> {
        if self.rows.values().any(|c| c.code == company.code) {
            return Err(DomainError::ConstraintViolation(CODE_CONSTRAINT.to_string()));
        }
        if company.has_negative_employee_count() {
            return Err(DomainError::DatabaseError(
                "check constraint companies_employee_count_check violated".to_string(),
            ));
        }

        self.last_id += 1;
        let now = Utc::now();
        let created = Company {
            id: self.last_id,
            name: company.name.clone(),
            code: company.code.clone(),
            industry: company.industry.clone(),
            website: company.website.clone(),
            phone: company.phone.clone(),
            address: company.address.clone(),
            established_date: company.established_date,
            employee_count: company.employee_count,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(created.id, created.clone());
        Ok(created)
    }

    fn update(&mut self, company: &Company) -> Result<Company, DomainError> {
        let row = self.rows.get_mut(&company.id).ok_or_else(|| {
            DomainError::DatabaseError(format!("company {} no longer exists", company.id))
        })?;

        row.name = company.name.clone();
        row.industry = company.industry.clone();
        row.website = company.website.clone();
        row.phone = company.phone.clone();
        row.address = company.address.clone();
        row.established_date = company.established_date;
        row.employee_count = company.employee_count;
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    fn delete(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn soft_delete(&mut self, id: i64) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, id: i64) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) if row.is_deleted() => {
                row.deleted_at = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCompanyRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_all(&self) -> Result<Vec<Company>, DomainError> {
        Ok(self.state.lock().await.listed(false))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, DomainError> {
        Ok(self.state.lock().await.find_by_id(id))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Company>, DomainError> {
        Ok(self.state.lock().await.find_by_code(code))
    }

    async fn find_active_companies(&self) -> Result<Vec<Company>, DomainError> {
        Ok(self.state.lock().await.listed(true))
    }

    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError> {
        self.state.lock().await.create(company)
    }

    async fn update(&self, company: &Company) -> Result<Company, DomainError> {
        self.state.lock().await.update(company)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state.lock().await.delete(id))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state.lock().await.soft_delete(id))
    }

    async fn restore(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state.lock().await.restore(id))
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyRepository {
    async fn begin(&self) -> Result<Box<dyn CompanyTransaction>, DomainError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = MemoryState::clone(&guard);

        Ok(Box::new(InMemoryCompanyTransaction {
            shared: guard,
            working: parking_lot::Mutex::new(working),
        }))
    }
}

struct InMemoryCompanyTransaction {
    shared: OwnedMutexGuard<MemoryState>,
    working: parking_lot::Mutex<MemoryState>,
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyTransaction {
    async fn find_all(&self) -> Result<Vec<Company>, DomainError> {
        Ok(self.working.lock().listed(false))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, DomainError> {
        Ok(self.working.lock().find_by_id(id))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Company>, DomainError> {
        Ok(self.working.lock().find_by_code(code))
    }

    async fn find_active_companies(&self) -> Result<Vec<Company>, DomainError> {
        Ok(self.working.lock().listed(true))
    }

    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError> {
        self.working.lock().create(company)
    }

    async fn update(&self, company: &Company) -> Result<Company, DomainError> {
        self.working.lock().update(company)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.working.lock().delete(id))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.working.lock().soft_delete(id))
    }

    async fn restore(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.working.lock().restore(id))
    }
}

#[async_trait]
impl CompanyTransaction for InMemoryCompanyTransaction {
    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemoryCompanyTransaction { mut shared, working } = *self;
        *shared = working.into_inner();
        Ok(())
    }
}

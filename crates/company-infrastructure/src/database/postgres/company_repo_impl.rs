// ============================================================================
// Company Infrastructure - PostgreSQL Company Repository
// File: crates/company-infrastructure/src/database/postgres/company_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgExecutor, PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use tracing::{error, info};

use company_core::domain::{Company, NewCompany};
use company_core::error::DomainError;
use company_core::repositories::{CompanyRepository, CompanyStore, CompanyTransaction};

pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Company repository bound to one open transaction. Rows read by id are
/// locked until commit or rollback.
pub struct PgCompanyTransaction {
    tx: Mutex<Transaction<'static, Postgres>>,
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub established_date: Option<NaiveDate>,
    pub employee_count: Option<i32>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            name: row.name,
            code: row.code,
            industry: row.industry,
            website: row.website,
            phone: row.phone,
            address: row.address,
            established_date: row.established_date,
            employee_count: row.employee_count,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const FIND_BY_ID: &str = r#"
    SELECT
        id, name, code, industry, website, phone, address,
        established_date, employee_count, deleted_at, created_at, updated_at
    FROM companies
    WHERE id = $1
"#;

const FIND_BY_ID_FOR_UPDATE: &str = r#"
    SELECT
        id, name, code, industry, website, phone, address,
        established_date, employee_count, deleted_at, created_at, updated_at
    FROM companies
    WHERE id = $1
    FOR UPDATE
"#;

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

async fn find_all<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Company>, DomainError> {
    let rows: Vec<CompanyRow> = sqlx::query_as(
        r#"
        SELECT
            id, name, code, industry, website, phone, address,
            established_date, employee_count, deleted_at, created_at, updated_at
        FROM companies
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(executor)
    .await
    .map_err(db_error("listing companies"))?;

    Ok(rows.into_iter().map(Company::from).collect())
}

async fn find_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: i64,
    lock: bool,
) -> Result<Option<Company>, DomainError> {
    let sql = if lock { FIND_BY_ID_FOR_UPDATE } else { FIND_BY_ID };

    let row: Option<CompanyRow> = sqlx::query_as(sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(db_error("finding company by id"))?;

    Ok(row.map(|r| r.into()))
}

async fn find_by_code<'e, E: PgExecutor<'e>>(
    executor: E,
    code: &str,
) -> Result<Option<Company>, DomainError> {
    let row: Option<CompanyRow> = sqlx::query_as(
        r#"
        SELECT
            id, name, code, industry, website, phone, address,
            established_date, employee_count, deleted_at, created_at, updated_at
        FROM companies
        WHERE code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(executor)
    .await
    .map_err(db_error("finding company by code"))?;

    Ok(row.map(|r| r.into()))
}

async fn find_active<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Company>, DomainError> {
    let rows: Vec<CompanyRow> = sqlx::query_as(
        r#"
        SELECT
            id, name, code, industry, website, phone, address,
            established_date, employee_count, deleted_at, created_at, updated_at
        FROM companies
        WHERE deleted_at IS NULL
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(executor)
    .await
    .map_err(db_error("listing active companies"))?;

    Ok(rows.into_iter().map(Company::from).collect())
}

async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    company: &NewCompany,
) -> Result<Company, DomainError> {
    info!("Creating company: {}", company.code);

    let row: CompanyRow = sqlx::query_as(
        r#"
        INSERT INTO companies (
            name, code, industry, website, phone, address,
            established_date, employee_count
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING
            id, name, code, industry, website, phone, address,
            established_date, employee_count, deleted_at, created_at, updated_at
        "#,
    )
    .bind(&company.name)
    .bind(&company.code)
    .bind(&company.industry)
    .bind(&company.website)
    .bind(&company.phone)
    .bind(&company.address)
    .bind(company.established_date)
    .bind(company.employee_count)
    .fetch_one(executor)
    .await
    .map_err(|e: sqlx::Error| {
        error!("Database error creating company: {}", e);
        match e.as_database_error() {
            Some(db) if db.is_unique_violation() => DomainError::ConstraintViolation(
                db.constraint().unwrap_or("companies_code_key").to_string(),
            ),
            _ => DomainError::DatabaseError(e.to_string()),
        }
    })?;

    info!("Company created successfully: {}", row.id);
    Ok(row.into())
}

async fn update<'e, E: PgExecutor<'e>>(
    executor: E,
    company: &Company,
) -> Result<Company, DomainError> {
    let row: Option<CompanyRow> = sqlx::query_as(
        r#"
        UPDATE companies
        SET
            name = $2,
            industry = $3,
            website = $4,
            phone = $5,
            address = $6,
            established_date = $7,
            employee_count = $8,
            updated_at = NOW()
        WHERE id = $1
        RETURNING
            id, name, code, industry, website, phone, address,
            established_date, employee_count, deleted_at, created_at, updated_at
        "#,
    )
    .bind(company.id)
    .bind(&company.name)
    .bind(&company.industry)
    .bind(&company.website)
    .bind(&company.phone)
    .bind(&company.address)
    .bind(company.established_date)
    .bind(company.employee_count)
    .fetch_optional(executor)
    .await
    .map_err(db_error("updating company"))?;

    row.map(Company::from).ok_or_else(|| {
        error!("Company {} vanished during update", company.id);
        DomainError::DatabaseError(format!("company {} no longer exists", company.id))
    })
}

async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, DomainError> {
    let result = sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await
        .map_err(db_error("deleting company"))?;

    Ok(result.rows_affected() > 0)
}

async fn soft_delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, DomainError> {
    let result = sqlx::query("UPDATE companies SET deleted_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await
        .map_err(db_error("soft-deleting company"))?;

    Ok(result.rows_affected() > 0)
}

async fn restore<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, DomainError> {
    let result = sqlx::query(
        "UPDATE companies SET deleted_at = NULL WHERE id = $1 AND deleted_at IS NOT NULL",
    )
    .bind(id)
    .execute(executor)
    .await
    .map_err(db_error("restoring company"))?;

    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn find_all(&self) -> Result<Vec<Company>, DomainError> {
        find_all(&self.pool).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, DomainError> {
        find_by_id(&self.pool, id, false).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Company>, DomainError> {
        find_by_code(&self.pool, code).await
    }

    async fn find_active_companies(&self) -> Result<Vec<Company>, DomainError> {
        find_active(&self.pool).await
    }

    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError> {
        insert(&self.pool, company).await
    }

    async fn update(&self, company: &Company) -> Result<Company, DomainError> {
        update(&self.pool, company).await
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        delete(&self.pool, id).await
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, DomainError> {
        soft_delete(&self.pool, id).await
    }

    async fn restore(&self, id: i64) -> Result<bool, DomainError> {
        restore(&self.pool, id).await
    }
}

#[async_trait]
impl CompanyStore for PgCompanyRepository {
    async fn begin(&self) -> Result<Box<dyn CompanyTransaction>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("starting transaction"))?;

        Ok(Box::new(PgCompanyTransaction { tx: Mutex::new(tx) }))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("checking connection"))?;
        Ok(())
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyTransaction {
    async fn find_all(&self) -> Result<Vec<Company>, DomainError> {
        let mut tx = self.tx.lock().await;
        find_all(&mut **tx).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, DomainError> {
        let mut tx = self.tx.lock().await;
        find_by_id(&mut **tx, id, true).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Company>, DomainError> {
        let mut tx = self.tx.lock().await;
        find_by_code(&mut **tx, code).await
    }

    async fn find_active_companies(&self) -> Result<Vec<Company>, DomainError> {
        let mut tx = self.tx.lock().await;
        find_active(&mut **tx).await
    }

    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError> {
        let mut tx = self.tx.lock().await;
        insert(&mut **tx, company).await
    }

    async fn update(&self, company: &Company) -> Result<Company, DomainError> {
        let mut tx = self.tx.lock().await;
        update(&mut **tx, company).await
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.tx.lock().await;
        delete(&mut **tx, id).await
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.tx.lock().await;
        soft_delete(&mut **tx, id).await
    }

    async fn restore(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.tx.lock().await;
        restore(&mut **tx, id).await
    }
}

#[async_trait]
impl CompanyTransaction for PgCompanyTransaction {
    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let this = *self;
        this.tx
            .into_inner()
            .commit()
            .await
            .map_err(db_error("committing transaction"))
    }
}

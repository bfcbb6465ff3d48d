//! Lifecycle rules exercised against the in-memory store and the embedded
//! message bundles.

use std::sync::Arc;

use async_trait::async_trait;
use fake::faker::company::en::CompanyName;
use fake::Fake;

use company_core::domain::{Company, CompanyChanges, FieldUpdate, NewCompany};
use company_core::error::DomainError;
use company_core::i18n::{Locale, MessageService};
use company_core::repositories::{CompanyRepository, CompanyStore, CompanyTransaction};
use company_core::services::CompanyService;
use company_infrastructure::{BundleMessageSource, InMemoryCompanyRepository};

type Service<S> = CompanyService<S, BundleMessageSource>;

fn en() -> Locale {
    Locale::new("en")
}

fn messages() -> MessageService<BundleMessageSource> {
    let source = BundleMessageSource::embedded(&Locale::new("ja")).unwrap();
    MessageService::new(Arc::new(source))
}

fn service() -> Service<InMemoryCompanyRepository> {
    CompanyService::new(Arc::new(InMemoryCompanyRepository::new()), messages())
}

fn random_company(code: &str) -> NewCompany {
    let name: String = CompanyName().fake();
    NewCompany {
        industry: Some("Manufacturing".to_string()),
        phone: Some("03-1234-5678".to_string()),
        employee_count: Some(250),
        ..NewCompany::new(name, code)
    }
}

#[tokio::test]
async fn create_with_distinct_codes_succeeds() {
    let service = service();

    for code in ["C001", "C002", "C003"] {
        let created = service.create_company(&en(), random_company(code)).await.unwrap();
        assert_eq!(created.code, code);
        assert!(created.deleted_at.is_none());
    }

    assert_eq!(service.get_all_companies().await.unwrap().len(), 3);
}

#[tokio::test]
async fn create_rejects_code_of_active_or_deleted_row() {
    let service = service();
    let active = service.create_company(&en(), random_company("ACTIVE")).await.unwrap();
    let deleted = service.create_company(&en(), random_company("GONE")).await.unwrap();
    service.soft_delete_company(&en(), deleted.id).await.unwrap();

    for code in [active.code, deleted.code] {
        let err = service.create_company(&en(), random_company(&code)).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateCode {
                code: code.clone(),
                message: format!("Company code {} is already in use", code),
            }
        );
    }
}

#[tokio::test]
async fn create_rejects_negative_employee_count() {
    let service = service();
    let new_company = NewCompany {
        employee_count: Some(-3),
        ..random_company("NEG")
    };

    let err = service.create_company(&en(), new_company).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidEmployeeCount { .. }));
    assert!(service.get_company_by_code("NEG").await.unwrap().is_none());
}

#[tokio::test]
async fn update_name_only_leaves_other_fields() {
    let service = service();
    let created = service.create_company(&en(), random_company("ACME1")).await.unwrap();

    let changes = CompanyChanges {
        name: FieldUpdate::Set("Acme Holdings".to_string()),
        ..Default::default()
    };
    let updated = service.update_company(&en(), created.id, changes).await.unwrap();

    assert_eq!(updated.name, "Acme Holdings");
    assert_eq!(
        Company {
            name: created.name.clone(),
            updated_at: created.updated_at,
            ..updated.clone()
        },
        created
    );
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_of_deleted_row_always_fails() {
    let service = service();
    let created = service.create_company(&en(), random_company("ACME1")).await.unwrap();
    service.soft_delete_company(&en(), created.id).await.unwrap();

    let attempts = [
        CompanyChanges::default(),
        CompanyChanges {
            name: FieldUpdate::Set("Renamed".to_string()),
            ..Default::default()
        },
        CompanyChanges {
            employee_count: FieldUpdate::Set(-1),
            website: FieldUpdate::Set("https://example.com".to_string()),
            ..Default::default()
        },
    ];

    for changes in attempts {
        let err = service.update_company(&en(), created.id, changes).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::CannotUpdateDeleted {
                id: created.id,
                message: "A deleted company cannot be updated".to_string(),
            }
        );
    }
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let service = service();

    let err = service
        .update_company(&en(), 404, CompanyChanges::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::NotFound {
            id: 404,
            message: "Company not found: ID=404".to_string(),
        }
    );
}

#[tokio::test]
async fn soft_delete_then_restore_round_trips() {
    let service = service();
    let created = service.create_company(&en(), random_company("ACME1")).await.unwrap();

    assert!(service.soft_delete_company(&en(), created.id).await.unwrap());
    let deleted = service.get_company_by_id(created.id).await.unwrap().unwrap();
    assert!(deleted.is_deleted());
    assert!(service.get_active_companies().await.unwrap().is_empty());

    assert!(service.restore_company(&en(), created.id).await.unwrap());
    let restored = service.get_company_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(restored, created);
}

#[tokio::test]
async fn second_soft_delete_fails() {
    let service = service();
    let created = service.create_company(&en(), random_company("ACME1")).await.unwrap();

    assert!(service.soft_delete_company(&en(), created.id).await.unwrap());
    let err = service.soft_delete_company(&en(), created.id).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyDeleted { id, .. } if id == created.id));
}

#[tokio::test]
async fn restore_of_active_row_fails() {
    let service = service();
    let created = service.create_company(&en(), random_company("ACME1")).await.unwrap();

    let err = service.restore_company(&en(), created.id).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::NotDeleted {
            id: created.id,
            message: "The company is not deleted".to_string(),
        }
    );
}

#[tokio::test]
async fn hard_delete_removes_row_in_any_state() {
    let service = service();
    let active = service.create_company(&en(), random_company("A")).await.unwrap();
    let deleted = service.create_company(&en(), random_company("B")).await.unwrap();
    service.soft_delete_company(&en(), deleted.id).await.unwrap();

    assert!(service.delete_company(&en(), active.id).await.unwrap());
    assert!(service.delete_company(&en(), deleted.id).await.unwrap());
    assert!(service.get_all_companies().await.unwrap().is_empty());

    let err = service.delete_company(&en(), active.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    // code is free again after a hard delete
    service.create_company(&en(), random_company("A")).await.unwrap();
}

#[tokio::test]
async fn messages_follow_the_request_locale() {
    let service = service();
    service.create_company(&en(), random_company("ACME1")).await.unwrap();

    let ja = service
        .create_company(&Locale::new("ja"), random_company("ACME1"))
        .await
        .unwrap_err();
    let ko = service
        .create_company(&Locale::new("ko-KR"), random_company("ACME1"))
        .await
        .unwrap_err();

    assert_eq!(ja.to_string(), "企業コード「ACME1」は既に使用されています");
    assert_ne!(ko.to_string(), ja.to_string());
    assert!(ko.to_string().contains("ACME1"));
}

#[tokio::test]
async fn walkthrough() {
    let service = service();

    let acme = service
        .create_company(&en(), NewCompany::new("Acme", "ACME1"))
        .await
        .unwrap();
    assert!(acme.id > 0);
    assert!(acme.deleted_at.is_none());

    let err = service
        .create_company(&en(), NewCompany::new("Acme Again", "ACME1"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateCode { .. }));

    assert!(service.soft_delete_company(&en(), acme.id).await.unwrap());
    let err = service.soft_delete_company(&en(), acme.id).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyDeleted { .. }));

    assert!(service.restore_company(&en(), acme.id).await.unwrap());

    let changes = CompanyChanges {
        employee_count: FieldUpdate::Set(-1),
        ..Default::default()
    };
    let err = service.update_company(&en(), acme.id, changes).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidEmployeeCount {
            message: "Employee count must be zero or greater".to_string(),
        }
    );
}

/// Store whose code lookups never see existing rows, so duplicates only
/// surface at the unique constraint.
struct BlindCodeStore {
    inner: InMemoryCompanyRepository,
}

struct BlindCodeTransaction {
    inner: Box<dyn CompanyTransaction>,
}

macro_rules! delegate_repository {
    ($ty:ty, $field:ident) => {
        #[async_trait]
        impl CompanyRepository for $ty {
            async fn find_all(&self) -> Result<Vec<Company>, DomainError> {
                self.$field.find_all().await
            }
            async fn find_by_id(&self, id: i64) -> Result<Option<Company>, DomainError> {
                self.$field.find_by_id(id).await
            }
            async fn find_by_code(&self, _code: &str) -> Result<Option<Company>, DomainError> {
                Ok(None)
            }
            async fn find_active_companies(&self) -> Result<Vec<Company>, DomainError> {
                self.$field.find_active_companies().await
            }
            async fn create(&self, company: &NewCompany) -> Result<Company, DomainError> {
                self.$field.create(company).await
            }
            async fn update(&self, company: &Company) -> Result<Company, DomainError> {
                self.$field.update(company).await
            }
            async fn delete(&self, id: i64) -> Result<bool, DomainError> {
                self.$field.delete(id).await
            }
            async fn soft_delete(&self, id: i64) -> Result<bool, DomainError> {
                self.$field.soft_delete(id).await
            }
            async fn restore(&self, id: i64) -> Result<bool, DomainError> {
                self.$field.restore(id).await
            }
        }
    };
}

delegate_repository!(BlindCodeStore, inner);
delegate_repository!(BlindCodeTransaction, inner);

#[async_trait]
impl CompanyStore for BlindCodeStore {
    async fn begin(&self) -> Result<Box<dyn CompanyTransaction>, DomainError> {
        let inner = self.inner.begin().await?;
        Ok(Box::new(BlindCodeTransaction { inner }))
    }
}

#[async_trait]
impl CompanyTransaction for BlindCodeTransaction {
    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.inner.commit().await
    }
}

#[tokio::test]
async fn constraint_violation_is_reported_as_duplicate_code() {
    let store = BlindCodeStore {
        inner: InMemoryCompanyRepository::new(),
    };
    let service = CompanyService::new(Arc::new(store), messages());

    service.create_company(&en(), random_company("RACE")).await.unwrap();
    let err = service.create_company(&en(), random_company("RACE")).await.unwrap_err();

    assert!(matches!(err, DomainError::DuplicateCode { code, .. } if code == "RACE"));
    assert_eq!(service.get_all_companies().await.unwrap().len(), 1);
}

#[tokio::test]
async fn service_works_behind_trait_objects() {
    let store: Arc<dyn CompanyStore> = Arc::new(InMemoryCompanyRepository::new());
    let source: Arc<dyn company_core::MessageLookup> =
        Arc::new(BundleMessageSource::embedded(&Locale::new("ja")).unwrap());
    let service = CompanyService::new(store, MessageService::new(source));

    let created = service
        .create_company(&en(), NewCompany::new("Acme", "ACME1"))
        .await
        .unwrap();
    assert_eq!(service.get_company_by_code("ACME1").await.unwrap(), Some(created));
}

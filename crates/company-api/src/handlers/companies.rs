// ============================================================================
// Company API - Company Handlers
// File: crates/company-api/src/handlers/companies.rs
// ============================================================================
//! Company CRUD and lifecycle endpoints under `/companies`

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use company_core::domain::Company;
use company_core::i18n::Locale;

use crate::dto::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::error::ApiError;
use crate::locale::RequestLocale;
use crate::state::AppState;

/// GET /companies
pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = state.companies.get_all_companies().await?;
    Ok(Json(companies))
}

/// GET /companies/active
pub async fn list_active_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = state.companies.get_active_companies().await?;
    Ok(Json(companies))
}

/// GET /companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    RequestLocale(locale): RequestLocale,
) -> Result<Json<Company>, ApiError> {
    let Path(id) = path?;
    state
        .companies
        .get_company_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&state, &locale, id))
}

/// GET /companies/code/{code}
pub async fn get_company_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
    RequestLocale(locale): RequestLocale,
) -> Result<Json<Company>, ApiError> {
    state
        .companies
        .get_company_by_code(&code)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound {
            kind: "NotFound",
            message: state
                .messages
                .business_error(&locale, "company.code.not.found", &[code.clone()]),
        })
}

/// POST /companies
pub async fn create_company(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    payload: Result<Json<CreateCompanyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let Json(request) = payload?;

    if let Err(errors) = request.trimmed().validate() {
        let fields = errors.field_errors();
        // report the first failing field, name before code
        let code = ["name", "code"]
            .into_iter()
            .find_map(|field| fields.get(field).and_then(|errs| errs.first()))
            .map(|err| err.code.to_string())
            .unwrap_or_else(|| "name.required".to_string());

        return Err(ApiError::validation(
            state.messages.company_validation(&locale, &code, &[]),
        ));
    }

    let created = state.companies.create_company(&locale, request.into()).await?;

    info!("POST /companies -> {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /companies/{id}
pub async fn update_company(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    RequestLocale(locale): RequestLocale,
    payload: Result<Json<UpdateCompanyRequest>, JsonRejection>,
) -> Result<Json<Company>, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;

    let updated = state
        .companies
        .update_company(&locale, id, request.into())
        .await?;

    Ok(Json(updated))
}

/// DELETE /companies/{id}
pub async fn delete_company(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    RequestLocale(locale): RequestLocale,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let deleted = state.companies.delete_company(&locale, id).await?;
    no_content_or_not_found(&state, &locale, id, deleted)
}

/// PATCH /companies/{id}/soft-delete
pub async fn soft_delete_company(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    RequestLocale(locale): RequestLocale,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let deleted = state.companies.soft_delete_company(&locale, id).await?;
    no_content_or_not_found(&state, &locale, id, deleted)
}

/// PATCH /companies/{id}/restore
pub async fn restore_company(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    RequestLocale(locale): RequestLocale,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let restored = state.companies.restore_company(&locale, id).await?;
    no_content_or_not_found(&state, &locale, id, restored)
}

fn not_found(state: &AppState, locale: &Locale, id: i64) -> ApiError {
    ApiError::NotFound {
        kind: "NotFound",
        message: state
            .messages
            .business_error(locale, "company.not.found", &[id.to_string()]),
    }
}

// the store reports `false` when no row was affected
fn no_content_or_not_found(
    state: &AppState,
    locale: &Locale,
    id: i64,
    affected: bool,
) -> Result<StatusCode, ApiError> {
    if affected {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(state, locale, id))
    }
}

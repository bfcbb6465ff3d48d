//! Message catalogue diagnostics under `/messages`, mounted when
//! `app.demo_endpoints` is enabled.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use company_core::i18n::Locale;

use crate::locale::RequestLocale;
use crate::state::AppState;

type Messages = BTreeMap<&'static str, String>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleResponse {
    pub locale: String,
    pub language: String,
    pub is_japanese: bool,
    pub is_english: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message_code: String,
    pub locale: String,
    pub args: Vec<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidationParams {
    #[serde(default = "default_code")]
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessParams {
    #[serde(default = "default_company_name")]
    pub company_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorParams {
    #[serde(default = "default_id")]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub locale: Option<String>,
    /// Comma-separated positional args.
    pub args: Option<String>,
}

fn default_code() -> String {
    "TEST001".to_string()
}

fn default_company_name() -> String {
    "テスト企業".to_string()
}

fn default_id() -> String {
    "123".to_string()
}

fn split_args(args: Option<&str>) -> Vec<String> {
    args.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// GET /messages/locale
pub async fn current_locale(RequestLocale(locale): RequestLocale) -> Json<LocaleResponse> {
    Json(LocaleResponse {
        locale: locale.to_string(),
        language: locale.language().to_string(),
        is_japanese: locale.is_japanese(),
        is_english: locale.is_english(),
    })
}

/// GET /messages/validation?code=
pub async fn validation_messages(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Query(params): Query<ValidationParams>,
) -> Json<Messages> {
    let messages = &state.messages;

    Json(BTreeMap::from([
        (
            "company.name.required",
            messages.company_validation(&locale, "name.required", &[]),
        ),
        (
            "company.code.duplicate",
            messages.company_validation(&locale, "code.duplicate", &[params.code]),
        ),
        (
            "company.employee.count.positive",
            messages.company_validation(&locale, "employee.count.positive", &[]),
        ),
    ]))
}

/// GET /messages/business?companyName=
pub async fn business_messages(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Query(params): Query<BusinessParams>,
) -> Json<Messages> {
    let messages = &state.messages;
    let args = [params.company_name];

    Json(BTreeMap::from([
        ("company.created", messages.company_business(&locale, "created", &args)),
        ("company.updated", messages.company_business(&locale, "updated", &args)),
        ("company.deleted", messages.company_business(&locale, "deleted", &args)),
    ]))
}

/// GET /messages/errors?id=
pub async fn error_messages(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Query(params): Query<ErrorParams>,
) -> Json<Messages> {
    let messages = &state.messages;

    Json(BTreeMap::from([
        (
            "company.not.found",
            messages.business_error(&locale, "company.not.found", &[params.id]),
        ),
        ("system.general", messages.system_error(&locale, "general", &[])),
        ("system.database", messages.system_error(&locale, "database", &[])),
    ]))
}

/// GET /messages/test/{messageCode}?locale=&args=
pub async fn lookup_message(
    State(state): State<AppState>,
    Path(message_code): Path<String>,
    RequestLocale(request_locale): RequestLocale,
    Query(params): Query<LookupParams>,
) -> Json<MessageResponse> {
    let locale = params.locale.as_deref().map(Locale::new).unwrap_or(request_locale);
    let args = split_args(params.args.as_deref());
    let message = state.messages.message(&locale, &message_code, &args);

    Json(MessageResponse {
        message_code,
        locale: locale.to_string(),
        args,
        message,
    })
}

/// GET /messages/compare/{messageCode}?args=
pub async fn compare_message(
    State(state): State<AppState>,
    Path(message_code): Path<String>,
    Query(params): Query<LookupParams>,
) -> Json<Messages> {
    let args = split_args(params.args.as_deref());
    let lookup = |tag: &str| state.messages.message(&Locale::new(tag), &message_code, &args);

    Json(BTreeMap::from([
        ("japanese", lookup("ja")),
        ("english", lookup("en")),
        ("korean", lookup("ko")),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_args() {
        assert_eq!(split_args(Some("a, b,,c")), vec!["a", "b", "c"]);
        assert!(split_args(Some("")).is_empty());
        assert!(split_args(None).is_empty());
    }
}

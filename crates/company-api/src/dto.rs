//! Request bodies for the company endpoints

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use company_core::domain::{CompanyChanges, FieldUpdate, NewCompany};

/// Create request. Missing `name`/`code` deserialize as empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    #[serde(default)]
    #[validate(length(min = 1, code = "name.required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, code = "code.required"))]
    pub code: String,

    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub established_date: Option<NaiveDate>,
    pub employee_count: Option<i32>,
}

impl CreateCompanyRequest {
    /// Copy with `name` and `code` trimmed, for the blank checks. The
    /// request itself is stored as sent.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            ..self.clone()
        }
    }
}

impl From<CreateCompanyRequest> for NewCompany {
    fn from(request: CreateCompanyRequest) -> Self {
        NewCompany {
            name: request.name,
            code: request.code,
            industry: request.industry,
            website: request.website,
            phone: request.phone,
            address: request.address,
            established_date: request.established_date,
            employee_count: request.employee_count,
        }
    }
}

/// Update request. Absent or `null` fields are left unchanged; `code` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCompanyRequest {
    pub name: FieldUpdate<String>,
    pub industry: FieldUpdate<String>,
    pub website: FieldUpdate<String>,
    pub phone: FieldUpdate<String>,
    pub address: FieldUpdate<String>,
    pub established_date: FieldUpdate<NaiveDate>,
    pub employee_count: FieldUpdate<i32>,
}

impl From<UpdateCompanyRequest> for CompanyChanges {
    fn from(request: UpdateCompanyRequest) -> Self {
        CompanyChanges {
            name: request.name,
            industry: request.industry,
            website: request.website,
            phone: request.phone,
            address: request.address,
            established_date: request.established_date,
            employee_count: request.employee_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_blank_fields_fail() {
        let request: CreateCompanyRequest =
            serde_json::from_str(r#"{"name": "   ", "employeeCount": 10}"#).unwrap();
        let errors = request.trimmed().validate().unwrap_err();
        assert_eq!(request.name, "   ");
        let fields = errors.field_errors();

        assert_eq!(fields["name"][0].code, "name.required");
        assert_eq!(fields["code"][0].code, "code.required");
    }

    #[test]
    fn test_padded_code_passes_and_is_kept() {
        let request: CreateCompanyRequest =
            serde_json::from_str(r#"{"name": " Acme ", "code": " ACME1 "}"#).unwrap();
        assert!(request.trimmed().validate().is_ok());

        let new_company = NewCompany::from(request);
        assert_eq!(new_company.name, " Acme ");
        assert_eq!(new_company.code, " ACME1 ");
    }

    #[test]
    fn test_create_request_camel_case() {
        let request: CreateCompanyRequest = serde_json::from_str(
            r#"{"name": "Acme", "code": "ACME1", "establishedDate": "2001-02-03", "employeeCount": 5}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let new_company = NewCompany::from(request);
        assert_eq!(new_company.established_date, NaiveDate::from_ymd_opt(2001, 2, 3));
        assert_eq!(new_company.employee_count, Some(5));
    }

    #[test]
    fn test_update_request_keeps_absent_and_null() {
        let request: UpdateCompanyRequest = serde_json::from_str(
            r#"{"name": "Renamed", "website": null, "code": "IGNORED"}"#,
        )
        .unwrap();
        let changes = CompanyChanges::from(request);

        assert_eq!(changes.name, FieldUpdate::Set("Renamed".to_string()));
        assert_eq!(changes.website, FieldUpdate::Keep);
        assert_eq!(changes.employee_count, FieldUpdate::Keep);
    }
}

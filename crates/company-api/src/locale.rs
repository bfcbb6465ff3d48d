//! Request locale resolution
//!
//! `?lang=` wins, then the best `Accept-Language` entry whose language is
//! supported, then the configured default.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;

use company_core::i18n::Locale;
use company_shared::config::I18nSettings;
use company_shared::constants::LANG_QUERY_PARAM;

use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct LocaleResolver {
    default_locale: Locale,
    supported: Vec<Locale>,
}

impl LocaleResolver {
    pub fn new(settings: &I18nSettings) -> Self {
        Self {
            default_locale: Locale::new(&settings.default_locale),
            supported: settings.supported_locales.iter().map(Locale::new).collect(),
        }
    }

    pub fn resolve(&self, lang: Option<&str>, accept_language: Option<&str>) -> Locale {
        if let Some(tag) = lang.map(str::trim).filter(|tag| !tag.is_empty()) {
            return Locale::new(tag);
        }

        accept_language
            .and_then(|header| self.match_accept_language(header))
            .unwrap_or_else(|| self.default_locale.clone())
    }

    fn match_accept_language(&self, header: &str) -> Option<Locale> {
        let mut ranges: Vec<(&str, f32)> = header
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                let quality = parts
                    .filter_map(|param| param.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (!tag.is_empty() && tag != "*" && quality > 0.0).then_some((tag, quality))
            })
            .collect();

        // stable sort keeps header order among equal weights
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges.into_iter().find_map(|(tag, _)| {
            let requested = Locale::new(tag);
            self.supported
                .iter()
                .find(|supported| supported.language() == requested.language())
                .cloned()
        })
    }
}

/// Locale of the current request.
#[derive(Debug, Clone)]
pub struct RequestLocale(pub Locale);

impl FromRequestParts<AppState> for RequestLocale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();
        let accept_language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        let locale = state
            .locales
            .resolve(query.get(LANG_QUERY_PARAM).map(String::as_str), accept_language);

        Ok(RequestLocale(locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LocaleResolver {
        LocaleResolver::new(&I18nSettings {
            default_locale: "ja".to_string(),
            supported_locales: vec!["ja".to_string(), "en".to_string(), "ko".to_string()],
        })
    }

    #[test]
    fn test_lang_param_wins() {
        let locale = resolver().resolve(Some("ko"), Some("en-US,en;q=0.9"));
        assert_eq!(locale, Locale::new("ko"));
    }

    #[test]
    fn test_accept_language_by_weight() {
        let locale = resolver().resolve(None, Some("fr;q=0.9, ko;q=0.5, en-GB;q=0.8"));
        assert_eq!(locale, Locale::new("en"));
    }

    #[test]
    fn test_unsupported_falls_back_to_default() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(None, Some("fr-FR, de;q=0.5")), Locale::new("ja"));
        assert_eq!(resolver.resolve(Some("  "), None), Locale::new("ja"));
        assert_eq!(resolver.resolve(None, Some("en;q=0, *")), Locale::new("ja"));
    }
}

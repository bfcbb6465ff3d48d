// ============================================================================
// Company Infrastructure - Message Bundles
// File: crates/company-infrastructure/src/i18n/bundle.rs
// ============================================================================
//! TOML message bundles, one per language, flattened to dotted codes.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;
use tracing::debug;

use company_core::i18n::{Locale, MessageLookup};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

const EMBEDDED_BUNDLES: [(&str, &str); 3] = [
    ("ja", include_str!("../../messages/ja.toml")),
    ("en", include_str!("../../messages/en.toml")),
    ("ko", include_str!("../../messages/ko.toml")),
];

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Invalid message bundle for '{language}': {source}")]
    Parse {
        language: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolution order: the locale's language, then the default language, then
/// the code itself.
#[derive(Debug, Clone)]
pub struct BundleMessageSource {
    bundles: HashMap<String, HashMap<String, String>>,
    default_language: String,
}

impl BundleMessageSource {
    /// Bundles shipped with the crate (`ja`, `en`, `ko`).
    pub fn embedded(default_locale: &Locale) -> Result<Self, BundleError> {
        Self::from_sources(EMBEDDED_BUNDLES, default_locale)
    }

    pub fn from_sources<'a, I>(sources: I, default_locale: &Locale) -> Result<Self, BundleError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut bundles = HashMap::new();

        for (language, source) in sources {
            let table: toml::Table = toml::from_str(source).map_err(|e| BundleError::Parse {
                language: language.to_string(),
                source: e,
            })?;

            let mut messages = HashMap::new();
            flatten("", &table, &mut messages);
            debug!("Loaded {} messages for '{}'", messages.len(), language);

            bundles.insert(Locale::new(language).language().to_string(), messages);
        }

        Ok(Self {
            bundles,
            default_language: default_locale.language().to_string(),
        })
    }

    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Raw template for a code, before placeholder substitution.
    pub fn resolve(&self, code: &str, locale: &Locale) -> Option<&str> {
        [locale.language(), self.default_language.as_str()]
            .into_iter()
            .filter_map(|language| self.bundles.get(language))
            .find_map(|bundle| bundle.get(code))
            .map(String::as_str)
    }
}

impl MessageLookup for BundleMessageSource {
    fn lookup(&self, code: &str, locale: &Locale, args: &[String]) -> String {
        match self.resolve(code, locale) {
            Some(template) => format_message(template, args),
            None => {
                debug!("No message for code '{}' in locale '{}'", code, locale);
                code.to_string()
            }
        }
    }
}

/// Replaces `{0}`, `{1}`, ... with positional args. Placeholders without a
/// matching arg are left untouched.
pub fn format_message(template: &str, args: &[String]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let code = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            toml::Value::Table(nested) => flatten(&code, nested, out),
            toml::Value::String(text) => {
                out.insert(code, text.clone());
            }
            other => {
                out.insert(code, other.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> BundleMessageSource {
        BundleMessageSource::embedded(&Locale::new("ja")).unwrap()
    }

    #[test]
    fn test_embedded_bundles_load() {
        assert_eq!(source().languages(), vec!["en", "ja", "ko"]);
    }

    #[test]
    fn test_lookup_in_requested_language() {
        let text = source().lookup(
            "validation.company.code.duplicate",
            &Locale::new("en"),
            &["ACME1".to_string()],
        );
        assert_eq!(text, "Company code ACME1 is already in use");
    }

    #[test]
    fn test_region_falls_back_to_language() {
        let text = source().lookup("error.business.company.not.found", &Locale::new("en-US"), &["7".to_string()]);
        assert_eq!(text, "Company not found: ID=7");
    }

    #[test]
    fn test_missing_key_falls_back_to_default_language() {
        // ko has no "restored" entry
        let text = source().lookup("business.company.restored", &Locale::new("ko"), &["Acme".to_string()]);
        assert_eq!(text, "企業「Acme」を復元しました");

        let text = source().lookup("error.system.general", &Locale::new("fr"), &[]);
        assert_eq!(text, "システムエラーが発生しました");
    }

    #[test]
    fn test_unknown_code_returns_code() {
        let text = source().lookup("no.such.message", &Locale::new("en"), &[]);
        assert_eq!(text, "no.such.message");
    }

    #[test]
    fn test_format_message_placeholders() {
        let args = vec!["a".to_string(), "b".to_string()];
        assert_eq!(format_message("{1}-{0}-{1}", &args), "b-a-b");
        assert_eq!(format_message("{0} and {2}", &args), "a and {2}");
        assert_eq!(format_message("no placeholders", &[]), "no placeholders");
    }

    #[test]
    fn test_invalid_bundle_is_reported() {
        let result = BundleMessageSource::from_sources([("en", "not = [valid")], &Locale::new("en"));
        assert!(matches!(result, Err(BundleError::Parse { language, .. }) if language == "en"));
    }
}

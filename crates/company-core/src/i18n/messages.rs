//! Message lookup port and prefixed helpers

use std::sync::Arc;

use super::locale::Locale;

/// Resolves a message code for a locale. Implementations return `code`
/// unchanged when no translation exists.
#[cfg_attr(test, mockall::automock)]
pub trait MessageLookup: Send + Sync {
    fn lookup(&self, code: &str, locale: &Locale, args: &[String]) -> String;
}

/// Groups message codes by prefix so callers only name the tail of a code.
pub struct MessageService<M: ?Sized> {
    source: Arc<M>,
}

impl<M: ?Sized> Clone for MessageService<M> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<M: MessageLookup + ?Sized> MessageService<M> {
    pub fn new(source: Arc<M>) -> Self {
        Self { source }
    }

    pub fn message(&self, locale: &Locale, code: &str, args: &[String]) -> String {
        self.source.lookup(code, locale, args)
    }

    // === Validation ===

    pub fn validation(&self, locale: &Locale, code: &str, args: &[String]) -> String {
        self.message(locale, &format!("validation.{}", code), args)
    }

    pub fn company_validation(&self, locale: &Locale, code: &str, args: &[String]) -> String {
        self.message(locale, &format!("validation.company.{}", code), args)
    }

    // === Business ===

    pub fn business(&self, locale: &Locale, code: &str, args: &[String]) -> String {
        self.message(locale, &format!("business.{}", code), args)
    }

    pub fn company_business(&self, locale: &Locale, code: &str, args: &[String]) -> String {
        self.message(locale, &format!("business.company.{}", code), args)
    }

    // === Errors ===

    pub fn error(&self, locale: &Locale, code: &str, args: &[String]) -> String {
        self.message(locale, &format!("error.{}", code), args)
    }

    pub fn system_error(&self, locale: &Locale, code: &str, args: &[String]) -> String {
        self.message(locale, &format!("error.system.{}", code), args)
    }

    pub fn business_error(&self, locale: &Locale, code: &str, args: &[String]) -> String {
        self.message(locale, &format!("error.business.{}", code), args)
    }
}

use std::sync::Arc;

use company_core::i18n::{MessageLookup, MessageService};
use company_core::repositories::CompanyStore;
use company_core::services::CompanyService;
use company_shared::config::AppConfig;

use crate::locale::LocaleResolver;

pub type DynCompanyService = CompanyService<dyn CompanyStore, dyn MessageLookup>;

#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<DynCompanyService>,
    pub messages: MessageService<dyn MessageLookup>,
    pub locales: Arc<LocaleResolver>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CompanyStore>,
        message_source: Arc<dyn MessageLookup>,
    ) -> Self {
        let messages = MessageService::new(message_source);
        let companies = CompanyService::new(store, messages.clone());
        let locales = LocaleResolver::new(&config.i18n);

        Self {
            companies: Arc::new(companies),
            messages,
            locales: Arc::new(locales),
            config: Arc::new(config),
        }
    }
}

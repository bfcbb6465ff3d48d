//! Application-wide constants

pub const DEFAULT_LOCALE: &str = "ja";
pub const SUPPORTED_LOCALES: [&str; 3] = ["ja", "en", "ko"];
pub const LANG_QUERY_PARAM: &str = "lang";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;
pub const LOG_FILE_PREFIX: &str = "company-server.log";

//! Locale passed explicitly into every message lookup

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A BCP 47 style language tag such as `ja`, `en` or `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Normalizes `en_us` / `EN-us` to `en-US`.
    pub fn new(tag: impl AsRef<str>) -> Self {
        let normalized = tag
            .as_ref()
            .trim()
            .split(['-', '_'])
            .filter(|part| !part.is_empty())
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    part.to_ascii_lowercase()
                } else if part.len() == 2 {
                    part.to_ascii_uppercase()
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("-");
        Self(normalized)
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Primary language subtag, e.g. `en` for `en-US`.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    pub fn is_japanese(&self) -> bool {
        self.language() == "ja"
    }

    pub fn is_english(&self) -> bool {
        self.language() == "en"
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Locale::new(s))
    }
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        Locale::new(value)
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Locale::new(value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

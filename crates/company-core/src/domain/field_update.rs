//! Per-field update wrapper
//!
//! Distinguishes "leave this field alone" from "write this value", so a
//! partial update never has to overload `None` with two meanings.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Keep the stored value.
    Keep,
    /// Replace the stored value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Keep => None,
        }
    }

    /// Resolves against a required field.
    pub fn apply(self, current: T) -> T {
        match self {
            FieldUpdate::Set(value) => value,
            FieldUpdate::Keep => current,
        }
    }

    /// Resolves against an optional field.
    pub fn apply_optional(self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Keep => current,
        }
    }
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Keep
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldUpdate::Set(v),
            None => FieldUpdate::Keep,
        }
    }
}

// JSON `null` means "not supplied"; a missing key is handled by `#[serde(default)]`.
impl<'de, T> Deserialize<'de> for FieldUpdate<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(FieldUpdate::from)
    }
}

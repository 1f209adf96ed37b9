/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::RecordStatus;

/// One renewable item. The suffix identifies it towards the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub suffix: String,
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Display-only attributes, passed through untouched
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Record {
    pub fn new(suffix: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            suffix: suffix.into(),
            status,
            expires_at: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.suffix, self.status)?;
        if let Some(expires_at) = self.expires_at {
            write!(f, " expires {}", expires_at.format("%Y-%m-%d"))?;
        }
        for (key, value) in &self.attributes {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// A renewal choice. `short_text` is what branching logic looks at;
/// `rich_text` is only ever shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewOption {
    pub value: String,
    pub short_text: String,
    #[serde(default)]
    pub rich_text: String,
}

impl RenewOption {
    pub fn new(value: impl Into<String>, short_text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            short_text: short_text.into(),
            rich_text: String::new(),
        }
    }
}

impl fmt::Display for RenewOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOption {
    pub value: String,
    pub text: String,
}

impl AccountOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for AccountOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A pair of fetched display labels (list header, popup text)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPair {
    pub label1: String,
    pub label2: String,
}

impl LabelPair {
    pub fn new(label1: impl Into<String>, label2: impl Into<String>) -> Self {
        Self {
            label1: label1.into(),
            label2: label2.into(),
        }
    }
}

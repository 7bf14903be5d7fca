use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const TICKET_ID: &str = "ticket_id";
pub const UPDATED: &str = "updated";
pub const CONTEXT_KEY: &str = "last_specialised_queue";
pub const REVIEWER: &str = "reviewer";
pub const QUALITY_REVIEWER: &str = "quality_reviewer";
pub const CHAT_LINK: &str = "chat_link";

/// A single cell of a record. Uploaded columns are always text; the
/// session marker `updated` is the only boolean the app writes itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            FieldValue::Flag(_) => None,
        }
    }

    /// Empty text and `false` count as "not set".
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(value) => !value.is_empty(),
            FieldValue::Flag(flag) => *flag,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => write!(f, "{value}"),
            FieldValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

pub type FieldMap = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: FieldMap,
}

impl Record {
    pub fn ticket_id(&self) -> &str {
        self.text(TICKET_ID)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text value of `name`, or `""` when the field is missing or boolean.
    pub fn text(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(FieldValue::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Overlays `edited` on the current values; edited values win.
    pub fn merge(&mut self, edited: &FieldMap) {
        for (name, value) in edited {
            self.fields.insert(name.clone(), value.clone());
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

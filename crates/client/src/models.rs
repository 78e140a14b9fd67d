use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Application identifier as issued by the backend
///
/// The backend has used both numeric and string ids, so either form is accepted.
/// Ids taken from an inbound URL are never validated here; the backend decides
/// whether they identify anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplicationId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ApplicationId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<String> for ApplicationId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for ApplicationId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Application record as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owners: String,
    #[serde(rename = "teamName", default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(rename = "isValid", default, skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
    /// Fields this crate does not know about, kept so nothing is lost in transit
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Application {
    /// Read an application out of a backend JSON payload, if it looks like one
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Payload for creating or updating an application (an application minus its id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owners: String,
}

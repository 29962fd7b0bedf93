//! Identifier mapping configuration shipped with the map format's mod

use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::ids::IdentifierDomain;

/// Configuration tree describing how legacy ids map to content symbols
#[derive(Debug, Clone, PartialEq)]
pub struct MappingConfig {
    root: Value,
}

impl MappingConfig {
    pub fn from_value(root: Value) -> Result<Self> {
        match root {
            Value::Object(_) => Ok(Self { root }),
            Value::Null => Ok(Self::empty()),
            other => Err(Error::MalformedConfig {
                found: json_kind(&other),
            }),
        }
    }

    pub fn parse(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::parse(&json)
    }

    pub fn empty() -> Self {
        Self {
            root: Value::Object(Default::default()),
        }
    }

    /// Top-level section of a domain, if present
    pub fn section(&self, domain: IdentifierDomain) -> Option<&Value> {
        self.root.get(domain.config_key())
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// Entries of an object section in key order.
///
/// A missing or `null` section has no entries.
pub(crate) fn section_entries<'v>(
    origin: &str,
    section: &str,
    value: Option<&'v Value>,
) -> Result<Vec<(&'v str, &'v Value)>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
        Some(other) => Err(Error::MalformedSection {
            origin: origin.to_string(),
            section: section.to_string(),
            found: json_kind(other),
        }),
    }
}

/// Legacy numeric id stored as a JSON integer
pub(crate) fn legacy_id(origin: &str, domain: IdentifierDomain, key: &str, value: &Value) -> Result<i32> {
    let malformed = |reason: String| Error::MalformedEntry {
        origin: origin.to_string(),
        domain,
        key: key.to_string(),
        reason,
    };

    let n = value
        .as_i64()
        .ok_or_else(|| malformed(format!("expected an integer legacy id, found {}", json_kind(value))))?;
    i32::try_from(n).map_err(|_| malformed(format!("legacy id {} is out of range", n)))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

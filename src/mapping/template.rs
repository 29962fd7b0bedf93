use ahash::AHashMap;
use serde_json::Value;

use super::config::{json_kind, section_entries};
use crate::content::ResourceExistenceChecker;
use crate::error::{Error, Result};
use crate::ids::IdentifierDomain;

/// Legacy animation file name (lower-cased) -> engine animation resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateNameTable {
    entries: AHashMap<String, String>,
    missing_resources: usize,
}

impl TemplateNameTable {
    /// Build from the `templates` section, `{ "<engine name>": "<legacy name>" }`.
    ///
    /// Engine resources that do not exist are reported but still mapped.
    pub fn build(resources: &dyn ResourceExistenceChecker, origin: &str, section: Option<&Value>) -> Result<Self> {
        let domain = IdentifierDomain::ObjectTemplateName;
        let mut table = Self::default();

        for (engine_name, value) in section_entries(origin, domain.config_key(), section)? {
            let legacy_name = value.as_str().ok_or_else(|| Error::MalformedEntry {
                origin: origin.to_string(),
                domain,
                key: engine_name.to_string(),
                reason: format!("expected a legacy animation name, found {}", json_kind(value)),
            })?;

            if !resources.animation_exists(engine_name) {
                tracing::warn!(origin, template = engine_name, "template animation file was not found");
                table.missing_resources += 1;
            }

            if let Some(previous) = table.entries.insert(legacy_name.to_lowercase(), engine_name.to_string()) {
                tracing::warn!(
                    origin,
                    legacy = legacy_name,
                    previous = previous.as_str(),
                    template = engine_name,
                    "legacy animation mapped more than once, keeping the later entry"
                );
            }
        }

        tracing::debug!(origin, entries = table.len(), missing = table.missing_resources, "built template table");
        Ok(table)
    }

    /// Engine animation for a legacy animation name, ignoring case
    pub fn get(&self, legacy_name: &str) -> Option<&str> {
        self.entries.get(&legacy_name.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mapped engine resources that were absent when the table was built
    pub fn missing_resources(&self) -> usize {
        self.missing_resources
    }

    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self.entries.iter().map(|(l, e)| (l.as_str(), e.as_str())).collect();
        pairs.sort();
        pairs
    }
}

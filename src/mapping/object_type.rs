use ahash::AHashMap;
use serde_json::Value;

use super::config::{json_kind, section_entries};
use crate::content::ObjectTypeHandlerRegistry;
use crate::error::{Error, Result};
use crate::ids::{IdentifierDomain, ObjectTypeKey};

/// Legacy (type, subtype) -> engine (type, subtype)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectTypeTable {
    entries: AHashMap<ObjectTypeKey, ObjectTypeKey>,
}

impl ObjectTypeTable {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ObjectTypeKey, ObjectTypeKey)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Build from the `objects` section.
    ///
    /// ```json
    /// "objects": {
    ///   "core:windmill": [112, 0],
    ///   "core:mine": { "core:goldMine": [53, 6], "core:sawmill": [53, 0] }
    /// }
    /// ```
    ///
    /// A flat entry names a handler whose type and subtype share the symbol.
    /// The engine key is the index pair of the matching handler.
    pub fn build(
        registry: &dyn ObjectTypeHandlerRegistry,
        scope: &str,
        origin: &str,
        section: Option<&Value>,
    ) -> Result<Self> {
        let section_name = IdentifierDomain::ObjectType.config_key();
        let mut table = Self::default();

        for (primary, value) in section_entries(origin, section_name, section)? {
            match value {
                Value::Object(inner) => {
                    for (secondary, pair) in inner {
                        let legacy = legacy_pair(origin, &format!("{}.{}", primary, secondary), pair)?;
                        table.insert_resolved(registry, scope, origin, primary, secondary, legacy)?;
                    }
                }
                _ => {
                    let legacy = legacy_pair(origin, primary, value)?;
                    table.insert_resolved(registry, scope, origin, primary, primary, legacy)?;
                }
            }
        }

        tracing::debug!(origin, entries = table.len(), "built object type table");
        Ok(table)
    }

    fn insert_resolved(
        &mut self,
        registry: &dyn ObjectTypeHandlerRegistry,
        scope: &str,
        origin: &str,
        primary: &str,
        secondary: &str,
        legacy: ObjectTypeKey,
    ) -> Result<()> {
        let handler = registry
            .handler_for(scope, primary, secondary)
            .ok_or_else(|| Error::UnknownObjectHandler {
                origin: origin.to_string(),
                primary: primary.to_string(),
                secondary: secondary.to_string(),
            })?;

        let target = handler.type_key();
        if let Some(previous) = self.entries.insert(legacy, target) {
            tracing::warn!(
                origin,
                %legacy,
                %previous,
                primary,
                secondary,
                "legacy object type mapped more than once, keeping the later entry"
            );
        }
        Ok(())
    }

    pub fn get(&self, legacy: ObjectTypeKey) -> Option<ObjectTypeKey> {
        self.entries.get(&legacy).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sorted(&self) -> Vec<(ObjectTypeKey, ObjectTypeKey)> {
        let mut pairs: Vec<_> = self.entries.iter().map(|(s, t)| (*s, *t)).collect();
        pairs.sort();
        pairs
    }
}

/// Legacy key written as `[type, subtype]`, or a bare `type` with subtype 0
fn legacy_pair(origin: &str, key: &str, value: &Value) -> Result<ObjectTypeKey> {
    let malformed = |reason: String| Error::MalformedEntry {
        origin: origin.to_string(),
        domain: IdentifierDomain::ObjectType,
        key: key.to_string(),
        reason,
    };
    let int = |v: &Value| v.as_i64().and_then(|n| i32::try_from(n).ok());

    match value {
        Value::Number(_) => {
            let primary = int(value).ok_or_else(|| malformed(format!("{} is not a valid object type", value)))?;
            Ok(ObjectTypeKey::new(primary, 0))
        }
        Value::Array(items) => match items.as_slice() {
            [primary, secondary] => match (int(primary), int(secondary)) {
                (Some(p), Some(s)) => Ok(ObjectTypeKey::new(p, s)),
                _ => Err(malformed(format!("{} is not a pair of integers", value))),
            },
            _ => Err(malformed(format!("expected [type, subtype], found {} elements", items.len()))),
        },
        other => Err(malformed(format!("expected [type, subtype], found {}", json_kind(other)))),
    }
}

//! Content set described by a JSON document
//!
//! ```json
//! {
//!   "identifiers": { "creature": { "core:pikeman": 0, "mod:mySoldier": 1007 } },
//!   "objects": { "core:mine": { "core:goldMine": { "index": 53, "subIndex": 6 } } },
//!   "animations": ["AVXmine0.def"]
//! }
//! ```

use std::path::Path;

use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::sprites::animation_key;
use super::{IdentifierResolver, ObjectTypeHandler, ObjectTypeHandlerRegistry, ResourceExistenceChecker};
use crate::error::Result;
use crate::ids::{FactionId, MapObjectId};

/// Mod id of the base game
const CORE_MOD: &str = "core";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    identifiers: IndexMap<String, IndexMap<String, i32>>,
    #[serde(default)]
    objects: IndexMap<String, IndexMap<String, HandlerEntry>>,
    #[serde(default)]
    animations: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HandlerEntry {
    index: i32,
    #[serde(default)]
    sub_index: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogObjectHandler {
    pub index: MapObjectId,
    pub sub_index: i32,
}

impl ObjectTypeHandler for CatalogObjectHandler {
    fn index(&self) -> MapObjectId {
        self.index
    }

    fn sub_index(&self) -> i32 {
        self.sub_index
    }
}

/// Flat identifier catalog of one loaded content set.
///
/// Every symbol is visible from every scope. Lookups accept both qualified
/// (`core:pikeman`) and unqualified (`pikeman`) names for base game content.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    identifiers: AHashMap<String, AHashMap<String, i32>>,
    faction_keys: AHashMap<i32, String>,
    objects: AHashMap<String, AHashMap<String, CatalogObjectHandler>>,
    animations: AHashSet<String>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let file: CatalogFile = serde_json::from_value(value)?;
        Ok(Self::from_file(file))
    }

    pub fn parse(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::parse(&json)
    }

    fn from_file(file: CatalogFile) -> Self {
        let mut catalog = Self::new();
        for (namespace, entries) in file.identifiers {
            for (name, id) in entries {
                catalog.add_identifier(&namespace, &name, id);
            }
        }
        for (primary, subtypes) in file.objects {
            for (secondary, entry) in subtypes {
                catalog.add_object(&primary, &secondary, entry.index, entry.sub_index);
            }
        }
        for name in file.animations {
            catalog.add_animation(&name);
        }
        catalog
    }

    pub fn add_identifier(&mut self, namespace: &str, name: &str, id: i32) {
        if namespace == "faction" {
            let key = name.strip_prefix("core:").unwrap_or(name);
            self.faction_keys.entry(id).or_insert_with(|| key.to_string());
        }
        self.identifiers
            .entry(namespace.to_string())
            .or_default()
            .insert(name.to_string(), id);
    }

    pub fn add_object(&mut self, primary: &str, secondary: &str, index: i32, sub_index: i32) {
        self.objects.entry(primary.to_string()).or_default().insert(
            secondary.to_string(),
            CatalogObjectHandler {
                index: MapObjectId(index),
                sub_index,
            },
        );
    }

    pub fn add_animation(&mut self, name: &str) {
        self.animations.insert(animation_key(name));
    }

    pub fn with_identifier(mut self, namespace: &str, name: &str, id: i32) -> Self {
        self.add_identifier(namespace, name, id);
        self
    }

    pub fn with_object(mut self, primary: &str, secondary: &str, index: i32, sub_index: i32) -> Self {
        self.add_object(primary, secondary, index, sub_index);
        self
    }

    pub fn with_animation(mut self, name: &str) -> Self {
        self.add_animation(name);
        self
    }

    pub fn identifier_count(&self) -> usize {
        self.identifiers.values().map(|ns| ns.len()).sum()
    }
}

/// Find `name` as written, then with the base game prefix added or removed
fn lookup<'m, V>(map: &'m AHashMap<String, V>, name: &str) -> Option<&'m V> {
    if let Some(v) = map.get(name) {
        return Some(v);
    }
    match name.split_once(':') {
        Some((CORE_MOD, bare)) => map.get(bare),
        Some(_) => None,
        None => map.get(&format!("{}:{}", CORE_MOD, name)),
    }
}

impl IdentifierResolver for ContentCatalog {
    fn resolve(&self, _scope: &str, namespace: &str, name: &str) -> Option<i32> {
        lookup(self.identifiers.get(namespace)?, name).copied()
    }

    fn faction_key(&self, faction: FactionId) -> Option<String> {
        self.faction_keys.get(&faction.0).cloned()
    }
}

impl ObjectTypeHandlerRegistry for ContentCatalog {
    fn handler_for(&self, _scope: &str, primary: &str, secondary: &str) -> Option<&dyn ObjectTypeHandler> {
        let subtypes = lookup(&self.objects, primary)?;
        lookup(subtypes, secondary).map(|h| h as &dyn ObjectTypeHandler)
    }
}

impl ResourceExistenceChecker for ContentCatalog {
    fn animation_exists(&self, name: &str) -> bool {
        self.animations.contains(&animation_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SCOPE_GAME;
    use crate::ids::ObjectTypeKey;
    use serde_json::json;

    fn catalog() -> ContentCatalog {
        ContentCatalog::from_value(json!({
            "identifiers": {
                "faction": { "core:castle": 0, "mod:cove": 9 },
                "creature": { "core:pikeman": 0, "mod:mySoldier": 1007 },
                "building.castle": { "fort": 7 }
            },
            "objects": {
                "core:mine": { "core:goldMine": { "index": 53, "subIndex": 6 } },
                "windmill": { "windmill": { "index": 112 } }
            },
            "animations": ["AVXmine0.def"]
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_qualified_and_bare() {
        let catalog = catalog();
        assert_eq!(catalog.resolve(SCOPE_GAME, "creature", "core:pikeman"), Some(0));
        assert_eq!(catalog.resolve(SCOPE_GAME, "creature", "pikeman"), Some(0));
        assert_eq!(catalog.resolve(SCOPE_GAME, "creature", "mod:mySoldier"), Some(1007));
        assert_eq!(catalog.resolve(SCOPE_GAME, "creature", "mySoldier"), None);
        assert_eq!(catalog.resolve(SCOPE_GAME, "building.castle", "core:fort"), Some(7));
        assert_eq!(catalog.resolve(SCOPE_GAME, "artifact", "core:grail"), None);
        assert_eq!(catalog.identifier_count(), 5);
    }

    #[test]
    fn test_faction_keys() {
        let catalog = catalog();
        assert_eq!(catalog.faction_key(FactionId(0)).as_deref(), Some("castle"));
        assert_eq!(catalog.faction_key(FactionId(9)).as_deref(), Some("mod:cove"));
        assert_eq!(catalog.faction_key(FactionId(3)), None);
    }

    #[test]
    fn test_object_handlers() {
        let catalog = catalog();
        let mine = catalog.handler_for(SCOPE_GAME, "mine", "goldMine").unwrap();
        assert_eq!(mine.type_key(), ObjectTypeKey::new(53, 6));

        let windmill = catalog.handler_for(SCOPE_GAME, "core:windmill", "core:windmill").unwrap();
        assert_eq!(windmill.type_key(), ObjectTypeKey::new(112, 0));

        assert!(catalog.handler_for(SCOPE_GAME, "mine", "mithrilMine").is_none());
    }

    #[test]
    fn test_animations() {
        let catalog = catalog();
        assert!(catalog.animation_exists("avxmine0.def"));
        assert!(catalog.animation_exists("AVXMINE0"));
        assert!(!catalog.animation_exists("AVXmine1.def"));

        let catalog = ContentCatalog::new().with_animation("mod/beacon.json").with_animation("dragon.def");
        assert!(catalog.animation_exists("MOD/beacon.def"));
        assert!(!catalog.animation_exists("beacon.json"));
        assert!(!catalog.animation_exists("other/dragon.json"));
    }

    #[test]
    fn test_rejects_malformed_catalog() {
        assert!(ContentCatalog::parse(r#"{"identifiers": {"creature": {"core:pikeman": "zero"}}}"#).is_err());
        assert!(ContentCatalog::parse("{}").unwrap().identifier_count() == 0);
    }
}

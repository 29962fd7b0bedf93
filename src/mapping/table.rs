use ahash::AHashMap;
use serde_json::Value;

use super::config::{legacy_id, section_entries};
use crate::content::{IdentifierResolver, SCOPE_GAME};
use crate::error::{Error, Result};
use crate::ids::{IdentifierDomain, RawIdentifier};

/// Legacy id -> engine id table of one domain.
///
/// Filled once while the mapping is loaded, read-only afterwards.
#[derive(Debug, Clone)]
pub struct DomainTable<K> {
    domain: IdentifierDomain,
    entries: AHashMap<K, K>,
}

impl<K: RawIdentifier> DomainTable<K> {
    pub fn new(domain: IdentifierDomain) -> Self {
        Self {
            domain,
            entries: AHashMap::new(),
        }
    }

    pub fn from_pairs(domain: IdentifierDomain, pairs: impl IntoIterator<Item = (K, K)>) -> Self {
        Self {
            domain,
            entries: pairs.into_iter().collect(),
        }
    }

    pub fn domain(&self) -> IdentifierDomain {
        self.domain
    }

    pub fn get(&self, source: K) -> Option<K> {
        self.entries.get(&source).copied()
    }

    pub fn contains(&self, source: K) -> bool {
        self.entries.contains_key(&source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by legacy id
    pub fn sorted(&self) -> Vec<(K, K)> {
        let mut pairs: Vec<_> = self.entries.iter().map(|(s, t)| (*s, *t)).collect();
        pairs.sort_by_key(|(s, _)| s.raw());
        pairs
    }

    fn insert(&mut self, source: K, target: K) -> Option<K> {
        self.entries.insert(source, target)
    }
}

/// Builds domain tables by resolving configured symbols
pub struct DomainTableBuilder<'a> {
    resolver: &'a dyn IdentifierResolver,
    scope: &'a str,
    origin: &'a str,
}

impl<'a> DomainTableBuilder<'a> {
    pub fn new(resolver: &'a dyn IdentifierResolver, origin: &'a str) -> Self {
        Self {
            resolver,
            scope: SCOPE_GAME,
            origin,
        }
    }

    pub fn with_scope(mut self, scope: &'a str) -> Self {
        self.scope = scope;
        self
    }

    pub fn resolver(&self) -> &'a dyn IdentifierResolver {
        self.resolver
    }

    pub fn scope(&self) -> &'a str {
        self.scope
    }

    pub fn origin(&self) -> &'a str {
        self.origin
    }

    /// Resolve one symbol, failing with the offending entry described by `entry`
    pub fn resolve(
        &self,
        domain: IdentifierDomain,
        namespace: &str,
        symbol: &str,
        entry: impl FnOnce() -> String,
    ) -> Result<i32> {
        self.resolver
            .resolve(self.scope, namespace, symbol)
            .ok_or_else(|| Error::UnresolvedIdentifier {
                origin: self.origin.to_string(),
                domain,
                namespace: namespace.to_string(),
                symbol: symbol.to_string(),
                entry: entry(),
            })
    }

    /// Build a table from a `{ "<symbol>": <legacy id> }` section
    pub fn build<K: RawIdentifier>(
        &self,
        domain: IdentifierDomain,
        section_name: &str,
        section: Option<&Value>,
        namespace: &str,
    ) -> Result<DomainTable<K>> {
        let mut table = DomainTable::new(domain);
        self.extend(&mut table, section_name, section, namespace)?;
        Ok(table)
    }

    /// Add the entries of a section to an existing table
    pub fn extend<K: RawIdentifier>(
        &self,
        table: &mut DomainTable<K>,
        section_name: &str,
        section: Option<&Value>,
        namespace: &str,
    ) -> Result<()> {
        let domain = table.domain();

        for (symbol, value) in section_entries(self.origin, section_name, section)? {
            let source = legacy_id(self.origin, domain, symbol, value)?;
            let target = self.resolve(domain, namespace, symbol, || format!("{}.{} = {}", section_name, symbol, value))?;

            if let Some(previous) = table.insert(K::from_raw(source), K::from_raw(target)) {
                tracing::warn!(
                    origin = self.origin,
                    %domain,
                    legacy = source,
                    previous = previous.raw(),
                    symbol,
                    "legacy id mapped more than once, keeping the later entry"
                );
            }
        }

        tracing::debug!(
            origin = self.origin,
            %domain,
            namespace,
            entries = table.len(),
            "built identifier table"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentCatalog;
    use crate::ids::{CreatureId, FactionId};
    use serde_json::json;

    /// Knows `mod:mySoldier` only inside the scope of the mod that adds it
    struct ModScoped;

    impl IdentifierResolver for ModScoped {
        fn resolve(&self, scope: &str, _namespace: &str, name: &str) -> Option<i32> {
            match (scope, name) {
                (_, "core:pikeman") => Some(0),
                ("mod", "mod:mySoldier") => Some(1007),
                _ => None,
            }
        }

        fn faction_key(&self, _faction: FactionId) -> Option<String> {
            None
        }
    }

    fn catalog() -> ContentCatalog {
        ContentCatalog::new()
            .with_identifier("creature", "core:pikeman", 0)
            .with_identifier("creature", "core:halberdier", 1)
            .with_identifier("creature", "mod:mySoldier", 1007)
    }

    #[test]
    fn test_build_resolves_every_entry() {
        let catalog = catalog();
        let builder = DomainTableBuilder::new(&catalog, "test map");
        let section = json!({ "core:pikeman": 0, "core:halberdier": 1, "mod:mySoldier": 42 });

        let table: DomainTable<CreatureId> = builder
            .build(IdentifierDomain::Creature, "creatures", Some(&section), "creature")
            .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(CreatureId(42)), Some(CreatureId(1007)));
        assert_eq!(table.get(CreatureId(0)), Some(CreatureId(0)));
        assert_eq!(table.get(CreatureId(7)), None);
        assert_eq!(table.sorted()[0], (CreatureId(0), CreatureId(0)));
    }

    #[test]
    fn test_unknown_symbol_fails_load() {
        let catalog = catalog();
        let builder = DomainTableBuilder::new(&catalog, "test map");
        let section = json!({ "core:pikeman": 0, "mod:ghost": 13 });

        let err = builder
            .build::<CreatureId>(IdentifierDomain::Creature, "creatures", Some(&section), "creature")
            .unwrap_err();

        match err {
            Error::UnresolvedIdentifier { origin, domain, namespace, symbol, entry } => {
                assert_eq!(origin, "test map");
                assert_eq!(domain, IdentifierDomain::Creature);
                assert_eq!(namespace, "creature");
                assert_eq!(symbol, "mod:ghost");
                assert_eq!(entry, "creatures.mod:ghost = 13");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_legacy_id_keeps_later_entry() {
        let catalog = catalog();
        let builder = DomainTableBuilder::new(&catalog, "test map");
        let section = json!({ "core:halberdier": 5, "core:pikeman": 5 });

        let table: DomainTable<CreatureId> = builder
            .build(IdentifierDomain::Creature, "creatures", Some(&section), "creature")
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(CreatureId(5)), Some(CreatureId(0)));
    }

    #[test]
    fn test_missing_section_is_empty() {
        let catalog = catalog();
        let builder = DomainTableBuilder::new(&catalog, "test map");
        let table: DomainTable<CreatureId> = builder
            .build(IdentifierDomain::Creature, "creatures", None, "creature")
            .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_with_scope_resolves_in_that_scope() {
        let section = json!({ "core:pikeman": 0, "mod:mySoldier": 42 });

        let game = DomainTableBuilder::new(&ModScoped, "test map");
        assert_eq!(game.scope(), SCOPE_GAME);
        assert!(game
            .build::<CreatureId>(IdentifierDomain::Creature, "creatures", Some(&section), "creature")
            .is_err());

        let scoped = DomainTableBuilder::new(&ModScoped, "test map").with_scope("mod");
        assert_eq!(scoped.scope(), "mod");
        let table: DomainTable<CreatureId> = scoped
            .build(IdentifierDomain::Creature, "creatures", Some(&section), "creature")
            .unwrap();
        assert_eq!(table.get(CreatureId(42)), Some(CreatureId(1007)));
        assert_eq!(table.get(CreatureId(0)), Some(CreatureId(0)));
    }
}

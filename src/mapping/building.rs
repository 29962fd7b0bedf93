use ahash::AHashMap;

use super::config::{section_entries, MappingConfig};
use super::table::{DomainTable, DomainTableBuilder};
use crate::error::{Error, Result};
use crate::ids::{BuildingId, FactionId, IdentifierDomain};

/// Building tables: optional per-faction overrides plus one common table
#[derive(Debug, Clone)]
pub struct BuildingTable {
    per_faction: AHashMap<FactionId, DomainTable<BuildingId>>,
    common: DomainTable<BuildingId>,
}

impl Default for BuildingTable {
    fn default() -> Self {
        Self {
            per_faction: AHashMap::new(),
            common: DomainTable::new(IdentifierDomain::BuildingCommon),
        }
    }
}

impl BuildingTable {
    pub fn new(
        per_faction: impl IntoIterator<Item = (FactionId, DomainTable<BuildingId>)>,
        common: DomainTable<BuildingId>,
    ) -> Self {
        Self {
            per_faction: per_faction.into_iter().collect(),
            common,
        }
    }

    /// Build from the `buildings` and `buildingsCommon` sections.
    ///
    /// Faction symbols resolve in the `faction` namespace; their buildings in
    /// `building.<factionKey>`. Common buildings resolve in the namespace of
    /// the random town.
    pub fn build(builder: &DomainTableBuilder<'_>, config: &MappingConfig) -> Result<Self> {
        let origin = builder.origin();
        let factions_section = IdentifierDomain::Building.config_key();
        let mut per_faction: AHashMap<FactionId, DomainTable<BuildingId>> = AHashMap::new();

        for (faction_symbol, buildings) in
            section_entries(origin, factions_section, config.section(IdentifierDomain::Building))?
        {
            let faction = FactionId(builder.resolve(
                IdentifierDomain::Faction,
                IdentifierDomain::Faction.namespace(),
                faction_symbol,
                || format!("{}.{}", factions_section, faction_symbol),
            )?);

            let key = builder
                .resolver()
                .faction_key(faction)
                .ok_or_else(|| Error::UnknownFactionKey {
                    origin: origin.to_string(),
                    faction: faction.0,
                })?;

            let namespace = format!("{}.{}", IdentifierDomain::Building.namespace(), key);
            let section_name = format!("{}.{}", factions_section, faction_symbol);

            // Several symbols of one faction share its table.
            let table = per_faction
                .entry(faction)
                .or_insert_with(|| DomainTable::new(IdentifierDomain::Building));
            builder.extend(table, &section_name, Some(buildings), &namespace)?;
        }

        let common = builder.build(
            IdentifierDomain::BuildingCommon,
            IdentifierDomain::BuildingCommon.config_key(),
            config.section(IdentifierDomain::BuildingCommon),
            IdentifierDomain::BuildingCommon.namespace(),
        )?;

        Ok(Self { per_faction, common })
    }

    /// Engine building for a legacy building owned by `owner`.
    ///
    /// The owner's override table wins when it has the key; otherwise the
    /// common table is consulted. [`BuildingId::NONE`] when neither maps it.
    pub fn remap(&self, owner: Option<FactionId>, building: BuildingId) -> BuildingId {
        owner
            .and_then(|faction| self.per_faction.get(&faction))
            .and_then(|table| table.get(building))
            .or_else(|| self.common.get(building))
            .unwrap_or(BuildingId::NONE)
    }

    pub fn faction(&self, faction: FactionId) -> Option<&DomainTable<BuildingId>> {
        self.per_faction.get(&faction)
    }

    pub fn factions(&self) -> Vec<FactionId> {
        let mut factions: Vec<_> = self.per_faction.keys().copied().collect();
        factions.sort();
        factions
    }

    pub fn common(&self) -> &DomainTable<BuildingId> {
        &self.common
    }

    /// Entries across every per-faction table
    pub fn faction_entry_count(&self) -> usize {
        self.per_faction.values().map(|t| t.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentCatalog, IdentifierResolver};
    use serde_json::json;

    /// Resolves every faction to one id but knows none of their keys
    struct KeylessFactions;

    impl IdentifierResolver for KeylessFactions {
        fn resolve(&self, _scope: &str, namespace: &str, _name: &str) -> Option<i32> {
            (namespace == "faction").then_some(3)
        }

        fn faction_key(&self, _faction: FactionId) -> Option<String> {
            None
        }
    }

    const F: FactionId = FactionId(0);
    const G: FactionId = FactionId(1);

    fn table() -> BuildingTable {
        let override_f = DomainTable::from_pairs(
            IdentifierDomain::Building,
            [(BuildingId(5), BuildingId(7)), (BuildingId(6), BuildingId(8))],
        );
        let common = DomainTable::from_pairs(
            IdentifierDomain::BuildingCommon,
            [(BuildingId(5), BuildingId(9)), (BuildingId(9), BuildingId(3)), (BuildingId(4), BuildingId(2))],
        );
        BuildingTable::new([(F, override_f)], common)
    }

    #[test]
    fn test_faction_override_wins() {
        assert_eq!(table().remap(Some(F), BuildingId(5)), BuildingId(7));
    }

    #[test]
    fn test_override_without_key_falls_back_to_common() {
        assert_eq!(table().remap(Some(F), BuildingId(9)), BuildingId(3));
    }

    #[test]
    fn test_unmapped_building_is_none() {
        let table = table();
        assert_eq!(table.remap(Some(F), BuildingId(11)), BuildingId::NONE);
        assert_eq!(table.remap(None, BuildingId(11)), BuildingId::NONE);
    }

    #[test]
    fn test_faction_without_override_uses_common() {
        let table = table();
        assert_eq!(table.remap(Some(G), BuildingId(4)), BuildingId(2));
        assert_eq!(table.remap(None, BuildingId(5)), BuildingId(9));
        assert_eq!(table.remap(None, BuildingId(6)), BuildingId::NONE);
    }

    #[test]
    fn test_build_from_config() {
        let catalog = ContentCatalog::new()
            .with_identifier("faction", "core:castle", 0)
            .with_identifier("faction", "core:rampart", 1)
            .with_identifier("building.castle", "core:lighthouse", 17)
            .with_identifier("building.rampart", "core:mysticPond", 17)
            .with_identifier("building.core:random", "core:tavern", 5)
            .with_identifier("building.core:random", "core:marketplace", 14);

        let config = MappingConfig::from_value(json!({
            "buildings": {
                "core:castle": { "core:lighthouse": 17 },
                "rampart": { "mysticPond": 17 }
            },
            "buildingsCommon": { "core:tavern": 5, "core:marketplace": 14 }
        }))
        .unwrap();

        let builder = DomainTableBuilder::new(&catalog, "test map");
        let buildings = BuildingTable::build(&builder, &config).unwrap();

        assert_eq!(buildings.factions(), vec![FactionId(0), FactionId(1)]);
        assert_eq!(buildings.faction_entry_count(), 2);
        assert_eq!(buildings.common().len(), 2);
        assert_eq!(buildings.remap(Some(FactionId(0)), BuildingId(17)), BuildingId(17));
        assert_eq!(buildings.remap(Some(FactionId(1)), BuildingId(5)), BuildingId(5));
        assert_eq!(buildings.remap(Some(FactionId(1)), BuildingId(3)), BuildingId::NONE);
    }

    #[test]
    fn test_unknown_faction_fails() {
        let catalog = ContentCatalog::new().with_identifier("faction", "core:castle", 0);
        let config = MappingConfig::from_value(json!({
            "buildings": { "mod:atlantis": { "core:fort": 7 } }
        }))
        .unwrap();

        let builder = DomainTableBuilder::new(&catalog, "test map");
        let err = BuildingTable::build(&builder, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvedIdentifier { domain: IdentifierDomain::Faction, ref symbol, .. } if symbol == "mod:atlantis"
        ));
    }

    #[test]
    fn test_unknown_building_names_faction_namespace() {
        let catalog = ContentCatalog::new().with_identifier("faction", "core:castle", 0);
        let config = MappingConfig::from_value(json!({
            "buildings": { "core:castle": { "core:fort": 7 } }
        }))
        .unwrap();

        let builder = DomainTableBuilder::new(&catalog, "test map");
        let err = BuildingTable::build(&builder, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvedIdentifier { domain: IdentifierDomain::Building, ref namespace, .. } if namespace == "building.castle"
        ));
    }

    #[test]
    fn test_faction_buildings_must_be_object() {
        let catalog = ContentCatalog::new().with_identifier("faction", "core:castle", 0);
        let config = MappingConfig::from_value(json!({ "buildings": { "core:castle": 7 } })).unwrap();

        let builder = DomainTableBuilder::new(&catalog, "test map");
        let err = BuildingTable::build(&builder, &config).unwrap_err();
        assert!(matches!(err, Error::MalformedSection { ref section, .. } if section == "buildings.core:castle"));
    }

    #[test]
    fn test_faction_without_key_fails() {
        let config = MappingConfig::from_value(json!({
            "buildings": { "mod:atlantis": { "mod:fort": 7 } }
        }))
        .unwrap();

        let builder = DomainTableBuilder::new(&KeylessFactions, "test map");
        let err = BuildingTable::build(&builder, &config).unwrap_err();
        assert!(matches!(err, Error::UnknownFactionKey { faction: 3, ref origin } if origin == "test map"));
    }
}

use std::fmt;

/// Category of game entity that owns one remapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentifierDomain {
    Faction,
    Creature,
    HeroType,
    HeroClass,
    Terrain,
    Artifact,
    SecondarySkill,
    Building,
    BuildingCommon,
    ObjectType,
    ObjectTemplateName,
}

impl IdentifierDomain {
    pub const ALL: [IdentifierDomain; 11] = [
        Self::Faction,
        Self::Creature,
        Self::HeroType,
        Self::HeroClass,
        Self::Terrain,
        Self::Artifact,
        Self::SecondarySkill,
        Self::Building,
        Self::BuildingCommon,
        Self::ObjectType,
        Self::ObjectTemplateName,
    ];

    /// Domains remapped through a flat table with identity fallback
    pub const SIMPLE: [IdentifierDomain; 7] = [
        Self::Faction,
        Self::Creature,
        Self::HeroType,
        Self::HeroClass,
        Self::Terrain,
        Self::Artifact,
        Self::SecondarySkill,
    ];

    /// Top-level key of this domain in the mapping configuration
    pub fn config_key(self) -> &'static str {
        match self {
            Self::Faction => "factions",
            Self::Creature => "creatures",
            Self::HeroType => "heroes",
            Self::HeroClass => "heroClasses",
            Self::Terrain => "terrains",
            Self::Artifact => "artifacts",
            Self::SecondarySkill => "skills",
            Self::Building => "buildings",
            Self::BuildingCommon => "buildingsCommon",
            Self::ObjectType => "objects",
            Self::ObjectTemplateName => "templates",
        }
    }

    /// Resolver namespace of this domain.
    ///
    /// Per-faction building namespaces are this prefix joined with the
    /// faction key (`building.castle`); object types and templates are not
    /// resolved through the identifier resolver.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Faction => "faction",
            Self::Creature => "creature",
            Self::HeroType => "hero",
            Self::HeroClass => "heroClass",
            Self::Terrain => "terrain",
            Self::Artifact => "artifact",
            Self::SecondarySkill => "skill",
            Self::Building => "building",
            Self::BuildingCommon => BUILDING_COMMON_NAMESPACE,
            Self::ObjectType => "object",
            Self::ObjectTemplateName => "animation",
        }
    }

    /// Slot of a simple domain in the simple-table array
    pub fn simple_index(self) -> Option<usize> {
        Self::SIMPLE.iter().position(|d| *d == self)
    }

    pub fn is_simple(self) -> bool {
        self.simple_index().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Faction => "faction",
            Self::Creature => "creature",
            Self::HeroType => "hero type",
            Self::HeroClass => "hero class",
            Self::Terrain => "terrain",
            Self::Artifact => "artifact",
            Self::SecondarySkill => "secondary skill",
            Self::Building => "building",
            Self::BuildingCommon => "common building",
            Self::ObjectType => "object type",
            Self::ObjectTemplateName => "object template",
        }
    }

    /// Parse a domain from its config key, resolver namespace or CamelCase name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| {
            d.config_key().eq_ignore_ascii_case(s)
                || d.namespace().eq_ignore_ascii_case(s)
                || format!("{:?}", d).eq_ignore_ascii_case(s)
        })
    }
}

/// Namespace of buildings shared by every faction
pub const BUILDING_COMMON_NAMESPACE: &str = "building.core:random";

impl fmt::Display for IdentifierDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

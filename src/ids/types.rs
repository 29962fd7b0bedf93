use std::fmt;
use std::hash::Hash;

use super::IdentifierDomain;

/// Numeric identifier backed by an `i32`
pub trait RawIdentifier: Copy + Eq + Hash + fmt::Debug {
    fn from_raw(raw: i32) -> Self;
    fn raw(self) -> i32;
}

/// Identifier of one of the flat, identity-fallback domains
pub trait SimpleIdentifier: RawIdentifier {
    const DOMAIN: IdentifierDomain;
}

impl RawIdentifier for i32 {
    fn from_raw(raw: i32) -> Self {
        raw
    }

    fn raw(self) -> i32 {
        self
    }
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub i32);

        impl RawIdentifier for $name {
            fn from_raw(raw: i32) -> Self {
                Self(raw)
            }

            fn raw(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(v: i32) -> Self {
                Self(v)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
    ($(#[$meta:meta])* $name:ident => $domain:ident) => {
        identifier!($(#[$meta])* $name);

        impl SimpleIdentifier for $name {
            const DOMAIN: IdentifierDomain = IdentifierDomain::$domain;
        }
    };
}

identifier!(
    /// Town faction
    FactionId => Faction
);
identifier!(CreatureId => Creature);
identifier!(HeroTypeId => HeroType);
identifier!(HeroClassId => HeroClass);
identifier!(TerrainId => Terrain);
identifier!(ArtifactId => Artifact);
identifier!(SecondarySkillId => SecondarySkill);
identifier!(
    /// Town building, scoped to the town's faction
    BuildingId
);
identifier!(
    /// Primary type of a placeable map object
    MapObjectId
);

impl BuildingId {
    /// No building could be mapped
    pub const NONE: Self = Self(-1);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Concrete kind of a placeable map object: primary type plus subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectTypeKey {
    pub primary: MapObjectId,
    pub secondary: i32,
}

impl ObjectTypeKey {
    pub fn new(primary: impl Into<MapObjectId>, secondary: i32) -> Self {
        Self {
            primary: primary.into(),
            secondary,
        }
    }
}

impl fmt::Display for ObjectTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.primary, self.secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_domains() {
        assert_eq!(FactionId::DOMAIN, IdentifierDomain::Faction);
        assert_eq!(CreatureId::DOMAIN, IdentifierDomain::Creature);
        assert_eq!(SecondarySkillId::DOMAIN, IdentifierDomain::SecondarySkill);
        assert!(IdentifierDomain::SIMPLE.contains(&HeroClassId::DOMAIN));
    }

    #[test]
    fn test_building_sentinel() {
        assert!(BuildingId::NONE.is_none());
        assert!(!BuildingId(0).is_none());
        assert_eq!(BuildingId::from_raw(-1), BuildingId::NONE);
    }

    #[test]
    fn test_object_key_display() {
        assert_eq!(ObjectTypeKey::new(17, 3).to_string(), "(17, 3)");
        assert_eq!(ObjectTypeKey::new(MapObjectId(5), 2).primary.raw(), 5);
    }
}

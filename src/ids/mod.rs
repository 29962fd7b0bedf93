pub mod domain;
pub mod types;

pub use domain::IdentifierDomain;
pub use types::{
    RawIdentifier, SimpleIdentifier,
    FactionId, CreatureId, HeroTypeId, HeroClassId, TerrainId,
    ArtifactId, SecondarySkillId, BuildingId, MapObjectId,
    ObjectTypeKey,
};

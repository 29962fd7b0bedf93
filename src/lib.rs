//! Legacy map identifier remapping
//!
//! Maps written in the legacy map format refer to factions, creatures,
//! buildings and object types by small fixed integers. The engine assigns its
//! own ids per loaded content set, so every map ships a mapping configuration
//! from legacy ids to content symbols. This crate resolves that configuration
//! once per map load into immutable tables and remaps ids as the map's records
//! are materialized.

pub mod error;
pub mod ids;
pub mod state;
pub mod content;
pub mod mapping;

pub use error::{Error, Result};
pub use ids::{
    IdentifierDomain, RawIdentifier, SimpleIdentifier,
    FactionId, CreatureId, HeroTypeId, HeroClassId, TerrainId,
    ArtifactId, SecondarySkillId, BuildingId, MapObjectId, ObjectTypeKey,
};
pub use state::ObjectTemplate;
pub use content::{
    ContentServices, ContentCatalog, SpriteDirectory,
    IdentifierResolver, ObjectTypeHandler, ObjectTypeHandlerRegistry, ResourceExistenceChecker,
    SCOPE_GAME,
};
pub use mapping::{
    MappingConfig, IdentifierMapping,
    DomainTable, DomainTableBuilder, BuildingTable, ObjectTypeTable, TemplateNameTable,
};

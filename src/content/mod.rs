//! Services provided by the engine's content layer
//!
//! Table construction depends on three collaborators it does not own: the
//! identifier resolver of the active content set, the registry of object type
//! handlers and the resource filesystem. They are passed in as trait objects
//! bundled in [`ContentServices`].

pub mod catalog;
pub mod sprites;

use crate::ids::{FactionId, MapObjectId, ObjectTypeKey};

pub use catalog::ContentCatalog;
pub use sprites::SpriteDirectory;

/// Scope that sees the content of every loaded mod
pub const SCOPE_GAME: &str = "game";

/// Resolves symbolic names of the active content set into numeric ids
pub trait IdentifierResolver {
    /// Id of `name` within `namespace` (e.g. `"creature"`, `"building.castle"`)
    fn resolve(&self, scope: &str, namespace: &str, name: &str) -> Option<i32>;

    /// Canonical key of a faction, used to form its building namespace
    fn faction_key(&self, faction: FactionId) -> Option<String>;
}

/// Handler of one concrete object kind
pub trait ObjectTypeHandler {
    fn index(&self) -> MapObjectId;
    fn sub_index(&self) -> i32;

    fn type_key(&self) -> ObjectTypeKey {
        ObjectTypeKey {
            primary: self.index(),
            secondary: self.sub_index(),
        }
    }
}

/// Looks up object type handlers by symbolic type and subtype
pub trait ObjectTypeHandlerRegistry {
    fn handler_for(&self, scope: &str, primary: &str, secondary: &str) -> Option<&dyn ObjectTypeHandler>;
}

/// Answers whether an animation resource is present
pub trait ResourceExistenceChecker {
    fn animation_exists(&self, name: &str) -> bool;
}

/// Collaborators used while building the remapping tables
#[derive(Clone, Copy)]
pub struct ContentServices<'a> {
    pub identifiers: &'a dyn IdentifierResolver,
    pub objects: &'a dyn ObjectTypeHandlerRegistry,
    pub resources: &'a dyn ResourceExistenceChecker,
}

impl<'a> ContentServices<'a> {
    pub fn new(
        identifiers: &'a dyn IdentifierResolver,
        objects: &'a dyn ObjectTypeHandlerRegistry,
        resources: &'a dyn ResourceExistenceChecker,
    ) -> Self {
        Self { identifiers, objects, resources }
    }

    /// All three services backed by one catalog
    pub fn from_catalog(catalog: &'a ContentCatalog) -> Self {
        Self::new(catalog, catalog, catalog)
    }

    pub fn with_resources(mut self, resources: &'a dyn ResourceExistenceChecker) -> Self {
        self.resources = resources;
        self
    }
}

use indexmap::IndexMap;

use super::building::BuildingTable;
use super::config::MappingConfig;
use super::object_type::ObjectTypeTable;
use super::table::{DomainTable, DomainTableBuilder};
use super::template::TemplateNameTable;
use crate::content::ContentServices;
use crate::error::Result;
use crate::ids::{BuildingId, FactionId, IdentifierDomain, SimpleIdentifier};
use crate::state::ObjectTemplate;

/// Every remapping table of one map load.
///
/// Built in one pass by [`IdentifierMapping::load`] and immutable afterwards;
/// all lookups are total and may run from several threads.
#[derive(Debug, Clone)]
pub struct IdentifierMapping {
    origin: String,
    /// One table per [`IdentifierDomain::SIMPLE`] domain, same order
    simple: Vec<DomainTable<i32>>,
    buildings: BuildingTable,
    objects: ObjectTypeTable,
    templates: TemplateNameTable,
}

impl IdentifierMapping {
    /// Build all tables from a map's mapping configuration.
    ///
    /// `origin` names the map or mod the configuration came from and is
    /// reported with every load error. Any unresolved symbol or malformed
    /// entry fails the whole load.
    pub fn load(config: &MappingConfig, services: ContentServices<'_>, origin: &str) -> Result<Self> {
        let builder = DomainTableBuilder::new(services.identifiers, origin);

        let buildings = BuildingTable::build(&builder, config)?;
        let templates = TemplateNameTable::build(
            services.resources,
            origin,
            config.section(IdentifierDomain::ObjectTemplateName),
        )?;
        let objects = ObjectTypeTable::build(
            services.objects,
            builder.scope(),
            origin,
            config.section(IdentifierDomain::ObjectType),
        )?;

        let simple = IdentifierDomain::SIMPLE
            .into_iter()
            .map(|domain| builder.build(domain, domain.config_key(), config.section(domain), domain.namespace()))
            .collect::<Result<Vec<_>>>()?;

        let mapping = Self {
            origin: origin.to_string(),
            simple,
            buildings,
            objects,
            templates,
        };

        tracing::info!(
            origin,
            entries = mapping.entry_count(),
            missing_templates = mapping.templates.missing_resources(),
            "loaded identifier mapping"
        );
        Ok(mapping)
    }

    /// Mapping that leaves every id untouched
    pub fn identity(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            simple: IdentifierDomain::SIMPLE.into_iter().map(DomainTable::new).collect(),
            buildings: BuildingTable::default(),
            objects: ObjectTypeTable::default(),
            templates: TemplateNameTable::default(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Remap a raw id of a simple domain; ids without an entry pass through.
    ///
    /// Non-simple domains always pass through.
    pub fn remap_raw(&self, domain: IdentifierDomain, id: i32) -> i32 {
        self.table(domain).and_then(|t| t.get(id)).unwrap_or(id)
    }

    pub fn remap<I: SimpleIdentifier>(&self, id: I) -> I {
        I::from_raw(self.remap_raw(I::DOMAIN, id.raw()))
    }

    /// See [`BuildingTable::remap`]
    pub fn remap_building(&self, owner: Option<FactionId>, building: BuildingId) -> BuildingId {
        self.buildings.remap(owner, building)
    }

    /// Copy of `template` with its animation and object type remapped.
    ///
    /// Either substitution applies only on a match; the other field keeps
    /// its value.
    pub fn remap_template(&self, template: &ObjectTemplate) -> ObjectTemplate {
        let mut remapped = template.clone();

        if let Some(animation) = self.templates.get(&template.animation_file) {
            remapped.animation_file = animation.to_string();
        }
        if let Some(key) = self.objects.get(template.type_key()) {
            remapped = remapped.with_type_key(key);
        }

        remapped
    }

    pub fn remap_templates(&self, templates: &[ObjectTemplate]) -> Vec<ObjectTemplate> {
        templates.iter().map(|t| self.remap_template(t)).collect()
    }

    /// Table of a simple domain
    pub fn table(&self, domain: IdentifierDomain) -> Option<&DomainTable<i32>> {
        self.simple.get(domain.simple_index()?)
    }

    pub fn buildings(&self) -> &BuildingTable {
        &self.buildings
    }

    pub fn objects(&self) -> &ObjectTypeTable {
        &self.objects
    }

    pub fn templates(&self) -> &TemplateNameTable {
        &self.templates
    }

    /// Entry count of every domain in declaration order
    pub fn summary(&self) -> IndexMap<IdentifierDomain, usize> {
        IdentifierDomain::ALL
            .into_iter()
            .map(|domain| {
                let count = match domain {
                    IdentifierDomain::Building => self.buildings.faction_entry_count(),
                    IdentifierDomain::BuildingCommon => self.buildings.common().len(),
                    IdentifierDomain::ObjectType => self.objects.len(),
                    IdentifierDomain::ObjectTemplateName => self.templates.len(),
                    simple => self.table(simple).map_or(0, |t| t.len()),
                };
                (domain, count)
            })
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.summary().values().sum()
    }
}

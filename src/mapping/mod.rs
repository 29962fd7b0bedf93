pub mod config;
pub mod table;
pub mod building;
pub mod object_type;
pub mod template;
pub mod remapper;

pub use config::MappingConfig;
pub use table::{DomainTable, DomainTableBuilder};
pub use building::BuildingTable;
pub use object_type::ObjectTypeTable;
pub use template::TemplateNameTable;
pub use remapper::IdentifierMapping;

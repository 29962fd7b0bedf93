//! Resolve a map's identifier mapping against a content catalog
//!
//! Run with: cargo run --bin remap-inspect -- --mapping mapping.json --catalog catalog.json summary

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use tracing_subscriber::EnvFilter;

use map_identifiers::{
    BuildingId, ContentCatalog, ContentServices, DomainTable, FactionId, IdentifierDomain,
    IdentifierMapping, MappingConfig, ObjectTemplate, RawIdentifier, SpriteDirectory,
};

#[derive(Parser)]
#[command(name = "remap-inspect")]
#[command(about = "Resolve a legacy map identifier mapping and remap ids through it")]
struct Args {
    /// Mapping configuration of the map format
    #[arg(long)]
    mapping: PathBuf,

    /// Content catalog of the active mod set
    #[arg(long)]
    catalog: PathBuf,

    /// Content root whose sprite directory is checked for template animations
    #[arg(long)]
    sprites: Option<PathBuf>,

    /// Map or mod name reported in errors
    #[arg(long, default_value = "map")]
    origin: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Entry count per domain
    Summary,
    /// Every resolved table
    Tables,
    /// Remap one id of a simple domain
    Remap {
        /// Domain name, e.g. `creature` or `skills`
        #[arg(long)]
        domain: String,
        id: i32,
    },
    /// Remap a building of a town
    Building {
        /// Faction owning the town
        #[arg(long)]
        faction: Option<i32>,
        id: i32,
    },
    /// Remap an object template
    Template {
        #[arg(long)]
        animation: String,
        id: i32,
        subid: i32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = MappingConfig::from_path(&args.mapping)?;
    let catalog = ContentCatalog::from_path(&args.catalog)?;
    let sprites = args.sprites.as_deref().map(SpriteDirectory::scan).transpose()?;

    let mut services = ContentServices::from_catalog(&catalog);
    if let Some(sprites) = &sprites {
        services = services.with_resources(sprites);
    }

    let mapping = IdentifierMapping::load(&config, services, &args.origin)?;

    let output = match args.command {
        Commands::Summary => summary(&mapping),
        Commands::Tables => tables(&mapping),
        Commands::Remap { domain, id } => {
            let domain = IdentifierDomain::parse(&domain)
                .filter(|d| d.is_simple())
                .ok_or_else(|| format!("'{}' is not a remappable domain", domain))?;
            json!({
                "domain": domain.config_key(),
                "legacy": id,
                "engine": mapping.remap_raw(domain, id),
            })
        }
        Commands::Building { faction, id } => {
            let remapped = mapping.remap_building(faction.map(FactionId), BuildingId(id));
            json!({
                "faction": faction,
                "legacy": id,
                "engine": if remapped.is_none() { Value::Null } else { json!(remapped.0) },
            })
        }
        Commands::Template { animation, id, subid } => {
            let remapped = mapping.remap_template(&ObjectTemplate::new(animation, id, subid));
            json!({
                "animation": remapped.animation_file,
                "id": remapped.id.0,
                "subid": remapped.subid,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn summary(mapping: &IdentifierMapping) -> Value {
    let entries: Map<String, Value> = mapping
        .summary()
        .into_iter()
        .map(|(domain, count)| (domain.config_key().to_string(), json!(count)))
        .collect();

    json!({
        "origin": mapping.origin(),
        "entries": entries,
        "missingTemplates": mapping.templates().missing_resources(),
    })
}

fn pairs<K: RawIdentifier>(table: &DomainTable<K>) -> Value {
    table
        .sorted()
        .into_iter()
        .map(|(legacy, engine)| json!([legacy.raw(), engine.raw()]))
        .collect()
}

fn tables(mapping: &IdentifierMapping) -> Value {
    let mut out = Map::new();

    for domain in IdentifierDomain::SIMPLE {
        if let Some(table) = mapping.table(domain) {
            out.insert(domain.config_key().to_string(), pairs(table));
        }
    }

    let buildings = mapping.buildings();
    let factions: Map<String, Value> = buildings
        .factions()
        .into_iter()
        .filter_map(|faction| Some((faction.to_string(), pairs(buildings.faction(faction)?))))
        .collect();
    out.insert("buildings".into(), Value::Object(factions));
    out.insert("buildingsCommon".into(), pairs(buildings.common()));

    let objects: Vec<Value> = mapping
        .objects()
        .sorted()
        .into_iter()
        .map(|(legacy, engine)| {
            json!([[legacy.primary.0, legacy.secondary], [engine.primary.0, engine.secondary]])
        })
        .collect();
    out.insert("objects".into(), Value::Array(objects));

    let templates: Map<String, Value> = mapping
        .templates()
        .sorted()
        .into_iter()
        .map(|(legacy, engine)| (legacy.to_string(), json!(engine)))
        .collect();
    out.insert("templates".into(), Value::Object(templates));

    Value::Object(out)
}

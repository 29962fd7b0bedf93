use crate::ids::IdentifierDomain;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{origin}: unknown {domain} identifier '{symbol}' in namespace '{namespace}' (entry {entry})")]
    UnresolvedIdentifier {
        origin: String,
        domain: IdentifierDomain,
        namespace: String,
        symbol: String,
        entry: String,
    },

    #[error("{origin}: faction {faction} has no identifier key")]
    UnknownFactionKey { origin: String, faction: i32 },

    #[error("{origin}: no object handler for '{primary}' / '{secondary}'")]
    UnknownObjectHandler {
        origin: String,
        primary: String,
        secondary: String,
    },

    #[error("{origin}: malformed {domain} entry '{key}': {reason}")]
    MalformedEntry {
        origin: String,
        domain: IdentifierDomain,
        key: String,
        reason: String,
    },

    #[error("{origin}: section '{section}' must be an object, found {found}")]
    MalformedSection {
        origin: String,
        section: String,
        found: &'static str,
    },

    #[error("mapping configuration must be an object, found {found}")]
    MalformedConfig { found: &'static str },

    #[error("io error: {0}")]
    Io(String),

    #[error("json error: {0}")]
    Json(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

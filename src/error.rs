use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_CONFIG_JSON: &str = "AI-ERR-CONFIG-001";
pub const ERR_UNKNOWN_PRESET: &str = "AI-ERR-CONFIG-002";
pub const ERR_MISSING_MODULE: &str = "AI-ERR-CONFIG-003";
pub const ERR_EMPTY_NAME: &str = "AI-ERR-CONFIG-004";
pub const ERR_INVALID_IDENTIFIER: &str = "AI-ERR-CONFIG-005";
pub const ERR_MISSING_ALIAS: &str = "AI-ERR-CONFIG-006";
pub const ERR_INVALID_TUPLE: &str = "AI-ERR-CONFIG-007";
pub const ERR_WILDCARD_IN_CUSTOM: &str = "AI-ERR-CONFIG-008";
pub const ERR_CONFLICTING_KINDS: &str = "AI-ERR-CONFIG-009";
pub const ERR_PARSE: &str = "AI-ERR-PARSE-001";

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIGURATION ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Raised once, while the mapping table is built. A table is never built from
/// a configuration that produced one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid auto-import configuration: {0}")]
    Json(String),

    #[error("unknown preset \"{0}\"")]
    UnknownPreset(String),

    #[error("mapping for \"{name}\" has an empty module path")]
    MissingModule { name: String },

    #[error("mapping from \"{from}\" has an empty symbol name")]
    EmptyName { from: String },

    #[error("\"{name}\" is not a valid identifier")]
    InvalidIdentifier { name: String },

    #[error("{kind} import from \"{from}\" requires an alias")]
    MissingAlias { kind: &'static str, from: String },

    #[error("import tuple must have 1 to 3 elements, found {len}")]
    InvalidTuple { len: usize },

    #[error("wildcard import from \"{from}\" belongs in \"namespaces\", not \"custom\"")]
    WildcardInCustom { from: String },

    #[error("\"{name}\" is mapped as a {first} import and as a {second} import")]
    ConflictingKinds {
        name: String,
        first: &'static str,
        second: &'static str,
    },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Json(_) => ERR_CONFIG_JSON,
            ConfigError::UnknownPreset(_) => ERR_UNKNOWN_PRESET,
            ConfigError::MissingModule { .. } => ERR_MISSING_MODULE,
            ConfigError::EmptyName { .. } => ERR_EMPTY_NAME,
            ConfigError::InvalidIdentifier { .. } => ERR_INVALID_IDENTIFIER,
            ConfigError::MissingAlias { .. } => ERR_MISSING_ALIAS,
            ConfigError::InvalidTuple { .. } => ERR_INVALID_TUPLE,
            ConfigError::WildcardInCustom { .. } => ERR_WILDCARD_IN_CUSTOM,
            ConfigError::ConflictingKinds { .. } => ERR_CONFLICTING_KINDS,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Json(error.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DRIVER ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutoImportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to parse {file}: {}", .messages.join("; "))]
    Parse { file: String, messages: Vec<String> },
}

impl AutoImportError {
    pub fn code(&self) -> &'static str {
        match self {
            AutoImportError::Config(error) => error.code(),
            AutoImportError::Parse { .. } => ERR_PARSE,
        }
    }
}

//! Mapping table and resolver.
//!
//! The table is built once from configuration and is read-only afterwards.
//! Groups are ordered by tier (custom, namespace, preset) and, inside a tier,
//! by configuration order. `resolve` returns the first mapping for a name.

use crate::config::AutoImportConfig;
use crate::error::ConfigError;
use crate::scope::FreeIdentifiers;
use oxc_syntax::identifier::is_identifier_name;
use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

/// ES `IdentifierName` check, Unicode included.
pub fn is_identifier(name: &str) -> bool {
    is_identifier_name(name)
}

// ═══════════════════════════════════════════════════════════════════════════════
// IMPORT MAPPINGS
// ═══════════════════════════════════════════════════════════════════════════════

/// What a mapping pulls out of its module.
///
/// The derived order (default, namespace, named) is the order declarations
/// for the same module are emitted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum ImportedName {
    Default,
    Namespace,
    Named(String),
}

impl ImportedName {
    pub fn kind_label(&self) -> &'static str {
        match self {
            ImportedName::Default => "default",
            ImportedName::Namespace => "namespace",
            ImportedName::Named(_) => "named",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportMapping {
    /// Name the module code uses.
    pub local: String,
    pub from: String,
    pub imported: ImportedName,
}

impl ImportMapping {
    /// Builds a mapping from the configuration triple. `"default"` and `"*"`
    /// select default and namespace imports and both require an alias.
    pub fn new(exported: &str, alias: Option<&str>, from: &str) -> Result<Self, ConfigError> {
        if exported.is_empty() {
            return Err(ConfigError::EmptyName {
                from: from.to_string(),
            });
        }
        if from.trim().is_empty() {
            return Err(ConfigError::MissingModule {
                name: alias.unwrap_or(exported).to_string(),
            });
        }

        let (imported, local) = match exported {
            "default" | "*" => {
                let kind = if exported == "default" {
                    ImportedName::Default
                } else {
                    ImportedName::Namespace
                };
                let local = alias.ok_or_else(|| ConfigError::MissingAlias {
                    kind: kind.kind_label(),
                    from: from.to_string(),
                })?;
                (kind, local)
            }
            _ => {
                if !is_identifier(exported) {
                    return Err(ConfigError::InvalidIdentifier {
                        name: exported.to_string(),
                    });
                }
                (
                    ImportedName::Named(exported.to_string()),
                    alias.unwrap_or(exported),
                )
            }
        };

        if !is_identifier(local) {
            return Err(ConfigError::InvalidIdentifier {
                name: local.to_string(),
            });
        }

        Ok(ImportMapping {
            local: local.to_string(),
            from: from.to_string(),
            imported,
        })
    }

    pub fn to_spec(&self) -> ResolvedImportSpec {
        ResolvedImportSpec {
            source: self.from.clone(),
            local: self.local.clone(),
            imported: self.imported.clone(),
        }
    }
}

/// One resolved import requirement for a free identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImportSpec {
    pub source: String,
    pub local: String,
    pub imported: ImportedName,
}

impl ResolvedImportSpec {
    /// The local alias the declaration must spell out, if any.
    pub fn alias(&self) -> Option<&str> {
        match &self.imported {
            ImportedName::Named(exported) if exported == &self.local => None,
            _ => Some(&self.local),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MAPPING TABLE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MappingTier {
    Custom,
    Namespace,
    Preset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingGroup {
    pub tier: MappingTier,
    pub label: String,
    pub mappings: Vec<ImportMapping>,
}

impl MappingGroup {
    pub fn new(tier: MappingTier, label: impl Into<String>) -> Self {
        Self {
            tier,
            label: label.into(),
            mappings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    groups: Vec<MappingGroup>,
    index: HashMap<String, ResolvedImportSpec>,
}

impl MappingTable {
    pub fn from_config(config: &AutoImportConfig) -> Result<Self, ConfigError> {
        Self::from_groups(config.mapping_groups()?)
    }

    pub fn from_groups(mut groups: Vec<MappingGroup>) -> Result<Self, ConfigError> {
        // Stable: configuration order survives inside each tier.
        groups.sort_by_key(|group| group.tier);
        check_kind_conflicts(&groups)?;

        let mut index = HashMap::new();
        for mapping in groups.iter().flat_map(|group| group.mappings.iter()) {
            index
                .entry(mapping.local.clone())
                .or_insert_with(|| mapping.to_spec());
        }

        Ok(Self { groups, index })
    }

    pub fn resolve(&self, name: &str) -> Option<ResolvedImportSpec> {
        self.index.get(name).cloned()
    }

    pub fn groups(&self) -> &[MappingGroup] {
        &self.groups
    }

    /// Number of distinct symbols the table can resolve.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// A local name mapped as two different import kinds is a contradiction the
/// table refuses to guess about, whichever tiers the entries live in.
fn check_kind_conflicts(groups: &[MappingGroup]) -> Result<(), ConfigError> {
    let mut first_kind: HashMap<&str, &'static str> = HashMap::new();
    for mapping in groups.iter().flat_map(|group| group.mappings.iter()) {
        let kind = mapping.imported.kind_label();
        match first_kind.get(mapping.local.as_str()) {
            Some(&first) if first != kind => {
                return Err(ConfigError::ConflictingKinds {
                    name: mapping.local.clone(),
                    first,
                    second: kind,
                });
            }
            Some(_) => {}
            None => {
                first_kind.insert(&mapping.local, kind);
            }
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub specs: Vec<ResolvedImportSpec>,
    /// Free names with no mapping: true globals or typos, left untouched.
    pub unresolved: Vec<String>,
}

pub fn resolve_free_identifiers(table: &MappingTable, free: &FreeIdentifiers) -> Resolution {
    let mut resolution = Resolution::default();
    for name in free.keys() {
        match table.resolve(name) {
            Some(spec) => {
                trace!(name = %name, source = %spec.source, "resolved free identifier");
                resolution.specs.push(spec);
            }
            None => {
                trace!(name = %name, "no mapping for free identifier");
                resolution.unresolved.push(name.clone());
            }
        }
    }
    resolution
}

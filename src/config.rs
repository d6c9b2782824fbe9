//! Auto-import configuration.
//!
//! Mirrors the JSON a host passes to the plugin and lowers it into ordered,
//! tier-tagged mapping groups. All validation happens here or in
//! [`ImportMapping::new`], once, before any module is transformed.

use crate::error::ConfigError;
use crate::mapping::{ImportMapping, MappingGroup, MappingTier};
use crate::presets::builtin_preset;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Either a single item or a list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arrayable<T> {
    Array(Vec<T>),
    Single(T),
}

impl<T> Arrayable<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Arrayable::Array(items) => items,
            Arrayable::Single(item) => std::slice::from_ref(item),
        }
    }
}

/// Item inside a module map: `"useMouse"` or `["useFetch", "useMyFetch"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportItem {
    Simple(String),
    Aliased([String; 2]),
}

/// Explicit import item with its own module.
///
/// - `{ name: "ref", from: "vue" }` -> `import { ref } from "vue"`
/// - `{ name: "useState", as: "useSignal", from: "react" }` -> `import { useState as useSignal } from "react"`
/// - `{ name: "default", as: "axios", from: "axios" }` -> `import axios from "axios"`
/// - `{ name: "*", as: "motion", from: "motion/react-m" }` -> `import * as motion from "motion/react-m"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitImport {
    pub name: String,
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub from: String,
}

/// `{ as: "motion", from: "motion/react-m" }` -> `import * as motion from "motion/react-m"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceImport {
    #[serde(rename = "as")]
    pub alias: String,
    pub from: String,
}

/// `{ from: "react", imports: [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InlinePreset {
    pub from: String,
    pub imports: Vec<PresetImport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetImport {
    /// `"useState"`
    Simple(String),
    /// `[exported]`, `[exported, local]` or `[exported, local, module]`
    Tuple(Vec<String>),
    /// `{ name: "useMemo", as?: "useMemoized", from?: "react" }`
    Object {
        name: String,
        #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
    },
    /// Inline preset for another module, expanded in place.
    Nested(Box<InlinePreset>),
}

/// One entry of the `presets` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportConfig {
    /// Built-in preset: `"react"`
    PresetName(String),
    InlinePreset(InlinePreset),
    /// `[{ name, as?, from }, ...]`
    Explicit(Vec<ExplicitImport>),
    /// `{ "@vueuse/core": ["useMouse", ["useFetch", "useMyFetch"]], "lodash": [["*", "_"]] }`
    ImportsMap(IndexMap<String, Vec<ImportItem>>),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoImportConfig {
    /// Preset tier, scanned in order.
    #[serde(default, alias = "imports", skip_serializing_if = "Option::is_none")]
    pub presets: Option<Arrayable<ImportConfig>>,

    /// Custom tier: overrides every preset.
    #[serde(default)]
    pub custom: Vec<ExplicitImport>,

    /// Namespace tier, matched by alias.
    #[serde(default)]
    pub namespaces: Vec<NamespaceImport>,

    #[serde(default)]
    pub debug: bool,
}

impl AutoImportConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Lowers the configuration into tier-tagged groups, in configuration
    /// order. Fails on the first malformed entry.
    pub fn mapping_groups(&self) -> Result<Vec<MappingGroup>, ConfigError> {
        let mut groups = Vec::new();

        if !self.custom.is_empty() {
            let mut group = MappingGroup::new(MappingTier::Custom, "custom");
            for item in &self.custom {
                if item.name == "*" {
                    return Err(ConfigError::WildcardInCustom {
                        from: item.from.clone(),
                    });
                }
                group.mappings.push(ImportMapping::new(
                    &item.name,
                    item.alias.as_deref(),
                    &item.from,
                )?);
            }
            groups.push(group);
        }

        if !self.namespaces.is_empty() {
            let mut group = MappingGroup::new(MappingTier::Namespace, "namespaces");
            for item in &self.namespaces {
                group
                    .mappings
                    .push(ImportMapping::new("*", Some(item.alias.as_str()), &item.from)?);
            }
            groups.push(group);
        }

        if let Some(presets) = &self.presets {
            for entry in presets.as_slice() {
                groups.push(preset_group(entry)?);
            }
        }

        Ok(groups)
    }
}

fn preset_group(entry: &ImportConfig) -> Result<MappingGroup, ConfigError> {
    match entry {
        ImportConfig::PresetName(name) => {
            let preset =
                builtin_preset(name).ok_or_else(|| ConfigError::UnknownPreset(name.clone()))?;
            let mut group = MappingGroup::new(MappingTier::Preset, preset.name);
            for symbol in preset.imports {
                group
                    .mappings
                    .push(ImportMapping::new(symbol, None, preset.from)?);
            }
            Ok(group)
        }
        ImportConfig::InlinePreset(inline) => {
            let mut group = MappingGroup::new(MappingTier::Preset, inline.from.as_str());
            push_inline_preset(&mut group.mappings, inline)?;
            Ok(group)
        }
        ImportConfig::Explicit(items) => {
            let mut group = MappingGroup::new(MappingTier::Preset, "explicit");
            for item in items {
                group.mappings.push(ImportMapping::new(
                    &item.name,
                    item.alias.as_deref(),
                    &item.from,
                )?);
            }
            Ok(group)
        }
        ImportConfig::ImportsMap(map) => {
            let mut group = MappingGroup::new(MappingTier::Preset, "map");
            for (from, items) in map {
                for item in items {
                    let mapping = match item {
                        ImportItem::Simple(name) => ImportMapping::new(name, None, from)?,
                        ImportItem::Aliased([name, alias]) => {
                            ImportMapping::new(name, Some(alias.as_str()), from)?
                        }
                    };
                    group.mappings.push(mapping);
                }
            }
            Ok(group)
        }
    }
}

fn push_inline_preset(
    mappings: &mut Vec<ImportMapping>,
    inline: &InlinePreset,
) -> Result<(), ConfigError> {
    let default_from = inline.from.as_str();
    for item in &inline.imports {
        match item {
            PresetImport::Simple(name) => {
                mappings.push(ImportMapping::new(name, None, default_from)?);
            }
            PresetImport::Tuple(parts) => {
                let mapping = match parts.as_slice() {
                    [name] => ImportMapping::new(name, None, default_from)?,
                    [name, alias] => ImportMapping::new(name, Some(alias.as_str()), default_from)?,
                    [name, alias, from] => ImportMapping::new(name, Some(alias.as_str()), from)?,
                    _ => return Err(ConfigError::InvalidTuple { len: parts.len() }),
                };
                mappings.push(mapping);
            }
            PresetImport::Object { name, alias, from } => {
                mappings.push(ImportMapping::new(
                    name,
                    alias.as_deref(),
                    from.as_deref().unwrap_or(default_from),
                )?);
            }
            PresetImport::Nested(nested) => push_inline_preset(mappings, nested)?,
        }
    }
    Ok(())
}

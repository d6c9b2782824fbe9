//! Import synthesis.
//!
//! Merges the resolved specs for one module with the imports its author
//! already wrote. Existing author code always wins: a spec whose local name is
//! taken is dropped, and existing specifiers are never changed.

use crate::mapping::{ImportedName, ResolvedImportSpec};
use oxc_ast::ast::{ImportDeclarationSpecifier, ModuleExportName, Program, Statement};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use tracing::trace;

// ═══════════════════════════════════════════════════════════════════════════════
// EXISTING IMPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSpecifier {
    pub exported: String,
    pub local: String,
}

impl NamedSpecifier {
    pub fn new(exported: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            exported: exported.into(),
            local: local.into(),
        }
    }
}

impl fmt::Display for NamedSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exported == self.local {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{} as {}", self.exported, self.local)
        }
    }
}

/// A top-level `import` statement as the author wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingImportDeclaration {
    /// Position in `Program::body`.
    pub statement_index: usize,
    pub source: String,
    pub default: Option<String>,
    pub namespace: Option<String>,
    pub named: Vec<NamedSpecifier>,
    pub type_only: bool,
    pub side_effect_only: bool,
}

impl ExistingImportDeclaration {
    /// Whether extra `{ name }` specifiers can be appended to this
    /// declaration.
    pub fn can_hold_named(&self) -> bool {
        !self.type_only && !self.side_effect_only && self.namespace.is_none()
    }

    pub fn locals(&self) -> impl Iterator<Item = &str> {
        self.default
            .iter()
            .chain(self.namespace.iter())
            .map(String::as_str)
            .chain(self.named.iter().map(|specifier| specifier.local.as_str()))
    }
}

impl fmt::Display for ExistingImportDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.side_effect_only {
            return write!(f, "import \"{}\"", self.source);
        }
        let mut clauses = Vec::new();
        if let Some(default) = &self.default {
            clauses.push(default.clone());
        }
        if let Some(namespace) = &self.namespace {
            clauses.push(format!("* as {}", namespace));
        }
        if !self.named.is_empty() || clauses.is_empty() {
            clauses.push(format!("{{ {} }}", join_specifiers(&self.named)));
        }
        let keyword = if self.type_only { "import type" } else { "import" };
        write!(f, "{} {} from \"{}\"", keyword, clauses.join(", "), self.source)
    }
}

fn join_specifiers(specifiers: &[NamedSpecifier]) -> String {
    specifiers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn module_export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.to_string(),
        ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        ModuleExportName::StringLiteral(s) => s.value.to_string(),
    }
}

pub fn collect_existing_imports(program: &Program) -> Vec<ExistingImportDeclaration> {
    let mut imports = Vec::new();
    for (statement_index, stmt) in program.body.iter().enumerate() {
        let Statement::ImportDeclaration(decl) = stmt else {
            continue;
        };
        let mut existing = ExistingImportDeclaration {
            statement_index,
            source: decl.source.value.to_string(),
            default: None,
            namespace: None,
            named: Vec::new(),
            type_only: decl.import_kind.is_type(),
            side_effect_only: decl.specifiers.is_none(),
        };
        if let Some(specifiers) = &decl.specifiers {
            for specifier in specifiers {
                match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(s) => {
                        existing.named.push(NamedSpecifier::new(
                            module_export_name(&s.imported),
                            s.local.name.to_string(),
                        ));
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        existing.default = Some(s.local.name.to_string());
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        existing.namespace = Some(s.local.name.to_string());
                    }
                }
            }
        }
        imports.push(existing);
    }
    imports
}

// ═══════════════════════════════════════════════════════════════════════════════
// FINAL IMPORT SET
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImportClause {
    Default { local: String },
    Namespace { local: String },
    Named { specifiers: Vec<NamedSpecifier> },
}

impl ImportClause {
    fn rank(&self) -> u8 {
        match self {
            ImportClause::Default { .. } => 0,
            ImportClause::Namespace { .. } => 1,
            ImportClause::Named { .. } => 2,
        }
    }

    fn first_local(&self) -> &str {
        match self {
            ImportClause::Default { local } | ImportClause::Namespace { local } => local,
            ImportClause::Named { specifiers } => specifiers
                .first()
                .map(|specifier| specifier.local.as_str())
                .unwrap_or_default(),
        }
    }
}

/// A brand-new declaration to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDeclarationPlan {
    pub source: String,
    pub clause: ImportClause,
}

impl fmt::Display for ImportDeclarationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.clause {
            ImportClause::Default { local } => {
                write!(f, "import {} from \"{}\"", local, self.source)
            }
            ImportClause::Namespace { local } => {
                write!(f, "import * as {} from \"{}\"", local, self.source)
            }
            ImportClause::Named { specifiers } => write!(
                f,
                "import {{ {} }} from \"{}\"",
                join_specifiers(specifiers),
                self.source
            ),
        }
    }
}

/// Named specifiers appended to an existing declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Augmentation {
    pub statement_index: usize,
    pub source: String,
    pub specifiers: Vec<NamedSpecifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum DropReason {
    /// The module declares the name itself.
    ModuleBinding,
    /// An existing import already binds the name.
    ExistingImport { source: String },
    /// Another spec in this run claimed the name first.
    DuplicateLocal { source: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedImport {
    pub spec: ResolvedImportSpec,
    #[serde(flatten)]
    pub reason: DropReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalImportSet {
    pub augmented: Vec<Augmentation>,
    pub declarations: Vec<ImportDeclarationPlan>,
    pub dropped: Vec<DroppedImport>,
}

impl FinalImportSet {
    /// True when nothing needs to be written to the module.
    pub fn is_empty(&self) -> bool {
        self.augmented.is_empty() && self.declarations.is_empty()
    }

    /// Every import this set adds, in output order.
    pub fn added(&self) -> Vec<ResolvedImportSpec> {
        let named = |source: &str, specifier: &NamedSpecifier| ResolvedImportSpec {
            source: source.to_string(),
            local: specifier.local.clone(),
            imported: ImportedName::Named(specifier.exported.clone()),
        };

        let mut added = Vec::new();
        for augmentation in &self.augmented {
            for specifier in &augmentation.specifiers {
                added.push(named(&augmentation.source, specifier));
            }
        }
        for declaration in &self.declarations {
            match &declaration.clause {
                ImportClause::Default { local } => added.push(ResolvedImportSpec {
                    source: declaration.source.clone(),
                    local: local.clone(),
                    imported: ImportedName::Default,
                }),
                ImportClause::Namespace { local } => added.push(ResolvedImportSpec {
                    source: declaration.source.clone(),
                    local: local.clone(),
                    imported: ImportedName::Namespace,
                }),
                ImportClause::Named { specifiers } => {
                    for specifier in specifiers {
                        added.push(named(&declaration.source, specifier));
                    }
                }
            }
        }
        added
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SYNTHESIS
// ═══════════════════════════════════════════════════════════════════════════════

enum Owner<'s> {
    Module,
    Import(&'s str),
    Claimed(&'s str),
}

pub fn synthesize_imports(
    existing: &[ExistingImportDeclaration],
    specs: &[ResolvedImportSpec],
    module_bindings: &HashSet<String>,
) -> FinalImportSet {
    let mut owners: HashMap<&str, Owner> = HashMap::new();
    for declaration in existing {
        for local in declaration.locals() {
            owners.insert(local, Owner::Import(&declaration.source));
        }
    }
    for name in module_bindings {
        owners.entry(name.as_str()).or_insert(Owner::Module);
    }

    let mut result = FinalImportSet::default();
    let mut by_source: BTreeMap<&str, Vec<&ResolvedImportSpec>> = BTreeMap::new();

    for spec in specs {
        let reason = match owners.get(spec.local.as_str()) {
            Some(Owner::Module) => Some(DropReason::ModuleBinding),
            Some(Owner::Import(source)) => Some(DropReason::ExistingImport {
                source: source.to_string(),
            }),
            Some(Owner::Claimed(source)) => Some(DropReason::DuplicateLocal {
                source: source.to_string(),
            }),
            None => None,
        };
        if let Some(reason) = reason {
            trace!(local = %spec.local, source = %spec.source, ?reason, "dropping import");
            result.dropped.push(DroppedImport {
                spec: spec.clone(),
                reason,
            });
            continue;
        }
        owners.insert(&spec.local, Owner::Claimed(&spec.source));
        by_source.entry(&spec.source).or_default().push(spec);
    }

    for (source, specs) in by_source {
        let mut named = Vec::new();
        for spec in specs {
            match &spec.imported {
                ImportedName::Default => result.declarations.push(ImportDeclarationPlan {
                    source: source.to_string(),
                    clause: ImportClause::Default {
                        local: spec.local.clone(),
                    },
                }),
                ImportedName::Namespace => result.declarations.push(ImportDeclarationPlan {
                    source: source.to_string(),
                    clause: ImportClause::Namespace {
                        local: spec.local.clone(),
                    },
                }),
                ImportedName::Named(exported) => {
                    named.push(NamedSpecifier::new(exported.as_str(), spec.local.as_str()));
                }
            }
        }
        if named.is_empty() {
            continue;
        }
        named.sort();

        let host = existing
            .iter()
            .find(|declaration| declaration.source == source && declaration.can_hold_named());
        match host {
            Some(declaration) => result.augmented.push(Augmentation {
                statement_index: declaration.statement_index,
                source: source.to_string(),
                specifiers: named,
            }),
            None => result.declarations.push(ImportDeclarationPlan {
                source: source.to_string(),
                clause: ImportClause::Named { specifiers: named },
            }),
        }
    }

    result.declarations.sort_by(|a, b| {
        a.source
            .cmp(&b.source)
            .then(a.clause.rank().cmp(&b.clause.rank()))
            .then_with(|| a.clause.first_local().cmp(b.clause.first_local()))
    });
    result.augmented.sort_by_key(|augmentation| augmentation.statement_index);
    result
}

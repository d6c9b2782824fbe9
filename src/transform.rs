use oxc_allocator::{Allocator, CloneIn};
use oxc_ast::ast::Program;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::SourceType;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::AutoImportConfig;
use crate::error::{AutoImportError, ConfigError};
use crate::inject::inject_imports;
use crate::mapping::{resolve_free_identifiers, MappingTable, ResolvedImportSpec};
use crate::scope::analyze_program;
use crate::synthesize::{collect_existing_imports, synthesize_imports, FinalImportSet};

// ═══════════════════════════════════════════════════════════════════════════════
// DRIVER TYPES
// ═══════════════════════════════════════════════════════════════════════════════

pub struct ProgramTransform<'a> {
    pub program: Program<'a>,
    pub imports: FinalImportSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub code: String,
    pub imports: FinalImportSet,
}

impl TransformOutput {
    pub fn added(&self) -> Vec<ResolvedImportSpec> {
        self.imports.added()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInput {
    pub file_name: String,
    pub source_text: String,
}

impl SourceInput {
    pub fn new(file_name: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source_text: source_text.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// AUTO IMPORTER
// ═══════════════════════════════════════════════════════════════════════════════

/// Shared, read-only driver. Cloning is cheap; every clone uses the same
/// mapping table.
#[derive(Debug, Clone)]
pub struct AutoImporter {
    table: Arc<MappingTable>,
    debug: bool,
}

impl AutoImporter {
    pub fn new(config: &AutoImportConfig) -> Result<Self, ConfigError> {
        let table = MappingTable::from_config(config)?;
        if config.debug {
            debug!(
                groups = table.groups().len(),
                symbols = table.len(),
                "built auto-import mapping table"
            );
        }
        Ok(Self {
            table: Arc::new(table),
            debug: config.debug,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(&AutoImportConfig::from_json(json)?)
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Runs analysis, resolution, synthesis and injection on a parsed
    /// module. Scripts cannot hold imports and come back unchanged.
    pub fn transform_program<'a>(
        &self,
        allocator: &'a Allocator,
        program: &Program<'a>,
    ) -> ProgramTransform<'a> {
        if !program.source_type.is_module() {
            return ProgramTransform {
                program: program.clone_in(allocator),
                imports: FinalImportSet::default(),
            };
        }

        let analysis = analyze_program(program);
        let free = analysis.free_identifiers();
        let resolution = resolve_free_identifiers(&self.table, &free);

        if self.debug {
            for name in &resolution.unresolved {
                debug!(name = %name, "leaving unmapped identifier untouched");
            }
        }

        let existing = collect_existing_imports(program);
        let imports = synthesize_imports(&existing, &resolution.specs, &analysis.module_bindings());

        if self.debug {
            for spec in imports.added() {
                debug!(local = %spec.local, source = %spec.source, "injecting import");
            }
            for dropped in &imports.dropped {
                debug!(
                    local = %dropped.spec.local,
                    reason = ?dropped.reason,
                    "skipped import for a taken name"
                );
            }
        }

        let program = inject_imports(allocator, program, &imports);
        ProgramTransform { program, imports }
    }

    /// Parses `source`, applies the transform and prints the result.
    pub fn transform_source(
        &self,
        source: &str,
        file_name: &str,
    ) -> Result<TransformOutput, AutoImportError> {
        let allocator = Allocator::default();
        let source_type = source_type_for(file_name);
        let ret = Parser::new(&allocator, source, source_type).parse();

        if ret.panicked || !ret.errors.is_empty() {
            return Err(AutoImportError::Parse {
                file: file_name.to_string(),
                messages: ret.errors.iter().map(|error| error.to_string()).collect(),
            });
        }

        let ProgramTransform { program, imports } = self.transform_program(&allocator, &ret.program);
        let code = Codegen::new().build(&program).code;
        Ok(TransformOutput { code, imports })
    }

    /// Transforms independent modules in parallel. Results keep input order.
    pub fn transform_sources(
        &self,
        inputs: &[SourceInput],
    ) -> Vec<Result<TransformOutput, AutoImportError>> {
        inputs
            .par_iter()
            .map(|input| self.transform_source(&input.source_text, &input.file_name))
            .collect()
    }
}

/// Module source type for a file name. Unknown extensions parse as TSX;
/// everything except `.cjs`/`.cts` is treated as an ES module.
pub fn source_type_for(file_name: &str) -> SourceType {
    let source_type = SourceType::from_path(file_name).unwrap_or_else(|_| {
        SourceType::default()
            .with_typescript(true)
            .with_jsx(true)
    });
    if file_name.ends_with(".cjs") || file_name.ends_with(".cts") {
        source_type
    } else {
        source_type.with_module(true)
    }
}

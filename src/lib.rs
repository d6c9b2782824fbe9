//! # Auto-Import Engine
//!
//! Injects `import` declarations for identifiers a module uses but never
//! binds, following a configured symbol → module table.
//!
//! ## Pipeline
//!
//! 1. **Scope analysis** (`scope`): builds the lexical scope tree of an ES
//!    module and collects every free identifier.
//! 2. **Resolution** (`mapping`): maps free names through the table.
//!    Precedence is custom → namespaces → presets; inside a tier the first
//!    configured entry wins.
//! 3. **Synthesis** (`synthesize`): merges resolved specs with the module's
//!    own imports. Names the author already binds are never imported.
//! 4. **Injection** (`inject`): returns a new tree with the imports applied.
//!
//! ## Invariants
//!
//! - Running the transform on its own output adds nothing.
//! - Type positions never produce imports.
//! - Configuration is validated once, when the table is built. The
//!   per-module transform never fails.

#[cfg(feature = "napi")]
use napi_derive::napi;

pub mod config;
pub mod error;
pub mod inject;
pub mod logging;
pub mod mapping;
pub mod presets;
pub mod scope;
pub mod synthesize;
pub mod transform;

#[cfg(test)]
mod scope_tests;
#[cfg(test)]
mod synthesize_tests;

pub use config::{AutoImportConfig, ExplicitImport, ImportConfig, NamespaceImport};
pub use error::{AutoImportError, ConfigError};
pub use inject::inject_imports;
pub use logging::init_tracing;
pub use mapping::{ImportedName, MappingTable, ResolvedImportSpec};
pub use scope::{analyze_program, FreeIdentifiers, ScopeAnalysis};
pub use synthesize::{collect_existing_imports, synthesize_imports, FinalImportSet};
pub use transform::{AutoImporter, ProgramTransform, SourceInput, TransformOutput};

// ═══════════════════════════════════════════════════════════════════════════════
// NODE BINDING
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
fn to_napi_error(error: impl Into<AutoImportError>) -> napi::Error {
    let error = error.into();
    napi::Error::from_reason(format!("[{}] {}", error.code(), error))
}

#[cfg(feature = "napi")]
#[napi(js_name = "AutoImporter")]
pub struct NativeAutoImporter {
    inner: AutoImporter,
}

#[cfg(feature = "napi")]
#[napi]
impl NativeAutoImporter {
    #[napi(constructor)]
    pub fn new(config_json: String) -> napi::Result<Self> {
        let config = AutoImportConfig::from_json(&config_json).map_err(to_napi_error)?;
        if config.debug {
            init_tracing(true);
        }
        let inner = AutoImporter::new(&config).map_err(to_napi_error)?;
        Ok(Self { inner })
    }

    #[napi]
    pub fn transform(&self, code: String, file_name: String) -> napi::Result<String> {
        self.inner
            .transform_source(&code, &file_name)
            .map(|output| output.code)
            .map_err(to_napi_error)
    }

    #[napi]
    pub fn transform_with_report(
        &self,
        code: String,
        file_name: String,
    ) -> napi::Result<serde_json::Value> {
        let output = self
            .inner
            .transform_source(&code, &file_name)
            .map_err(to_napi_error)?;
        serde_json::to_value(output).map_err(|e| napi::Error::from_reason(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::{ImportedName, ResolvedImportSpec};
    use crate::synthesize::{
        collect_existing_imports, synthesize_imports, DropReason, ExistingImportDeclaration,
        ImportClause, NamedSpecifier,
    };
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;
    use std::collections::HashSet;

    fn existing(code: &str) -> Vec<ExistingImportDeclaration> {
        let allocator = Allocator::default();
        let source_type = SourceType::default()
            .with_typescript(true)
            .with_module(true);
        let ret = Parser::new(&allocator, code, source_type).parse();
        assert!(ret.errors.is_empty());
        collect_existing_imports(&ret.program)
    }

    fn named(source: &str, exported: &str, local: &str) -> ResolvedImportSpec {
        ResolvedImportSpec {
            source: source.to_string(),
            local: local.to_string(),
            imported: ImportedName::Named(exported.to_string()),
        }
    }

    fn special(source: &str, local: &str, imported: ImportedName) -> ResolvedImportSpec {
        ResolvedImportSpec {
            source: source.to_string(),
            local: local.to_string(),
            imported,
        }
    }

    #[test]
    fn test_collect_existing_imports() {
        let imports = existing(
            r#"
            "use client";
            import "./polyfill";
            import React, { useState as useS } from "react";
            import * as motion from "motion/react-m";
            import type { Ref } from "vue";
            const a = 1;
            import { computed } from "vue";
            "#,
        );
        assert_eq!(imports.len(), 5);

        assert!(imports[0].side_effect_only);
        assert!(!imports[0].can_hold_named());

        assert_eq!(imports[1].default.as_deref(), Some("React"));
        assert_eq!(imports[1].named, vec![NamedSpecifier::new("useState", "useS")]);
        assert!(imports[1].can_hold_named());
        assert_eq!(
            imports[1].to_string(),
            r#"import React, { useState as useS } from "react""#
        );

        assert_eq!(imports[2].namespace.as_deref(), Some("motion"));
        assert!(!imports[2].can_hold_named());

        assert!(imports[3].type_only);
        assert!(!imports[3].can_hold_named());

        assert_eq!(imports[4].statement_index, 5);
    }

    #[test]
    fn test_named_specs_augment_existing_import() {
        let imports = existing(r#"import { x } from "m";"#);
        let specs = vec![named("m", "y", "y")];
        let result = synthesize_imports(&imports, &specs, &HashSet::new());

        assert!(result.declarations.is_empty());
        assert_eq!(result.augmented.len(), 1);
        assert_eq!(result.augmented[0].statement_index, 0);
        assert_eq!(result.augmented[0].specifiers, vec![NamedSpecifier::new("y", "y")]);
    }

    #[test]
    fn test_type_only_import_is_not_augmented() {
        let imports = existing(r#"import type { Ref } from "vue";"#);
        let specs = vec![named("vue", "ref", "ref")];
        let result = synthesize_imports(&imports, &specs, &HashSet::new());

        assert!(result.augmented.is_empty());
        assert_eq!(result.declarations.len(), 1);
        assert_eq!(result.declarations[0].to_string(), r#"import { ref } from "vue""#);
    }

    #[test]
    fn test_new_declarations_are_grouped_and_sorted() {
        let specs = vec![
            named("vue", "ref", "ref"),
            named("@vueuse/core", "useFetch", "useMyFetch"),
            named("vue", "computed", "computed"),
            special("motion/react-m", "motion", ImportedName::Namespace),
            special("axios", "axios", ImportedName::Default),
            named("@vueuse/core", "useMouse", "useMouse"),
        ];
        let result = synthesize_imports(&[], &specs, &HashSet::new());

        let rendered: Vec<String> = result
            .declarations
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                r#"import { useFetch as useMyFetch, useMouse } from "@vueuse/core""#,
                r#"import axios from "axios""#,
                r#"import * as motion from "motion/react-m""#,
                r#"import { computed, ref } from "vue""#,
            ]
        );
        assert_eq!(result.added().len(), 6);
    }

    #[test]
    fn test_default_and_named_from_one_module_stay_separate() {
        let specs = vec![
            named("react", "useState", "useState"),
            special("react", "React", ImportedName::Default),
        ];
        let result = synthesize_imports(&[], &specs, &HashSet::new());
        assert_eq!(result.declarations.len(), 2);
        assert_eq!(
            result.declarations[0].clause,
            ImportClause::Default {
                local: "React".to_string()
            }
        );
    }

    #[test]
    fn test_taken_names_are_dropped() {
        let imports = existing(r#"import { ref } from "other";"#);
        let module_bindings: HashSet<String> =
            ["computed".to_string(), "ref".to_string()].into_iter().collect();
        let specs = vec![
            named("vue", "ref", "ref"),
            named("vue", "computed", "computed"),
            named("vue", "watch", "watch"),
            named("my-vue", "watch", "watch"),
        ];
        let result = synthesize_imports(&imports, &specs, &module_bindings);

        assert_eq!(result.declarations.len(), 1);
        assert_eq!(result.declarations[0].to_string(), r#"import { watch } from "vue""#);

        let reasons: Vec<&DropReason> = result.dropped.iter().map(|d| &d.reason).collect();
        assert_eq!(
            reasons,
            vec![
                &DropReason::ExistingImport {
                    source: "other".to_string()
                },
                &DropReason::ModuleBinding,
                &DropReason::DuplicateLocal {
                    source: "vue".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_no_specs_is_empty() {
        let imports = existing(r#"import { ref } from "vue";"#);
        let result = synthesize_imports(&imports, &[], &HashSet::new());
        assert!(result.is_empty());
        assert!(result.added().is_empty());
    }
}

//! Writes a `FinalImportSet` into a copy of the module tree.

use crate::synthesize::{FinalImportSet, ImportClause, ImportDeclarationPlan, NamedSpecifier};
use oxc_allocator::{Allocator, Box as oxc_box, CloneIn};
use oxc_ast::{ast::*, AstBuilder};
use oxc_span::SPAN;
use std::collections::HashMap;

struct ImportBuilder<'a> {
    ast: AstBuilder<'a>,
}

impl<'a> ImportBuilder<'a> {
    fn new(allocator: &'a Allocator) -> Self {
        Self {
            ast: AstBuilder::new(allocator),
        }
    }

    fn atom(&self, value: &str) -> &'a str {
        self.ast.allocator.alloc_str(value)
    }

    fn binding(&self, name: &str) -> BindingIdentifier<'a> {
        self.ast.binding_identifier(SPAN, self.atom(name))
    }

    fn named_specifier(&self, specifier: &NamedSpecifier) -> ImportDeclarationSpecifier<'a> {
        let imported = self
            .ast
            .module_export_name_identifier_name(SPAN, self.atom(&specifier.exported));
        self.ast.import_declaration_specifier_import_specifier(
            SPAN,
            imported,
            self.binding(&specifier.local),
            ImportOrExportKind::Value,
        )
    }

    fn declaration(&self, plan: &ImportDeclarationPlan) -> Statement<'a> {
        let mut specifiers = self.ast.vec();
        match &plan.clause {
            ImportClause::Default { local } => {
                specifiers.push(
                    self.ast
                        .import_declaration_specifier_import_default_specifier(
                            SPAN,
                            self.binding(local),
                        ),
                );
            }
            ImportClause::Namespace { local } => {
                specifiers.push(
                    self.ast
                        .import_declaration_specifier_import_namespace_specifier(
                            SPAN,
                            self.binding(local),
                        ),
                );
            }
            ImportClause::Named { specifiers: named } => {
                for specifier in named {
                    specifiers.push(self.named_specifier(specifier));
                }
            }
        }

        let source = self.ast.string_literal(SPAN, self.atom(&plan.source), None);
        Statement::ImportDeclaration(self.ast.alloc_import_declaration(
            SPAN,
            Some(specifiers),
            source,
            None,
            None::<oxc_box<WithClause>>,
            ImportOrExportKind::Value,
        ))
    }
}

/// Returns a new program with `imports` applied. The input is left untouched.
///
/// Augmented declarations keep their position. New declarations go right
/// after the leading run of imports, or at the top of the body when the
/// module starts with something else. Directives live outside the body and
/// therefore stay first.
pub fn inject_imports<'a>(
    allocator: &'a Allocator,
    program: &Program<'a>,
    imports: &FinalImportSet,
) -> Program<'a> {
    let mut program = program.clone_in(allocator);
    if imports.is_empty() {
        return program;
    }

    let builder = ImportBuilder::new(allocator);
    let augmented: HashMap<usize, &[NamedSpecifier]> = imports
        .augmented
        .iter()
        .map(|augmentation| {
            (
                augmentation.statement_index,
                augmentation.specifiers.as_slice(),
            )
        })
        .collect();

    let insert_at = program
        .body
        .iter()
        .take_while(|stmt| matches!(stmt, Statement::ImportDeclaration(_)))
        .count();

    let old_body = std::mem::replace(&mut program.body, builder.ast.vec());
    let old_len = old_body.len();
    for (index, mut stmt) in old_body.into_iter().enumerate() {
        if index == insert_at {
            for plan in &imports.declarations {
                program.body.push(builder.declaration(plan));
            }
        }
        if let (Some(extra), Statement::ImportDeclaration(decl)) =
            (augmented.get(&index), &mut stmt)
        {
            if let Some(specifiers) = decl.specifiers.as_mut() {
                for specifier in extra.iter() {
                    specifiers.push(builder.named_specifier(specifier));
                }
            }
        }
        program.body.push(stmt);
    }
    // Body made only of imports (or empty).
    if insert_at == old_len {
        for plan in &imports.declarations {
            program.body.push(builder.declaration(plan));
        }
    }

    program
}

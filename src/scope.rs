//! Lexical scope analysis for ES modules.
//!
//! One pass over the program builds a scope tree and records every identifier
//! reference together with the scope it appears in. Resolution runs after the
//! pass, so hoisted bindings (`var`, function declarations) are visible to
//! references that precede them.

use oxc_ast::ast::{
    ArrayPattern, ArrowFunctionExpression, BindingIdentifier, BlockStatement, CatchClause,
    Class, ClassType, ExportNamedDeclaration, Expression, ForInStatement, ForOfStatement,
    ForStatement, FormalParameters, Function, FunctionType, IdentifierReference,
    ImportDeclaration, ImportDeclarationSpecifier, ObjectPattern, Program, StaticBlock,
    SwitchStatement, TSClassImplements, TSEnumDeclaration, TSEnumMember, TSEnumMemberName,
    TSImportEqualsDeclaration,
    TSInterfaceDeclaration, TSModuleDeclaration, TSModuleDeclarationName, TSType,
    TSTypeAliasDeclaration, VariableDeclaration, VariableDeclarationKind,
};
use oxc_ast_visit::{walk, Visit};
use oxc_span::Span;
use oxc_syntax::scope::ScopeFlags;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Free identifier names with every span they are referenced at, sorted by
/// name so downstream output is deterministic.
pub type FreeIdentifiers = BTreeMap<String, Vec<Span>>;

// ═══════════════════════════════════════════════════════════════════════════════
// SCOPE TREE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    /// Parameter lists, function bodies, class static blocks and namespace
    /// bodies. `var` lands here.
    Function,
    Block,
    Catch,
    Class,
}

impl ScopeKind {
    fn hosts_var(self) -> bool {
        matches!(self, ScopeKind::Module | ScopeKind::Function)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Variable,
    Function,
    Parameter,
    /// Bound by an object or array pattern.
    DestructuredElement,
    Class,
    CatchParameter,
    Import,
    TypeScriptDeclaration,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub bindings: HashMap<String, BindingKind>,
}

/// Arena of scopes. `ScopeId::ROOT` is the module scope.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                kind: ScopeKind::Module,
                parent: None,
                children: Vec::new(),
                bindings: HashMap::new(),
            }],
        }
    }

    pub fn add_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            bindings: HashMap::new(),
        });
        self.scopes[parent.index()].children.push(id);
        id
    }

    /// First declaration of a name in a scope keeps its kind.
    pub fn declare(&mut self, scope: ScopeId, name: &str, kind: BindingKind) {
        self.scopes[scope.index()]
            .bindings
            .entry(name.to_string())
            .or_insert(kind);
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn root(&self) -> &Scope {
        self.get(ScopeId::ROOT)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// `id` followed by each enclosing scope up to the module scope.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(id), move |current| self.get(*current).parent)
    }

    /// Innermost scope on the chain from `from` that binds `name`.
    pub fn resolve(&self, name: &str, from: ScopeId) -> Option<(ScopeId, BindingKind)> {
        self.ancestors(from).find_map(|id| {
            self.get(id)
                .bindings
                .get(name)
                .map(|kind| (id, *kind))
        })
    }

    fn var_scope(&self, from: ScopeId) -> ScopeId {
        self.ancestors(from)
            .find(|id| self.get(*id).kind.hosts_var())
            .unwrap_or(ScopeId::ROOT)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANALYSIS RESULT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub span: Span,
    pub scope: ScopeId,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeAnalysis {
    pub tree: ScopeTree,
    pub references: Vec<Reference>,
}

impl ScopeAnalysis {
    /// Names referenced somewhere without a binding on that reference's scope
    /// chain.
    pub fn free_identifiers(&self) -> FreeIdentifiers {
        let mut free = FreeIdentifiers::new();
        for reference in &self.references {
            if self.tree.resolve(&reference.name, reference.scope).is_none() {
                free.entry(reference.name.clone())
                    .or_default()
                    .push(reference.span);
            }
        }
        free
    }

    /// Every name bound in the module scope, imports included.
    pub fn module_bindings(&self) -> HashSet<String> {
        self.tree.root().bindings.keys().cloned().collect()
    }
}

pub fn analyze_program(program: &Program) -> ScopeAnalysis {
    let mut analyzer = ScopeAnalyzer {
        tree: ScopeTree::new(),
        current: ScopeId::ROOT,
        references: Vec::new(),
    };
    analyzer.visit_program(program);
    ScopeAnalysis {
        tree: analyzer.tree,
        references: analyzer.references,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PATTERN BINDINGS
// ═══════════════════════════════════════════════════════════════════════════════

/// Collects the names a binding pattern introduces. Default values, computed
/// keys and type annotations are skipped; the main analyzer visits those as
/// ordinary expressions.
#[derive(Default)]
struct PatternBindings {
    names: Vec<(String, bool)>,
    depth: usize,
}

impl PatternBindings {
    fn declare_into(self, tree: &mut ScopeTree, scope: ScopeId, kind: BindingKind) {
        for (name, destructured) in self.names {
            let kind = if destructured {
                BindingKind::DestructuredElement
            } else {
                kind
            };
            tree.declare(scope, &name, kind);
        }
    }
}

impl<'a> Visit<'a> for PatternBindings {
    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        self.names.push((ident.name.to_string(), self.depth > 0));
    }

    fn visit_object_pattern(&mut self, pattern: &ObjectPattern<'a>) {
        self.depth += 1;
        walk::walk_object_pattern(self, pattern);
        self.depth -= 1;
    }

    fn visit_array_pattern(&mut self, pattern: &ArrayPattern<'a>) {
        self.depth += 1;
        walk::walk_array_pattern(self, pattern);
        self.depth -= 1;
    }

    fn visit_expression(&mut self, _expr: &Expression<'a>) {}

    fn visit_ts_type(&mut self, _ty: &TSType<'a>) {}
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANALYZER
// ═══════════════════════════════════════════════════════════════════════════════

struct ScopeAnalyzer {
    tree: ScopeTree,
    current: ScopeId,
    references: Vec<Reference>,
}

impl ScopeAnalyzer {
    fn enter(&mut self, kind: ScopeKind) -> ScopeId {
        let parent = self.current;
        self.current = self.tree.add_scope(kind, parent);
        parent
    }

    fn leave(&mut self, parent: ScopeId) {
        self.current = parent;
    }

    fn declare(&mut self, name: &str, kind: BindingKind) {
        self.tree.declare(self.current, name, kind);
    }
}

impl<'a> Visit<'a> for ScopeAnalyzer {
    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        self.references.push(Reference {
            name: ident.name.to_string(),
            span: ident.span,
            scope: self.current,
        });
    }

    // Bindings are declared by the node that owns them.
    fn visit_binding_identifier(&mut self, _ident: &BindingIdentifier<'a>) {}

    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let Some(specifiers) = &decl.specifiers else {
            return;
        };
        for specifier in specifiers {
            let local = match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
            };
            self.tree
                .declare(ScopeId::ROOT, local.name.as_str(), BindingKind::Import);
        }
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        // `export { a } from "m"` names another module's bindings.
        if decl.source.is_some() {
            return;
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'a>) {
        let target = if matches!(decl.kind, VariableDeclarationKind::Var) {
            self.tree.var_scope(self.current)
        } else {
            self.current
        };
        for declarator in &decl.declarations {
            let mut bindings = PatternBindings::default();
            bindings.visit_binding_pattern(&declarator.id);
            bindings.declare_into(&mut self.tree, target, BindingKind::Variable);
        }
        walk::walk_variable_declaration(self, decl);
    }

    fn visit_function(&mut self, func: &Function<'a>, _flags: ScopeFlags) {
        let is_declaration = matches!(
            func.r#type,
            FunctionType::FunctionDeclaration | FunctionType::TSDeclareFunction
        );
        if is_declaration {
            if let Some(id) = &func.id {
                self.declare(id.name.as_str(), BindingKind::Function);
            }
        }

        let parent = self.enter(ScopeKind::Function);
        if !is_declaration {
            if let Some(id) = &func.id {
                self.declare(id.name.as_str(), BindingKind::Function);
            }
        }
        // Defaults see earlier parameters but not the body's declarations.
        self.declare_parameters(&func.params);
        self.visit_formal_parameters(&func.params);
        if let Some(body) = &func.body {
            let params = self.enter(ScopeKind::Function);
            self.visit_function_body(body);
            self.leave(params);
        }
        self.leave(parent);
    }

    fn visit_arrow_function_expression(&mut self, func: &ArrowFunctionExpression<'a>) {
        let parent = self.enter(ScopeKind::Function);
        self.declare_parameters(&func.params);
        self.visit_formal_parameters(&func.params);
        let params = self.enter(ScopeKind::Function);
        self.visit_function_body(&func.body);
        self.leave(params);
        self.leave(parent);
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        let is_declaration = matches!(class.r#type, ClassType::ClassDeclaration);
        if is_declaration {
            if let Some(id) = &class.id {
                self.declare(id.name.as_str(), BindingKind::Class);
            }
        }

        let parent = self.enter(ScopeKind::Class);
        if !is_declaration {
            if let Some(id) = &class.id {
                self.declare(id.name.as_str(), BindingKind::Class);
            }
        }
        walk::walk_class(self, class);
        self.leave(parent);
    }

    fn visit_static_block(&mut self, block: &StaticBlock<'a>) {
        let parent = self.enter(ScopeKind::Function);
        walk::walk_static_block(self, block);
        self.leave(parent);
    }

    fn visit_block_statement(&mut self, block: &BlockStatement<'a>) {
        let parent = self.enter(ScopeKind::Block);
        walk::walk_block_statement(self, block);
        self.leave(parent);
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause<'a>) {
        let parent = self.enter(ScopeKind::Catch);
        if let Some(param) = &clause.param {
            let mut bindings = PatternBindings::default();
            bindings.visit_catch_parameter(param);
            bindings.declare_into(&mut self.tree, self.current, BindingKind::CatchParameter);
        }
        walk::walk_catch_clause(self, clause);
        self.leave(parent);
    }

    fn visit_for_statement(&mut self, stmt: &ForStatement<'a>) {
        let parent = self.enter(ScopeKind::Block);
        walk::walk_for_statement(self, stmt);
        self.leave(parent);
    }

    fn visit_for_in_statement(&mut self, stmt: &ForInStatement<'a>) {
        let parent = self.enter(ScopeKind::Block);
        walk::walk_for_in_statement(self, stmt);
        self.leave(parent);
    }

    fn visit_for_of_statement(&mut self, stmt: &ForOfStatement<'a>) {
        let parent = self.enter(ScopeKind::Block);
        walk::walk_for_of_statement(self, stmt);
        self.leave(parent);
    }

    fn visit_switch_statement(&mut self, stmt: &SwitchStatement<'a>) {
        self.visit_expression(&stmt.discriminant);
        let parent = self.enter(ScopeKind::Block);
        for case in &stmt.cases {
            self.visit_switch_case(case);
        }
        self.leave(parent);
    }

    // Type positions never need a runtime import.
    fn visit_ts_type(&mut self, _ty: &TSType<'a>) {}

    fn visit_ts_class_implements(&mut self, _implements: &TSClassImplements<'a>) {}

    fn visit_ts_interface_declaration(&mut self, _decl: &TSInterfaceDeclaration<'a>) {}

    fn visit_ts_type_alias_declaration(&mut self, _decl: &TSTypeAliasDeclaration<'a>) {}

    fn visit_ts_enum_declaration(&mut self, decl: &TSEnumDeclaration<'a>) {
        self.declare(decl.id.name.as_str(), BindingKind::TypeScriptDeclaration);
        let parent = self.enter(ScopeKind::Block);
        walk::walk_ts_enum_declaration(self, decl);
        self.leave(parent);
    }

    // Members are visible to every initializer in the enum, earlier ones included.
    fn visit_ts_enum_member(&mut self, member: &TSEnumMember<'a>) {
        match &member.id {
            TSEnumMemberName::Identifier(id) => {
                self.declare(id.name.as_str(), BindingKind::TypeScriptDeclaration);
            }
            TSEnumMemberName::String(lit) | TSEnumMemberName::ComputedString(lit) => {
                self.declare(lit.value.as_str(), BindingKind::TypeScriptDeclaration);
            }
            TSEnumMemberName::ComputedTemplateString(_) => {}
        }
        walk::walk_ts_enum_member(self, member);
    }

    fn visit_ts_module_declaration(&mut self, decl: &TSModuleDeclaration<'a>) {
        // `declare module "x"` and ambient namespaces emit no code.
        let TSModuleDeclarationName::Identifier(id) = &decl.id else {
            return;
        };
        self.declare(id.name.as_str(), BindingKind::TypeScriptDeclaration);
        if decl.declare {
            return;
        }
        let parent = self.enter(ScopeKind::Function);
        walk::walk_ts_module_declaration(self, decl);
        self.leave(parent);
    }

    fn visit_ts_import_equals_declaration(&mut self, decl: &TSImportEqualsDeclaration<'a>) {
        self.declare(decl.id.name.as_str(), BindingKind::TypeScriptDeclaration);
        if decl.import_kind.is_type() {
            return;
        }
        walk::walk_ts_import_equals_declaration(self, decl);
    }
}

impl ScopeAnalyzer {
    fn declare_parameters(&mut self, params: &FormalParameters) {
        let mut bindings = PatternBindings::default();
        bindings.visit_formal_parameters(params);
        bindings.declare_into(&mut self.tree, self.current, BindingKind::Parameter);
    }
}

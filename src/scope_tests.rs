#[cfg(test)]
mod tests {
    use crate::scope::{analyze_program, BindingKind, ScopeAnalysis, ScopeId, ScopeKind};
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn analyze(code: &str) -> ScopeAnalysis {
        let allocator = Allocator::default();
        let source_type = SourceType::default()
            .with_typescript(true)
            .with_module(true)
            .with_jsx(true);
        let ret = Parser::new(&allocator, code, source_type).parse();
        assert!(ret.errors.is_empty(), "parse errors: {:?}", ret.errors);
        analyze_program(&ret.program)
    }

    fn free_names(code: &str) -> Vec<String> {
        analyze(code).free_identifiers().into_keys().collect()
    }

    #[test]
    fn test_unbound_call_is_free() {
        assert_eq!(free_names("const count = ref(0);"), vec!["ref"]);
    }

    #[test]
    fn test_module_binding_suppresses() {
        let code = r#"
            const ref = (v) => v;
            function f() { return ref(1); }
        "#;
        assert!(free_names(code).is_empty());
    }

    #[test]
    fn test_sibling_function_binding_does_not_suppress() {
        let code = r#"
            function a() { const ref = 1; return ref; }
            function b() { return ref(0); }
        "#;
        assert_eq!(free_names(code), vec!["ref"]);
    }

    #[test]
    fn test_hoisted_declarations_are_visible_before_use() {
        let code = r#"
            foo();
            console.log(x);
            function foo() {}
            var x = 1;
        "#;
        assert_eq!(free_names(code), vec!["console"]);
    }

    #[test]
    fn test_var_escapes_blocks_but_let_does_not() {
        let code = r#"
            { var a = 1; }
            { let b = 2; }
            a; b;
            function f() {
                if (c) { var v = 1; }
                return v;
            }
        "#;
        assert_eq!(free_names(code), vec!["b", "c"]);
    }

    #[test]
    fn test_destructuring_binds_every_element() {
        let code = r#"
            const { a: b, c = d, ...rest } = obj;
            const [x, , y = z, ...others] = arr;
            use(b, c, rest, x, y, others);
        "#;
        assert_eq!(free_names(code), vec!["arr", "d", "obj", "use", "z"]);
    }

    #[test]
    fn test_parameters_bind_in_function_scope() {
        let code = r#"
            function f(a, { b }, [c], d = e, ...rest) {
                return a + b + c + d + rest.length;
            }
            const g = (p, q = p) => p + q;
        "#;
        assert_eq!(free_names(code), vec!["e"]);
    }

    #[test]
    fn test_defaults_do_not_see_body_declarations() {
        let code = r#"
            export function f(a = ref(0)) { const ref = 1; return a; }
            const g = (b = computed()) => { let computed = 2; return b + computed; };
            function h(x, y = x) { var x; return y; }
        "#;
        assert_eq!(free_names(code), vec!["computed", "ref"]);
    }

    #[test]
    fn test_body_is_nested_in_parameter_scope() {
        let analysis = analyze("function f(a) { let b = a; }");
        let params = analysis.tree.get(analysis.tree.root().children[0]);
        assert!(params.bindings.contains_key("a"));
        assert!(!params.bindings.contains_key("b"));

        let body = analysis.tree.get(params.children[0]);
        assert_eq!(body.kind, ScopeKind::Function);
        assert_eq!(body.bindings.get("b"), Some(&BindingKind::Variable));
        assert!(analysis.free_identifiers().is_empty());
    }

    #[test]
    fn test_parameter_kinds_are_recorded() {
        let analysis = analyze("function f(a, { b }) {}");
        let function_scope = analysis.tree.root().children[0];
        let scope = analysis.tree.get(function_scope);
        assert_eq!(scope.kind, ScopeKind::Function);
        assert_eq!(scope.bindings.get("a"), Some(&BindingKind::Parameter));
        assert_eq!(
            scope.bindings.get("b"),
            Some(&BindingKind::DestructuredElement)
        );
        assert_eq!(
            analysis.tree.root().bindings.get("f"),
            Some(&BindingKind::Function)
        );
    }

    #[test]
    fn test_catch_parameter() {
        let code = r#"
            try { run(); } catch (err) { log(err); }
            try { run(); } catch ({ message }) { log(message); }
            err;
        "#;
        assert_eq!(free_names(code), vec!["err", "log", "run"]);
    }

    #[test]
    fn test_property_names_and_labels_are_not_references() {
        let code = r#"
            const o = { ref: 1, computed: x };
            o.ref;
            o.computed;
            outer: for (;;) { break outer; }
        "#;
        assert_eq!(free_names(code), vec!["x"]);
    }

    #[test]
    fn test_imports_bind_in_module_scope() {
        let code = r#"
            import { ref } from "vue";
            import def from "d";
            import * as ns from "n";
            import type { Ref } from "vue";
            ref(def, ns);
        "#;
        let analysis = analyze(code);
        assert!(analysis.free_identifiers().is_empty());
        assert_eq!(
            analysis.tree.root().bindings.get("Ref"),
            Some(&BindingKind::Import)
        );
    }

    #[test]
    fn test_class_names() {
        let code = r#"
            class A { method() { return A; } }
            const B = class C { m() { return C; } };
            C;
            new A();
        "#;
        assert_eq!(free_names(code), vec!["C"]);
    }

    #[test]
    fn test_function_expression_name_is_local() {
        let code = r#"
            const f = function g() { return g; };
            g;
        "#;
        assert_eq!(free_names(code), vec!["g"]);
    }

    #[test]
    fn test_jsx_component_tags_are_references() {
        let code = r#"
            export default () => (
                <Suspense>
                    <motion.div className="box"><div /></motion.div>
                </Suspense>
            );
        "#;
        assert_eq!(free_names(code), vec!["Suspense", "motion"]);
    }

    #[test]
    fn test_type_positions_are_skipped() {
        let code = r#"
            interface Props { r: Ref<number> }
            type T = ComputedRef<string>;
            function f(a: Ref<string>): MaybeRef { return a as Foo; }
            class K implements Impl {}
            let v: Typ = 1 satisfies Num;
            const s = useState<Foo>(0);
        "#;
        assert_eq!(free_names(code), vec!["useState"]);
    }

    #[test]
    fn test_typescript_value_declarations_bind() {
        let code = r#"
            enum Color { Red }
            namespace NS { export const a = 1; }
            Color.Red;
            NS.a;
        "#;
        assert!(free_names(code).is_empty());
    }

    #[test]
    fn test_namespace_body_references() {
        let code = r#"
            namespace Store {
                export const count = ref(0);
                const local = 1;
                export function bump() { return local + count.value; }
            }
            namespace Outer.Inner { export const d = computed(() => 1); }
            local;
        "#;
        assert_eq!(free_names(code), vec!["computed", "local", "ref"]);
    }

    #[test]
    fn test_ambient_declarations_are_not_walked() {
        let code = r#"
            declare namespace Amb { export function g(): Missing; }
            declare module "virtual" { export const v: number; }
            Amb.g();
        "#;
        assert!(free_names(code).is_empty());
    }

    #[test]
    fn test_enum_members_bind_in_enum_body() {
        let code = r#"
            enum Dir { Up = 1, Down = Up + 1, Left = base, "Right" = Right }
            Up;
        "#;
        assert_eq!(free_names(code), vec!["Up", "base"]);
    }

    #[test]
    fn test_import_equals_entity_name_is_a_reference() {
        let code = r#"
            import x = Foo.Bar;
            import y = require("y");
            x; y;
        "#;
        let analysis = analyze(code);
        assert_eq!(
            analysis.free_identifiers().into_keys().collect::<Vec<_>>(),
            vec!["Foo"]
        );
        assert_eq!(
            analysis.tree.root().bindings.get("x"),
            Some(&BindingKind::TypeScriptDeclaration)
        );
    }

    #[test]
    fn test_every_use_site_is_kept() {
        let free = analyze("ref(1); ref(2); computed();").free_identifiers();
        assert_eq!(free["ref"].len(), 2);
        assert_eq!(free["computed"].len(), 1);
    }

    #[test]
    fn test_reexports_are_not_references() {
        let code = r#"
            export { ref } from "vue";
            export * from "x";
            export { computed };
        "#;
        assert_eq!(free_names(code), vec!["computed"]);
    }

    #[test]
    fn test_for_of_head_scope() {
        let code = r#"
            for (const item of items) { use(item); }
            for (let i = 0; i < n; i++) {}
            item; i;
        "#;
        assert_eq!(free_names(code), vec!["i", "item", "items", "n", "use"]);
    }

    #[test]
    fn test_switch_cases_share_one_scope() {
        let code = r#"
            switch (k) {
                case 1: let z = 1; break;
                default: z;
            }
            z;
        "#;
        assert_eq!(free_names(code), vec!["k", "z"]);
    }

    #[test]
    fn test_static_block_is_a_var_scope() {
        let code = r#"
            class S { static { var inner = 1; inner; } }
            inner;
        "#;
        assert_eq!(free_names(code), vec!["inner"]);
    }

    #[test]
    fn test_module_bindings() {
        let code = r#"
            import { a } from "m";
            const b = 1;
            function c() { let d = 2; }
        "#;
        let bindings = analyze(code).module_bindings();
        let mut names: Vec<_> = bindings.into_iter().collect();
        names.sort();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_resolve_walks_to_nearest_binding() {
        let analysis = analyze("const x = 1; function f() { const x = 2; { x; } }");
        let reference = &analysis.references[0];
        let (scope, kind) = analysis.tree.resolve("x", reference.scope).unwrap();
        assert_ne!(scope, ScopeId::ROOT);
        assert_eq!(kind, BindingKind::Variable);
        assert_eq!(analysis.tree.ancestors(reference.scope).last(), Some(ScopeId::ROOT));
    }
}

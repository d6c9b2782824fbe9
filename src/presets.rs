//! Bundled presets.
//!
//! Each preset is an ordered symbol list for one module. Order matters: when a
//! configuration lists several presets, the first preset mapping a symbol wins.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinPreset {
    pub name: &'static str,
    pub from: &'static str,
    pub imports: &'static [&'static str],
}

const VUE: &[&str] = &[
    "ref",
    "computed",
    "reactive",
    "watch",
    "watchEffect",
    "onMounted",
    "onUnmounted",
    "onBeforeMount",
    "onBeforeUnmount",
    "onUpdated",
    "onBeforeUpdate",
    "nextTick",
    "defineComponent",
    "createApp",
    "toRef",
    "toRefs",
    "unref",
    "isRef",
];

const REACT: &[&str] = &[
    // Hooks
    "useState",
    "useCallback",
    "useMemo",
    "useEffect",
    "useRef",
    "useContext",
    "useReducer",
    "useImperativeHandle",
    "useDebugValue",
    "useDeferredValue",
    "useLayoutEffect",
    "useTransition",
    "startTransition",
    "useSyncExternalStore",
    "useInsertionEffect",
    "useId",
    "lazy",
    "memo",
    "createRef",
    "forwardRef",
    // React 19
    "cache",
    "cacheSignal",
    "createContext",
    "use",
    "useOptimistic",
    "useEffectEvent",
    "useActionState",
    "Fragment",
    "Suspense",
    "Activity",
];

const REACT_DOM: &[&str] = &[
    "useFormStatus",
    "createPortal",
    "flushSync",
    "preconnect",
    "prefetchDNS",
    "preinit",
    "preinitModule",
    "preload",
    "preloadModule",
];

const VUE_ROUTER: &[&str] = &["useRouter", "useRoute"];

const REACT_ROUTER: &[&str] = &[
    "useNavigate",
    "useLocation",
    "useParams",
    "useSearchParams",
];

pub static BUILTIN_PRESETS: &[BuiltinPreset] = &[
    BuiltinPreset {
        name: "vue",
        from: "vue",
        imports: VUE,
    },
    BuiltinPreset {
        name: "react",
        from: "react",
        imports: REACT,
    },
    BuiltinPreset {
        name: "react-dom",
        from: "react-dom",
        imports: REACT_DOM,
    },
    BuiltinPreset {
        name: "vue-router",
        from: "vue-router",
        imports: VUE_ROUTER,
    },
    BuiltinPreset {
        name: "react-router",
        from: "react-router-dom",
        imports: REACT_ROUTER,
    },
];

pub fn builtin_preset(name: &str) -> Option<&'static BuiltinPreset> {
    BUILTIN_PRESETS.iter().find(|preset| preset.name == name)
}

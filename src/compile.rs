use std::collections::BTreeMap;
use std::sync::Arc;

use crate::creator::{ActionCreator, ActionCreators, ActionTypes};
use crate::format::{ShoutySnake, TypeFormat};
use crate::reducer::Reducer;
use crate::spec::{Entry, Spec};

/// Shared handle to a [`TypeFormat`] strategy.
pub type Formatter = Arc<dyn TypeFormat + Send + Sync>;

/// Compiler configuration.
///
/// Every field defaults to unset. Values given here take precedence over the
/// spec-embedded equivalents ([`Spec::prefix`], [`Spec::initial`]); an unset
/// field falls back to the spec, then to the built-in default ([`ShoutySnake`]
/// for the formatter, nothing for the rest).
pub struct Options<S> {
    pub prefix: Option<String>,
    pub initial_state: Option<S>,
    pub type_format: Option<Formatter>,
}

impl<S> Default for Options<S> {
    fn default() -> Self {
        Options {
            prefix: None,
            initial_state: None,
            type_format: None,
        }
    }
}

impl<S> Options<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn initial_state(mut self, initial: S) -> Self {
        self.initial_state = Some(initial);
        self
    }

    pub fn type_format(mut self, format: impl TypeFormat + Send + Sync + 'static) -> Self {
        self.type_format = Some(Arc::new(format));
        self
    }
}

/// The bare-prefix calling convention: `compile(spec, "counter")`.
impl<S> From<&str> for Options<S> {
    fn from(prefix: &str) -> Self {
        Options::new().prefix(prefix)
    }
}

impl<S> From<String> for Options<S> {
    fn from(prefix: String) -> Self {
        Options::new().prefix(prefix)
    }
}

/// The no-options calling convention: `compile(spec, ())`.
impl<S> From<()> for Options<S> {
    fn from(_: ()) -> Self {
        Options::default()
    }
}

/// The two coupled products of a compiled spec.
#[derive(Clone, Debug)]
pub struct Compiled<S> {
    pub actions: ActionCreators,
    pub reducer: Reducer<S>,
}

/// Compiles a [`Spec`] into its action-creator registry and reducer.
///
/// Types are resolved for every declaring entry up front, so a custom
/// creator's sibling lookups (`actions.kind_of(…)`) observe final types
/// regardless of declaration order. Two names that collapse to the same type
/// string follow last-write-wins; inert entries are skipped silently.
pub fn compile<S>(spec: Spec<S>, options: impl Into<Options<S>>) -> Compiled<S> {
    let options = options.into();
    let (entries, spec_prefix, spec_initial) = spec.into_parts();

    let prefix = options.prefix.or(spec_prefix);
    let initial = options.initial_state.or(spec_initial);
    let format = options.type_format.unwrap_or_else(|| Arc::new(ShoutySnake));

    // Phase one: the complete name → type map, before any creator exists.
    let types: BTreeMap<String, String> = entries
        .iter()
        .filter(|(_, entry)| entry.declares_creator())
        .map(|(name, _)| (name.clone(), format.format(name, prefix.as_deref())))
        .collect();
    let types = Arc::new(ActionTypes::new(types));

    // Phase two: creators capture the finished map, cases key by type.
    let mut creators = BTreeMap::new();
    let mut cases = BTreeMap::new();
    for (name, entry) in entries {
        let Some(kind) = types.kind_of(&name).map(str::to_owned) else {
            log::trace!("spec entry {name:?} declares nothing; skipping");
            continue;
        };
        log::debug!("compiled spec entry {name:?} as {kind:?}");

        match entry {
            Entry::Reduce(case) => {
                creators.insert(
                    name,
                    ActionCreator::default_for(kind.clone(), Arc::clone(&types)),
                );
                cases.insert(kind, case);
            }
            Entry::Capability { create, reduce } => {
                let creator = match create {
                    Some(create) => ActionCreator::custom(kind.clone(), Arc::clone(&types), create),
                    None => ActionCreator::default_for(kind.clone(), Arc::clone(&types)),
                };
                creators.insert(name, creator);
                if let Some(case) = reduce {
                    cases.insert(kind, case);
                }
            }
            Entry::Inert(_) => {}
        }
    }

    Compiled {
        actions: ActionCreators::new(creators, Arc::clone(&types)),
        reducer: Reducer::new(cases, initial),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::action::Action;
    use crate::creator::ActionTypes;

    fn noop(state: Option<i64>, _action: &Action) -> Option<i64> {
        state
    }

    #[test]
    fn action_type_names() {
        let compiled = compile(
            Spec::new().on("someAction", noop).on("myOtherAction", noop),
            (),
        );

        assert_eq!(compiled.actions["someAction"].kind(), "SOME_ACTION");
        assert_eq!(compiled.actions["myOtherAction"].kind(), "MY_OTHER_ACTION");
    }

    #[test]
    fn default_factory_merges_a_payload() {
        let compiled = compile(Spec::new().on("someAction", noop), ());
        let action = compiled.actions["someAction"].call(&[json!({"value": 1})]);

        assert_eq!(action.kind(), "SOME_ACTION");
        assert_eq!(action.get("value"), Some(&json!(1)));
    }

    #[test]
    fn default_factory_without_payload() {
        let compiled = compile(Spec::new().on("someAction", noop), ());
        let creator = &compiled.actions["someAction"];

        assert_eq!(creator.empty(), Action::new(creator.kind()));
    }

    #[test]
    fn bare_prefix_argument() {
        let compiled = compile(Spec::new().on("someAction", noop), "test");
        assert_eq!(compiled.actions["someAction"].kind(), "TEST_SOME_ACTION");
    }

    #[test]
    fn custom_factory() {
        let compiled = compile(
            Spec::<i64>::new().entry(
                "someAction",
                Entry::create(|kind, _: &ActionTypes, _: &[Value]| {
                    Action::new(kind).field("custom", true)
                }),
            ),
            (),
        );

        let creator = &compiled.actions["someAction"];
        assert_eq!(creator.empty(), Action::new(creator.kind()).field("custom", true));
    }

    #[test]
    fn custom_factories_resolve_siblings_in_any_order() {
        // "zzz" sorts after "aaa"; each one references the other, so one of
        // the lookups always crosses a declaration-order boundary.
        let spec = Spec::<i64>::new()
            .entry(
                "aaa",
                Entry::create(|kind, actions: &ActionTypes, _: &[Value]| {
                    Action::new(kind).field("other", actions.kind_of("zzzLater").unwrap())
                }),
            )
            .entry(
                "zzzLater",
                Entry::create(|kind, actions: &ActionTypes, _: &[Value]| {
                    Action::new(kind).field("other", actions.kind_of("aaa").unwrap())
                }),
            );

        let compiled = compile(spec, Options::new().prefix("pre"));
        assert_eq!(
            compiled.actions["aaa"].empty().get("other"),
            Some(&json!("PRE_ZZZ_LATER"))
        );
        assert_eq!(
            compiled.actions["zzzLater"].empty().get("other"),
            Some(&json!("PRE_AAA"))
        );
    }

    #[test]
    fn colliding_names_follow_last_write_wins() {
        // Both names collapse to SOME_ACTION; entries compile in sorted
        // order, and "some_action" sorts after "someAction" ('_' > 'A'), so
        // its case takes the slot.
        let compiled = compile(
            Spec::<i64>::new()
                .on("someAction", |state, _| Some(state.unwrap_or(0) + 1))
                .on("some_action", |state, _| Some(state.unwrap_or(0) + 2)),
            (),
        );

        assert_eq!(compiled.actions["someAction"].kind(), "SOME_ACTION");
        assert_eq!(compiled.actions["some_action"].kind(), "SOME_ACTION");
        assert_eq!(compiled.reducer.len(), 1);
        assert_eq!(
            compiled.reducer.reduce(Some(0), &Action::new("SOME_ACTION")),
            Some(2)
        );
    }

    #[test]
    fn inert_entries_are_skipped_silently() {
        let compiled = compile(
            Spec::<i64>::new()
                .entry("x", Entry::inert(1))
                .on("increment", |state, _| Some(state.unwrap_or(0) + 1)),
            (),
        );

        assert!(compiled.actions.get("x").is_none());
        assert_eq!(compiled.actions.len(), 1);
        assert_eq!(compiled.reducer.len(), 1);
    }

    #[test]
    fn empty_capability_registers_nothing() {
        let compiled = compile(
            Spec::<i64>::new().entry(
                "nothing",
                Entry::Capability {
                    create: None,
                    reduce: None,
                },
            ),
            (),
        );

        assert!(compiled.actions.is_empty());
        assert!(compiled.reducer.is_empty());
    }

    #[test]
    fn reduce_only_capability_gets_a_default_creator() {
        let compiled = compile(
            Spec::<i64>::new().entry("add", Entry::reduce_only(|state, _| state)),
            (),
        );

        assert_eq!(compiled.actions["add"].empty(), Action::new("ADD"));
    }

    #[test]
    fn options_prefix_overrides_spec_prefix() {
        let spec = Spec::new().prefix("embedded").on("someAction", noop);
        let compiled = compile(spec, Options::new().prefix("explicit"));
        assert_eq!(compiled.actions["someAction"].kind(), "EXPLICIT_SOME_ACTION");
    }

    #[test]
    fn spec_prefix_applies_when_options_leave_it_unset() {
        let spec = Spec::new().prefix("embedded").on("someAction", noop);
        let compiled = compile(spec, ());
        assert_eq!(compiled.actions["someAction"].kind(), "EMBEDDED_SOME_ACTION");
    }

    #[test]
    fn reserved_in_spec_prefix_key() {
        let spec = Spec::new()
            .entry("prefix", Entry::inert("embedded"))
            .on("someAction", noop);
        let compiled = compile(spec, ());

        assert!(compiled.actions.get("prefix").is_none());
        assert_eq!(compiled.actions["someAction"].kind(), "EMBEDDED_SOME_ACTION");
    }

    #[test]
    fn options_initial_state_overrides_spec_initial() {
        let spec = Spec::new().initial(1).on("someAction", noop);
        let compiled = compile(spec, Options::new().initial_state(2));
        assert_eq!(compiled.reducer.reduce(None, &Action::new("OTHER")), Some(2));
    }

    #[test]
    fn custom_type_format_option() {
        let spec = Spec::new().on("someAction", noop);
        let compiled = compile(
            spec,
            Options::new()
                .type_format(|name: &str, _prefix: Option<&str>| format!("app/{name}")),
        );
        assert_eq!(compiled.actions["someAction"].kind(), "app/someAction");
    }

    #[test]
    fn compiled_types_cover_every_declaring_entry() {
        let compiled = compile(
            Spec::<i64>::new()
                .on("someAction", noop)
                .entry("x", Entry::inert("data")),
            (),
        );

        assert_eq!(compiled.actions.types().len(), 1);
        assert_eq!(
            compiled.actions.types().kind_of("someAction"),
            Some("SOME_ACTION")
        );
        assert_eq!(compiled.actions.types().kind_of("x"), None);
    }
}

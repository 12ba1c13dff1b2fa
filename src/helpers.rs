//! Convenience layer over [`compile`] for callers wanting less boilerplate.
//!
//! These wrappers accept specs whose values are *bare* handler functions,
//! wrap each one as the corresponding capability entry, and delegate to the
//! compiler, returning only the product the caller asked for.

use serde_json::Value;

use crate::action::Action;
use crate::compile::{compile, Options};
use crate::creator::{ActionCreators, ActionTypes, CreateFn};
use crate::format::Verbatim;
use crate::reducer::Reducer;
use crate::spec::{Entry, ReduceFn, Spec};

/// Builds only the action-creator registry from a spec whose values are all
/// custom creator functions.
///
/// ```
/// use std::sync::Arc;
/// use actionspec::{helpers::action_factories, Action, CreateFn};
///
/// let actions = action_factories(
///     [(
///         "someAction",
///         Arc::new(|kind: &str, _: &actionspec::ActionTypes, _: &[serde_json::Value]| {
///             Action::new(kind).field("custom", true)
///         }) as CreateFn,
///     )],
///     "pre",
/// );
///
/// assert_eq!(actions["someAction"].kind(), "PRE_SOME_ACTION");
/// ```
pub fn action_factories<N: Into<String>>(
    spec: impl IntoIterator<Item = (N, CreateFn)>,
    options: impl Into<Options<()>>,
) -> ActionCreators {
    let spec = spec.into_iter().fold(Spec::new(), |spec, (name, create)| {
        spec.entry(
            name,
            Entry::Capability {
                create: Some(create),
                reduce: None,
            },
        )
    });
    compile(spec, options).actions
}

/// The default creator as a free function, usable directly as a spec value:
/// merges the first positional argument into `{type}`.
pub fn default_action_factory(kind: &str, _actions: &ActionTypes, args: &[Value]) -> Action {
    Action::from_value(kind, args.first().cloned().unwrap_or(Value::Null))
}

/// A spec fragment declaring one payload-passthrough action per name.
pub fn default_action_factories<N: Into<String>>(
    names: impl IntoIterator<Item = N>,
) -> Vec<(String, CreateFn)> {
    names
        .into_iter()
        .map(|name| {
            (
                name.into(),
                std::sync::Arc::new(default_action_factory) as CreateFn,
            )
        })
        .collect()
}

/// Builds only the reducer from a spec whose values are reducer cases.
///
/// The [`Verbatim`] formatter is forced: spec keys are taken as the final
/// type strings, so cases can match action types produced by unrelated
/// sources. Any formatter in `options` is replaced.
pub fn reducer<S, N: Into<String>>(
    spec: impl IntoIterator<Item = (N, ReduceFn<S>)>,
    options: impl Into<Options<S>>,
) -> Reducer<S> {
    let spec = spec.into_iter().fold(Spec::new(), |spec, (name, case)| {
        spec.entry(
            name,
            Entry::Capability {
                create: None,
                reduce: Some(case),
            },
        )
    });
    compile(spec, options.into().type_format(Verbatim)).reducer
}

use std::collections::BTreeMap;
use std::fmt;

use crate::action::Action;
use crate::spec::ReduceFn;

/// The compiled reducer: a frozen dispatch table keyed by derived type
/// strings.
///
/// Built once per [`compile`] invocation and immutable afterwards. It holds
/// no interior mutability, so a shared reference may be invoked concurrently
/// from any number of call sites.
///
/// [`compile`]: crate::compile
#[derive(Clone)]
pub struct Reducer<S> {
    cases: BTreeMap<String, ReduceFn<S>>,
    initial: Option<S>,
}

impl<S> Reducer<S> {
    pub(crate) fn new(cases: BTreeMap<String, ReduceFn<S>>, initial: Option<S>) -> Self {
        Reducer { cases, initial }
    }

    /// Whether a case is registered for a type string.
    pub fn handles(&self, kind: &str) -> bool {
        self.cases.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<S: Clone> Reducer<S> {
    /// Folds one action into the state.
    ///
    /// `None` state is replaced by the configured initial state (itself
    /// possibly `None`) before dispatch. An action whose type has no
    /// registered case passes the state through unchanged; this is not an
    /// error, so reducers over the same state slice compose freely.
    pub fn reduce(&self, state: Option<S>, action: &Action) -> Option<S> {
        let state = state.or_else(|| self.initial.clone());
        match self.cases.get(action.kind()) {
            Some(case) => case(state, action),
            None => {
                log::trace!("no case for {:?}; passing state through", action.kind());
                state
            }
        }
    }
}

impl<S> fmt::Debug for Reducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("cases", &self.cases.keys().collect::<Vec<_>>())
            .field("initial", &self.initial.is_some())
            .finish()
    }
}

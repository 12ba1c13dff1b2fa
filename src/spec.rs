use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::action::Action;
use crate::creator::{ActionTypes, CreateFn};

/// A reducer case: folds `(state, action)` into new state.
///
/// `None` is the "no state yet" convention; the compiled reducer substitutes
/// the configured initial state before a case runs.
pub type ReduceFn<S> = Arc<dyn Fn(Option<S>, &Action) -> Option<S> + Send + Sync>;

/// One spec entry, classified once into its shape.
///
/// The compiler never inspects entries beyond this classification: a
/// [`Reduce`] entry declares both a default creator and a reducer case, a
/// [`Capability`] entry declares whatever it exposes, and an [`Inert`] entry
/// declares nothing at all (and is not an error).
///
/// [`Reduce`]: Entry::Reduce
/// [`Capability`]: Entry::Capability
/// [`Inert`]: Entry::Inert
pub enum Entry<S> {
    /// A plain reducer function.
    Reduce(ReduceFn<S>),
    /// An entry exposing zero or more of custom creation and reduction.
    Capability {
        create: Option<CreateFn>,
        reduce: Option<ReduceFn<S>>,
    },
    /// Arbitrary data; produces no creator and no case.
    Inert(Value),
}

impl<S> Entry<S> {
    /// A plain reducer-function entry.
    pub fn reduce<F>(case: F) -> Self
    where
        F: Fn(Option<S>, &Action) -> Option<S> + Send + Sync + 'static,
    {
        Entry::Reduce(Arc::new(case))
    }

    /// A capability entry with only custom creation.
    pub fn create<F>(create: F) -> Self
    where
        F: Fn(&str, &ActionTypes, &[Value]) -> Action + Send + Sync + 'static,
    {
        Entry::Capability {
            create: Some(Arc::new(create)),
            reduce: None,
        }
    }

    /// A capability entry with only a reducer case; a default creator is
    /// still registered for it.
    pub fn reduce_only<F>(reduce: F) -> Self
    where
        F: Fn(Option<S>, &Action) -> Option<S> + Send + Sync + 'static,
    {
        Entry::Capability {
            create: None,
            reduce: Some(Arc::new(reduce)),
        }
    }

    /// A capability entry with both custom creation and a reducer case.
    pub fn create_reduce<C, R>(create: C, reduce: R) -> Self
    where
        C: Fn(&str, &ActionTypes, &[Value]) -> Action + Send + Sync + 'static,
        R: Fn(Option<S>, &Action) -> Option<S> + Send + Sync + 'static,
    {
        Entry::Capability {
            create: Some(Arc::new(create)),
            reduce: Some(Arc::new(reduce)),
        }
    }

    /// An inert entry, carried but never compiled.
    pub fn inert(value: impl Into<Value>) -> Self {
        Entry::Inert(value.into())
    }

    /// Whether compiling this entry registers an action creator.
    pub(crate) fn declares_creator(&self) -> bool {
        match self {
            Entry::Reduce(_) => true,
            Entry::Capability { create, reduce } => create.is_some() || reduce.is_some(),
            Entry::Inert(_) => false,
        }
    }
}

impl<S> fmt::Debug for Entry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Reduce(_) => f.write_str("Entry::Reduce"),
            Entry::Capability { create, reduce } => f
                .debug_struct("Entry::Capability")
                .field("create", &create.is_some())
                .field("reduce", &reduce.is_some())
                .finish(),
            Entry::Inert(value) => f.debug_tuple("Entry::Inert").field(value).finish(),
        }
    }
}

/// The declarative input: a mapping from names to [`Entry`] values, plus the
/// two reserved configuration slots (`prefix` and the initial state).
///
/// The reserved slots are the typed form of embedding configuration in the
/// spec itself; explicit [`Options`] values take precedence over them. The
/// literal entry names `prefix` and `initialState` are also recognized as
/// reserved: they never reach the registries, and an inert string under
/// `prefix` feeds the prefix slot.
///
/// [`Options`]: crate::Options
pub struct Spec<S> {
    entries: BTreeMap<String, Entry<S>>,
    prefix: Option<String>,
    initial: Option<S>,
}

impl<S> Default for Spec<S> {
    fn default() -> Self {
        Spec {
            entries: BTreeMap::new(),
            prefix: None,
            initial: None,
        }
    }
}

impl<S> Spec<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name`, replacing any previous entry under it.
    pub fn entry(mut self, name: impl Into<String>, entry: Entry<S>) -> Self {
        let name = name.into();
        match name.as_str() {
            "prefix" => {
                if let Entry::Inert(Value::String(prefix)) = entry {
                    self.prefix = Some(prefix);
                } else {
                    log::debug!("reserved key \"prefix\" ignored: not an inert string");
                }
            }
            "initialState" => {
                // Excluded from the registries either way; the typed route for
                // configuring initial state is `Spec::initial`.
                log::debug!("reserved key \"initialState\" ignored: use Spec::initial");
            }
            _ => {
                self.entries.insert(name, entry);
            }
        }
        self
    }

    /// Sugar for declaring a plain reducer-function entry.
    pub fn on<F>(self, name: impl Into<String>, case: F) -> Self
    where
        F: Fn(Option<S>, &Action) -> Option<S> + Send + Sync + 'static,
    {
        self.entry(name, Entry::reduce(case))
    }

    /// The spec-embedded prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The spec-embedded initial state.
    pub fn initial(mut self, initial: S) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<String, Entry<S>>, Option<String>, Option<S>) {
        (self.entries, self.prefix, self.initial)
    }
}

impl<S, N: Into<String>> FromIterator<(N, Entry<S>)> for Spec<S> {
    fn from_iter<I: IntoIterator<Item = (N, Entry<S>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Spec::new(), |spec, (name, entry)| spec.entry(name, entry))
    }
}

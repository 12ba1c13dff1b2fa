use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::action::{Action, Error};

/// Custom action-creator logic.
///
/// Receives the entry's derived type string, the fully-populated sibling
/// [`ActionTypes`] registry, and the caller's positional arguments.
pub type CreateFn = Arc<dyn Fn(&str, &ActionTypes, &[Value]) -> Action + Send + Sync>;

/// The final name → type map of a compiled spec.
///
/// This registry is built in full before any creator exists, so a custom
/// [`CreateFn`] can resolve the derived type of *any* sibling, including ones
/// declared after its own entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionTypes {
    types: BTreeMap<String, String>,
}

impl ActionTypes {
    pub(crate) fn new(types: BTreeMap<String, String>) -> Self {
        ActionTypes { types }
    }

    /// The derived type string for a spec entry name.
    pub fn kind_of(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types
            .iter()
            .map(|(name, kind)| (name.as_str(), kind.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[derive(Clone)]
enum Body {
    /// Merge the first positional argument into `{type}`.
    Default,
    Custom(CreateFn),
}

/// A named action creator, tagged with its derived type string.
#[derive(Clone)]
pub struct ActionCreator {
    kind: String,
    siblings: Arc<ActionTypes>,
    body: Body,
}

impl ActionCreator {
    pub(crate) fn default_for(kind: String, siblings: Arc<ActionTypes>) -> Self {
        ActionCreator {
            kind,
            siblings,
            body: Body::Default,
        }
    }

    pub(crate) fn custom(kind: String, siblings: Arc<ActionTypes>, create: CreateFn) -> Self {
        ActionCreator {
            kind,
            siblings,
            body: Body::Custom(create),
        }
    }

    /// The derived type string this creator tags its actions with.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Invokes the creator with positional arguments.
    ///
    /// The default creator treats the first argument as the payload to merge;
    /// a custom creator receives all of them unchanged.
    pub fn call(&self, args: &[Value]) -> Action {
        match &self.body {
            Body::Custom(create) => create(&self.kind, &self.siblings, args),
            Body::Default => Action::from_value(
                self.kind.clone(),
                args.first().cloned().unwrap_or(Value::Null),
            ),
        }
    }

    /// Invokes the creator with no arguments; the default creator yields
    /// exactly `{type}`.
    pub fn empty(&self) -> Action {
        self.call(&[])
    }

    /// Serializes `payload` and invokes the creator with it as the only
    /// argument.
    pub fn with<P: Serialize>(&self, payload: P) -> Result<Action, Error> {
        Ok(self.call(&[serde_json::to_value(payload)?]))
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match self.body {
            Body::Default => "default",
            Body::Custom(_) => "custom",
        };
        f.debug_struct("ActionCreator")
            .field("kind", &self.kind)
            .field("body", &body)
            .finish()
    }
}

/// The compiled action-creator registry: one creator per spec entry name that
/// declared one.
#[derive(Clone, Debug, Default)]
pub struct ActionCreators {
    creators: BTreeMap<String, ActionCreator>,
    types: Arc<ActionTypes>,
}

impl ActionCreators {
    pub(crate) fn new(creators: BTreeMap<String, ActionCreator>, types: Arc<ActionTypes>) -> Self {
        ActionCreators { creators, types }
    }

    pub fn get(&self, name: &str) -> Option<&ActionCreator> {
        self.creators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.creators.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionCreator)> {
        self.creators
            .iter()
            .map(|(name, creator)| (name.as_str(), creator))
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    /// The name → type map shared with every custom creator.
    pub fn types(&self) -> &ActionTypes {
        &self.types
    }
}

impl Index<&str> for ActionCreators {
    type Output = ActionCreator;

    fn index(&self, name: &str) -> &ActionCreator {
        self.get(name)
            .unwrap_or_else(|| panic!("no action creator named {name:?}"))
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Errors surfaced by this crate.
///
/// Spec misuse is deliberately *not* an error: inert entries, unknown action
/// types and malformed actions all degrade to no-ops so that independently
/// authored partial specs compose without defensive checks. The only fallible
/// operations are the ones that serialize caller payloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A dispatched action: a `type` discriminator plus a shallow payload.
///
/// Serializes to the conventional flat record, `{"type": …, …payload}`. The
/// payload merge is shallow and the discriminator is protected: a payload
/// field named `type` is discarded on construction rather than allowed to
/// override it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Action {
    /// An action carrying nothing but its type.
    pub fn new(kind: impl Into<String>) -> Self {
        Action {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// Serializes `payload` and shallow-merges its fields next to `type`.
    ///
    /// Non-object payloads merge nothing, leaving a bare `{type}` record.
    pub fn with<P: Serialize>(kind: impl Into<String>, payload: P) -> Result<Self, Error> {
        Ok(Self::from_value(kind, serde_json::to_value(payload)?))
    }

    /// Shallow-merges an already-serialized payload value next to `type`.
    ///
    /// Mirrors `Object.assign({type}, payload)`: object fields are copied in
    /// (except `type`), anything else contributes nothing.
    pub fn from_value(kind: impl Into<String>, payload: Value) -> Self {
        let mut action = Action::new(kind);
        if let Value::Object(fields) = payload {
            for (field, value) in fields {
                if field != "type" {
                    action.payload.insert(field, value);
                }
            }
        }
        action
    }

    /// Builder-style payload field insertion; the reserved `type` field is
    /// skipped.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if name != "type" {
            self.payload.insert(name, value.into());
        }
        self
    }

    /// The type discriminator.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// A single payload field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.payload.get(field)
    }

    /// All payload fields.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

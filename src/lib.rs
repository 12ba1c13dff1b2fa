//! Compile a declarative spec of named handlers into two coupled products: a
//! registry of tagged action creators and a single dispatching reducer.
//!
//! Each spec entry declares, under one name, what its action looks like and
//! how it folds into state. The compiler derives a canonical type string per
//! name (`someAction` → `SOME_ACTION`, optionally prefixed), builds a creator
//! tagged with it, and registers the entry's reducer case under it; the
//! resulting [`Reducer`] dispatches incoming [`Action`]s by type and passes
//! unknown types through untouched. No store is involved: both products are
//! plain pure values for an external store mechanism to drive.
//!
//! ```
//! use actionspec::{compile, Action, Spec};
//!
//! let compiled = compile(
//!     Spec::new()
//!         .on("increment", |state: Option<i64>, _: &Action| Some(state.unwrap_or(0) + 1))
//!         .on("decrement", |state: Option<i64>, _: &Action| Some(state.unwrap_or(0) - 1)),
//!     (),
//! );
//!
//! assert_eq!(compiled.actions["increment"].kind(), "INCREMENT");
//!
//! let action = compiled.actions["decrement"].empty();
//! assert_eq!(compiled.reducer.reduce(Some(3), &action), Some(2));
//! ```
//!
//! Entries are polymorphic: a bare reducer function gets a default
//! payload-merging creator, while a capability entry supplies custom
//! [`create`][Entry::Capability] logic, a [`reduce`][Entry::Capability] case,
//! or both. A custom creator receives the final sibling type registry, so it
//! can cross-reference actions declared anywhere in the spec.
//!
//! ```
//! use actionspec::{compile, Action, Entry, Spec};
//!
//! let compiled = compile(
//!     Spec::new().entry(
//!         "add",
//!         Entry::create_reduce(
//!             |kind, _actions, args| Action::new(kind).field("value", args[0].clone()),
//!             |state: Option<i64>, action| {
//!                 let value = action.get("value").and_then(|v| v.as_i64()).unwrap_or(0);
//!                 Some(state.unwrap_or(0) + value)
//!             },
//!         ),
//!     ),
//!     (),
//! );
//!
//! let add = compiled.actions["add"].call(&[2.into()]);
//! assert_eq!(compiled.reducer.reduce(Some(2), &add), Some(4));
//! ```

mod action;
mod compile;
mod creator;
mod format;
pub mod helpers;
mod reducer;
mod spec;

pub use action::{Action, Error};
pub use compile::{compile, Compiled, Formatter, Options};
pub use creator::{ActionCreator, ActionCreators, ActionTypes, CreateFn};
pub use format::{format_type, ShoutySnake, TypeFormat, Verbatim};
pub use reducer::Reducer;
pub use spec::{Entry, ReduceFn, Spec};

use heck::ToShoutySnakeCase;

/// Strategy for deriving an action's canonical type string from its spec name
/// and optional prefix.
///
/// The formatter is the only published customization point of the compiler:
/// pass an implementation via [`Options::type_format`] to change the naming
/// convention for every derived type. Any closure with the matching signature
/// works as a formatter.
///
/// [`Options::type_format`]: crate::Options::type_format
pub trait TypeFormat {
    fn format(&self, name: &str, prefix: Option<&str>) -> String;
}

impl<F> TypeFormat for F
where
    F: Fn(&str, Option<&str>) -> String,
{
    fn format(&self, name: &str, prefix: Option<&str>) -> String {
        self(name, prefix)
    }
}

/// The default formatter: `someAction` → `SOME_ACTION`.
///
/// Word boundaries (camelCase, kebab-case, snake_case) all normalize to a
/// single underscore and the result is upper-cased. A non-empty prefix is
/// normalized the same way and prepended with one underscore between the
/// segments; an empty or absent prefix contributes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShoutySnake;

impl TypeFormat for ShoutySnake {
    fn format(&self, name: &str, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) if !prefix.is_empty() => format!(
                "{}_{}",
                prefix.to_shouty_snake_case(),
                name.to_shouty_snake_case()
            ),
            _ => name.to_shouty_snake_case(),
        }
    }
}

/// Pass-through formatter: the spec name *is* the type string, prefix and all
/// case conventions ignored.
///
/// Used by [`helpers::reducer`] so callers can key their cases by final type
/// strings produced elsewhere.
///
/// [`helpers::reducer`]: crate::helpers::reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct Verbatim;

impl TypeFormat for Verbatim {
    fn format(&self, name: &str, _prefix: Option<&str>) -> String {
        name.to_owned()
    }
}

/// Standalone type-string derivation with the default [`ShoutySnake`]
/// convention.
///
/// ```
/// use actionspec::format_type;
///
/// assert_eq!(format_type("someAction", None), "SOME_ACTION");
/// assert_eq!(format_type("someAction", Some("test")), "TEST_SOME_ACTION");
/// ```
pub fn format_type(name: &str, prefix: Option<&str>) -> String {
    ShoutySnake.format(name, prefix)
}

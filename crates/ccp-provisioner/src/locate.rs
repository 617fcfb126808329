use serde_json::Value;

use crate::compare::values_equal;

/// Field used to match desired entries against remote objects.
pub const NAME_FIELD: &str = "name";

/// How a candidate value is compared with the wanted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Match {
    #[default]
    Exact,
    /// Substring for strings, membership for arrays.
    Contains,
}

/// Return the first element of `collection` whose `field` matches `value`.
///
/// A single object is treated as a one-element collection. Plain string
/// elements are compared with `value` directly. Elements without `field`
/// never match.
pub fn locate<'a>(
    collection: &'a Value,
    value: &Value,
    field: &str,
    mode: Match,
) -> Option<&'a Value> {
    let elements: &[Value] = match collection {
        Value::Array(items) => items.as_slice(),
        Value::Null => &[],
        single => std::slice::from_ref(single),
    };

    elements.iter().find(|element| {
        let candidate = match element {
            Value::String(_) => Some(*element),
            Value::Object(map) => map.get(field),
            _ => None,
        };
        candidate.is_some_and(|candidate| matches(candidate, value, mode))
    })
}

/// Shorthand for the common exact lookup by `name`.
pub fn locate_by_name<'a>(collection: &'a Value, name: &Value) -> Option<&'a Value> {
    locate(collection, name, NAME_FIELD, Match::Exact)
}

fn matches(candidate: &Value, value: &Value, mode: Match) -> bool {
    match mode {
        Match::Exact => values_equal(candidate, value),
        Match::Contains => match (candidate, value) {
            (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
            (Value::Array(items), needle) => items.iter().any(|item| values_equal(item, needle)),
            (candidate, value) => values_equal(candidate, value),
        },
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::locate::{locate_by_name, NAME_FIELD};

/// Structured before/after for a single field that doesn't match desired state.
///
/// `field` is a dotted path into the desired structure. Keyed list entries
/// are addressed as `items[name=x]`, positional ones as `items[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDrift {
    pub field: String,
    /// What we want
    pub expected: Value,
    /// What the remote has (`null` when the field is missing)
    pub actual: Value,
}

/// Whether a value demands anything when it is missing remotely.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Value equality that treats numbers by value, so `2` equals `2.0`.
///
/// Objects and arrays compare structurally; the comparator walks into them
/// and applies this rule again at each scalar.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        _ => a == b,
    }
}

/// Does `current` already contain everything demanded by `new`?
///
/// Fields present in `current` but absent from `new` are never inspected.
/// Lists of named objects are matched by `name`, everything else in a
/// list by position.
pub fn satisfies(current: &Value, new: &Value) -> bool {
    let mut walk = Walk::first_only();
    walk.value(Some(current), new, "");
    walk.drift.is_empty()
}

/// Same walk as [`satisfies`], collecting every unmet demand.
pub fn drift(current: &Value, new: &Value) -> Vec<FieldDrift> {
    let mut walk = Walk::exhaustive();
    walk.value(Some(current), new, "");
    walk.drift
}

struct Walk {
    first_only: bool,
    drift: Vec<FieldDrift>,
}

impl Walk {
    fn first_only() -> Self {
        Self {
            first_only: true,
            drift: Vec::new(),
        }
    }

    fn exhaustive() -> Self {
        Self {
            first_only: false,
            drift: Vec::new(),
        }
    }

    fn done(&self) -> bool {
        self.first_only && !self.drift.is_empty()
    }

    fn record(&mut self, field: &str, expected: &Value, actual: Option<&Value>) {
        self.drift.push(FieldDrift {
            field: field.to_string(),
            expected: expected.clone(),
            actual: actual.cloned().unwrap_or(Value::Null),
        });
    }

    /// `current` is `None` when the remote side has nothing at this position.
    fn value(&mut self, current: Option<&Value>, new: &Value, path: &str) {
        let Some(current) = current else {
            if is_truthy(new) {
                self.record(path, new, None);
            }
            return;
        };

        if values_equal(current, new) {
            return;
        }

        match new {
            Value::Object(demands) => self.object(current, demands, path),
            Value::Array(elements) => self.array(current, elements, path),
            _ => self.record(path, new, Some(current)),
        }
    }

    fn object(&mut self, current: &Value, demands: &Map<String, Value>, path: &str) {
        let fields = current.as_object();
        for (key, wanted) in demands {
            if self.done() {
                return;
            }
            let actual = fields.and_then(|f| f.get(key));
            self.value(actual, wanted, &join(path, key));
        }
    }

    fn array(&mut self, current: &Value, elements: &[Value], path: &str) {
        let existing = current.as_array();
        for (index, wanted) in elements.iter().enumerate() {
            if self.done() {
                return;
            }
            let (actual, segment) = match wanted.get(NAME_FIELD) {
                Some(name) => (
                    locate_by_name(current, name),
                    format!("[{NAME_FIELD}={}]", display(name)),
                ),
                None => (
                    existing.and_then(|items| items.get(index)),
                    format!("[{index}]"),
                ),
            };
            self.value(actual, wanted, &format!("{path}{segment}"));
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn display(value: &Value) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

use serde_json::{Map, Value};
use tracing::debug;

use crate::addr::ResourcePath;
use crate::compare::{drift, is_truthy, satisfies};
use crate::error::ProvisionerError;
use crate::locate::{locate, locate_by_name, Match, NAME_FIELD};
use crate::plan::{Action, Cause, Decision};
use crate::request::Goal;

const ID_FIELD: &str = "id";

/// Narrow `snapshot` with each criterion in turn.
///
/// Every criterion is applied to the result of the previous one, so the
/// first criterion picks the candidate and the rest must also hold for it.
/// Stops at the first criterion that matches nothing.
pub fn apply_filter(
    snapshot: &Value,
    filter: &Map<String, Value>,
) -> Result<Value, ProvisionerError> {
    let mut narrowed = snapshot;
    for (field, wanted) in filter {
        match locate(narrowed, wanted, field, Match::Exact) {
            Some(found) => {
                debug!(field = %field, value = %wanted, "filter criterion matched");
                narrowed = found;
            }
            None => {
                return Err(ProvisionerError::FilterNotFound {
                    filter: Value::Object(filter.clone()).to_string(),
                    snapshot: snapshot.to_string(),
                });
            }
        }
    }
    Ok(narrowed.clone())
}

/// Decide what to do with the described resource given the remote snapshot.
///
/// `snapshot` is `None` when the remote reported the resource absent.
/// The returned decision carries `path`, extended with the identifier of
/// the matched object for keyed updates and deletes.
pub fn decide(
    description: Option<&Map<String, Value>>,
    snapshot: Option<&Value>,
    goal: Goal,
    path: &ResourcePath,
) -> Result<Decision, ProvisionerError> {
    let snapshot = snapshot.unwrap_or(&Value::Null);
    let name = description
        .and_then(|d| d.get(NAME_FIELD))
        .filter(|n| is_truthy(n));

    match goal {
        Goal::Present => {
            let Some(description) = description else {
                return Ok(Decision::new(Action::NoOp, Cause::Read, path));
            };
            let Some(name) = name else {
                return Ok(Decision::new(Action::Create, Cause::Unnamed, path));
            };
            let Some(found) = locate_by_name(snapshot, name) else {
                return Ok(Decision::new(Action::Create, Cause::Missing, path));
            };

            let desired = Value::Object(description.clone());
            if satisfies(found, &desired) {
                let mut decision = Decision::new(Action::NoOp, Cause::InSync, path);
                decision.object = Some(found.clone());
                return Ok(decision);
            }

            let identifier = identifier_of(found, name)?;
            let mut decision = Decision::new(Action::Update, Cause::Drift, path);
            decision.drift = drift(found, &desired);
            decision.path = path.with_identifier(&identifier);
            decision.identifier = Some(identifier);
            decision.object = Some(found.clone());
            Ok(decision)
        }
        Goal::Absent => {
            if !is_truthy(snapshot) {
                return Ok(Decision::new(Action::NoOp, Cause::AlreadyAbsent, path));
            }

            if let Some(name) = name {
                let Some(found) = locate_by_name(snapshot, name) else {
                    return Ok(Decision::new(Action::NoOp, Cause::AlreadyAbsent, path));
                };
                let identifier = identifier_of(found, name)?;
                let mut decision = Decision::new(Action::Delete, Cause::Requested, path);
                decision.path = path.with_identifier(&identifier);
                decision.identifier = Some(identifier);
                decision.object = Some(found.clone());
                return Ok(decision);
            }

            // Without a name the path itself must address the object.
            if snapshot.is_array() {
                return Err(ProvisionerError::AbsentGoalMissingIdentifier {
                    path: path.to_string(),
                });
            }
            let mut decision = Decision::new(Action::Delete, Cause::Requested, path);
            decision.object = Some(snapshot.clone());
            Ok(decision)
        }
    }
}

fn identifier_of(object: &Value, name: &Value) -> Result<String, ProvisionerError> {
    match object.get(ID_FIELD) {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(ProvisionerError::MissingIdentifier {
            name: name.as_str().map(str::to_string).unwrap_or_else(|| name.to_string()),
        }),
    }
}

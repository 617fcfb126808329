use serde_json::Value;
use tracing::{debug, info};

use crate::caller::{classify, EndpointCaller, Method};
use crate::decide::{apply_filter, decide};
use crate::error::ProvisionerError;
use crate::report::RunReport;
use crate::request::ReconcileRequest;

/// Run one reconciliation: read the snapshot, decide, apply.
///
/// Issues one GET and at most one mutating call. Nothing is retried;
/// the first error ends the run.
pub fn reconcile(
    caller: &dyn EndpointCaller,
    request: &ReconcileRequest,
) -> Result<RunReport, ProvisionerError> {
    request.validate()?;

    debug!(path = %request.path, goal = ?request.goal, "reading remote snapshot");
    let snapshot = caller
        .call(Method::Get, &request.path, None, &request.query)
        .and_then(|response| classify(Method::Get, request.goal, response))
        .map_err(|e| e.with_path(Method::Get.as_str(), request.path.as_str()))?;

    if let Some(filter) = request.filter() {
        let matched = apply_filter(snapshot.as_ref().unwrap_or(&Value::Null), filter)?;
        info!(path = %request.path, criteria = filter.len(), "filter matched remote object");
        return Ok(RunReport::filtered(&request.path, matched));
    }

    let decision = decide(
        request.description(),
        snapshot.as_ref(),
        request.goal,
        &request.path,
    )?;
    info!(
        path = %decision.path,
        action = ?decision.action,
        cause = ?decision.cause,
        identifier = decision.identifier.as_deref().unwrap_or(""),
        drifted_fields = decision.drift.len(),
        "reconciliation decided"
    );

    let Some(method) = decision.action.method() else {
        let response = decision
            .object
            .clone()
            .or(snapshot)
            .unwrap_or(Value::Null);
        return Ok(RunReport::unchanged(decision, response));
    };

    let body = if method.carries_body() {
        request.description().cloned().map(Value::Object)
    } else {
        None
    };

    if request.check_mode {
        info!(method = %method, path = %decision.path, "check mode, skipping mutating call");
        return Ok(RunReport::changed(decision, body, Value::Null));
    }

    info!(method = %method, path = %decision.path, "issuing mutating call");
    let result = caller
        .call(method, &decision.path, body.as_ref(), &request.query)
        .and_then(|response| classify(method, request.goal, response))
        .map_err(|e| e.with_path(method.as_str(), decision.path.as_str()))?;

    Ok(RunReport::changed(
        decision,
        body,
        result.unwrap_or(Value::Null),
    ))
}

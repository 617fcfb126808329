//! ccp-provisioner
//!
//! Declarative reconciliation core for the Cisco Container Platform API.
//! Decides whether a described resource must be created, updated, deleted
//! or left alone, given the remote state.
//!
//! Public API:
//! - `locate()`: first element of a collection matching a field/value
//! - `satisfies()`: does the remote object already meet the description
//! - `drift()`: every unmet demand, for reporting
//! - `decide()`: choose an action and the addressed path
//! - `reconcile()`: convenience: read → filter or decide → apply

pub mod addr;
pub mod caller;
pub mod compare;
pub mod decide;
pub mod error;
pub mod locate;
pub mod orchestrate;
pub mod plan;
pub mod report;
pub mod request;

pub use crate::addr::{ApiVersion, Endpoint, ResourcePath};
pub use crate::caller::{classify, ApiResponse, EndpointCaller, Method};
pub use crate::compare::{drift, satisfies, values_equal, FieldDrift};
pub use crate::decide::{apply_filter, decide};
pub use crate::error::ProvisionerError;
pub use crate::locate::{locate, Match};
pub use crate::orchestrate::reconcile;
pub use crate::plan::{Action, Cause, Decision};
pub use crate::report::RunReport;
pub use crate::request::{Goal, ReconcileRequest};

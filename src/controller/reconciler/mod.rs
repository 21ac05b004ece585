//! Reconciliation pipeline: validate the spec, resolve credentials, build an
//! AWS session, register a provisioner and report status.

pub mod credentials;
pub mod reconcile;
pub mod status;
pub mod types;
pub mod validation;

pub use reconcile::{error_policy, reconcile};
pub use types::{Error, Reconciler};

//! Shared context and error taxonomy for the reconciler.

use std::fmt;
use std::sync::Arc;

use kube::Client;
use thiserror::Error;

use crate::controller::reconciler::credentials::CredentialError;
use crate::controller::reconciler::validation::ValidationError;
use crate::events::EventPublisher;
use crate::provider::SessionError;
use crate::registry::ProvisionerRegistry;

/// Everything that can fail a reconciliation.
///
/// Each variant has already been reflected in the issuer's Ready condition by
/// the time it propagates, with the exception of `StatusUpdate` which means
/// the condition itself could not be written.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("failed to update issuer status: {0}")]
    StatusUpdate(#[source] kube::Error),
}

/// Context shared by every reconciliation, passed by `Arc` into the
/// controller runtime.
#[derive(Clone)]
pub struct Reconciler {
    pub client: Client,
    pub registry: Arc<ProvisionerRegistry>,
    pub events: Arc<dyn EventPublisher>,
    /// Fallback region from the controller environment, applied when the
    /// issuer spec leaves its region empty.
    pub default_region: Option<String>,
}

impl Reconciler {
    #[must_use]
    pub fn new(
        client: Client,
        registry: Arc<ProvisionerRegistry>,
        events: Arc<dyn EventPublisher>,
        default_region: Option<String>,
    ) -> Self {
        Self {
            client,
            registry,
            events,
            default_region,
        }
    }
}

impl fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("default_region", &self.default_region)
            .finish_non_exhaustive()
    }
}

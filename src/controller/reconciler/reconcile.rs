//! The reconciliation entry points handed to the controller runtime.

use std::sync::Arc;
use std::time::{Duration, Instant};

use kube::runtime::controller::Action;
use tracing::{error, info, info_span, Instrument};

use crate::controller::reconciler::credentials::{resolve_credentials, CredentialError};
use crate::controller::reconciler::status;
use crate::controller::reconciler::types::{Error, Reconciler};
use crate::controller::reconciler::validation::validate_issuer_spec;
use crate::crd::{ConditionStatus, GenericIssuer};
use crate::events::reasons;
use crate::observability::metrics;
use crate::provider::{build_sdk_config, PcaProvisioner};

const ERROR_REQUEUE_SECS: u64 = 60;

/// Reconcile one issuer: validate, resolve credentials, build an AWS
/// session, register the provisioner and mark the issuer Ready.
pub async fn reconcile<I: GenericIssuer>(
    issuer: Arc<I>,
    ctx: Arc<Reconciler>,
) -> Result<Action, Error> {
    let identity = issuer.identity();
    let span = info_span!(
        "reconcile",
        resource.kind = I::KIND,
        resource.namespace = %identity.namespace,
        resource.name = %identity.name,
    );
    reconcile_inner(issuer, ctx).instrument(span).await
}

async fn reconcile_inner<I: GenericIssuer>(
    issuer: Arc<I>,
    ctx: Arc<Reconciler>,
) -> Result<Action, Error> {
    let started = Instant::now();
    metrics::increment_reconciliations();

    let spec = issuer.spec();

    if let Err(err) = validate_issuer_spec(spec, ctx.default_region.as_deref()) {
        error!(error = %err, "Issuer spec validation failed");
        let message = format!("Failed to validate resource: {err}");
        let _ = status::report(
            &ctx,
            issuer.as_ref(),
            ConditionStatus::False,
            reasons::VALIDATION,
            &message,
        )
        .await;
        return Err(err.into());
    }

    let credentials = match &spec.secret_ref {
        Some(secret_ref) => {
            match resolve_credentials(ctx.client.clone(), secret_ref).await {
                Ok(credentials) => Some(credentials),
                Err(err) => {
                    error!(error = %err, "Credential resolution failed");
                    let message = match &err {
                        CredentialError::SecretNotFound(cause) => {
                            format!("Failed to retrieve secret: {cause}")
                        }
                        other => other.to_string(),
                    };
                    let _ = status::report(
                        &ctx,
                        issuer.as_ref(),
                        ConditionStatus::False,
                        reasons::ERROR,
                        &message,
                    )
                    .await;
                    return Err(err.into());
                }
            }
        }
        None => None,
    };

    let region = if spec.region.is_empty() {
        ctx.default_region.as_deref()
    } else {
        Some(spec.region.as_str())
    };

    let sdk_config = match build_sdk_config(region, credentials).await {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "AWS session creation failed");
            let _ = status::report(
                &ctx,
                issuer.as_ref(),
                ConditionStatus::False,
                reasons::ERROR,
                "Failed to create AWS session",
            )
            .await;
            return Err(err.into());
        }
    };

    // Registration happens only after the session is known good, so readers
    // never observe a provisioner that failed verification.
    ctx.registry.store(
        issuer.identity(),
        Arc::new(PcaProvisioner::new(&sdk_config, &spec.arn)),
    );
    metrics::set_provisioners_registered(
        i64::try_from(ctx.registry.len()).unwrap_or(i64::MAX),
    );

    status::report(
        &ctx,
        issuer.as_ref(),
        ConditionStatus::True,
        reasons::VERIFIED,
        "Issuer verified",
    )
    .await?;

    info!("Issuer verified");
    metrics::observe_reconciliation_duration(started.elapsed().as_secs_f64());

    Ok(Action::await_change())
}

/// Requeue failed issuers on a fixed delay; transient cluster and AWS
/// conditions resolve without a spec change.
pub fn error_policy<I: GenericIssuer>(
    issuer: Arc<I>,
    err: &Error,
    _ctx: Arc<Reconciler>,
) -> Action {
    metrics::increment_reconciliation_errors();
    error!(
        resource.kind = I::KIND,
        resource.name = %issuer.identity(),
        error = %err,
        "Reconciliation failed",
    );
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
}

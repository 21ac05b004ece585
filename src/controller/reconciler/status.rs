//! Ready condition reporting.
//!
//! Every reconciliation outcome ends here: the Ready condition is rewritten
//! on the issuer's status subresource and a matching Kubernetes Event is
//! emitted. The Event is fire-and-forget; the status patch is not.

use kube::api::{Patch, PatchParams};
use kube::runtime::events::EventType;
use serde_json::json;

use crate::constants::{CONDITION_TYPE_READY, CONTROLLER_NAME};
use crate::controller::reconciler::types::{Error, Reconciler};
use crate::crd::{AWSPCAIssuerStatus, Condition, ConditionStatus, GenericIssuer};

/// Set the issuer's Ready condition and publish the matching Event.
pub async fn report<I: GenericIssuer>(
    ctx: &Reconciler,
    issuer: &I,
    status: ConditionStatus,
    reason: &str,
    message: &str,
) -> Result<(), Error> {
    let event_type = if status == ConditionStatus::False {
        EventType::Warning
    } else {
        EventType::Normal
    };
    ctx.events
        .publish(
            &issuer.object_ref(&()),
            event_type,
            reason,
            Some(message.to_owned()),
        )
        .await;

    let condition = next_ready_condition(issuer.status(), status, reason, message);
    let patch = json!({
        "status": AWSPCAIssuerStatus {
            conditions: vec![condition],
        }
    });

    let api = issuer.status_api(ctx.client.clone());
    let name = issuer.meta().name.clone().unwrap_or_default();
    api.patch_status(
        &name,
        &PatchParams::apply(CONTROLLER_NAME),
        &Patch::Merge(&patch),
    )
    .await
    .map_err(Error::StatusUpdate)?;

    Ok(())
}

/// Build the next Ready condition, keeping the previous transition time when
/// the condition value has not changed.
fn next_ready_condition(
    current: Option<&AWSPCAIssuerStatus>,
    status: ConditionStatus,
    reason: &str,
    message: &str,
) -> Condition {
    let last_transition_time = current
        .and_then(AWSPCAIssuerStatus::ready_condition)
        .filter(|c| c.status == status)
        .and_then(|c| c.last_transition_time.clone())
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    Condition {
        r#type: CONDITION_TYPE_READY.to_owned(),
        status,
        last_transition_time: Some(last_transition_time),
        reason: Some(reason.to_owned()),
        message: Some(message.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(status: ConditionStatus, transitioned_at: &str) -> AWSPCAIssuerStatus {
        AWSPCAIssuerStatus {
            conditions: vec![Condition {
                r#type: CONDITION_TYPE_READY.to_owned(),
                status,
                last_transition_time: Some(transitioned_at.to_owned()),
                reason: Some("Verified".to_owned()),
                message: Some("Issuer verified".to_owned()),
            }],
        }
    }

    #[test]
    fn transition_time_preserved_when_status_unchanged() {
        let previous = existing(ConditionStatus::True, "2024-01-01T00:00:00+00:00");
        let condition = next_ready_condition(
            Some(&previous),
            ConditionStatus::True,
            "Verified",
            "Issuer verified",
        );
        assert_eq!(
            condition.last_transition_time.as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );
    }

    #[test]
    fn transition_time_refreshed_when_status_flips() {
        let previous = existing(ConditionStatus::True, "2024-01-01T00:00:00+00:00");
        let condition = next_ready_condition(
            Some(&previous),
            ConditionStatus::False,
            "Error",
            "Failed to create AWS session",
        );
        assert_ne!(
            condition.last_transition_time.as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );
        assert!(condition.last_transition_time.is_some());
    }

    #[test]
    fn first_condition_gets_a_transition_time() {
        let condition =
            next_ready_condition(None, ConditionStatus::True, "Verified", "Issuer verified");
        assert!(condition.last_transition_time.is_some());
        assert_eq!(condition.r#type, "Ready");
        assert_eq!(condition.reason.as_deref(), Some("Verified"));
        assert_eq!(condition.message.as_deref(), Some("Issuer verified"));
    }
}

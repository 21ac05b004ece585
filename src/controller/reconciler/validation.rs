//! Issuer spec validation.

use thiserror::Error;

use crate::crd::AWSPCAIssuerSpec;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no Arn found in Issuer Spec")]
    MissingArn,
    #[error("no Region found in Issuer Spec")]
    MissingRegion,
}

/// Validate an issuer spec before any AWS interaction.
///
/// The ARN must always be present. The region may be empty only when the
/// controller environment supplies a fallback region.
pub fn validate_issuer_spec(
    spec: &AWSPCAIssuerSpec,
    default_region: Option<&str>,
) -> Result<(), ValidationError> {
    if spec.arn.is_empty() {
        return Err(ValidationError::MissingArn);
    }
    if spec.region.is_empty() && default_region.is_none_or(str::is_empty) {
        return Err(ValidationError::MissingRegion);
    }
    Ok(())
}

//! Static AWS credential resolution from Kubernetes secrets.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::{Api, Client};
use thiserror::Error;

use crate::constants::{AWS_ACCESS_KEY_ID_KEY, AWS_SECRET_ACCESS_KEY_KEY};
use crate::crd::AwsSecretRef;
use crate::provider::StaticCredentials;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to retrieve AWS secret: {0}")]
    SecretNotFound(#[source] kube::Error),
    #[error("secret value AWS_ACCESS_KEY_ID was not found")]
    MissingAccessKeyId,
    #[error("secret value AWS_SECRET_ACCESS_KEY was not found")]
    MissingSecretAccessKey,
    #[error("secret value {0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
}

/// Fetch the referenced secret and extract a static credential pair.
///
/// Issuers without a secret reference never reach this path; they fall back
/// to the SDK's ambient credential chain.
pub async fn resolve_credentials(
    client: Client,
    secret_ref: &AwsSecretRef,
) -> Result<StaticCredentials, CredentialError> {
    let secrets: Api<Secret> = Api::namespaced(client, &secret_ref.namespace);
    let secret = secrets
        .get(&secret_ref.name)
        .await
        .map_err(CredentialError::SecretNotFound)?;

    credentials_from_secret_data(&secret.data.unwrap_or_default())
}

/// Extract both credential keys from secret data.
///
/// The access key id is checked first; its absence masks a missing secret
/// access key. Values pass through unchanged, no trimming or normalization.
/// A value that is not valid UTF-8 is rejected rather than rewritten.
pub fn credentials_from_secret_data(
    data: &BTreeMap<String, ByteString>,
) -> Result<StaticCredentials, CredentialError> {
    let access_key_id = data
        .get(AWS_ACCESS_KEY_ID_KEY)
        .ok_or(CredentialError::MissingAccessKeyId)?;
    let secret_access_key = data
        .get(AWS_SECRET_ACCESS_KEY_KEY)
        .ok_or(CredentialError::MissingSecretAccessKey)?;

    Ok(StaticCredentials {
        access_key_id: String::from_utf8(access_key_id.0.clone())
            .map_err(|_| CredentialError::InvalidUtf8(AWS_ACCESS_KEY_ID_KEY))?,
        secret_access_key: String::from_utf8(secret_access_key.0.clone())
            .map_err(|_| CredentialError::InvalidUtf8(AWS_SECRET_ACCESS_KEY_KEY))?,
    })
}

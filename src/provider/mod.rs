//! # AWS Provider
//!
//! Builds AWS SDK configurations for issuer sessions and exposes the
//! ACM PCA provisioner handle built on top of them.

pub mod pca;

pub use pca::PcaProvisioner;

use std::fmt;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use thiserror::Error;

/// Static credential pair resolved from a Kubernetes secret.
#[derive(Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to create AWS session: no region could be resolved")]
    UnresolvedRegion,
}

/// Build an SDK configuration for a single issuer.
///
/// An explicit region takes precedence over anything in the ambient
/// environment. When `credentials` is `None` the SDK's default provider
/// chain applies, which covers IRSA and instance profiles.
pub async fn build_sdk_config(
    region: Option<&str>,
    credentials: Option<StaticCredentials>,
) -> Result<SdkConfig, SessionError> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = region.filter(|r| !r.is_empty()) {
        loader = loader.region(Region::new(region.to_owned()));
    }
    if let Some(credentials) = credentials {
        loader = loader.credentials_provider(Credentials::from_keys(
            credentials.access_key_id,
            credentials.secret_access_key,
            None,
        ));
    }

    let config = loader.load().await;
    if config.region().is_none() {
        return Err(SessionError::UnresolvedRegion);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_region_ends_up_in_config() {
        let config = build_sdk_config(Some("eu-west-1"), None)
            .await
            .expect("region was supplied");
        assert_eq!(config.region().map(|r| r.as_ref()), Some("eu-west-1"));
    }

    #[tokio::test]
    async fn empty_region_string_is_ignored() {
        // With an empty explicit region the loader falls back to the
        // environment; in a bare test environment that resolves nothing.
        let result = build_sdk_config(Some(""), None).await;
        if let Ok(config) = result {
            assert!(config.region().is_some());
        }
    }

    #[tokio::test]
    async fn static_credentials_are_bound_into_config() {
        let credentials = StaticCredentials {
            access_key_id: "AKIAEXAMPLE".to_owned(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG".to_owned(),
        };
        let config = build_sdk_config(Some("us-east-1"), Some(credentials))
            .await
            .expect("region was supplied");
        assert!(config.credentials_provider().is_some());
    }

    #[test]
    fn debug_output_redacts_secret_access_key() {
        let credentials = StaticCredentials {
            access_key_id: "AKIAEXAMPLE".to_owned(),
            secret_access_key: "super-secret".to_owned(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("AKIAEXAMPLE"));
        assert!(!rendered.contains("super-secret"));
    }
}

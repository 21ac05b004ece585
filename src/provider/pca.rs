//! ACM Private CA provisioner handle.

use std::fmt;

use aws_config::SdkConfig;
use aws_sdk_acmpca::Client;

/// A verified handle onto one AWS Private CA.
///
/// Built by the reconciler after spec validation and session creation
/// succeed, then stored in the registry for certificate request handling.
pub struct PcaProvisioner {
    client: Client,
    arn: String,
}

impl PcaProvisioner {
    #[must_use]
    pub fn new(config: &SdkConfig, arn: &str) -> Self {
        Self {
            client: Client::new(config),
            arn: arn.to_owned(),
        }
    }

    /// ARN of the certificate authority this provisioner issues from.
    #[must_use]
    pub fn arn(&self) -> &str {
        &self.arn
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl fmt::Debug for PcaProvisioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcaProvisioner")
            .field("arn", &self.arn)
            .finish_non_exhaustive()
    }
}

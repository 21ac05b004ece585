//! # Constants
//!
//! Shared constants used throughout the controller.

/// Controller name, used as the field manager for status patches and as the
/// reporting component on Kubernetes Events.
pub const CONTROLLER_NAME: &str = "aws-pca-issuer-controller";

/// Secret data key holding the AWS access key ID.
pub const AWS_ACCESS_KEY_ID_KEY: &str = "AWS_ACCESS_KEY_ID";

/// Secret data key holding the AWS secret access key.
pub const AWS_SECRET_ACCESS_KEY_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Environment variable supplying the process-wide default AWS region.
/// Read once at startup; absence only matters for specs without a region.
pub const DEFAULT_REGION_ENV: &str = "AWS_REGION";

/// Condition type reported on issuer resources.
pub const CONDITION_TYPE_READY: &str = "Ready";

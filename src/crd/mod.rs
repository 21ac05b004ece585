//! # Custom Resource Definitions
//!
//! CRD types for the AWS PCA Issuer Controller:
//! - `AWSPCAIssuer`: namespaced issuer resource
//! - `AWSPCAClusterIssuer`: cluster-scoped issuer resource
//!
//! Both kinds share one spec and status shape; the reconciliation core is
//! written once against the [`GenericIssuer`] trait.

pub mod issuer;
pub mod status;

pub use issuer::{
    AWSPCAClusterIssuer, AWSPCAClusterIssuerSpec, AWSPCAIssuer, AWSPCAIssuerSpec, AwsSecretRef,
    GenericIssuer,
};
pub use status::{AWSPCAIssuerStatus, Condition, ConditionStatus};

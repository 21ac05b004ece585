//! AWS PCA Issuer Controller Library
//!
//! Core functionality for the AWS PCA Issuer Controller: CRD types for
//! `AWSPCAIssuer` and `AWSPCAClusterIssuer`, the reconciler that turns them
//! into registered AWS Private CA provisioners, and the supporting
//! observability plumbing. Tests are included in the module files.

pub mod constants;
pub mod controller;
pub mod crd;
pub mod events;
pub mod observability;
pub mod provider;
pub mod registry;
pub mod server;

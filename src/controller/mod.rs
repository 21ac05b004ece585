//! # Issuer Controller
//!
//! Watch loops and reconciliation logic for `AWSPCAIssuer` and
//! `AWSPCAClusterIssuer` resources.

pub mod reconciler;

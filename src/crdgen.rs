//! # CRD Generator
//!
//! Generates Kubernetes CustomResourceDefinition YAML from the Rust type
//! definitions in this crate.
//!
//! ## Usage
//!
//! ```bash
//! # Generate CRD YAML
//! cargo run --bin crdgen > config/crd/issuers.yaml
//!
//! # Generate and apply directly
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

use kube::core::CustomResourceExt;

use aws_pca_issuer_controller::crd::{AWSPCAClusterIssuer, AWSPCAIssuer};

fn main() {
    for crd in [AWSPCAIssuer::crd(), AWSPCAClusterIssuer::crd()] {
        match serde_yaml::to_string(&crd) {
            Ok(yaml) => {
                println!("---");
                print!("{yaml}");
            }
            Err(e) => {
                eprintln!("Failed to serialize CRD to YAML: {e}");
                std::process::exit(1);
            }
        }
    }
}

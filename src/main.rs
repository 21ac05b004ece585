//! # AWS PCA Issuer Controller
//!
//! A Kubernetes controller that turns `AWSPCAIssuer` and `AWSPCAClusterIssuer`
//! resources into verified AWS Private CA provisioners.
//!
//! For every issuer the controller validates the spec, resolves optional
//! static credentials from a referenced Kubernetes secret, builds an AWS
//! session and registers an ACM PCA provisioner keyed by the issuer's
//! identity. The outcome is reported on the issuer's Ready condition and as
//! a Kubernetes Event.

use anyhow::Result;
use futures::StreamExt;
use kube::{api::Api, Client};
use kube_runtime::{watcher, Controller};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use aws_pca_issuer_controller::constants::DEFAULT_REGION_ENV;
use aws_pca_issuer_controller::controller::reconciler::{error_policy, reconcile, Reconciler};
use aws_pca_issuer_controller::crd::{AWSPCAClusterIssuer, AWSPCAIssuer};
use aws_pca_issuer_controller::events::KubeEventPublisher;
use aws_pca_issuer_controller::observability::metrics;
use aws_pca_issuer_controller::registry::ProvisionerRegistry;
use aws_pca_issuer_controller::server::{start_server, ServerState};

#[tokio::main]
async fn main() -> Result<()> {
    // Configure rustls crypto provider FIRST, before any other operations
    // Required for rustls 0.23+ when no default provider is set via features
    rustls::crypto::ring::default_provider()
        .install_default()
        .unwrap_or_else(|_| panic!("Failed to install rustls crypto provider"));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aws_pca_issuer_controller=info".into()),
        )
        .init();

    info!("Starting AWS PCA Issuer Controller");
    info!(
        build_datetime = env!("BUILD_DATETIME"),
        git_hash = env!("BUILD_GIT_HASH"),
        "Build info",
    );

    metrics::register_metrics()?;

    let server_state = Arc::new(ServerState {
        is_ready: Arc::new(AtomicBool::new(false)),
    });
    let server_port = std::env::var("METRICS_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or(8080);

    let server_state_clone = server_state.clone();
    tokio::spawn(async move {
        if let Err(e) = start_server(server_port, server_state_clone).await {
            error!("HTTP server error: {e}");
        }
    });

    let client = Client::try_default().await?;

    let default_region = std::env::var(DEFAULT_REGION_ENV)
        .ok()
        .filter(|r| !r.is_empty());

    let ctx = Arc::new(Reconciler::new(
        client.clone(),
        Arc::new(ProvisionerRegistry::new()),
        Arc::new(KubeEventPublisher::new(client.clone())),
        default_region,
    ));

    // Watch both issuer kinds across all namespaces.
    let issuers: Api<AWSPCAIssuer> = Api::all(client.clone());
    let cluster_issuers: Api<AWSPCAClusterIssuer> = Api::all(client.clone());

    let issuer_controller = Controller::new(issuers, watcher::Config::default())
        .shutdown_on_signal()
        .run(
            reconcile::<AWSPCAIssuer>,
            error_policy::<AWSPCAIssuer>,
            ctx.clone(),
        )
        .for_each(|_| std::future::ready(()));

    let cluster_issuer_controller = Controller::new(cluster_issuers, watcher::Config::default())
        .shutdown_on_signal()
        .run(
            reconcile::<AWSPCAClusterIssuer>,
            error_policy::<AWSPCAClusterIssuer>,
            ctx,
        )
        .for_each(|_| std::future::ready(()));

    // Both watch loops are constructed; from here the process is serving.
    server_state.is_ready.store(true, Ordering::Relaxed);

    tokio::join!(issuer_controller, cluster_issuer_controller);

    info!("Controller stopped");

    Ok(())
}

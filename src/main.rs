use kube::Client;
use std::path::PathBuf;
use tracing::{error, info};
use varjo::cleanup::{cleanup, FsManifestSource};
use varjo::cluster::KubeClusterClient;
use varjo::config::StrategyConfig;

/// Parse a comma-separated list of manifest files/directories
fn parse_manifest_paths(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn is_truthy(value: &str) -> bool {
    value == "true" || value == "1"
}

/// Manifests to reconcile against, from VARJO_MANIFESTS
fn get_manifest_paths() -> Vec<PathBuf> {
    std::env::var("VARJO_MANIFESTS")
        .map(|v| parse_manifest_paths(&v))
        .unwrap_or_default()
}

/// Target namespace from env (default: kubeconfig namespace)
fn get_namespace() -> Option<String> {
    std::env::var("VARJO_NAMESPACE")
        .ok()
        .filter(|ns| !ns.is_empty())
}

/// Whether derived services are cleaned up too
///
/// Explicit VARJO_INCLUDE_SERVICES wins; otherwise SMI canaries include them,
/// since their traffic split routes through `-canary`/`-baseline` services.
fn include_services(config: &StrategyConfig) -> bool {
    match std::env::var("VARJO_INCLUDE_SERVICES") {
        Ok(v) => is_truthy(&v),
        Err(_) => config.is_traffic_split_canary(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = StrategyConfig::from_env();
    if !config.is_canary_strategy() {
        info!(
            strategy = %config.deployment_strategy,
            "Deployment strategy is not canary - nothing to clean up"
        );
        return Ok(());
    }

    let client = match Client::try_default().await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to create Kubernetes client");
            return Err(e.into());
        }
    };

    let cluster = KubeClusterClient::new(client, get_namespace());
    let include_services = include_services(&config);
    info!(
        namespace = %cluster.namespace(),
        traffic_split = %config.traffic_split_method,
        include_services = include_services,
        "Connected to Kubernetes cluster"
    );

    cleanup(
        &cluster,
        &FsManifestSource,
        &get_manifest_paths(),
        include_services,
    )
    .await?;

    info!("Canary cleanup finished");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

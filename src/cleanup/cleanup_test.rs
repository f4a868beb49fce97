#![allow(clippy::unwrap_used)] // Tests can use unwrap for brevity

use super::source::MockManifestSource;
use super::*;
use crate::cluster::{MockCall, MockClusterClient};

const APP_DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: app
spec:
  replicas: 3
"#;

const APP_WITH_SERVICE: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: app
---
apiVersion: v1
kind: Service
metadata:
  name: app
"#;

fn pair(kind: &str, name: &str) -> (String, String) {
    (kind.to_string(), name.to_string())
}

fn paths(paths: &[&str]) -> Vec<PathBuf> {
    paths.iter().map(PathBuf::from).collect()
}

#[tokio::test]
async fn test_cleanup_deletes_canary_and_baseline_of_deployment() {
    let client = MockClusterClient::new();
    let source = MockManifestSource::new().with_file("app.yaml", APP_DEPLOYMENT);

    cleanup(&client, &source, &paths(&["app.yaml"]), false)
        .await
        .unwrap();

    assert_eq!(
        client.deletes(),
        vec![
            pair("Deployment", "app-canary"),
            pair("Deployment", "app-baseline"),
        ]
    );
}

#[tokio::test]
async fn test_cleanup_includes_services_when_asked() {
    let client = MockClusterClient::new();
    let source = MockManifestSource::new().with_file("app.yaml", APP_WITH_SERVICE);

    cleanup(&client, &source, &paths(&["app.yaml"]), true)
        .await
        .unwrap();

    assert_eq!(
        client.deletes(),
        vec![
            pair("Deployment", "app-canary"),
            pair("Deployment", "app-baseline"),
            pair("Service", "app-canary"),
            pair("Service", "app-baseline"),
        ]
    );
}

#[tokio::test]
async fn test_cleanup_skips_services_by_default() {
    let client = MockClusterClient::new();
    let source = MockManifestSource::new().with_file("app.yaml", APP_WITH_SERVICE);

    cleanup(&client, &source, &paths(&["app.yaml"]), false)
        .await
        .unwrap();

    assert_eq!(
        client.deletes(),
        vec![
            pair("Deployment", "app-canary"),
            pair("Deployment", "app-baseline"),
        ]
    );
}

#[tokio::test]
async fn test_cleanup_without_manifests_fails_before_cluster_calls() {
    let client = MockClusterClient::new();
    let source = MockManifestSource::new();

    let result = cleanup(&client, &source, &paths(&["missing.yaml"]), true).await;

    assert!(matches!(result, Err(CleanupError::ManifestNotFound(p)) if p == paths(&["missing.yaml"])));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_failed_delete_does_not_stop_sweep() {
    let client = MockClusterClient::new()
        .with_failing_delete("Deployment", "app-canary", "connection refused")
        .with_failing_delete("Deployment", "app-baseline", "deployments.apps \"app-baseline\" not found");
    let source = MockManifestSource::new()
        .with_file("app.yaml", APP_DEPLOYMENT)
        .with_file(
            "worker.yaml",
            "kind: StatefulSet\nmetadata:\n  name: worker\n",
        );

    cleanup(&client, &source, &paths(&["app.yaml", "worker.yaml"]), false)
        .await
        .unwrap();

    assert_eq!(
        client.deletes(),
        vec![
            pair("Deployment", "app-canary"),
            pair("Deployment", "app-baseline"),
            pair("StatefulSet", "worker-canary"),
            pair("StatefulSet", "worker-baseline"),
        ]
    );
}

#[tokio::test]
async fn test_cleanup_processes_files_in_supplied_order() {
    let client = MockClusterClient::new();
    let source = MockManifestSource::new()
        .with_file("a.yaml", "kind: Deployment\nmetadata:\n  name: a\n")
        .with_file("b.yaml", "kind: Pod\nmetadata:\n  name: b\n");

    cleanup(&client, &source, &paths(&["b.yaml", "a.yaml"]), false)
        .await
        .unwrap();

    assert_eq!(
        client.deletes(),
        vec![
            pair("Pod", "b-canary"),
            pair("Pod", "b-baseline"),
            pair("Deployment", "a-canary"),
            pair("Deployment", "a-baseline"),
        ]
    );
}

#[tokio::test]
async fn test_cleanup_ignores_other_kinds_and_nameless_documents() {
    let client = MockClusterClient::new();
    let source = MockManifestSource::new().with_file(
        "misc.yaml",
        r#"
kind: ConfigMap
metadata:
  name: settings
---
kind: Job
metadata:
  name: migrate
---
kind: Deployment
metadata: {}
"#,
    );

    cleanup(&client, &source, &paths(&["misc.yaml"]), true)
        .await
        .unwrap();

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_unreadable_or_malformed_files_are_skipped() {
    let client = MockClusterClient::new();
    let source = MockManifestSource::new()
        .with_unreadable_file("locked.yaml")
        .with_file(
            "broken.yaml",
            "kind: Deployment\nmetadata:\n  name: first\n---\nkind: [oops\n",
        )
        .with_file("app.yaml", APP_DEPLOYMENT);

    cleanup(
        &client,
        &source,
        &paths(&["locked.yaml", "broken.yaml", "app.yaml"]),
        false,
    )
    .await
    .unwrap();

    let deletes = client.deletes();
    assert_eq!(
        &deletes[deletes.len() - 2..],
        &[
            pair("Deployment", "app-canary"),
            pair("Deployment", "app-baseline"),
        ]
    );
    assert!(client
        .calls()
        .iter()
        .all(|call| matches!(call, MockCall::Delete(..))));
}

#[tokio::test]
async fn test_non_manifest_document_does_not_hide_later_documents() {
    let client = MockClusterClient::new();
    let source = MockManifestSource::new()
        .with_file(
            "labels.yaml",
            "kind: Deployment\nmetadata:\n  name: bad\n  labels: [not-a-map]\n---\nkind: Deployment\nmetadata:\n  name: good\n",
        )
        .with_file(
            "scalar.yaml",
            "--- just-a-string\n---\nkind: Deployment\nmetadata:\n  name: other\n",
        );

    cleanup(
        &client,
        &source,
        &paths(&["labels.yaml", "scalar.yaml"]),
        false,
    )
    .await
    .unwrap();

    assert_eq!(
        client.deletes(),
        vec![
            pair("Deployment", "good-canary"),
            pair("Deployment", "good-baseline"),
            pair("Deployment", "other-canary"),
            pair("Deployment", "other-baseline"),
        ]
    );
}

#[test]
fn test_should_purge() {
    assert!(should_purge("Deployment", false));
    assert!(should_purge("daemonset", false));
    assert!(!should_purge("Service", false));
    assert!(should_purge("Service", true));
    assert!(!should_purge("Ingress", true));
}

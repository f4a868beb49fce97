use super::ClusterClient;
use crate::resource::ManagedObject;
use crate::variant::canary_name;
use tracing::{debug, warn};

/// Result of looking up a resource in the cluster
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Parsed and stripped of cluster-assigned fields
    Found(ManagedObject),
    /// The client reported an error or returned nothing
    NotFound(String),
    /// The client returned a payload that is not a manifest
    Unparseable(String),
}

/// Fetch `kind/name` and classify the response
pub async fn fetch_resource(client: &dyn ClusterClient, kind: &str, name: &str) -> FetchOutcome {
    let output = client.get(kind, name).await;

    if let Some(err) = output.error() {
        return FetchOutcome::NotFound(err.trim().to_string());
    }

    let payload = match output.stdout.as_deref().map(str::trim) {
        Some(payload) if !payload.is_empty() => payload,
        _ => return FetchOutcome::NotFound("empty response".to_string()),
    };

    match serde_json::from_str::<ManagedObject>(payload) {
        Ok(mut object) => {
            object.strip_cluster_fields();
            FetchOutcome::Found(object)
        }
        Err(e) => FetchOutcome::Unparseable(e.to_string()),
    }
}

/// Fetch `kind/name`, treating every failure as absence
///
/// A missing resource is the normal first-run case. An unparseable payload is
/// logged and also reported as absent.
pub async fn fetch_raw(
    client: &dyn ClusterClient,
    kind: &str,
    name: &str,
) -> Option<ManagedObject> {
    match fetch_resource(client, kind, name).await {
        FetchOutcome::Found(object) => Some(object),
        FetchOutcome::NotFound(reason) => {
            debug!(kind = kind, name = name, reason = %reason, "Resource not found");
            None
        }
        FetchOutcome::Unparseable(error) => {
            warn!(kind = kind, name = name, error = %error, "Failed to parse fetched resource");
            None
        }
    }
}

/// Fetch the live canary counterpart of `kind/name`
pub async fn fetch_variant(
    client: &dyn ClusterClient,
    kind: &str,
    name: &str,
) -> Option<ManagedObject> {
    fetch_raw(client, kind, &canary_name(name)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{CommandOutput, MockCall, MockClusterClient};
    use serde_json::json;

    fn live_canary() -> String {
        json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {
                "name": "app-canary",
                "namespace": "prod",
                "uid": "6c1e",
                "resourceVersion": "1234",
                "generation": 7,
                "creationTimestamp": "2024-01-01T00:00:00Z",
                "labels": {"workflow/version": "canary"},
                "annotations": {"workflow/version": "canary"}
            },
            "spec": {"replicas": 1},
            "status": {"observedGeneration": 7, "readyReplicas": 1}
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_fetch_variant_looks_up_canary_name() {
        let client = MockClusterClient::new().with_object(
            "Deployment",
            "app-canary",
            CommandOutput::success(live_canary()),
        );

        let fetched = fetch_variant(&client, "Deployment", "app").await.unwrap();

        assert_eq!(
            client.calls(),
            vec![MockCall::Get("Deployment".into(), "app-canary".into())]
        );
        assert_eq!(fetched.name(), Some("app-canary"));
        assert_eq!(fetched.version_label(), Some("canary"));
        assert!(fetched.metadata.namespace.is_none());
        assert!(fetched.metadata.uid.is_none());
        assert!(fetched.metadata.resource_version.is_none());
        assert!(fetched.metadata.creation_timestamp.is_none());
        assert_eq!(fetched.status, Some(json!({})));
        assert_eq!(fetched.replicas(), Some(1));
    }

    #[tokio::test]
    async fn test_fetch_variant_not_found_is_absent() {
        let client = MockClusterClient::new().with_object(
            "Deployment",
            "app-canary",
            CommandOutput::failure("not found"),
        );

        assert!(fetch_variant(&client, "Deployment", "app").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_resource_classifies_responses() {
        let client = MockClusterClient::new()
            .with_object("Deployment", "empty", CommandOutput::default())
            .with_object("Deployment", "garbage", CommandOutput::success("not json {"));

        assert_eq!(
            fetch_resource(&client, "Deployment", "empty").await,
            FetchOutcome::NotFound("empty response".to_string())
        );
        assert!(matches!(
            fetch_resource(&client, "Deployment", "garbage").await,
            FetchOutcome::Unparseable(_)
        ));
        assert!(fetch_raw(&client, "Deployment", "garbage").await.is_none());
    }

    #[tokio::test]
    async fn test_stripped_fetches_compare_equal() {
        let mut bumped: serde_json::Value = serde_json::from_str(&live_canary()).unwrap();
        bumped["metadata"]["resourceVersion"] = json!("9999");
        bumped["status"]["readyReplicas"] = json!(0);

        let client = MockClusterClient::new()
            .with_object("Deployment", "a", CommandOutput::success(live_canary()))
            .with_object("Deployment", "b", CommandOutput::success(bumped.to_string()));

        let a = fetch_raw(&client, "Deployment", "a").await;
        let b = fetch_raw(&client, "Deployment", "b").await;
        assert!(a.is_some());
        assert_eq!(a, b);
    }
}

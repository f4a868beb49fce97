use super::{ClusterClient, CommandOutput};
use async_trait::async_trait;
use kube::api::{Api, DeleteParams, DynamicObject};
use kube::discovery::{ApiResource, Discovery, Scope};
use kube::Client;
use tokio::sync::OnceCell;
use tracing::debug;

/// ClusterClient backed by the Kubernetes API
///
/// Kinds are resolved through API discovery, which runs once on first use.
/// Namespaced kinds are addressed in the configured namespace.
pub struct KubeClusterClient {
    client: Client,
    namespace: String,
    discovery: OnceCell<Discovery>,
}

impl KubeClusterClient {
    /// Create a client for `namespace`, or the kubeconfig default namespace
    pub fn new(client: Client, namespace: Option<String>) -> Self {
        let namespace = namespace.unwrap_or_else(|| client.default_namespace().to_string());
        KubeClusterClient {
            client,
            namespace,
            discovery: OnceCell::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn api_for(&self, kind: &str) -> Result<Api<DynamicObject>, String> {
        let discovery = self
            .discovery
            .get_or_try_init(|| Discovery::new(self.client.clone()).run())
            .await
            .map_err(|e| format!("API discovery failed: {}", e))?;

        let (ar, namespaced) = find_api_resource(discovery, kind)
            .ok_or_else(|| format!("the server doesn't have a resource type \"{}\"", kind))?;

        debug!(kind = kind, api_version = %ar.api_version, namespaced, "Resolved resource kind");

        Ok(if namespaced {
            Api::namespaced_with(self.client.clone(), &self.namespace, &ar)
        } else {
            Api::all_with(self.client.clone(), &ar)
        })
    }
}

/// Find the preferred API resource for a kind (or plural name), ignoring case
fn find_api_resource(discovery: &Discovery, kind: &str) -> Option<(ApiResource, bool)> {
    discovery
        .groups()
        .flat_map(|group| group.recommended_resources())
        .find(|(ar, _)| ar.kind.eq_ignore_ascii_case(kind) || ar.plural.eq_ignore_ascii_case(kind))
        .map(|(ar, caps)| (ar, matches!(caps.scope, Scope::Namespaced)))
}

fn not_found(kind: &str, name: &str) -> CommandOutput {
    CommandOutput::failure(format!("{} \"{}\" not found", kind, name))
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn get(&self, kind: &str, name: &str) -> CommandOutput {
        let api = match self.api_for(kind).await {
            Ok(api) => api,
            Err(e) => return CommandOutput::failure(e),
        };

        match api.get(name).await {
            Ok(object) => match serde_json::to_string(&object) {
                Ok(json) => CommandOutput::success(json),
                Err(e) => CommandOutput::failure(format!("failed to serialize {}/{}: {}", kind, name, e)),
            },
            Err(kube::Error::Api(err)) if err.code == 404 => not_found(kind, name),
            Err(e) => CommandOutput::failure(e.to_string()),
        }
    }

    async fn delete(&self, kind: &str, name: &str) -> CommandOutput {
        let api = match self.api_for(kind).await {
            Ok(api) => api,
            Err(e) => return CommandOutput::failure(e),
        };

        match api.delete(name, &DeleteParams::default()).await {
            Ok(_) => CommandOutput::default(),
            Err(kube::Error::Api(err)) if err.code == 404 => not_found(kind, name),
            Err(e) => CommandOutput::failure(e.to_string()),
        }
    }
}

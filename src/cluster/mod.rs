//! Cluster access for variant lookup and cleanup
//!
//! `ClusterClient` is the only seam to a live cluster. Its calls never fail
//! outright: like a `kubectl` invocation they hand back whatever came out on
//! stdout and stderr, and callers classify that into `FetchOutcome` or
//! `DeleteOutcome` before deciding what to ignore.

pub mod fetch;
pub mod kube_client;

pub use fetch::{fetch_raw, fetch_resource, fetch_variant, FetchOutcome};
pub use kube_client::KubeClusterClient;

use async_trait::async_trait;

/// Raw result of a cluster call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            stdout: Some(stdout.into()),
            stderr: None,
        }
    }

    pub fn failure(stderr: impl Into<String>) -> Self {
        CommandOutput {
            stdout: None,
            stderr: Some(stderr.into()),
        }
    }

    /// Non-empty stderr, if any
    pub fn error(&self) -> Option<&str> {
        self.stderr.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// Trait for fetching and deleting resources by kind and name
///
/// Production code uses `KubeClusterClient`.
/// Tests use `MockClusterClient` which records every call.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Fetch a resource; the serialized object comes back on stdout
    async fn get(&self, kind: &str, name: &str) -> CommandOutput;

    /// Delete a resource; any failure is reported on stderr
    async fn delete(&self, kind: &str, name: &str) -> CommandOutput;
}

/// How a single delete went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Failed(String),
}

impl DeleteOutcome {
    pub fn from_output(output: &CommandOutput) -> Self {
        match output.error() {
            None => DeleteOutcome::Deleted,
            Some(err) if err.to_ascii_lowercase().contains("not found") => DeleteOutcome::NotFound,
            Some(err) => DeleteOutcome::Failed(err.trim().to_string()),
        }
    }
}

/// Issue a delete and classify the result
pub async fn delete_resource(client: &dyn ClusterClient, kind: &str, name: &str) -> DeleteOutcome {
    DeleteOutcome::from_output(&client.delete(kind, name).await)
}

/// Mock cluster client for testing - records calls in memory
#[cfg(test)]
pub struct MockClusterClient {
    calls: std::sync::Arc<std::sync::Mutex<Vec<MockCall>>>,
    objects: std::collections::HashMap<(String, String), CommandOutput>,
    failing_deletes: std::collections::HashMap<(String, String), String>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Get(String, String),
    Delete(String, String),
}

#[cfg(test)]
impl Default for MockClusterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl MockClusterClient {
    pub fn new() -> Self {
        MockClusterClient {
            calls: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
            objects: std::collections::HashMap::new(),
            failing_deletes: std::collections::HashMap::new(),
        }
    }

    /// Respond to `get(kind, name)` with `output`
    pub fn with_object(mut self, kind: &str, name: &str, output: CommandOutput) -> Self {
        self.objects
            .insert((kind.to_string(), name.to_string()), output);
        self
    }

    /// Make `delete(kind, name)` report `stderr`
    pub fn with_failing_delete(mut self, kind: &str, name: &str, stderr: &str) -> Self {
        self.failing_deletes
            .insert((kind.to_string(), name.to_string()), stderr.to_string());
        self
    }

    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Delete(kind, name) => Some((kind, name)),
                MockCall::Get(..) => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[async_trait]
impl ClusterClient for MockClusterClient {
    async fn get(&self, kind: &str, name: &str) -> CommandOutput {
        #[allow(clippy::unwrap_used)]
        self.calls
            .lock()
            .unwrap()
            .push(MockCall::Get(kind.to_string(), name.to_string()));
        self.objects
            .get(&(kind.to_string(), name.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                CommandOutput::failure(format!("{kind} \"{name}\" not found"))
            })
    }

    async fn delete(&self, kind: &str, name: &str) -> CommandOutput {
        #[allow(clippy::unwrap_used)]
        self.calls
            .lock()
            .unwrap()
            .push(MockCall::Delete(kind.to_string(), name.to_string()));
        match self.failing_deletes.get(&(kind.to_string(), name.to_string())) {
            Some(stderr) => CommandOutput::failure(stderr.clone()),
            None => CommandOutput::default(),
        }
    }
}

//! Removal of stale canary and baseline resources
//!
//! A single pass over the given manifests: every deployment entity (and,
//! when asked, every service) named in them gets its `-canary` and
//! `-baseline` counterparts deleted from the cluster. Deletes are best
//! effort; the only hard failure is having no manifests at all.

pub mod source;

pub use source::{parse_documents, FsManifestSource, ManifestError, ManifestSource};

use crate::cluster::{delete_resource, ClusterClient, DeleteOutcome};
use crate::resource::{is_deployment_entity, is_service_entity, ManagedObject};
use crate::variant::{baseline_name, canary_name};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("no manifest files found in {0:?}")]
    ManifestNotFound(Vec<PathBuf>),
}

/// Whether a manifest of `kind` has derived variants to purge
pub fn should_purge(kind: &str, include_services: bool) -> bool {
    is_deployment_entity(kind) || (include_services && is_service_entity(kind))
}

/// Delete the canary and baseline variants of everything in `files`
///
/// Files are processed in resolved order and documents in stream order;
/// for each document the canary is deleted before the baseline. A file that
/// cannot be read is skipped with a warning, as is a document that is not a
/// manifest. A YAML syntax error skips the rest of its file. A failed delete
/// never stops the sweep.
///
/// # Errors
/// Returns `ManifestNotFound` before touching the cluster if `files`
/// resolves to nothing.
pub async fn cleanup(
    client: &dyn ClusterClient,
    source: &dyn ManifestSource,
    files: &[PathBuf],
    include_services: bool,
) -> Result<(), CleanupError> {
    let manifests = source.resolve_files(files);
    if manifests.is_empty() {
        return Err(CleanupError::ManifestNotFound(files.to_vec()));
    }

    info!(
        files = manifests.len(),
        include_services = include_services,
        "Cleaning up canary and baseline resources"
    );

    for path in &manifests {
        let bytes = match source.read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable manifest");
                continue;
            }
        };

        for document in parse_documents(&bytes) {
            match document {
                Ok(object) => purge_variants(client, &object, include_services).await,
                Err(e @ ManifestError::Document(_)) => {
                    warn!(path = %path.display(), error = %e, "Skipping malformed document");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping rest of malformed manifest");
                    break;
                }
            }
        }
    }

    Ok(())
}

async fn purge_variants(client: &dyn ClusterClient, object: &ManagedObject, include_services: bool) {
    if !should_purge(&object.kind, include_services) {
        return;
    }

    let Some(name) = object.name().filter(|name| !name.is_empty()) else {
        debug!(kind = %object.kind, "Skipping manifest without a name");
        return;
    };

    for target in [canary_name(name), baseline_name(name)] {
        match delete_resource(client, &object.kind, &target).await {
            DeleteOutcome::Deleted => {
                info!(kind = %object.kind, name = %target, "Deleted variant");
            }
            DeleteOutcome::NotFound => {
                debug!(kind = %object.kind, name = %target, "Variant not present");
            }
            DeleteOutcome::Failed(error) => {
                warn!(kind = %object.kind, name = %target, error = %error, "Failed to delete variant");
            }
        }
    }
}

#[cfg(test)]
#[path = "cleanup_test.rs"]
mod tests;

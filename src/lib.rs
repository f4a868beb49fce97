//! Canary, baseline and stable variants of Kubernetes manifests
//!
//! - `resource`: typed manifests and kind classification
//! - `variant`: deriving and labelling variants
//! - `cluster`: fetching live variants through a `ClusterClient`
//! - `cleanup`: deleting stale canary/baseline resources
//! - `config`: deployment strategy settings

pub mod cleanup;
pub mod cluster;
pub mod config;
pub mod resource;
pub mod variant;

//! Typed cluster manifests and the kind table behind them

pub mod kind;
pub mod labels;
pub mod object;

pub use kind::{carries_replicas, is_deployment_entity, is_service_entity, KindProfile};
pub use labels::VERSION_LABEL;
pub use object::ManagedObject;

use super::labeler::apply_variant_label;
use super::VariantTag;
use crate::resource::ManagedObject;
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariantError {
    #[error("{0} has no name to derive a variant from")]
    MissingName(String),
}

/// True iff the object's version label says `stable`
pub fn is_marked_stable(object: &ManagedObject) -> bool {
    object.version_label() == Some(VariantTag::Stable.label_value())
}

/// Mark an object as stable without renaming it
///
/// Already-stable objects are handed back borrowed, with no clone.
pub fn to_stable(object: &ManagedObject) -> Cow<'_, ManagedObject> {
    if is_marked_stable(object) {
        return Cow::Borrowed(object);
    }
    let mut stable = object.clone();
    apply_variant_label(&mut stable, VariantTag::Stable);
    Cow::Owned(stable)
}

/// Derive `<name>-stable`, keeping the source's declared replica count
pub fn derive_stable(object: &ManagedObject) -> Result<ManagedObject, VariantError> {
    derive(object, VariantTag::Stable, object.replicas())
}

/// Derive `<name>-baseline` from the currently stable object
///
/// `replicas` overrides `spec.replicas` for kinds that carry replicas;
/// None keeps whatever the source declares.
pub fn derive_baseline(
    stable: &ManagedObject,
    replicas: Option<i32>,
) -> Result<ManagedObject, VariantError> {
    derive(stable, VariantTag::Baseline, replicas)
}

/// Derive `<name>-canary`; `replicas` behaves as in `derive_baseline`
pub fn derive_canary(
    object: &ManagedObject,
    replicas: Option<i32>,
) -> Result<ManagedObject, VariantError> {
    derive(object, VariantTag::Canary, replicas)
}

pub fn canary_name(name: &str) -> String {
    VariantTag::Canary.resource_name(name)
}

pub fn baseline_name(name: &str) -> String {
    VariantTag::Baseline.resource_name(name)
}

pub fn stable_name(name: &str) -> String {
    VariantTag::Stable.resource_name(name)
}

/// Clone, rename, rescale, then label
///
/// The name is suffixed as-is: deriving from `app-canary` yields
/// `app-canary-canary`.
fn derive(
    source: &ManagedObject,
    tag: VariantTag,
    replicas: Option<i32>,
) -> Result<ManagedObject, VariantError> {
    let base_name = source
        .name()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| VariantError::MissingName(source.kind.clone()))?;

    let mut derived = source.clone();
    derived.metadata.name = Some(tag.resource_name(base_name));

    if let Some(replicas) = replicas {
        derived.set_replicas(replicas);
    }

    apply_variant_label(&mut derived, tag);

    debug!(
        kind = %derived.kind,
        source = base_name,
        derived = ?derived.metadata.name,
        variant = %tag,
        "Derived variant"
    );

    Ok(derived)
}

#[cfg(test)]
#[path = "factory_test.rs"]
mod tests;

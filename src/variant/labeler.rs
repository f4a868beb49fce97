use super::VariantTag;
use crate::resource::labels::{merge_into, merge_json_labels, VERSION_LABEL};
use crate::resource::ManagedObject;
use std::collections::BTreeMap;

/// Stamp `tag` onto `object` under the version label
///
/// Mutates in place; callers that must keep their source intact clone first.
/// The label is merged (overwriting only the version key) into:
/// - `metadata.labels` and `metadata.annotations`, created if absent
/// - `spec.selector.matchLabels`, if the kind and object have a selector
/// - the pod template labels, if the kind and object have a template
///
/// Service kinds have neither selector nor template in the kind table, so
/// only their metadata changes.
pub fn apply_variant_label(object: &mut ManagedObject, tag: VariantTag) {
    let delta = BTreeMap::from([(VERSION_LABEL.to_string(), tag.label_value().to_string())]);

    merge_into(&mut object.metadata.labels, &delta);
    merge_into(&mut object.metadata.annotations, &delta);

    if let Some(selector) = object.selector_labels_mut() {
        merge_json_labels(selector, &delta);
    }

    if let Some(template) = object.template_labels_mut() {
        merge_json_labels(template, &delta);
    }
}

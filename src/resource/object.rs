use super::kind::{self, KindProfile};
use super::labels::VERSION_LABEL;
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A cluster resource manifest
///
/// `metadata` is typed so labels and annotations can be edited directly.
/// `spec` and `status` stay opaque: only the fields named by the kind's
/// `KindProfile` are ever touched, everything else survives a clone or a
/// serialize/deserialize cycle unchanged. Top-level fields other than the
/// ones listed here (`data`, `rules`, ...) are kept in `rest`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ManagedObject {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ManagedObject {
    /// Build a bare object with just a kind and a name
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        ManagedObject {
            kind: kind.into(),
            metadata: ObjectMeta {
                name: Some(name.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    pub fn profile(&self) -> KindProfile {
        kind::profile(&self.kind)
    }

    /// Value of the version label, if the object carries one
    pub fn version_label(&self) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(VERSION_LABEL))
            .map(String::as_str)
    }

    /// Declared `spec.replicas`, only for kinds that carry replicas
    pub fn replicas(&self) -> Option<i32> {
        if !self.profile().replicas {
            return None;
        }
        self.spec
            .as_ref()?
            .get("replicas")?
            .as_i64()
            .and_then(|r| i32::try_from(r).ok())
    }

    /// Override `spec.replicas`
    ///
    /// Returns false (and leaves the object untouched) when the kind does not
    /// carry replicas or `spec` is not a mapping.
    pub fn set_replicas(&mut self, replicas: i32) -> bool {
        if !self.profile().replicas {
            return false;
        }
        let spec = self.spec.get_or_insert_with(|| Value::Object(Map::new()));
        match spec.as_object_mut() {
            Some(spec) => {
                spec.insert("replicas".to_string(), Value::from(replicas));
                true
            }
            None => false,
        }
    }

    /// `spec.selector.matchLabels`, created under an existing selector
    ///
    /// None when the kind has no label selector or the object declares none.
    pub fn selector_labels_mut(&mut self) -> Option<&mut Map<String, Value>> {
        if !self.profile().selector {
            return None;
        }
        let selector = self
            .spec
            .as_mut()?
            .as_object_mut()?
            .get_mut("selector")?
            .as_object_mut()?;
        selector
            .entry("matchLabels")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
    }

    /// Labels of the nested pod template, created under an existing template
    ///
    /// None when the kind has no pod template or the object declares none.
    pub fn template_labels_mut(&mut self) -> Option<&mut Map<String, Value>> {
        let segments = self.profile().template.segments();
        if segments.is_empty() {
            return None;
        }
        let mut node = self.spec.as_mut()?.as_object_mut()?;
        for segment in segments {
            node = node.get_mut(*segment)?.as_object_mut()?;
        }
        node.entry("metadata")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()?
            .entry("labels")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
    }

    /// Drop everything the cluster fills in
    ///
    /// Metadata is reduced to name, labels and annotations; status becomes an
    /// empty mapping. Two fetches of an unchanged resource compare equal after
    /// stripping.
    pub fn strip_cluster_fields(&mut self) {
        let metadata = std::mem::take(&mut self.metadata);
        self.metadata = ObjectMeta {
            name: metadata.name,
            labels: metadata.labels,
            annotations: metadata.annotations,
            ..Default::default()
        };
        self.status = Some(Value::Object(Map::new()));
    }
}

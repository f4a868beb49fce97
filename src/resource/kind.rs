//! Kind classification for variant derivation
//!
//! Every kind-dependent decision (does it carry replicas, where do its selector
//! and pod template labels live) is read from one table, `KIND_PROFILES`.
//! Lookups are case-insensitive; kinds not in the table get `DEFAULT_PROFILE`.

/// Where a kind keeps the labels of the pods it creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePath {
    /// No nested pod template (Pods label themselves, Services create no pods)
    None,
    /// `spec.template.metadata.labels`
    Spec,
    /// `spec.jobTemplate.spec.template.metadata.labels`
    CronJob,
}

impl TemplatePath {
    /// Path segments below `spec` leading to the template object
    pub fn segments(self) -> &'static [&'static str] {
        match self {
            TemplatePath::None => &[],
            TemplatePath::Spec => &["template"],
            TemplatePath::CronJob => &["jobTemplate", "spec", "template"],
        }
    }
}

/// Which optional manifest fields apply to a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    /// `spec.replicas` is meaningful and may be overridden
    pub replicas: bool,
    /// `spec.selector.matchLabels` receives the version label
    pub selector: bool,
    pub template: TemplatePath,
}

const WORKLOAD: KindProfile = KindProfile {
    replicas: true,
    selector: true,
    template: TemplatePath::Spec,
};

const DEFAULT_PROFILE: KindProfile = WORKLOAD;

const KIND_PROFILES: &[(&str, KindProfile)] = &[
    ("Deployment", WORKLOAD),
    ("ReplicaSet", WORKLOAD),
    ("StatefulSet", WORKLOAD),
    (
        "DaemonSet",
        KindProfile {
            replicas: false,
            ..WORKLOAD
        },
    ),
    (
        "Pod",
        KindProfile {
            replicas: false,
            selector: false,
            template: TemplatePath::None,
        },
    ),
    ("Job", WORKLOAD),
    (
        "CronJob",
        KindProfile {
            replicas: true,
            selector: false,
            template: TemplatePath::CronJob,
        },
    ),
    (
        "Service",
        KindProfile {
            replicas: false,
            selector: false,
            template: TemplatePath::None,
        },
    ),
];

/// Kinds that run pods directly and get canary/baseline counterparts
const DEPLOYMENT_KINDS: &[&str] = &["Deployment", "ReplicaSet", "DaemonSet", "Pod", "StatefulSet"];

/// Kinds that expose or route traffic instead of running pods
const SERVICE_KINDS: &[&str] = &["Service"];

/// Look up the profile for `kind`, falling back to a replicated workload shape
pub fn profile(kind: &str) -> KindProfile {
    KIND_PROFILES
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(kind))
        .map(|(_, p)| *p)
        .unwrap_or(DEFAULT_PROFILE)
}

/// True unless the kind is a Pod, a DaemonSet, or a service entity
pub fn carries_replicas(kind: &str) -> bool {
    profile(kind).replicas
}

pub fn is_service_entity(kind: &str) -> bool {
    SERVICE_KINDS.iter().any(|k| k.eq_ignore_ascii_case(kind))
}

pub fn is_deployment_entity(kind: &str) -> bool {
    DEPLOYMENT_KINDS.iter().any(|k| k.eq_ignore_ascii_case(kind))
}

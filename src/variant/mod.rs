//! Canary, baseline and stable variants of a manifest
//!
//! - `labeler`: stamps the version label onto an object in place
//! - `factory`: derives renamed, relabelled, rescaled copies of an object

pub mod factory;
pub mod labeler;

pub use factory::{
    baseline_name, canary_name, derive_baseline, derive_canary, derive_stable, is_marked_stable,
    stable_name, to_stable, VariantError,
};
pub use labeler::apply_variant_label;

/// Which variant of a resource an object represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantTag {
    Canary,
    Baseline,
    Stable,
}

impl VariantTag {
    /// Value written under the version label
    pub fn label_value(self) -> &'static str {
        match self {
            VariantTag::Canary => "canary",
            VariantTag::Baseline => "baseline",
            VariantTag::Stable => "stable",
        }
    }

    /// Suffix appended to the base name of a derived resource
    pub fn suffix(self) -> &'static str {
        match self {
            VariantTag::Canary => "-canary",
            VariantTag::Baseline => "-baseline",
            VariantTag::Stable => "-stable",
        }
    }

    /// `<name><suffix>`
    pub fn resource_name(self, name: &str) -> String {
        format!("{}{}", name, self.suffix())
    }
}

impl std::fmt::Display for VariantTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label_value())
    }
}

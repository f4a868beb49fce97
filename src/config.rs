//! Deployment strategy configuration
//!
//! Values come from environment variables:
//! - VARJO_DEPLOYMENT_STRATEGY: "canary" enables variant handling (default: basic)
//! - VARJO_TRAFFIC_SPLIT_METHOD: "smi" or "pod" (default: pod)

pub const DEPLOYMENT_STRATEGY_ENV: &str = "VARJO_DEPLOYMENT_STRATEGY";
pub const TRAFFIC_SPLIT_METHOD_ENV: &str = "VARJO_TRAFFIC_SPLIT_METHOD";

const CANARY_STRATEGY: &str = "CANARY";
const SMI_TRAFFIC_SPLIT: &str = "SMI";

/// Active deployment strategy and traffic split mechanism
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyConfig {
    pub deployment_strategy: String,
    pub traffic_split_method: String,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            deployment_strategy: "basic".to_string(),
            traffic_split_method: "pod".to_string(),
        }
    }
}

impl StrategyConfig {
    pub fn new(
        deployment_strategy: impl Into<String>,
        traffic_split_method: impl Into<String>,
    ) -> Self {
        StrategyConfig {
            deployment_strategy: deployment_strategy.into(),
            traffic_split_method: traffic_split_method.into(),
        }
    }

    /// Read the strategy from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        StrategyConfig {
            deployment_strategy: std::env::var(DEPLOYMENT_STRATEGY_ENV)
                .unwrap_or(defaults.deployment_strategy),
            traffic_split_method: std::env::var(TRAFFIC_SPLIT_METHOD_ENV)
                .unwrap_or(defaults.traffic_split_method),
        }
    }

    pub fn is_canary_strategy(&self) -> bool {
        self.deployment_strategy
            .eq_ignore_ascii_case(CANARY_STRATEGY)
    }

    /// Canary that splits traffic through SMI TrafficSplits
    pub fn is_traffic_split_canary(&self) -> bool {
        self.is_canary_strategy()
            && self
                .traffic_split_method
                .eq_ignore_ascii_case(SMI_TRAFFIC_SPLIT)
    }
}

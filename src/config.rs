//! Engine tunables.
//!
//! Every constant the pricing step depends on lives here, so hosts can
//! tune volatility and memory bounds without touching engine code. The
//! struct deserializes with serde (all fields defaulted), so it can come
//! straight out of a config file:
//!
//! ```
//! use temporal_market::MarketConfig;
//!
//! let config: MarketConfig = serde_json::from_str(
//!     r#"{ "sensitivity": "0.002", "history_cap": 500 }"#,
//! ).unwrap();
//! assert_eq!(config.history_cap, 500);
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{credits, ResourceTier};

// ============================================================================
// MarketConfig
// ============================================================================

/// Tunables for price formation and quote retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Price-change fraction per unit of net imbalance (default 0.001,
    /// i.e. a 0.1% move per unit)
    pub sensitivity: Decimal,

    /// Per-tier overrides of `sensitivity`; absent tiers use the default
    pub tier_sensitivity: HashMap<ResourceTier, Decimal>,

    /// Price floor as a fraction of a resource's base value (default 0.01)
    pub min_price_ratio: Decimal,

    /// Price ceiling as a multiple of a resource's base value (default 100)
    pub max_price_multiple: Decimal,

    /// Maximum retained history points per quote (default 2000); the
    /// oldest point is dropped once the cap is reached
    pub history_cap: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            sensitivity: Decimal::new(1, 3),
            tier_sensitivity: HashMap::new(),
            min_price_ratio: Decimal::new(1, 2),
            max_price_multiple: Decimal::from(100),
            history_cap: 2_000,
        }
    }
}

impl MarketConfig {
    /// Sensitivity for one tier: the override when present, otherwise the
    /// global default.
    pub fn sensitivity_for(&self, tier: ResourceTier) -> Decimal {
        self.tier_sensitivity
            .get(&tier)
            .copied()
            .unwrap_or(self.sensitivity)
    }

    /// Price bounds for a resource with the given base value (whole
    /// credits).
    ///
    /// The floor is clamped to at least one fixed-point tick so a
    /// recomputed price stays strictly positive.
    pub fn bounds_for(&self, base_value: u64) -> PriceBounds {
        let base = Decimal::from(base_value);

        let min = credits::decimal_to_fixed(base * self.min_price_ratio)
            .unwrap_or(1)
            .max(1);
        let max = credits::decimal_to_fixed(base * self.max_price_multiple)
            .unwrap_or(u64::MAX)
            .max(min);

        PriceBounds { min, max }
    }
}

/// Clamp range for a resource's recomputed price, in fixed-point credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBounds {
    /// Inclusive floor, always >= 1 tick
    pub min: u64,

    /// Inclusive ceiling, always >= `min`
    pub max: u64,
}

// ============================================================================
// Unit Tests
// ============================================================================

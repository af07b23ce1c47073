//! Price quotes: current price plus bounded history.
//!
//! One [`Quote`] exists per (resource, location) pair. It is created lazily
//! when the pair is first referenced (seeded at the resource's base value)
//! and mutated only by the engine's price-recomputation step: every
//! accepted order for the pair appends exactly one [`PricePoint`].
//!
//! History is a bounded ring. When the configured cap is reached, the
//! oldest point is dropped, keeping memory bounded under sustained load.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

// ============================================================================
// PricePoint
// ============================================================================

/// A single historical price observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Price in fixed-point credits
    pub price: u64,

    /// Observation timestamp in epoch milliseconds
    pub timestamp_ms: u64,
}

// ============================================================================
// Quote
// ============================================================================

/// Current price and historical price series for one (resource, location)
/// pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Catalog id of the quoted resource
    pub resource_id: String,

    /// Era the quote applies to
    pub location: String,

    /// Current price in fixed-point credits; strictly positive
    pub current_price: u64,

    /// Oldest-first price history, bounded by the engine's configured cap
    history: VecDeque<PricePoint>,
}

impl Quote {
    /// Create a quote at its seed price with empty history.
    ///
    /// Seeding records no history point; points are appended only when a
    /// price is recomputed.
    pub fn seeded(
        resource_id: impl Into<String>,
        location: impl Into<String>,
        initial_price: u64,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            location: location.into(),
            current_price: initial_price,
            history: VecDeque::new(),
        }
    }

    /// Record a recomputed price, dropping the oldest point once `cap` is
    /// reached.
    ///
    /// A cap of zero is treated as one: the current point is always
    /// retained.
    pub(crate) fn record(&mut self, price: u64, timestamp_ms: u64, cap: usize) {
        let cap = cap.max(1);
        while self.history.len() >= cap {
            self.history.pop_front();
        }
        self.current_price = price;
        self.history.push_back(PricePoint {
            price,
            timestamp_ms,
        });
    }

    /// Oldest-first iteration over the retained history.
    pub fn history(&self) -> impl Iterator<Item = &PricePoint> {
        self.history.iter()
    }

    /// Number of retained history points.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The most recent history point, if any price has been recomputed.
    #[inline]
    pub fn latest(&self) -> Option<&PricePoint> {
        self.history.back()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

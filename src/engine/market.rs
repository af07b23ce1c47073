//! Order intake, price formation, and quote history.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::book::{OrderBook, OrderFilter};
use crate::config::MarketConfig;
use crate::error::MarketError;
use crate::types::{credits, Order, OrderRequest, Quote, ResourceCatalog, ResourceTier};

// ============================================================================
// OrderReceipt
// ============================================================================

/// Confirmation of an accepted order.
///
/// Carries everything a settlement layer needs: the assigned id and the
/// quote price that resulted from the submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Assigned order identifier
    pub order_id: u64,

    /// Resource the order was placed for
    pub resource_id: String,

    /// Location the order was placed at
    pub location: String,

    /// Quote price after this submission, in fixed-point credits
    pub quote_price: u64,

    /// Acceptance timestamp in epoch milliseconds
    pub timestamp_ms: u64,
}

// ============================================================================
// MarketEngine
// ============================================================================

/// The market engine: owns the order book and the quote table.
///
/// Construct one per process (or per test). There is no global instance;
/// tests run in isolation without state bleeding between them.
#[derive(Debug)]
pub struct MarketEngine {
    /// Static reference data for validation and quote seeding
    catalog: ResourceCatalog,

    /// Pricing and retention tunables
    config: MarketConfig,

    /// All open orders
    book: OrderBook,

    /// Quotes keyed by resource id, then location
    quotes: HashMap<String, HashMap<String, Quote>>,
}

impl MarketEngine {
    /// Create an engine over a catalog with default configuration.
    pub fn new(catalog: ResourceCatalog) -> Self {
        Self::with_config(catalog, MarketConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(catalog: ResourceCatalog, config: MarketConfig) -> Self {
        Self {
            catalog,
            config,
            book: OrderBook::new(),
            quotes: HashMap::new(),
        }
    }

    /// The catalog this engine validates against.
    #[inline]
    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Number of orders currently stored in the book (expired entries may
    /// linger until the next read prunes them).
    #[inline]
    pub fn open_order_count(&self) -> usize {
        self.book.len()
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit an order.
    ///
    /// Validation happens up front, in a fixed sequence, before any
    /// mutation:
    ///
    /// 1. quantity must be a positive integer ([`MarketError::InvalidQuantity`])
    /// 2. limit price must be non-negative and representable
    ///    ([`MarketError::InvalidPrice`])
    /// 3. the resource must exist in the catalog
    ///    ([`MarketError::UnknownResource`])
    /// 4. expiry must be strictly after `now_ms` ([`MarketError::ExpiredOrder`])
    ///
    /// On acceptance the order is appended to the book and the quote for
    /// its (resource, location) pair is recomputed from current buy/sell
    /// pressure, gaining exactly one history point. No other quote is
    /// touched.
    pub fn submit(
        &mut self,
        request: OrderRequest,
        now_ms: u64,
    ) -> Result<OrderReceipt, MarketError> {
        if request.quantity <= 0 {
            warn!(
                resource = %request.resource_id,
                quantity = request.quantity,
                "order rejected: non-positive quantity"
            );
            return Err(MarketError::InvalidQuantity);
        }
        let quantity = request.quantity as u64;

        if request.limit_price.is_sign_negative() {
            warn!(
                resource = %request.resource_id,
                price = %request.limit_price,
                "order rejected: negative limit price"
            );
            return Err(MarketError::InvalidPrice);
        }
        let limit_price =
            credits::decimal_to_fixed(request.limit_price).ok_or(MarketError::InvalidPrice)?;

        let (tier, base_value) = match self.catalog.get(&request.resource_id) {
            Some(resource) => (resource.tier, resource.base_value),
            None => {
                warn!(resource = %request.resource_id, "order rejected: unknown resource");
                return Err(MarketError::UnknownResource(request.resource_id));
            }
        };

        if request.expiry_ms <= now_ms {
            warn!(
                resource = %request.resource_id,
                expiry_ms = request.expiry_ms,
                now_ms,
                "order rejected: expiry not in the future"
            );
            return Err(MarketError::ExpiredOrder);
        }

        // Validation complete; everything below mutates.
        let resource_id = request.resource_id;
        let location = request.location;

        let pruned = self.book.prune_expired_for(&resource_id, now_ms);
        if !pruned.is_empty() {
            trace!(resource = %resource_id, count = pruned.len(), "pruned expired orders");
        }

        let order_id = self.book.insert(Order {
            id: 0,
            resource_id: resource_id.clone(),
            quantity,
            limit_price,
            side: request.side,
            location: location.clone(),
            expiry_ms: request.expiry_ms,
            player_id: request.player_id,
            submitted_ms: now_ms,
        });

        let quote_price = self.reprice(&resource_id, &location, tier, base_value, now_ms);

        debug!(
            order_id,
            resource = %resource_id,
            location = %location,
            side = ?request.side,
            quantity,
            quote_price,
            "order accepted"
        );

        Ok(OrderReceipt {
            order_id,
            resource_id,
            location,
            quote_price,
            timestamp_ms: now_ms,
        })
    }

    /// Recompute the quote for one (resource, location) pair from current
    /// open-order pressure, seeding it at the resource's base value on
    /// first reference.
    ///
    /// `new = clamp(current * (1 + imbalance * k), min, max)`; a
    /// multiplier that would drive the price to zero or negative clamps to
    /// the floor.
    fn reprice(
        &mut self,
        resource_id: &str,
        location: &str,
        tier: ResourceTier,
        base_value: u64,
        now_ms: u64,
    ) -> u64 {
        let (buy_pressure, sell_pressure) = self.book.pressure(resource_id, location, now_ms);
        let imbalance = Decimal::from(buy_pressure) - Decimal::from(sell_pressure);

        let sensitivity = self.config.sensitivity_for(tier);
        let bounds = self.config.bounds_for(base_value);

        let quote = self
            .quotes
            .entry(resource_id.to_string())
            .or_default()
            .entry(location.to_string())
            .or_insert_with(|| {
                Quote::seeded(resource_id, location, credits::from_whole(base_value))
            });

        let current = credits::fixed_to_decimal(quote.current_price);
        let moved = current * (Decimal::ONE + imbalance * sensitivity);

        let raw = if moved.is_sign_negative() {
            0
        } else {
            // Out-of-range magnitudes clamp to the ceiling below
            credits::decimal_to_fixed(moved).unwrap_or(bounds.max)
        };
        let next = raw.clamp(bounds.min, bounds.max);

        quote.record(next, now_ms, self.config.history_cap);
        trace!(
            resource = %resource_id,
            location = %location,
            buy_pressure,
            sell_pressure,
            price = next,
            "quote recomputed"
        );
        next
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All open orders matching the filter, sorted by id (submission
    /// order).
    ///
    /// Expired orders are pruned from the book as a side effect of the
    /// read; an order is absent from the results from the instant its
    /// expiry passes.
    pub fn open_orders(&mut self, filter: &OrderFilter, now_ms: u64) -> Vec<Order> {
        let pruned = self.book.prune_expired(now_ms);
        if !pruned.is_empty() {
            trace!(count = pruned.len(), "pruned expired orders");
        }
        self.book.snapshot(filter, now_ms)
    }

    /// The quote for a (resource, location) pair.
    ///
    /// Fails with [`MarketError::ResourceNotFound`] when the pair has
    /// never been referenced by an accepted order and has not been seeded.
    pub fn quote(&self, resource_id: &str, location: &str) -> Result<&Quote, MarketError> {
        self.quotes
            .get(resource_id)
            .and_then(|locations| locations.get(location))
            .ok_or_else(|| MarketError::ResourceNotFound {
                resource_id: resource_id.to_string(),
                location: location.to_string(),
            })
    }

    /// Seed a quote at the resource's catalog base value without placing
    /// an order.
    ///
    /// Lets a host list a resource before any trading happens. Seeding
    /// records no history point, and a pair that already has a quote is
    /// left untouched. Returns the pair's current price.
    pub fn seed_quote(&mut self, resource_id: &str, location: &str) -> Result<u64, MarketError> {
        let base_value = match self.catalog.get(resource_id) {
            Some(resource) => resource.base_value,
            None => return Err(MarketError::UnknownResource(resource_id.to_string())),
        };

        let quote = self
            .quotes
            .entry(resource_id.to_string())
            .or_default()
            .entry(location.to_string())
            .or_insert_with(|| {
                Quote::seeded(resource_id, location, credits::from_whole(base_value))
            });

        Ok(quote.current_price)
    }

    /// Cancel an open order by id.
    ///
    /// Returns the removed order, or `None` if the id is unknown.
    /// Cancellation does not recompute the quote: prices move only on
    /// accepted submissions, and the next submission's pressure sums
    /// already reflect the removal.
    pub fn cancel(&mut self, order_id: u64) -> Option<Order> {
        let order = self.book.cancel(order_id)?;
        debug!(order_id, resource = %order.resource_id, "order cancelled");
        Some(order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    const HOUR_MS: u64 = 3_600_000;

    fn engine() -> MarketEngine {
        MarketEngine::new(ResourceCatalog::time_nexus())
    }

    fn crystal_order(quantity: i64, side: Side) -> OrderRequest {
        OrderRequest::new(
            "temporal-crystal",
            quantity,
            Decimal::from(9_000),
            side,
            "nexus",
            HOUR_MS,
            "traveler-1",
        )
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    #[test]
    fn test_rejects_non_positive_quantity() {
        let mut engine = engine();

        for quantity in [0, -5] {
            let err = engine.submit(crystal_order(quantity, Side::Buy), 0).unwrap_err();
            assert_eq!(err, MarketError::InvalidQuantity);
        }
        assert_eq!(engine.open_order_count(), 0);
    }

    #[test]
    fn test_rejects_negative_price() {
        let mut engine = engine();

        let mut request = crystal_order(10, Side::Buy);
        request.limit_price = Decimal::from(-1);

        let err = engine.submit(request, 0).unwrap_err();
        assert_eq!(err, MarketError::InvalidPrice);
        assert_eq!(engine.open_order_count(), 0);
    }

    #[test]
    fn test_rejects_unknown_resource() {
        let mut engine = engine();

        let request = OrderRequest::new(
            "does-not-exist",
            10,
            Decimal::from(100),
            Side::Buy,
            "nexus",
            HOUR_MS,
            "traveler-1",
        );
        let err = engine.submit(request, 0).unwrap_err();

        assert_eq!(err, MarketError::UnknownResource("does-not-exist".into()));
        assert_eq!(engine.open_order_count(), 0);
        // No quote was created for the unknown id
        assert!(engine.quote("does-not-exist", "nexus").is_err());
    }

    #[test]
    fn test_rejects_expiry_not_in_future() {
        let mut engine = engine();

        // One second in the past, and exactly now: both rejected
        for expiry_ms in [9_000, 10_000] {
            let mut request = crystal_order(10, Side::Buy);
            request.expiry_ms = expiry_ms;
            let err = engine.submit(request, 10_000).unwrap_err();
            assert_eq!(err, MarketError::ExpiredOrder);
        }
        assert_eq!(engine.open_order_count(), 0);
    }

    #[test]
    fn test_rejection_leaves_existing_quote_untouched() {
        let mut engine = engine();

        engine.submit(crystal_order(50, Side::Buy), 0).unwrap();
        let before = engine.quote("temporal-crystal", "nexus").unwrap().clone();

        let err = engine.submit(crystal_order(-5, Side::Buy), 1).unwrap_err();
        assert_eq!(err, MarketError::InvalidQuantity);

        let after = engine.quote("temporal-crystal", "nexus").unwrap();
        assert_eq!(*after, before);
    }

    // ------------------------------------------------------------------
    // Price formation
    // ------------------------------------------------------------------

    #[test]
    fn test_buy_pressure_moves_price_up() {
        let mut engine = engine();

        // 50 units of net buy pressure on a 10000-credit seed: +5%
        let receipt = engine.submit(crystal_order(50, Side::Buy), 0).unwrap();

        assert_eq!(receipt.quote_price, credits::from_whole(10_500));
        let quote = engine.quote("temporal-crystal", "nexus").unwrap();
        assert_eq!(quote.current_price, credits::from_whole(10_500));
        assert_eq!(quote.history_len(), 1);
    }

    #[test]
    fn test_sell_pressure_compounds_on_current_price() {
        let mut engine = engine();

        engine.submit(crystal_order(50, Side::Buy), 0).unwrap();
        // Pressure is now buy=50, sell=200: -15% on 10500
        let receipt = engine.submit(crystal_order(200, Side::Sell), 1).unwrap();

        assert_eq!(receipt.quote_price, credits::from_whole(8_925));
    }

    #[test]
    fn test_repricing_is_scoped_to_the_submitted_pair() {
        let mut engine = engine();

        engine.submit(crystal_order(50, Side::Buy), 0).unwrap();
        let crystal_before = engine.quote("temporal-crystal", "nexus").unwrap().clone();

        // A limestone order must not move the crystal quote
        let request = OrderRequest::new(
            "egypt-limestone",
            10,
            Decimal::from(90),
            Side::Buy,
            "egypt",
            HOUR_MS,
            "traveler-2",
        );
        engine.submit(request, 1).unwrap();

        assert_eq!(
            *engine.quote("temporal-crystal", "nexus").unwrap(),
            crystal_before
        );

        // Same resource at another location is a separate quote too
        let mut elsewhere = crystal_order(10, Side::Buy);
        elsewhere.location = "egypt".into();
        engine.submit(elsewhere, 2).unwrap();

        assert_eq!(
            *engine.quote("temporal-crystal", "nexus").unwrap(),
            crystal_before
        );
        let egypt_quote = engine.quote("temporal-crystal", "egypt").unwrap();
        // Fresh seed at 10000 moved by +1%
        assert_eq!(egypt_quote.current_price, credits::from_whole(10_100));
    }

    #[test]
    fn test_price_clamps_at_floor() {
        let mut engine = engine();

        // 1500 units of net sell pressure: multiplier 1 - 1.5 = -0.5
        engine.submit(crystal_order(1_500, Side::Sell), 0).unwrap();

        let quote = engine.quote("temporal-crystal", "nexus").unwrap();
        // Floor is 1% of the 10000-credit base
        assert_eq!(quote.current_price, credits::from_whole(100));
    }

    #[test]
    fn test_price_clamps_at_ceiling() {
        let mut engine = engine();

        // Repeated one-sided buying compounds toward the 100x ceiling
        for step in 0..20u64 {
            let mut request = crystal_order(900, Side::Buy);
            // Short expiry keeps the book small; pressure stays one-sided
            request.expiry_ms = step + 2;
            engine.submit(request, step).unwrap();
        }

        let quote = engine.quote("temporal-crystal", "nexus").unwrap();
        assert_eq!(quote.current_price, credits::from_whole(1_000_000));
    }

    #[test]
    fn test_tier_sensitivity_override() {
        let mut config = MarketConfig::default();
        config
            .tier_sensitivity
            .insert(ResourceTier::Legendary, Decimal::new(1, 4)); // 0.0001
        let mut engine = MarketEngine::with_config(ResourceCatalog::time_nexus(), config);

        // 50 units at 0.01% per unit: +0.5% instead of +5%
        let receipt = engine.submit(crystal_order(50, Side::Buy), 0).unwrap();
        assert_eq!(receipt.quote_price, credits::from_whole(10_050));
    }

    #[test]
    fn test_history_grows_one_point_per_accepted_order() {
        let mut engine = engine();

        for i in 0..5 {
            let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
            engine.submit(crystal_order(10, side), i as u64).unwrap();
        }
        // A rejection adds nothing
        let _ = engine.submit(crystal_order(-1, Side::Buy), 6);

        let quote = engine.quote("temporal-crystal", "nexus").unwrap();
        assert_eq!(quote.history_len(), 5);
    }

    #[test]
    fn test_history_cap_is_enforced() {
        let config = MarketConfig {
            history_cap: 3,
            ..MarketConfig::default()
        };
        let mut engine = MarketEngine::with_config(ResourceCatalog::time_nexus(), config);
        assert_eq!(engine.config().history_cap, 3);

        for i in 0..10u64 {
            engine.submit(crystal_order(1, Side::Buy), i).unwrap();
        }

        let quote = engine.quote("temporal-crystal", "nexus").unwrap();
        assert_eq!(quote.history_len(), 3);
        assert_eq!(quote.latest().unwrap().timestamp_ms, 9);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[test]
    fn test_open_orders_prunes_expired_on_read() {
        let mut engine = engine();

        let mut short_lived = crystal_order(10, Side::Buy);
        short_lived.expiry_ms = 100;
        engine.submit(short_lived, 0).unwrap();
        engine.submit(crystal_order(20, Side::Sell), 0).unwrap();

        assert_eq!(engine.open_orders(&OrderFilter::any(), 0).len(), 2);

        // At the expiry instant the order is gone, and the read pruned it
        let open = engine.open_orders(&OrderFilter::any(), 100);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].quantity, 20);
        assert_eq!(engine.open_order_count(), 1);
    }

    #[test]
    fn test_quote_not_found() {
        let engine = engine();

        let err = engine.quote("temporal-crystal", "nexus").unwrap_err();
        assert_eq!(
            err,
            MarketError::ResourceNotFound {
                resource_id: "temporal-crystal".into(),
                location: "nexus".into(),
            }
        );
    }

    #[test]
    fn test_seed_quote() {
        let mut engine = engine();

        let price = engine.seed_quote("temporal-crystal", "nexus").unwrap();
        assert_eq!(price, credits::from_whole(10_000));

        let quote = engine.quote("temporal-crystal", "nexus").unwrap();
        assert_eq!(quote.current_price, credits::from_whole(10_000));
        assert_eq!(quote.history_len(), 0);

        // Unknown resources cannot be seeded
        assert_eq!(
            engine.seed_quote("does-not-exist", "nexus").unwrap_err(),
            MarketError::UnknownResource("does-not-exist".into())
        );
    }

    #[test]
    fn test_seed_quote_is_idempotent() {
        let mut engine = engine();

        engine.submit(crystal_order(50, Side::Buy), 0).unwrap();

        // Re-seeding an active pair reports the live price, not the base
        let price = engine.seed_quote("temporal-crystal", "nexus").unwrap();
        assert_eq!(price, credits::from_whole(10_500));
    }

    #[test]
    fn test_cancel_removes_order_without_touching_quote() {
        let mut engine = engine();

        let receipt = engine.submit(crystal_order(50, Side::Buy), 0).unwrap();
        let before = engine.quote("temporal-crystal", "nexus").unwrap().clone();

        let cancelled = engine.cancel(receipt.order_id).unwrap();
        assert_eq!(cancelled.id, receipt.order_id);
        assert_eq!(engine.open_order_count(), 0);
        assert_eq!(*engine.quote("temporal-crystal", "nexus").unwrap(), before);

        // The next submission sees the reduced pressure: fresh 10 units of
        // buy pressure on 10500 is +1%
        let receipt = engine.submit(crystal_order(10, Side::Buy), 1).unwrap();
        assert_eq!(receipt.quote_price, credits::from_whole(10_605));
    }

    #[test]
    fn test_cancel_unknown_order() {
        let mut engine = engine();
        assert!(engine.cancel(999).is_none());
    }
}

//! Order types for the temporal resource market.
//!
//! Two shapes exist on purpose:
//!
//! - [`OrderRequest`] is what a caller populates. Quantity and limit price
//!   are signed so that invalid input (a negative quantity typed into a
//!   trade form) is representable and can be rejected with a specific
//!   reason instead of failing to construct.
//! - [`Order`] is the accepted, engine-owned record: id assigned by the
//!   book, quantity known positive, price in fixed-point credits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order - wants to acquire the resource
    Buy,
    /// Sell order - wants to offload the resource
    Sell,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderRequest
// ============================================================================

/// A caller-populated order submission.
///
/// All fields come straight from the caller (trade UI or scripted agent)
/// and are validated by the engine before anything is mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Catalog id of the resource being traded
    pub resource_id: String,

    /// Units requested; must be a positive integer to be accepted
    pub quantity: i64,

    /// Limit price per unit in whole credits; must be non-negative
    pub limit_price: Decimal,

    /// Buy or Sell
    pub side: Side,

    /// Era the order is placed in, e.g. `nexus`
    pub location: String,

    /// Absolute expiry in epoch milliseconds; must be strictly in the
    /// future at submission time
    pub expiry_ms: u64,

    /// Identifier of the submitting player
    pub player_id: String,
}

impl OrderRequest {
    /// Create a request with every field populated.
    pub fn new(
        resource_id: impl Into<String>,
        quantity: i64,
        limit_price: Decimal,
        side: Side,
        location: impl Into<String>,
        expiry_ms: u64,
        player_id: impl Into<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            quantity,
            limit_price,
            side,
            location: location.into(),
            expiry_ms,
            player_id: player_id.into(),
        }
    }
}

// ============================================================================
// Order
// ============================================================================

/// An open order in the book.
///
/// Created by the engine on acceptance and owned exclusively by the order
/// book; removed when it expires or is cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier (assigned by the book)
    pub id: u64,

    /// Catalog id of the resource
    pub resource_id: String,

    /// Units requested (positive)
    pub quantity: u64,

    /// Limit price per unit in fixed-point credits
    pub limit_price: u64,

    /// Buy or Sell
    pub side: Side,

    /// Era the order is placed in
    pub location: String,

    /// Absolute expiry in epoch milliseconds
    pub expiry_ms: u64,

    /// Identifier of the submitting player
    pub player_id: String,

    /// Submission timestamp in epoch milliseconds
    pub submitted_ms: u64,
}

impl Order {
    /// Whether this order has expired as of `now_ms`.
    ///
    /// An order expires the instant the clock reaches its expiry; an order
    /// accepted at `t` with expiry `t + 1` is open at `t` and expired at
    /// `t + 1`.
    #[inline]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expiry_ms
    }

    /// Total fixed-point credit value at the limit price.
    ///
    /// What a settlement layer reserves for a buy or expects for a sell.
    #[inline]
    pub fn notional(&self) -> u64 {
        self.limit_price.saturating_mul(self.quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

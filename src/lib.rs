//! # Temporal Market
//!
//! Price-formation engine for the Time Nexus temporal resource market.
//!
//! ## Architecture
//!
//! - **Types**: catalog resources, orders, quotes, player wallets
//! - **Book**: slab-backed open-order storage with lazy expiry
//! - **Engine**: order intake, imbalance-driven pricing, quote history
//!
//! ## Design Principles
//!
//! 1. **Validate first, mutate after**: rejections never leave partial state
//! 2. **No floating point**: prices are fixed-point credits; the
//!    recomputation uses exact decimal arithmetic
//! 3. **Scoped side effects**: an accepted order updates only its own
//!    (resource, location) quote
//! 4. **Explicit lifecycle**: one engine instance per process or test; no
//!    globals, no singletons
//! 5. **Caller-supplied time**: operations take `now_ms`, so behavior is
//!    deterministic and clock-free
//!
//! ## What this is not
//!
//! There is no matching here: orders never cross, and settlement belongs
//! to the caller (see [`PlayerWallet`]). The engine turns standing buy and
//! sell interest into a price signal and keeps its history.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: resources, orders, quotes, wallets
pub mod types;

/// Order book: slab-backed open-order storage
pub mod book;

/// Market engine: order intake and price formation
pub mod engine;

/// Engine tunables
pub mod config;

/// Error taxonomy
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use book::{OrderBook, OrderFilter};
pub use config::{MarketConfig, PriceBounds};
pub use engine::{MarketEngine, OrderReceipt};
pub use error::MarketError;
pub use types::{
    Order, OrderRequest, PlayerWallet, PricePoint, Quote, Resource, ResourceCatalog,
    ResourceCategory, ResourceTier, Side,
};

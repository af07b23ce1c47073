//! Market engine for the temporal resource market.
//!
//! ## Design Principles
//!
//! 1. **Validate first, mutate after**: a rejected submission leaves the
//!    book and every quote untouched
//! 2. **Fixed-point math**: price recomputation uses exact decimal
//!    arithmetic, never floating point
//! 3. **Scoped repricing**: an accepted order updates only its own
//!    (resource, location) quote
//! 4. **Caller-supplied time**: every time-dependent operation takes
//!    `now_ms`, so the engine never reads a clock
//!
//! ## Concurrency
//!
//! Mutations take `&mut self`, so each submission is atomic from the
//! outside: a reader can never observe an appended order without its quote
//! update. There are no suspension points and no interior mutability. A
//! host that needs cross-thread sharing wraps the engine (or one engine
//! per resource shard) in a lock.
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use temporal_market::{MarketEngine, OrderRequest, ResourceCatalog, Side};
//!
//! let mut engine = MarketEngine::new(ResourceCatalog::time_nexus());
//!
//! let request = OrderRequest::new(
//!     "temporal-crystal",
//!     50,
//!     Decimal::from(9_000),
//!     Side::Buy,
//!     "nexus",
//!     3_600_000,
//!     "traveler-1",
//! );
//! let receipt = engine.submit(request, 0).unwrap();
//!
//! // 50 units of buy pressure move the 10000-credit seed price up 5%
//! assert_eq!(receipt.quote_price, 105_000_000); // 10500 credits
//! ```

pub mod market;

pub use market::{MarketEngine, OrderReceipt};

//! Core data types for the temporal resource market.
//!
//! All public types carry serde derives so a host can expose the engine's
//! operations as structured request/response records. Prices are stored as
//! fixed-point `u64` credits scaled by 10^4 (see [`credits`]).
//!
//! ## Types
//!
//! - [`Resource`] / [`ResourceCatalog`]: static catalog reference data
//! - [`OrderRequest`]: a caller-populated submission
//! - [`Order`]: an accepted order, owned by the book
//! - [`Quote`] / [`PricePoint`]: per-(resource, location) price state
//! - [`PlayerWallet`]: the settlement collaborator's entity

mod order;
mod quote;
mod resource;
mod wallet;
pub mod credits;

// Re-export all types at module level
pub use order::{Order, OrderRequest, Side};
pub use quote::{PricePoint, Quote};
pub use resource::{Resource, ResourceCatalog, ResourceCategory, ResourceTier};
pub use wallet::{PlayerWallet, TransactionKind, WalletError, WalletTransaction};

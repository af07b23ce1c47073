//! Error taxonomy for the market engine.
//!
//! Every failure the engine can report is a [`MarketError`] variant with a
//! user-presentable `Display` message, so a presentation layer can show a
//! specific reason ("quantity must be a positive integer") instead of a
//! generic failure. All variants are recoverable by the caller: fix the
//! input and resubmit. The engine has no fatal error path.

use thiserror::Error;

/// Rejection and query errors reported by [`MarketEngine`](crate::MarketEngine).
///
/// Submission rejections (`InvalidQuantity`, `InvalidPrice`,
/// `UnknownResource`, `ExpiredOrder`) are returned synchronously and leave
/// the order book and every quote untouched. `ResourceNotFound` is
/// query-only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// Order quantity was zero or negative.
    #[error("order quantity must be a positive integer")]
    InvalidQuantity,

    /// Limit price was negative or not representable in fixed-point credits.
    #[error("order limit price must be a non-negative amount of credits")]
    InvalidPrice,

    /// Resource identifier is not present in the catalog.
    #[error("unknown resource `{0}`")]
    UnknownResource(String),

    /// Supplied expiry was not strictly in the future at submission time.
    #[error("order expiry must be strictly in the future")]
    ExpiredOrder,

    /// No quote exists for the requested (resource, location) pair.
    ///
    /// Returned by quote lookups when the pair has never been referenced
    /// by an accepted order and has not been seeded.
    #[error("no quote for resource `{resource_id}` at `{location}`")]
    ResourceNotFound {
        resource_id: String,
        location: String,
    },
}

// ============================================================================
// Unit Tests
// ============================================================================

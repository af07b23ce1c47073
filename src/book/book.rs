//! Slab-backed open-order storage with lazy expiry.

use std::collections::{HashMap, HashSet};

use slab::Slab;

use crate::types::{Order, Side};

// ============================================================================
// OrderFilter
// ============================================================================

/// Optional filters for order-book snapshots.
///
/// `None` fields match everything; the default filter matches every open
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Restrict to one resource id
    pub resource_id: Option<String>,

    /// Restrict to one location (era)
    pub location: Option<String>,
}

impl OrderFilter {
    /// Match every open order.
    pub fn any() -> Self {
        Self::default()
    }

    /// Match open orders for one resource, at any location.
    pub fn resource(id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(id.into()),
            location: None,
        }
    }

    /// Match open orders for one resource at one location.
    pub fn resource_at(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            resource_id: Some(id.into()),
            location: Some(location.into()),
        }
    }

    fn matches(&self, order: &Order) -> bool {
        if let Some(resource_id) = &self.resource_id {
            if order.resource_id != *resource_id {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if order.location != *location {
                return false;
            }
        }
        true
    }
}

// ============================================================================
// OrderBook
// ============================================================================

/// The set of currently open orders across all resources.
#[derive(Debug)]
pub struct OrderBook {
    /// Pre-allocated order storage
    orders: Slab<Order>,

    /// Order id to slab key mapping (for O(1) cancel)
    order_index: HashMap<u64, usize>,

    /// Slab keys per resource id
    by_resource: HashMap<String, HashSet<usize>>,

    /// Next order id to assign
    next_order_id: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book.
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            order_index: HashMap::new(),
            by_resource: HashMap::new(),
            next_order_id: 1,
        }
    }

    /// Create a book with pre-allocated capacity.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            order_index: HashMap::with_capacity(order_capacity),
            by_resource: HashMap::new(),
            next_order_id: 1,
        }
    }

    // ========================================================================
    // Size and lookup
    // ========================================================================

    /// Number of orders currently stored (including any not yet pruned).
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the book stores no orders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Whether an order id is present.
    #[inline]
    pub fn contains(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// Look up an order by id.
    pub fn get(&self, order_id: u64) -> Option<&Order> {
        let key = *self.order_index.get(&order_id)?;
        self.orders.get(key)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add an already-validated order, assigning its id.
    ///
    /// Returns the assigned id. Ids increase monotonically from 1; an
    /// order arriving with a non-zero id keeps it (used when replaying a
    /// recorded book).
    pub fn insert(&mut self, mut order: Order) -> u64 {
        if order.id == 0 {
            order.id = self.next_order_id;
            self.next_order_id += 1;
        } else {
            self.next_order_id = self.next_order_id.max(order.id + 1);
        }

        let order_id = order.id;
        let resource_id = order.resource_id.clone();

        let key = self.orders.insert(order);
        self.order_index.insert(order_id, key);
        self.by_resource.entry(resource_id).or_default().insert(key);

        order_id
    }

    /// Remove an open order by id.
    ///
    /// Returns the removed order, or `None` if the id is unknown (already
    /// expired, cancelled, or never accepted).
    pub fn cancel(&mut self, order_id: u64) -> Option<Order> {
        let key = self.order_index.remove(&order_id)?;
        Some(self.remove_key(key))
    }

    /// Physically remove every expired order.
    ///
    /// Returns the pruned orders, oldest id first.
    pub fn prune_expired(&mut self, now_ms: u64) -> Vec<Order> {
        let keys: Vec<usize> = self
            .orders
            .iter()
            .filter(|(_, order)| order.is_expired(now_ms))
            .map(|(key, _)| key)
            .collect();

        self.remove_keys(keys)
    }

    /// Physically remove expired orders for one resource only.
    pub fn prune_expired_for(&mut self, resource_id: &str, now_ms: u64) -> Vec<Order> {
        let keys: Vec<usize> = match self.by_resource.get(resource_id) {
            Some(keys) => keys
                .iter()
                .copied()
                .filter(|&key| self.orders[key].is_expired(now_ms))
                .collect(),
            None => return Vec::new(),
        };

        self.remove_keys(keys)
    }

    fn remove_keys(&mut self, keys: Vec<usize>) -> Vec<Order> {
        let mut removed: Vec<Order> = keys
            .into_iter()
            .map(|key| {
                let order = self.remove_key(key);
                self.order_index.remove(&order.id);
                order
            })
            .collect();
        removed.sort_by_key(|order| order.id);
        removed
    }

    /// Unlink a slab key from the resource index and take the order out of
    /// the slab. The id index is the caller's responsibility.
    fn remove_key(&mut self, key: usize) -> Order {
        let order = self.orders.remove(key);
        if let Some(keys) = self.by_resource.get_mut(&order.resource_id) {
            keys.remove(&key);
            if keys.is_empty() {
                self.by_resource.remove(&order.resource_id);
            }
        }
        order
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Sum open, non-expired quantities per side for one
    /// (resource, location) pair.
    ///
    /// Returns `(buy_pressure, sell_pressure)`.
    pub fn pressure(&self, resource_id: &str, location: &str, now_ms: u64) -> (u64, u64) {
        let Some(keys) = self.by_resource.get(resource_id) else {
            return (0, 0);
        };

        let mut buy: u64 = 0;
        let mut sell: u64 = 0;
        for &key in keys {
            let order = &self.orders[key];
            if order.location != location || order.is_expired(now_ms) {
                continue;
            }
            match order.side {
                Side::Buy => buy = buy.saturating_add(order.quantity),
                Side::Sell => sell = sell.saturating_add(order.quantity),
            }
        }
        (buy, sell)
    }

    /// Snapshot the open, non-expired orders matching `filter`, sorted by
    /// id (submission order).
    ///
    /// The snapshot is a clone: callers hold no borrow into the book.
    pub fn snapshot(&self, filter: &OrderFilter, now_ms: u64) -> Vec<Order> {
        let mut found: Vec<Order> = self
            .orders
            .iter()
            .map(|(_, order)| order)
            .filter(|order| !order.is_expired(now_ms) && filter.matches(order))
            .cloned()
            .collect();
        found.sort_by_key(|order| order.id);
        found
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

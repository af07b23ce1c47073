//! Resource catalog types.
//!
//! Resources are static reference data: created at catalog load, never
//! mutated. The engine consults the catalog to validate submitted orders
//! and to seed a quote's initial price from the resource's base value.
//!
//! Tier defaults (base value, unit weight, stack size) follow the game's
//! rarity tables, so most catalog entries only need an id, a name, and a
//! tier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Tier and category
// ============================================================================

/// Coarse rarity/value classification of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceTier {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl ResourceTier {
    /// Default base value in whole credits for this tier.
    pub fn base_value(self) -> u64 {
        match self {
            ResourceTier::Common => 100,
            ResourceTier::Uncommon => 500,
            ResourceTier::Rare => 2_500,
            ResourceTier::Legendary => 10_000,
        }
    }

    /// Default unit weight for this tier.
    pub fn unit_weight(self) -> u32 {
        match self {
            ResourceTier::Common => 1,
            ResourceTier::Uncommon => 2,
            ResourceTier::Rare => 5,
            ResourceTier::Legendary => 10,
        }
    }

    /// Default maximum stack size for this tier.
    pub fn default_max_stack(self) -> u32 {
        match self {
            ResourceTier::Common => 100,
            ResourceTier::Uncommon => 50,
            ResourceTier::Rare => 20,
            ResourceTier::Legendary => 10,
        }
    }
}

/// Broad grouping of what a resource is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Raw,
    Refined,
    Artifact,
    Temporal,
}

// ============================================================================
// Resource
// ============================================================================

/// A tradeable resource: static catalog entry keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Catalog identifier, e.g. `temporal-crystal`
    pub id: String,

    /// Display name
    pub name: String,

    /// Flavor description shown in trade screens
    pub description: String,

    /// Rarity tier
    pub tier: ResourceTier,

    /// Category
    pub category: ResourceCategory,

    /// Reference price in whole credits; seeds new quotes
    pub base_value: u64,

    /// Era the resource originates from, e.g. `egypt`, `nexus`
    pub era_origin: String,

    /// Weight per unit
    pub weight: u32,

    /// Whether units stack in an inventory slot
    pub stackable: bool,

    /// Maximum units per stack
    pub max_stack: u32,
}

impl Resource {
    /// Create a resource with tier-derived base value, weight and stack size.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        tier: ResourceTier,
        category: ResourceCategory,
        era_origin: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tier,
            category,
            base_value: tier.base_value(),
            era_origin: era_origin.into(),
            weight: tier.unit_weight(),
            stackable: true,
            max_stack: tier.default_max_stack(),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Read-only lookup table of known resources, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceCatalog {
    resources: HashMap<String, Resource>,
}

impl ResourceCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of resources.
    ///
    /// Later duplicates of an id replace earlier ones.
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut catalog = Self::new();
        for resource in resources {
            catalog.insert(resource);
        }
        catalog
    }

    /// The built-in Time Nexus catalog used by the demo binary and tests.
    pub fn time_nexus() -> Self {
        Self::from_resources([
            Resource::new(
                "egypt-limestone",
                "Ancient Limestone",
                "High-quality building stone from Egyptian quarries",
                ResourceTier::Common,
                ResourceCategory::Raw,
                "egypt",
            ),
            Resource::new(
                "egypt-papyrus",
                "Refined Papyrus",
                "Processed papyrus ready for scribing",
                ResourceTier::Uncommon,
                ResourceCategory::Refined,
                "egypt",
            ),
            Resource::new(
                "temporal-crystal",
                "Temporal Crystal",
                "Pure crystallized time energy",
                ResourceTier::Legendary,
                ResourceCategory::Temporal,
                "nexus",
            ),
        ])
    }

    /// Add or replace a resource, returning the previous entry if any.
    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        self.resources.insert(resource.id.clone(), resource)
    }

    /// Look up a resource by id.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Check whether an id is in the catalog.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    /// Number of catalog entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the catalog is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate over all resources, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// All resources originating from the given era.
    pub fn era_resources(&self, era: &str) -> Vec<&Resource> {
        let mut found: Vec<&Resource> = self
            .resources
            .values()
            .filter(|r| r.era_origin == era)
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_defaults() {
        assert_eq!(ResourceTier::Common.base_value(), 100);
        assert_eq!(ResourceTier::Uncommon.base_value(), 500);
        assert_eq!(ResourceTier::Rare.base_value(), 2_500);
        assert_eq!(ResourceTier::Legendary.base_value(), 10_000);

        assert_eq!(ResourceTier::Common.unit_weight(), 1);
        assert_eq!(ResourceTier::Legendary.unit_weight(), 10);

        assert_eq!(ResourceTier::Common.default_max_stack(), 100);
        assert_eq!(ResourceTier::Legendary.default_max_stack(), 10);
    }

    #[test]
    fn test_resource_new_derives_from_tier() {
        let resource = Resource::new(
            "egypt-limestone",
            "Ancient Limestone",
            "High-quality building stone from Egyptian quarries",
            ResourceTier::Common,
            ResourceCategory::Raw,
            "egypt",
        );

        assert_eq!(resource.base_value, 100);
        assert_eq!(resource.weight, 1);
        assert!(resource.stackable);
        assert_eq!(resource.max_stack, 100);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = ResourceCatalog::time_nexus();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("temporal-crystal"));
        assert!(!catalog.contains("does-not-exist"));

        let crystal = catalog.get("temporal-crystal").unwrap();
        assert_eq!(crystal.tier, ResourceTier::Legendary);
        assert_eq!(crystal.base_value, 10_000);
        assert_eq!(crystal.era_origin, "nexus");
    }

    #[test]
    fn test_catalog_insert_replaces() {
        let mut catalog = ResourceCatalog::time_nexus();
        let mut crystal = catalog.get("temporal-crystal").unwrap().clone();
        crystal.name = "Flawless Temporal Crystal".into();

        let previous = catalog.insert(crystal);
        assert!(previous.is_some());
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.get("temporal-crystal").unwrap().name,
            "Flawless Temporal Crystal"
        );
    }

    #[test]
    fn test_era_resources() {
        let catalog = ResourceCatalog::time_nexus();

        let egypt = catalog.era_resources("egypt");
        assert_eq!(egypt.len(), 2);
        assert_eq!(egypt[0].id, "egypt-limestone");
        assert_eq!(egypt[1].id, "egypt-papyrus");

        assert!(catalog.era_resources("atlantis").is_empty());
    }

    #[test]
    fn test_tier_serializes_as_lowercase() {
        let json = serde_json::to_string(&ResourceTier::Legendary).unwrap();
        assert_eq!(json, "\"legendary\"");

        let back: ResourceTier = serde_json::from_str("\"rare\"").unwrap();
        assert_eq!(back, ResourceTier::Rare);

        let category = serde_json::to_string(&ResourceCategory::Temporal).unwrap();
        assert_eq!(category, "\"temporal\"");
    }
}

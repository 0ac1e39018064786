//! Availability cache
//!
//! Holds the two derived lookups the UI reads on every list render: a
//! per-cocktail availability verdict and, per ingredient, how many of the
//! cocktails in its usage set are currently makeable. Built once from a full
//! snapshot, then patched along the usage index instead of re-scanning the
//! whole catalog per inventory toggle.

use crate::availability::is_available;
use crate::catalog::Catalog;
use crate::usage::UsageIndex;
use barkeep_types::{CocktailId, IngredientId, Settings};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Per-ingredient rollup shown on ingredient lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientUsage {
    /// Cocktails in this ingredient's usage set that are currently
    /// available.
    pub count: usize,

    /// Populated only when `count == 1`: the name of that one cocktail.
    pub single_cocktail_name: Option<String>,
}

/// Derived availability state for one catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityCache {
    availability: HashMap<CocktailId, bool>,
    per_ingredient: HashMap<IngredientId, IngredientUsage>,
}

impl AvailabilityCache {
    /// Evaluate the whole catalog once. Each cocktail is evaluated exactly
    /// once; the per-ingredient rollups then read the memoized verdicts.
    pub fn init_full(catalog: &Catalog, usage: &UsageIndex, settings: Settings) -> Self {
        let availability: HashMap<CocktailId, bool> = catalog
            .cocktails()
            .iter()
            .map(|c| (c.id, is_available(c, catalog, settings)))
            .collect();

        let mut cache = AvailabilityCache {
            availability,
            per_ingredient: HashMap::with_capacity(catalog.ingredients().len()),
        };
        for ing in catalog.ingredients() {
            let rollup = cache.rollup_for(ing.id, catalog, usage);
            cache.per_ingredient.insert(ing.id, rollup);
        }

        tracing::debug!(
            cocktails = cache.availability.len(),
            ingredients = cache.per_ingredient.len(),
            "availability cache initialized"
        );

        cache
    }

    /// Current verdict for a cocktail; unknown ids read as unavailable.
    pub fn is_available(&self, id: CocktailId) -> bool {
        self.availability.get(&id).copied().unwrap_or(false)
    }

    pub fn ingredient_usage(&self, id: IngredientId) -> Option<&IngredientUsage> {
        self.per_ingredient.get(&id)
    }

    /// Patch the cache after inventory changes on the given ingredient ids.
    ///
    /// Only cocktails reachable through the usage index from a changed id
    /// are re-evaluated, and only rollups touching those cocktails (plus the
    /// changed ids themselves) are recomputed. Entries for ingredients no
    /// longer in the catalog are dropped.
    pub fn apply_incremental(
        &mut self,
        changed_ingredient_ids: &[IngredientId],
        catalog: &Catalog,
        usage: &UsageIndex,
        settings: Settings,
    ) {
        let mut affected = HashSet::new();
        for &id in changed_ingredient_ids {
            if let Some(set) = usage.cocktails_using(id) {
                affected.extend(set.iter().copied());
            }
        }

        self.refresh(&affected, changed_ingredient_ids, catalog, usage, settings);
    }

    /// Patch the cache after recipe edits: the given cocktails are
    /// re-evaluated (or dropped when deleted), then every rollup is
    /// recomputed. A deleted cocktail vanishes from the patched usage sets,
    /// so intersection tests cannot find the rollups that counted it; recipe
    /// edits are rare enough that the full rollup pass is the simpler
    /// correct answer.
    pub fn refresh_cocktails(
        &mut self,
        changed_cocktail_ids: &[CocktailId],
        catalog: &Catalog,
        usage: &UsageIndex,
        settings: Settings,
    ) {
        for &cocktail_id in changed_cocktail_ids {
            match catalog.cocktail(cocktail_id) {
                Some(c) => {
                    self.availability
                        .insert(cocktail_id, is_available(c, catalog, settings));
                }
                None => {
                    self.availability.remove(&cocktail_id);
                }
            }
        }

        self.per_ingredient.clear();
        for ing in catalog.ingredients() {
            let rollup = self.rollup_for(ing.id, catalog, usage);
            self.per_ingredient.insert(ing.id, rollup);
        }

        tracing::trace!(
            changed_cocktails = changed_cocktail_ids.len(),
            "availability cache refreshed after recipe edit"
        );
    }

    fn refresh(
        &mut self,
        affected: &HashSet<CocktailId>,
        changed_ingredient_ids: &[IngredientId],
        catalog: &Catalog,
        usage: &UsageIndex,
        settings: Settings,
    ) {
        for &cocktail_id in affected {
            match catalog.cocktail(cocktail_id) {
                Some(c) => {
                    self.availability
                        .insert(cocktail_id, is_available(c, catalog, settings));
                }
                None => {
                    self.availability.remove(&cocktail_id);
                }
            }
        }

        self.per_ingredient
            .retain(|&id, _| catalog.ingredient(id).is_some());

        let changed: HashSet<IngredientId> = changed_ingredient_ids.iter().copied().collect();
        let mut recomputed = 0usize;
        for ing in catalog.ingredients() {
            let touched = changed.contains(&ing.id)
                || !self.per_ingredient.contains_key(&ing.id)
                || usage
                    .cocktails_using(ing.id)
                    .is_some_and(|set| !set.is_disjoint(affected));
            if touched {
                let rollup = self.rollup_for(ing.id, catalog, usage);
                self.per_ingredient.insert(ing.id, rollup);
                recomputed += 1;
            }
        }

        tracing::trace!(
            affected_cocktails = affected.len(),
            recomputed_rollups = recomputed,
            "availability cache patched"
        );
    }

    fn rollup_for(
        &self,
        id: IngredientId,
        catalog: &Catalog,
        usage: &UsageIndex,
    ) -> IngredientUsage {
        let Some(set) = usage.cocktails_using(id) else {
            return IngredientUsage::default();
        };

        let mut count = 0usize;
        let mut single = None;
        for &cocktail_id in set {
            if self.is_available(cocktail_id) {
                count += 1;
                single = catalog.cocktail(cocktail_id).map(|c| c.name.clone());
            }
        }

        IngredientUsage {
            count,
            single_cocktail_name: if count == 1 { single } else { None },
        }
    }
}

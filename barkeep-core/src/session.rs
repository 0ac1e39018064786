//! Per-session engine state
//!
//! One [`BarSession`] owns the usage index and availability cache for one
//! logical app session. There is no shared module state: two sessions never
//! alias, which is what makes the engine testable and safe to reconstruct at
//! will (a full rebuild over the current snapshot always reproduces the
//! incremental state).

use crate::availability::{describe, CocktailSummary};
use crate::cache::{AvailabilityCache, IngredientUsage};
use crate::catalog::Catalog;
use crate::usage::UsageIndex;
use barkeep_types::{CatalogDiff, Cocktail, CocktailId, IngredientId, Settings};

/// Derived availability state for one app session.
#[derive(Debug, Clone)]
pub struct BarSession {
    usage: UsageIndex,
    cache: AvailabilityCache,
    settings: Settings,
}

impl BarSession {
    /// Build everything from scratch over one catalog snapshot.
    pub fn init_full(catalog: &Catalog, settings: Settings) -> Self {
        let usage = UsageIndex::build(catalog, settings);
        let cache = AvailabilityCache::init_full(catalog, &usage, settings);
        BarSession {
            usage,
            cache,
            settings,
        }
    }

    /// Patch the index and cache for one catalog edit event. `after` is the
    /// caller's current snapshot; the diff carries the before side.
    pub fn apply_diff(&mut self, diff: &CatalogDiff, after: &Catalog) {
        if diff.is_empty() {
            return;
        }

        let touched_keys = self.usage.apply_diff(diff, after, self.settings);

        if !diff.changed_cocktail_ids.is_empty() {
            self.cache.refresh_cocktails(
                &diff.changed_cocktail_ids,
                after,
                &self.usage,
                self.settings,
            );
        }
        if !diff.changed_ingredient_ids.is_empty() {
            // A structural ingredient edit can silently rewrite other
            // ingredients' usage sets; their rollups need recomputing too.
            let mut stale: Vec<IngredientId> = diff
                .changed_ingredient_ids
                .iter()
                .copied()
                .chain(touched_keys)
                .collect();
            stale.sort();
            stale.dedup();
            self.cache
                .apply_incremental(&stale, after, &self.usage, self.settings);
        }
    }

    /// Swap the settings snapshot. The fan-out policy depends on the
    /// substitution setting, so this is a full rebuild, not a patch.
    pub fn update_settings(&mut self, catalog: &Catalog, settings: Settings) {
        if settings == self.settings {
            return;
        }
        *self = BarSession::init_full(catalog, settings);
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn is_available(&self, id: CocktailId) -> bool {
        self.cache.is_available(id)
    }

    pub fn ingredient_usage(&self, id: IngredientId) -> Option<&IngredientUsage> {
        self.cache.ingredient_usage(id)
    }

    pub fn usage_index(&self) -> &UsageIndex {
        &self.usage
    }

    /// Display summary for one cocktail against the caller's current
    /// catalog; evaluated on demand, not cached.
    pub fn describe(&self, cocktail: &Cocktail, catalog: &Catalog) -> CocktailSummary {
        describe(cocktail, catalog, self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{cocktail, ingredient, line};
    use barkeep_types::RecipeLine;

    #[test]
    fn test_sessions_do_not_alias() {
        let catalog_a = Catalog::new(
            vec![ingredient(1, "Gin", None, true)],
            vec![cocktail(10, "Gin Shot", vec![line(0, Some(1))])],
        );
        let catalog_b = Catalog::new(
            vec![ingredient(1, "Gin", None, false)],
            vec![cocktail(10, "Gin Shot", vec![line(0, Some(1))])],
        );

        let a = BarSession::init_full(&catalog_a, Settings::default());
        let b = BarSession::init_full(&catalog_b, Settings::default());

        assert!(a.is_available(CocktailId(10)));
        assert!(!b.is_available(CocktailId(10)));
    }

    #[test]
    fn test_settings_change_rebuilds() {
        // With substitutes globally off, a branded line with no flags set
        // has no sibling keys and the drink is not makeable.
        let catalog = Catalog::new(
            vec![
                ingredient(1, "Tequila", None, false),
                ingredient(2, "Jose Cuervo", Some(1), false),
                ingredient(3, "Espolon", Some(1), true),
            ],
            vec![cocktail(10, "Margarita", vec![line(0, Some(2))])],
        );

        let mut session = BarSession::init_full(&catalog, Settings::default());
        assert!(!session.is_available(CocktailId(10)));
        assert!(!session.usage_index().contains(IngredientId(3), CocktailId(10)));

        session.update_settings(
            &catalog,
            Settings {
                allow_substitutes: true,
                ..Settings::default()
            },
        );
        assert!(session.is_available(CocktailId(10)));
        assert!(session.usage_index().contains(IngredientId(3), CocktailId(10)));
    }

    #[test]
    fn test_describe_uses_session_settings() {
        let catalog = Catalog::new(
            vec![
                ingredient(1, "Gin", None, true),
                ingredient(2, "Lemon Twist", None, false),
            ],
            vec![cocktail(
                10,
                "Martini",
                vec![
                    line(0, Some(1)),
                    RecipeLine {
                        garnish: true,
                        ..line(1, Some(2))
                    },
                ],
            )],
        );

        let ignoring = BarSession::init_full(
            &catalog,
            Settings {
                ignore_garnish: true,
                ..Settings::default()
            },
        );
        let c = catalog.cocktail(CocktailId(10)).unwrap();
        let summary = ignoring.describe(c, &catalog);
        assert!(summary.is_all_available);
        insta::assert_snapshot!(summary.ingredient_line, @"Gin");
    }
}

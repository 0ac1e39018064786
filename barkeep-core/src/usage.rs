//! Forward usage index: ingredient id → cocktails it can affect
//!
//! The index is a deliberate superset of the true dependency set: it keys
//! every ingredient whose `in_bar` flip could change a cocktail's verdict
//! under *some* reachable settings combination. Over-inclusion only costs a
//! wasted re-evaluation; under-inclusion makes the cache silently stale, so
//! the fan-out errs wide.
//!
//! Both the full build and the incremental patcher derive a line's key set
//! from one shared [`line_contributions`] function. Teardown and re-add are
//! the same computation against different snapshots, which is what keeps the
//! index equivalent to a from-scratch rebuild after any sequence of diffs.

use crate::catalog::Catalog;
use barkeep_types::{CatalogDiff, Cocktail, CocktailId, IngredientId, RecipeLine, Settings};
use std::collections::{HashMap, HashSet};

/// Every ingredient id whose stock state can influence this line's
/// resolution, under the given snapshot.
///
/// The referenced id is contributed even when the ingredient no longer
/// exists in the catalog; explicit substitutes are contributed
/// unconditionally (they are still tried when the referenced ingredient is
/// deleted).
pub fn line_contributions(
    line: &RecipeLine,
    catalog: &Catalog,
    allow_substitutes: bool,
) -> Vec<IngredientId> {
    let mut out = Vec::new();

    if let Some(line_id) = line.ingredient_id {
        out.push(line_id);

        if let Some(referenced) = catalog.ingredient(line_id) {
            let base_id = catalog.base_id_of(referenced);

            if referenced.is_base() {
                // Any brand of this base can satisfy the line via the
                // branded fallback.
                for sibling in catalog.branded_siblings_of(base_id) {
                    out.push(sibling.id);
                }
            } else {
                // The base fallback stays reachable through a settings
                // change, so the base is always keyed.
                out.push(base_id);

                if allow_substitutes || line.allow_branded_substitutes {
                    for sibling in catalog.branded_siblings_of(base_id) {
                        if sibling.id != referenced.id {
                            out.push(sibling.id);
                        }
                    }
                }
            }
        }
    }

    for sub in &line.substitutes {
        out.push(sub.id);
    }

    out
}

/// Reverse mapping from ingredient id to the cocktails whose availability
/// could depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageIndex {
    entries: HashMap<IngredientId, HashSet<CocktailId>>,
}

impl UsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from scratch over one catalog snapshot.
    pub fn build(catalog: &Catalog, settings: Settings) -> Self {
        let mut index = UsageIndex::new();
        for cocktail in catalog.cocktails() {
            index.add_cocktail(cocktail, catalog, settings);
        }

        tracing::debug!(
            ingredients = catalog.ingredients().len(),
            cocktails = catalog.cocktails().len(),
            keys = index.entries.len(),
            "built usage index"
        );

        index
    }

    /// Cocktails whose verdict the given ingredient can affect.
    pub fn cocktails_using(&self, id: IngredientId) -> Option<&HashSet<CocktailId>> {
        self.entries.get(&id)
    }

    pub fn contains(&self, ingredient: IngredientId, cocktail: CocktailId) -> bool {
        self.entries
            .get(&ingredient)
            .is_some_and(|set| set.contains(&cocktail))
    }

    /// Number of keyed ingredients.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IngredientId, &HashSet<CocktailId>)> {
        self.entries.iter().map(|(&id, set)| (id, set))
    }

    fn add_cocktail(&mut self, cocktail: &Cocktail, catalog: &Catalog, settings: Settings) {
        for line in &cocktail.lines {
            for id in line_contributions(line, catalog, settings.allow_substitutes) {
                self.entries.entry(id).or_default().insert(cocktail.id);
            }
        }
    }

    fn remove_cocktail(&mut self, cocktail: &Cocktail, catalog: &Catalog, settings: Settings) {
        for line in &cocktail.lines {
            for id in line_contributions(line, catalog, settings.allow_substitutes) {
                if let Some(set) = self.entries.get_mut(&id) {
                    set.remove(&cocktail.id);
                    if set.is_empty() {
                        self.entries.remove(&id);
                    }
                }
            }
        }
    }

    /// Patch the index for one catalog edit event.
    ///
    /// Given an index consistent with the diff's before-snapshot, the result
    /// is equal to [`UsageIndex::build`] over `after`. Ids listed as changed
    /// but present in neither snapshot degrade to no-ops. The settings must
    /// be the ones the index was built with; a settings change calls for a
    /// full rebuild instead.
    ///
    /// Returns every ingredient key whose usage set may have changed, so a
    /// cache layered on the index knows which rollups to recompute. This
    /// includes keys that only *lost* entries (e.g. an ingredient re-based
    /// away from a line's base), which no post-patch intersection test can
    /// find.
    pub fn apply_diff(
        &mut self,
        diff: &CatalogDiff,
        after: &Catalog,
        settings: Settings,
    ) -> HashSet<IngredientId> {
        if diff.is_empty() {
            return HashSet::new();
        }

        let before = Catalog::new(diff.prev_ingredients.clone(), diff.prev_cocktails.clone());

        let mut affected: HashSet<CocktailId> =
            diff.changed_cocktail_ids.iter().copied().collect();

        for &changed in &diff.changed_ingredient_ids {
            collect_affected_by_ingredient(changed, &before, after, &mut affected);
        }

        tracing::debug!(
            changed_ingredients = diff.changed_ingredient_ids.len(),
            changed_cocktails = diff.changed_cocktail_ids.len(),
            affected = affected.len(),
            "patching usage index"
        );

        let mut touched = HashSet::new();
        for cocktail_id in affected {
            if let Some(prev) = before.cocktail(cocktail_id) {
                for line in &prev.lines {
                    touched.extend(line_contributions(line, &before, settings.allow_substitutes));
                }
                self.remove_cocktail(prev, &before, settings);
            }
            if let Some(next) = after.cocktail(cocktail_id) {
                for line in &next.lines {
                    touched.extend(line_contributions(line, after, settings.allow_substitutes));
                }
                self.add_cocktail(next, after, settings);
            }
        }

        touched
    }
}

/// Every cocktail whose contribution set can mention `changed`, under either
/// snapshot: direct references, explicit substitutes, lines whose ingredient
/// resolves to `changed` as its base, and lines whose ingredient shares a
/// base with `changed` (editing `base_ingredient_id` can make an ingredient
/// a brand sibling of a line it never references).
fn collect_affected_by_ingredient(
    changed: IngredientId,
    before: &Catalog,
    after: &Catalog,
    affected: &mut HashSet<CocktailId>,
) {
    let mut related = HashSet::from([changed]);
    for snapshot in [before, after] {
        if let Some(ing) = snapshot.ingredient(changed) {
            related.insert(snapshot.base_id_of(ing));
        }
    }

    let mut scan = |cocktails: &[Cocktail]| {
        for cocktail in cocktails {
            if affected.contains(&cocktail.id) {
                continue;
            }

            let hit = cocktail.lines.iter().any(|line| {
                if line.ingredient_id == Some(changed) {
                    return true;
                }
                if line.substitutes.iter().any(|sub| sub.id == changed) {
                    return true;
                }
                line.ingredient_id.is_some_and(|line_id| {
                    [before, after].iter().any(|snapshot| {
                        snapshot
                            .ingredient(line_id)
                            .is_some_and(|ing| related.contains(&snapshot.base_id_of(ing)))
                    })
                })
            });

            if hit {
                affected.insert(cocktail.id);
            }
        }
    };

    scan(before.cocktails());
    scan(after.cocktails());
}

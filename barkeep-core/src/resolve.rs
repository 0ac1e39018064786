//! Substitution resolution for a single recipe line
//!
//! Decides which concrete, in-bar ingredient (if any) satisfies one line of
//! a recipe. The fallbacks are tried in a fixed priority order; the first
//! match wins. Garnish skipping is the evaluator's concern, not the
//! resolver's.

use crate::catalog::Catalog;
use barkeep_types::{Ingredient, RecipeLine};

/// Resolve one recipe line against a catalog snapshot.
///
/// Priority order:
/// 1. the referenced ingredient itself, if stocked;
/// 2. its base ingredient, when base substitution is enabled for this line;
/// 3. the first stocked brand sibling in catalog iteration order, when
///    branded substitution is enabled for this line (or the line references
///    a base ingredient, whose brands are always acceptable);
/// 4. the line's explicit substitutes, in declared order.
///
/// A line with no `ingredient_id` is free text and never resolves. A line
/// whose referenced id is missing from the catalog (deleted ingredient)
/// skips the fallback chain and only tries explicit substitutes.
pub fn resolve_line<'a>(
    line: &RecipeLine,
    catalog: &'a Catalog,
    effective_allow_substitutes: bool,
) -> Option<&'a Ingredient> {
    let Some(line_id) = line.ingredient_id else {
        return None;
    };

    if let Some(referenced) = catalog.ingredient(line_id) {
        // 1. Direct hit.
        if referenced.in_bar {
            return Some(referenced);
        }

        let base_id = catalog.base_id_of(referenced);

        // 2. Base fallback.
        if effective_allow_substitutes || line.allow_base_substitution {
            if let Some(base) = catalog.ingredient(base_id) {
                if base.in_bar {
                    return Some(base);
                }
            }
        }

        // 3. Branded fallback. A line referencing a base ingredient accepts
        // any of its brands without an explicit opt-in.
        let branded_enabled = effective_allow_substitutes
            || line.allow_branded_substitutes
            || referenced.is_base();
        if branded_enabled {
            if let Some(sibling) = catalog.brand_sibling_in_bar(base_id, referenced.id) {
                return Some(sibling);
            }
        }
    }

    // 4. Explicit substitutes, strictly in declared order.
    line.substitutes
        .iter()
        .find_map(|sub| catalog.ingredient(sub.id).filter(|ing| ing.in_bar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ingredient, line, substitute};
    use barkeep_types::{IngredientId, RecipeLine};

    fn catalog_with(ingredients: Vec<barkeep_types::Ingredient>) -> Catalog {
        Catalog::new(ingredients, vec![])
    }

    #[test]
    fn test_direct_hit_wins() {
        let catalog = catalog_with(vec![
            ingredient(1, "Tequila", None, true),
            ingredient(2, "Jose Cuervo", Some(1), true),
        ]);

        let resolved = resolve_line(&line(0, Some(2)), &catalog, true).unwrap();
        assert_eq!(resolved.id, IngredientId(2));
    }

    #[test]
    fn test_base_fallback_requires_opt_in() {
        let catalog = catalog_with(vec![
            ingredient(1, "Tequila", None, true),
            ingredient(2, "Jose Cuervo", Some(1), false),
        ]);

        assert!(resolve_line(&line(0, Some(2)), &catalog, false).is_none());

        let opted_in = RecipeLine {
            allow_base_substitution: true,
            ..line(0, Some(2))
        };
        let resolved = resolve_line(&opted_in, &catalog, false).unwrap();
        assert_eq!(resolved.id, IngredientId(1));

        // The global setting enables the same fallback without the line flag.
        let resolved = resolve_line(&line(0, Some(2)), &catalog, true).unwrap();
        assert_eq!(resolved.id, IngredientId(1));
    }

    #[test]
    fn test_branded_fallback_for_base_line() {
        // A line referencing the base accepts any stocked brand even with
        // every substitution flag off.
        let catalog = catalog_with(vec![
            ingredient(1, "Tequila", None, false),
            ingredient(2, "Jose Cuervo", Some(1), true),
        ]);

        let resolved = resolve_line(&line(0, Some(1)), &catalog, false).unwrap();
        assert_eq!(resolved.id, IngredientId(2));
    }

    #[test]
    fn test_branded_fallback_gated_for_branded_line() {
        let catalog = catalog_with(vec![
            ingredient(1, "Tequila", None, false),
            ingredient(2, "Jose Cuervo", Some(1), false),
            ingredient(3, "Espolon", Some(1), true),
        ]);

        // Flag off, global off: no resolution.
        assert!(resolve_line(&line(0, Some(2)), &catalog, false).is_none());

        let opted_in = RecipeLine {
            allow_branded_substitutes: true,
            ..line(0, Some(2))
        };
        let resolved = resolve_line(&opted_in, &catalog, false).unwrap();
        assert_eq!(resolved.id, IngredientId(3));
    }

    #[test]
    fn test_branded_fallback_never_picks_the_base() {
        // Branded opt-in alone does not unlock the base; that is the base
        // fallback's gate.
        let catalog = catalog_with(vec![
            ingredient(1, "Tequila", None, true),
            ingredient(2, "Jose Cuervo", Some(1), false),
        ]);

        let opted_in = RecipeLine {
            allow_branded_substitutes: true,
            ..line(0, Some(2))
        };
        assert!(resolve_line(&opted_in, &catalog, false).is_none());
    }

    #[test]
    fn test_explicit_substitutes_in_declared_order() {
        let catalog = catalog_with(vec![
            ingredient(5, "Cointreau", None, true),
            ingredient(6, "Triple Sec", None, true),
        ]);

        let mut l = line(0, Some(99));
        l.substitutes = vec![substitute(5, "Cointreau"), substitute(6, "Triple Sec")];

        let resolved = resolve_line(&l, &catalog, false).unwrap();
        assert_eq!(resolved.id, IngredientId(5));
    }

    #[test]
    fn test_deleted_ingredient_only_tries_substitutes() {
        let catalog = catalog_with(vec![ingredient(6, "Triple Sec", None, true)]);

        let mut l = line(0, Some(99));
        assert!(resolve_line(&l, &catalog, true).is_none());

        l.substitutes = vec![substitute(6, "Triple Sec")];
        let resolved = resolve_line(&l, &catalog, true).unwrap();
        assert_eq!(resolved.id, IngredientId(6));
    }

    #[test]
    fn test_free_text_line_never_resolves() {
        let catalog = catalog_with(vec![ingredient(1, "Tequila", None, true)]);

        let mut l = line(0, None);
        l.substitutes = vec![substitute(1, "Tequila")];
        assert!(resolve_line(&l, &catalog, true).is_none());
    }
}

//! Availability evaluation for whole cocktails
//!
//! Layers on the line resolver: a cocktail is available when every required
//! line resolves. `describe` additionally produces the display summary the
//! presentation layer consumes.

use crate::catalog::Catalog;
use crate::resolve::resolve_line;
use barkeep_types::{Cocktail, IngredientId, RecipeLine, Settings};
use serde::{Deserialize, Serialize};

/// Display summary for one cocktail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocktailSummary {
    /// Resolved ingredient names, or a "Missing: …" line.
    pub ingredient_line: String,

    pub is_all_available: bool,

    /// Whether any ingredient involved (resolved or missing) is branded.
    pub has_branded: bool,

    /// Base ids of unresolved required lines, for suggestion surfaces.
    pub missing_base_ids: Vec<IngredientId>,
}

fn is_required(line: &RecipeLine, settings: Settings) -> bool {
    !line.optional && !(settings.ignore_garnish && line.garnish)
}

fn is_skipped(line: &RecipeLine, settings: Settings) -> bool {
    settings.ignore_garnish && line.garnish
}

/// Whether every required line of the cocktail currently resolves.
///
/// A recipe with no required lines at all is treated as incomplete data and
/// reported unavailable, never trivially makeable.
pub fn is_available(cocktail: &Cocktail, catalog: &Catalog, settings: Settings) -> bool {
    let mut required = cocktail
        .lines
        .iter()
        .filter(|line| is_required(line, settings))
        .peekable();

    if required.peek().is_none() {
        return false;
    }

    required.all(|line| resolve_line(line, catalog, settings.allow_substitutes).is_some())
}

/// Resolve every non-skipped line and build the display summary.
pub fn describe(cocktail: &Cocktail, catalog: &Catalog, settings: Settings) -> CocktailSummary {
    let mut lines: Vec<&RecipeLine> = cocktail
        .lines
        .iter()
        .filter(|line| !is_skipped(line, settings))
        .collect();
    lines.sort_by_key(|line| line.order);

    let mut resolved_names = Vec::new();
    let mut missing_names = Vec::new();
    let mut missing_required = 0usize;
    let mut missing_base_ids = Vec::new();
    let mut has_branded = false;
    let mut has_required = false;

    for line in &lines {
        let required = is_required(line, settings);
        has_required |= required;

        match resolve_line(line, catalog, settings.allow_substitutes) {
            Some(resolved) => {
                has_branded |= !resolved.is_base();
                resolved_names.push(resolved.name.clone());
            }
            None => {
                let referenced = line.ingredient_id.and_then(|id| catalog.ingredient(id));
                if let Some(ing) = referenced {
                    has_branded |= !ing.is_base();
                }

                if required {
                    missing_required += 1;
                    if let Some(ing) = referenced {
                        missing_base_ids.push(catalog.base_id_of(ing));
                    }
                    if let Some(name) = referenced
                        .map(|ing| ing.name.clone())
                        .or_else(|| line.substitutes.first().map(|sub| sub.name.clone()))
                    {
                        missing_names.push(name);
                    }
                }
            }
        }
    }

    let is_all_available = has_required && missing_required == 0;

    // An incomplete recipe (no required lines) still lists whatever
    // resolves, it just never reports available.
    let ingredient_line = if missing_required == 0 {
        resolved_names.join(", ")
    } else if missing_required <= 2 && missing_names.len() == missing_required {
        format!("Missing: {}", missing_names.join(", "))
    } else {
        format!("Missing: {} ingredients", missing_required)
    };

    CocktailSummary {
        ingredient_line,
        is_all_available,
        has_branded,
        missing_base_ids,
    }
}

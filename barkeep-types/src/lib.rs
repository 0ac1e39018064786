//! Shared types for barkeep
//!
//! This crate provides the plain data types exchanged between the barkeep
//! engine and its collaborators: catalog entities, settings snapshots, and
//! the diff descriptors that drive incremental updates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ingredient identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IngredientId(pub i64);

impl IngredientId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for IngredientId {
    fn from(id: i64) -> Self {
        IngredientId(id)
    }
}

/// Cocktail identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CocktailId(pub i64);

impl CocktailId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CocktailId {
    fn from(id: i64) -> Self {
        CocktailId(id)
    }
}

/// Tag identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagId(pub i64);

/// Measurement unit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub i64);

/// One ingredient in the user's catalog.
///
/// A *base* ingredient has `base_ingredient_id == None` (e.g. "Tequila").
/// A *branded* ingredient points at its base (e.g. "Jose Cuervo" → "Tequila").
/// Branded→branded chains are invalid data; the edit boundary must reject
/// them because resolution follows exactly one hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,

    pub name: String,

    /// Base this ingredient is a brand of, or `None` if it is itself a base.
    #[serde(default)]
    pub base_ingredient_id: Option<IngredientId>,

    /// Whether the ingredient is currently stocked.
    #[serde(default)]
    pub in_bar: bool,

    #[serde(default)]
    pub in_shopping_list: bool,

    #[serde(default)]
    pub tags: BTreeSet<TagId>,
}

impl Ingredient {
    /// Whether this ingredient is a base (not a brand of something else).
    pub fn is_base(&self) -> bool {
        self.base_ingredient_id.is_none()
    }
}

/// One entry of a recipe line's ordered explicit-substitute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstituteRef {
    pub id: IngredientId,
    pub name: String,
}

/// One component of a cocktail recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeLine {
    /// Display and evaluation order within the recipe.
    pub order: i32,

    /// Referenced ingredient; `None` means free text, never resolvable.
    #[serde(default)]
    pub ingredient_id: Option<IngredientId>,

    #[serde(default)]
    pub amount: String,

    #[serde(default)]
    pub unit_id: Option<UnitId>,

    /// Garnish lines are skipped entirely when the user ignores garnishes.
    #[serde(default)]
    pub garnish: bool,

    /// Optional lines never make a cocktail unavailable.
    #[serde(default)]
    pub optional: bool,

    /// Per-line opt-in for falling back to the base ingredient.
    #[serde(default)]
    pub allow_base_substitution: bool,

    /// Per-line opt-in for falling back to brand siblings.
    #[serde(default)]
    pub allow_branded_substitutes: bool,

    /// Explicit substitutes, tried in declared order.
    #[serde(default)]
    pub substitutes: Vec<SubstituteRef>,
}

/// A cocktail recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cocktail {
    pub id: CocktailId,
    pub name: String,
    pub lines: Vec<RecipeLine>,
}

/// Snapshot of the user-facing settings that influence resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Treat garnish lines as always satisfied.
    #[serde(default)]
    pub ignore_garnish: bool,

    /// Global override enabling base and branded fallbacks on every line.
    #[serde(default)]
    pub allow_substitutes: bool,
}

/// Describes one catalog edit event: which ids changed, plus the full
/// "before" snapshots. The "after" side is the caller's current snapshot,
/// passed alongside wherever a diff is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDiff {
    pub changed_ingredient_ids: Vec<IngredientId>,
    pub changed_cocktail_ids: Vec<CocktailId>,
    pub prev_ingredients: Vec<Ingredient>,
    pub prev_cocktails: Vec<Cocktail>,
}

impl CatalogDiff {
    /// Diff for a plain inventory toggle (no structural catalog change).
    pub fn for_ingredients(
        changed: Vec<IngredientId>,
        prev_ingredients: Vec<Ingredient>,
        prev_cocktails: Vec<Cocktail>,
    ) -> Self {
        CatalogDiff {
            changed_ingredient_ids: changed,
            changed_cocktail_ids: Vec::new(),
            prev_ingredients,
            prev_cocktails,
        }
    }

    /// Diff for a recipe edit, creation, or deletion.
    pub fn for_cocktails(
        changed: Vec<CocktailId>,
        prev_ingredients: Vec<Ingredient>,
        prev_cocktails: Vec<Cocktail>,
    ) -> Self {
        CatalogDiff {
            changed_ingredient_ids: Vec::new(),
            changed_cocktail_ids: changed,
            prev_ingredients,
            prev_cocktails,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed_ingredient_ids.is_empty() && self.changed_cocktail_ids.is_empty()
    }
}

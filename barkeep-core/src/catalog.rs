//! Catalog snapshot views
//!
//! Wraps the ingredient and cocktail lists handed to the engine, together
//! with the id-indexed lookup maps the resolver and index builders need.
//! Iteration order of the underlying lists is preserved: the branded-fallback
//! tie-break is defined as "first match in catalog iteration order".

use barkeep_types::{Cocktail, CocktailId, Ingredient, IngredientId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Data errors the owning storage layer must reject at the edit boundary.
///
/// The engine itself never returns these; resolution follows exactly one
/// base hop and silently produces wrong verdicts on chained data, which is
/// why the chain must be caught where ingredients are edited.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate ingredient id {0:?}")]
    DuplicateIngredientId(IngredientId),

    #[error("duplicate cocktail id {0:?}")]
    DuplicateCocktailId(CocktailId),

    #[error("ingredient {ingredient:?} has base {base:?} which is not a base ingredient")]
    ChainedBase {
        ingredient: IngredientId,
        base: IngredientId,
    },

    #[error("ingredient {ingredient:?} has base {base:?} which does not exist")]
    DanglingBase {
        ingredient: IngredientId,
        base: IngredientId,
    },
}

/// Read-only view over one catalog snapshot.
#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    cocktails: Vec<Cocktail>,
    ingredients_by_id: HashMap<IngredientId, usize>,
    cocktails_by_id: HashMap<CocktailId, usize>,
}

impl Catalog {
    pub fn new(ingredients: Vec<Ingredient>, cocktails: Vec<Cocktail>) -> Self {
        let ingredients_by_id = ingredients
            .iter()
            .enumerate()
            .map(|(idx, ing)| (ing.id, idx))
            .collect();
        let cocktails_by_id = cocktails
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.id, idx))
            .collect();

        Catalog {
            ingredients,
            cocktails,
            ingredients_by_id,
            cocktails_by_id,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients_by_id.get(&id).map(|&idx| &self.ingredients[idx])
    }

    pub fn cocktail(&self, id: CocktailId) -> Option<&Cocktail> {
        self.cocktails_by_id.get(&id).map(|&idx| &self.cocktails[idx])
    }

    /// Ingredients in catalog iteration order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Cocktails in catalog iteration order.
    pub fn cocktails(&self) -> &[Cocktail] {
        &self.cocktails
    }

    /// The base id of an ingredient: its own id if it is a base, else the
    /// single-hop `base_ingredient_id`.
    pub fn base_id_of(&self, ingredient: &Ingredient) -> IngredientId {
        ingredient.base_ingredient_id.unwrap_or(ingredient.id)
    }

    /// Branded ingredients sharing the given base, in catalog iteration order.
    pub fn branded_siblings_of(
        &self,
        base_id: IngredientId,
    ) -> impl Iterator<Item = &Ingredient> {
        self.ingredients
            .iter()
            .filter(move |ing| ing.base_ingredient_id == Some(base_id))
    }

    /// First in-bar branded sibling of `base_id`, skipping `exclude`.
    pub fn brand_sibling_in_bar(
        &self,
        base_id: IngredientId,
        exclude: IngredientId,
    ) -> Option<&Ingredient> {
        self.branded_siblings_of(base_id)
            .find(|ing| ing.id != exclude && ing.in_bar)
    }

    /// Check the invariants the engine relies on but does not enforce.
    ///
    /// Intended for the edit boundary of the owning storage layer; the
    /// engine never calls this on the hot path.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen_ingredients = HashSet::new();
        for ing in &self.ingredients {
            if !seen_ingredients.insert(ing.id) {
                return Err(CatalogError::DuplicateIngredientId(ing.id));
            }
        }

        let mut seen_cocktails = HashSet::new();
        for cocktail in &self.cocktails {
            if !seen_cocktails.insert(cocktail.id) {
                return Err(CatalogError::DuplicateCocktailId(cocktail.id));
            }
        }

        for ing in &self.ingredients {
            if let Some(base_id) = ing.base_ingredient_id {
                match self.ingredient(base_id) {
                    None => {
                        return Err(CatalogError::DanglingBase {
                            ingredient: ing.id,
                            base: base_id,
                        })
                    }
                    Some(base) if !base.is_base() => {
                        return Err(CatalogError::ChainedBase {
                            ingredient: ing.id,
                            base: base_id,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }
}

//! Shared fixture constructors for unit tests.

use barkeep_types::{
    Cocktail, CocktailId, Ingredient, IngredientId, RecipeLine, SubstituteRef,
};
use std::collections::BTreeSet;

pub fn ingredient(id: i64, name: &str, base: Option<i64>, in_bar: bool) -> Ingredient {
    Ingredient {
        id: IngredientId(id),
        name: name.to_string(),
        base_ingredient_id: base.map(IngredientId),
        in_bar,
        in_shopping_list: false,
        tags: BTreeSet::new(),
    }
}

pub fn line(order: i32, ingredient_id: Option<i64>) -> RecipeLine {
    RecipeLine {
        order,
        ingredient_id: ingredient_id.map(IngredientId),
        amount: String::new(),
        unit_id: None,
        garnish: false,
        optional: false,
        allow_base_substitution: false,
        allow_branded_substitutes: false,
        substitutes: Vec::new(),
    }
}

pub fn substitute(id: i64, name: &str) -> SubstituteRef {
    SubstituteRef {
        id: IngredientId(id),
        name: name.to_string(),
    }
}

pub fn cocktail(id: i64, name: &str, lines: Vec<RecipeLine>) -> Cocktail {
    Cocktail {
        id: CocktailId(id),
        name: name.to_string(),
        lines,
    }
}

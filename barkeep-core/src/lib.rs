//! Barkeep availability engine
//!
//! Tracks which cocktails are makeable from a home-bar ingredient inventory
//! and answers that question incrementally as the inventory changes.
//!
//! # Architecture
//!
//! A naive implementation re-scans every recipe against every ingredient on
//! each inventory toggle. This crate instead maintains two pieces of derived
//! state:
//!
//! - a **usage index** — a reverse mapping from ingredient id to the set of
//!   cocktails whose verdict that ingredient can affect, built wide enough
//!   (base fallbacks, brand siblings, explicit substitutes) that a toggle
//!   never needs a full re-scan;
//! - an **availability cache** — per-cocktail verdicts plus per-ingredient
//!   "N makeable cocktails use this" rollups, patched along the index.
//!
//! Data flows one way: catalog snapshots → line resolver → evaluator and
//! index → cache. Everything below [`BarSession`] is a pure function of its
//! inputs; the session is the only component with call-to-call memory, and
//! it can always be reproduced by a full rebuild over the current snapshot.
//!
//! The engine performs no I/O and owns no source of truth: catalogs arrive
//! as in-memory snapshots, edits arrive as [`CatalogDiff`] events from the
//! owning persistence layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use barkeep_core::{BarSession, Catalog};
//! use barkeep_types::Settings;
//!
//! let catalog = Catalog::new(ingredients, cocktails);
//! let mut session = BarSession::init_full(&catalog, Settings::default());
//!
//! // ... user stocks an ingredient; storage layer emits a diff ...
//! session.apply_diff(&diff, &current_catalog);
//! session.is_available(margarita_id);
//! ```

pub mod availability;
pub mod cache;
pub mod catalog;
pub mod resolve;
pub mod session;
pub mod usage;

#[cfg(test)]
pub(crate) mod testutil;

pub use availability::{describe, is_available, CocktailSummary};
pub use cache::{AvailabilityCache, IngredientUsage};
pub use catalog::{Catalog, CatalogError};
pub use resolve::resolve_line;
pub use session::BarSession;
pub use usage::{line_contributions, UsageIndex};
pub use barkeep_types::{
    CatalogDiff, Cocktail, CocktailId, Ingredient, IngredientId, RecipeLine, Settings,
    SubstituteRef, TagId, UnitId,
};

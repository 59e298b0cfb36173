//! Ingredient provenance classification.
//!
//! Decides whether an inventory item is kitchen-made ("prepared") or
//! bought from a vendor ("purchased") from the signals on its record:
//! 1. A source recipe reference is authoritative
//! 2. No item code (or the `-` placeholder) means in-house
//! 3. A self-generated friendly ID means in-house
//! 4. Numeric codes, and everything else, are vendor codes

use crate::friendly_id::looks_self_generated;
use crate::{IngredientSignals, IngredientType};

/// Placeholder some screens store when an item has no code
pub const NO_CODE_PLACEHOLDER: &str = "-";

/// Classify an item from its signals; rules are applied in priority order
pub fn determine_ingredient_type(signals: &IngredientSignals) -> IngredientType {
    classify(
        signals.item_code.as_deref(),
        signals.source_recipe_id.as_deref(),
    )
}

/// Classify from borrowed parts
pub fn classify(item_code: Option<&str>, source_recipe_id: Option<&str>) -> IngredientType {
    if source_recipe_id.is_some_and(|id| !id.is_empty()) {
        return IngredientType::Prepared;
    }

    let code = match item_code {
        None | Some("") | Some(NO_CODE_PLACEHOLDER) => return IngredientType::Prepared,
        Some(code) => code,
    };

    if looks_self_generated(code) {
        return IngredientType::Prepared;
    }

    if code.chars().all(|c| c.is_ascii_digit()) {
        tracing::trace!("Item code {:?} is a numeric vendor code", code);
        return IngredientType::Purchased;
    }

    IngredientType::Purchased
}

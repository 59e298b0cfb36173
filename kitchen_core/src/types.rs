//! Core domain types for the kitchen data utilities.
//!
//! This module defines the fundamental types used throughout the system:
//! - The fixed allergen enumeration and its display labels
//! - Allergen profiles (contains / may contain / environment)
//! - Ingredient provenance (prepared vs. purchased)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Allergen Types
// ============================================================================

/// One of the 21 known allergens tracked on every ingredient and recipe
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AllergenKey {
    Peanut,
    Crustacean,
    Treenut,
    Shellfish,
    Sesame,
    Soy,
    Fish,
    Wheat,
    Milk,
    Sulphite,
    Egg,
    Gluten,
    Mustard,
    Celery,
    Garlic,
    Onion,
    Nitrite,
    Mushroom,
    HotPepper,
    Citrus,
    Pork,
}

impl AllergenKey {
    /// All keys in canonical order. Column layouts and output ordering follow this.
    pub const ALL: [AllergenKey; 21] = [
        AllergenKey::Peanut,
        AllergenKey::Crustacean,
        AllergenKey::Treenut,
        AllergenKey::Shellfish,
        AllergenKey::Sesame,
        AllergenKey::Soy,
        AllergenKey::Fish,
        AllergenKey::Wheat,
        AllergenKey::Milk,
        AllergenKey::Sulphite,
        AllergenKey::Egg,
        AllergenKey::Gluten,
        AllergenKey::Mustard,
        AllergenKey::Celery,
        AllergenKey::Garlic,
        AllergenKey::Onion,
        AllergenKey::Nitrite,
        AllergenKey::Mushroom,
        AllergenKey::HotPepper,
        AllergenKey::Citrus,
        AllergenKey::Pork,
    ];

    /// Wire name used in column names and profile lists
    pub fn as_str(&self) -> &'static str {
        match self {
            AllergenKey::Peanut => "peanut",
            AllergenKey::Crustacean => "crustacean",
            AllergenKey::Treenut => "treenut",
            AllergenKey::Shellfish => "shellfish",
            AllergenKey::Sesame => "sesame",
            AllergenKey::Soy => "soy",
            AllergenKey::Fish => "fish",
            AllergenKey::Wheat => "wheat",
            AllergenKey::Milk => "milk",
            AllergenKey::Sulphite => "sulphite",
            AllergenKey::Egg => "egg",
            AllergenKey::Gluten => "gluten",
            AllergenKey::Mustard => "mustard",
            AllergenKey::Celery => "celery",
            AllergenKey::Garlic => "garlic",
            AllergenKey::Onion => "onion",
            AllergenKey::Nitrite => "nitrite",
            AllergenKey::Mushroom => "mushroom",
            AllergenKey::HotPepper => "hot_pepper",
            AllergenKey::Citrus => "citrus",
            AllergenKey::Pork => "pork",
        }
    }

    /// Human-readable label for menus and allergen sheets
    pub fn label(&self) -> &'static str {
        match self {
            AllergenKey::Peanut => "Peanuts",
            AllergenKey::Crustacean => "Crustaceans",
            AllergenKey::Treenut => "Tree Nuts",
            AllergenKey::Shellfish => "Shellfish",
            AllergenKey::Sesame => "Sesame",
            AllergenKey::Soy => "Soy",
            AllergenKey::Fish => "Fish",
            AllergenKey::Wheat => "Wheat",
            AllergenKey::Milk => "Milk",
            AllergenKey::Sulphite => "Sulphites",
            AllergenKey::Egg => "Eggs",
            AllergenKey::Gluten => "Gluten",
            AllergenKey::Mustard => "Mustard",
            AllergenKey::Celery => "Celery",
            AllergenKey::Garlic => "Garlic",
            AllergenKey::Onion => "Onion",
            AllergenKey::Nitrite => "Nitrites",
            AllergenKey::Mushroom => "Mushrooms",
            AllergenKey::HotPepper => "Hot Peppers",
            AllergenKey::Citrus => "Citrus",
            AllergenKey::Pork => "Pork",
        }
    }
}

impl fmt::Display for AllergenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllergenKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AllergenKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| crate::Error::Other(format!("Unknown allergen: {}", s)))
    }
}

/// Risk classification of an allergen on a record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AllergenClass {
    /// Definite presence
    Contains,
    /// Possible cross-contact
    MayContain,
    /// Facility-level exposure (recipes only)
    Environment,
}

impl AllergenClass {
    /// Suffix used for this class in the three-way boolean columns
    pub fn column_suffix(&self) -> &'static str {
        match self {
            AllergenClass::Contains => "contains",
            AllergenClass::MayContain => "may_contain",
            AllergenClass::Environment => "environment",
        }
    }
}

/// Typed allergen state of a record
///
/// Entries are lower-case keys: either a canonical [`AllergenKey`] wire
/// name or a custom allergen name. Serializes to the legacy JSONB shape
/// (`contains` / `mayContain` / `environment`).
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AllergenProfile {
    #[serde(default)]
    pub contains: Vec<String>,

    #[serde(default, rename = "mayContain")]
    pub may_contain: Vec<String>,

    #[serde(default)]
    pub environment: Vec<String>,
}

impl AllergenProfile {
    /// True when no allergen is recorded in any class
    pub fn is_empty(&self) -> bool {
        self.contains.is_empty() && self.may_contain.is_empty() && self.environment.is_empty()
    }
}

// ============================================================================
// Ingredient Provenance
// ============================================================================

/// Whether an inventory item is made in-house or bought from a vendor
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IngredientType {
    Prepared,
    Purchased,
}

impl IngredientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientType::Prepared => "prepared",
            IngredientType::Purchased => "purchased",
        }
    }
}

impl fmt::Display for IngredientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signals used to infer where an inventory item came from
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IngredientSignals {
    #[serde(default)]
    pub item_code: Option<String>,

    #[serde(default)]
    pub source_recipe_id: Option<String>,
}

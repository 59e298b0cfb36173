#![forbid(unsafe_code)]

//! Core data utilities for the kitchen management back office.
//!
//! This crate provides:
//! - Domain types (allergen keys and profiles, ingredient provenance)
//! - Allergen normalization between boolean columns and the legacy JSONB shape
//! - Friendly IDs (reversible base-58 codes for UUIDs)
//! - Prepared vs. purchased classification of inventory items
//! - Inventory export annotation
//! - Configuration and logging setup for the binaries

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod allergen;
pub mod friendly_id;
pub mod ingredient;
pub mod inventory;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use allergen::{arrays_to_booleans, dual_write, extract_from_derived, extract_from_source};
pub use friendly_id::{decode, encode, encode_str, is_valid_friendly_id};
pub use ingredient::determine_ingredient_type;
pub use inventory::annotate_inventory_csv;

//! Allergen normalization between storage representations.
//!
//! Records carry allergens in two shapes while the migration is in flight:
//! - Source records (ingredients): `allergen_<key>` and
//!   `allergen_<key>_may_contain` flags, plus three custom allergen slots
//! - Derived records (recipes): three-way `allergen_<key>_contains`,
//!   `_may_contain` and `_environment` columns, and the legacy `allergens`
//!   JSONB object
//!
//! Everything here is fail-soft: malformed or missing input degrades to
//! empty lists and `false` flags, never to an error.

use crate::{AllergenClass, AllergenKey, AllergenProfile};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashSet};

/// A row as it arrives from the data store
pub type Record = Map<String, Value>;

/// Number of custom allergen slots on a source record
pub const CUSTOM_SLOTS: usize = 3;

/// Column holding the legacy JSONB representation
pub const LEGACY_COLUMN: &str = "allergens";

/// Column names for one allergen key, computed once
struct KeyColumns {
    key: AllergenKey,
    source_flag: String,
    source_may_contain: String,
    derived: [(AllergenClass, String); 3],
}

static KEY_COLUMNS: Lazy<Vec<KeyColumns>> = Lazy::new(|| {
    AllergenKey::ALL
        .iter()
        .map(|&key| {
            let base = format!("allergen_{}", key.as_str());
            KeyColumns {
                key,
                source_flag: base.clone(),
                source_may_contain: format!("{}_may_contain", base),
                derived: [
                    AllergenClass::Contains,
                    AllergenClass::MayContain,
                    AllergenClass::Environment,
                ]
                .map(|class| (class, format!("{}_{}", base, class.column_suffix()))),
            }
        })
        .collect()
});

/// Interpret a stored flag as a boolean
///
/// Upstream storage is inconsistently typed, so `true`, `"true"` and `1`
/// all count as set. Anything else, including a missing value, is unset.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Extract `(contains, may_contain)` from a source record
///
/// Contains takes precedence: a key flagged both ways only lands in
/// `contains`. Active, named custom slots are lower-cased and routed by
/// their may-contain flag.
pub fn extract_from_source(record: Option<&Record>) -> (Vec<String>, Vec<String>) {
    let mut contains = Vec::new();
    let mut may_contain = Vec::new();

    let Some(record) = record else {
        return (contains, may_contain);
    };

    for cols in KEY_COLUMNS.iter() {
        let key = cols.key.as_str();
        if is_truthy(record.get(&cols.source_flag)) {
            contains.push(key.to_string());
        } else if is_truthy(record.get(&cols.source_may_contain)) {
            may_contain.push(key.to_string());
        }
    }

    for slot in 1..=CUSTOM_SLOTS {
        if !is_truthy(record.get(&format!("allergen_custom{}_active", slot))) {
            continue;
        }

        let name = match record
            .get(&format!("allergen_custom{}_name", slot))
            .and_then(Value::as_str)
            .map(str::trim)
        {
            Some(name) if !name.is_empty() => name.to_lowercase(),
            _ => continue,
        };

        if is_truthy(record.get(&format!("allergen_custom{}_may_contain", slot))) {
            if !contains.contains(&name) && !may_contain.contains(&name) {
                may_contain.push(name);
            }
        } else {
            may_contain.retain(|k| k != &name);
            if !contains.contains(&name) {
                contains.push(name);
            }
        }
    }

    tracing::debug!(
        "Extracted source allergens: {} contains, {} may contain",
        contains.len(),
        may_contain.len()
    );

    (contains, may_contain)
}

/// Extract a profile from a derived record's three-way columns
///
/// These columns are already normalized, so only a JSON `true` counts.
pub fn extract_from_derived(record: Option<&Record>) -> AllergenProfile {
    let mut profile = AllergenProfile::default();

    let Some(record) = record else {
        return profile;
    };

    for cols in KEY_COLUMNS.iter() {
        for (class, column) in &cols.derived {
            if matches!(record.get(column), Some(Value::Bool(true))) {
                let list = match class {
                    AllergenClass::Contains => &mut profile.contains,
                    AllergenClass::MayContain => &mut profile.may_contain,
                    AllergenClass::Environment => &mut profile.environment,
                };
                list.push(cols.key.as_str().to_string());
            }
        }
    }

    profile
}

/// Project allergen lists onto the full set of three-way boolean columns
///
/// Always returns all 63 columns so callers overwrite rather than patch.
/// Membership is case-insensitive; names outside the canonical keys are
/// not representable as columns and are ignored.
pub fn arrays_to_booleans<S: AsRef<str>>(
    contains: &[S],
    may_contain: &[S],
    environment: Option<&[S]>,
) -> BTreeMap<String, bool> {
    fn lowered<T: AsRef<str>>(items: &[T]) -> HashSet<String> {
        items.iter().map(|s| s.as_ref().to_lowercase()).collect()
    }

    let contains = lowered(contains);
    let may_contain = lowered(may_contain);
    let environment = environment.map(lowered).unwrap_or_default();

    let mut columns = BTreeMap::new();
    for cols in KEY_COLUMNS.iter() {
        let key = cols.key.as_str();
        for (class, column) in &cols.derived {
            let set = match class {
                AllergenClass::Contains => &contains,
                AllergenClass::MayContain => &may_contain,
                AllergenClass::Environment => &environment,
            };
            columns.insert(column.clone(), set.contains(key));
        }
    }

    columns
}

/// Write both storage representations of `profile` into `record`
///
/// Sets the legacy `allergens` object and overwrites every three-way
/// boolean column.
pub fn dual_write(record: &mut Record, profile: &AllergenProfile) {
    record.insert(LEGACY_COLUMN.to_string(), profile.to_legacy_json());
    for (column, flag) in profile.to_booleans() {
        record.insert(column, Value::Bool(flag));
    }
}

/// Lower-case, trim, drop blanks and de-duplicate, keeping first occurrence
fn clean<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

/// Canonical keys first in canonical order, custom names after in seen order
fn canonical_order(mut keys: Vec<String>) -> Vec<String> {
    keys.sort_by_key(|k| {
        AllergenKey::ALL
            .iter()
            .position(|c| c.as_str() == k.as_str())
            .unwrap_or(AllergenKey::ALL.len())
    });
    keys
}

fn strings_at(value: &Value, field: &str) -> Vec<String> {
    match value.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!(
                "Ignoring legacy allergen field {:?}: expected a list, got {}",
                field,
                other
            );
            Vec::new()
        }
    }
}

impl AllergenProfile {
    /// Profile of a source record; source records have no environment class
    pub fn from_source(record: Option<&Record>) -> Self {
        let (contains, may_contain) = extract_from_source(record);
        Self {
            contains,
            may_contain,
            environment: Vec::new(),
        }
    }

    /// Canonical form: lower-case, de-duplicated, contains wins over may contain
    pub fn normalized(&self) -> Self {
        let contains = clean(&self.contains);
        let mut may_contain = clean(&self.may_contain);
        may_contain.retain(|k| !contains.contains(k));

        Self {
            contains,
            may_contain,
            environment: clean(&self.environment),
        }
    }

    /// Roll ingredient profiles up into a recipe profile
    ///
    /// Environment is facility-level and belongs to the recipe, so it comes
    /// from `environment` rather than the ingredients.
    pub fn cascade<'a, I>(ingredients: I, environment: &[String]) -> Self
    where
        I: IntoIterator<Item = &'a AllergenProfile>,
    {
        let ingredients: Vec<&AllergenProfile> = ingredients.into_iter().collect();

        let contains = canonical_order(clean(ingredients.iter().flat_map(|p| &p.contains)));
        let mut may_contain =
            canonical_order(clean(ingredients.iter().flat_map(|p| &p.may_contain)));
        may_contain.retain(|k| !contains.contains(k));

        tracing::debug!(
            "Cascaded {} ingredient profiles: {} contains, {} may contain",
            ingredients.len(),
            contains.len(),
            may_contain.len()
        );

        Self {
            contains,
            may_contain,
            environment: canonical_order(clean(environment)),
        }
    }

    /// All 63 three-way boolean columns for this profile
    pub fn to_booleans(&self) -> BTreeMap<String, bool> {
        arrays_to_booleans(
            &self.contains,
            &self.may_contain,
            Some(self.environment.as_slice()),
        )
    }

    /// The legacy JSONB object
    pub fn to_legacy_json(&self) -> Value {
        json!({
            "contains": self.contains,
            "mayContain": self.may_contain,
            "environment": self.environment,
        })
    }

    /// Read the legacy JSONB object, tolerating missing or odd fields
    pub fn from_legacy_json(value: &Value) -> Self {
        if !value.is_object() {
            if !value.is_null() {
                tracing::warn!("Legacy allergen value is not an object: {}", value);
            }
            return Self::default();
        }

        let mut may_contain = strings_at(value, "mayContain");
        may_contain.extend(strings_at(value, "may_contain"));

        Self {
            contains: strings_at(value, "contains"),
            may_contain,
            environment: strings_at(value, "environment"),
        }
        .normalized()
    }
}

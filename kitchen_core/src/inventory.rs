//! Inventory export annotation.
//!
//! Takes an inventory CSV export and appends each row's friendly ID and
//! inferred ingredient type, so printed count sheets and vendor price
//! reviews can use short codes and tell prep items from purchased ones.

use crate::config::InventoryConfig;
use crate::friendly_id::encode_str;
use crate::ingredient::classify;
use crate::{Error, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// Header of the appended friendly ID column
pub const FRIENDLY_ID_COLUMN: &str = "friendly_id";

/// Header of the appended ingredient type column
pub const INGREDIENT_TYPE_COLUMN: &str = "ingredient_type";

/// Annotate an inventory CSV and write the result to `output`
///
/// The output is staged in a temp file beside `output` and moved into
/// place once fully written and synced, so a failed run never leaves a
/// half-written sheet. Returns the number of data rows written.
pub fn annotate_inventory_csv(
    input: &Path,
    output: &Path,
    columns: &InventoryConfig,
) -> Result<usize> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();

    let find = |name: &str| headers.iter().position(|h| h.trim() == name);

    let id_idx = find(&columns.id_column).ok_or_else(|| {
        Error::Config(format!(
            "Column {:?} not found in {:?}",
            columns.id_column, input
        ))
    })?;
    let code_idx = find(&columns.item_code_column);
    let recipe_idx = find(&columns.source_recipe_column);

    if code_idx.is_none() {
        tracing::warn!(
            "No {:?} column in {:?}; items without a recipe link will read as prepared",
            columns.item_code_column,
            input
        );
    }

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut writer = csv::Writer::from_writer(NamedTempFile::new_in(dir)?);

    let mut out_headers = headers.clone();
    out_headers.push_field(FRIENDLY_ID_COLUMN);
    out_headers.push_field(INGREDIENT_TYPE_COLUMN);
    writer.write_record(&out_headers)?;

    let mut rows = 0;
    let mut unparsed = 0;

    for record in reader.records() {
        let mut record = record?;

        let friendly_id = match record.get(id_idx).map(str::trim) {
            Some(id) if !id.is_empty() => encode_str(id).unwrap_or_else(|e| {
                tracing::warn!("Row {}: {}", rows + 1, e);
                unparsed += 1;
                String::new()
            }),
            _ => String::new(),
        };

        let item_code = code_idx.and_then(|i| record.get(i)).map(str::trim);
        let source_recipe = recipe_idx.and_then(|i| record.get(i)).map(str::trim);
        let kind = classify(item_code, source_recipe);

        record.push_field(&friendly_id);
        record.push_field(kind.as_str());
        writer.write_record(&record)?;
        rows += 1;
    }

    writer.flush()?;
    let staged = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    staged.as_file().sync_all()?;
    staged.persist(output).map_err(|e| e.error)?;

    if unparsed > 0 {
        tracing::warn!("{} rows had ids that are not UUIDs", unparsed);
    }
    tracing::info!("Annotated {} inventory rows into {:?}", rows, output);

    Ok(rows)
}

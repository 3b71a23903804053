//! CSV loading for the interaction and content datasets.
//!
//! Columns are resolved by header name, so files may carry extra columns in any
//! order. Empty cells load as empty strings.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{ContentItem, Interaction, InteractionTable};

/// Load the interaction dataset from a file.
pub fn load_interactions(path: impl AsRef<Path>) -> Result<InteractionTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let table = read_interactions(file, &path.display().to_string())?;
    info!("Loaded {} interactions from {}", table.len(), path.display());
    Ok(table)
}

/// Load the content catalog from a file.
///
/// `status_column` names the column holding the publication marker.
pub fn load_content(path: impl AsRef<Path>, status_column: &str) -> Result<Vec<ContentItem>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let items = read_content(file, &path.display().to_string(), status_column)?;
    info!("Loaded {} content items from {}", items.len(), path.display());
    Ok(items)
}

/// Read interactions from any CSV source. `source` is used in error messages.
pub fn read_interactions<R: Read>(reader: R, source: &str) -> Result<InteractionTable> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let consumer_idx = column_index(&headers, source, "consumer_id")?;
    let item_idx = column_index(&headers, source, "item_id")?;
    let type_idx = column_index(&headers, source, "interaction_type")?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        // Short rows are padded so every record matches the header width
        let mut fields: Vec<String> = row.iter().map(str::to_string).collect();
        fields.resize(headers.len(), String::new());
        records.push(Interaction {
            consumer_id: cell(&row, consumer_idx),
            item_id: cell(&row, item_idx),
            interaction_type: cell(&row, type_idx),
            fields,
        });
    }

    debug!("Interaction columns: {:?}", headers);

    Ok(InteractionTable {
        headers: headers.iter().map(str::to_string).collect(),
        records,
    })
}

/// Read content items from any CSV source. `source` is used in error messages.
pub fn read_content<R: Read>(reader: R, source: &str, status_column: &str) -> Result<Vec<ContentItem>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let item_idx = column_index(&headers, source, "item_id")?;
    let title_idx = column_index(&headers, source, "title")?;
    let text_idx = column_index(&headers, source, "text_description")?;
    let type_idx = column_index(&headers, source, "item_type")?;
    let language_idx = column_index(&headers, source, "language")?;
    let status_idx = column_index(&headers, source, status_column)?;

    let mut items = Vec::new();
    for row in rdr.records() {
        let row = row?;
        items.push(ContentItem {
            item_id: cell(&row, item_idx),
            title: cell(&row, title_idx),
            text_description: cell(&row, text_idx),
            item_type: cell(&row, type_idx),
            language: cell(&row, language_idx),
            content_status: cell(&row, status_idx),
        });
    }

    Ok(items)
}

fn column_index(headers: &StringRecord, source: &str, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::missing_column(source, column))
}

fn cell(row: &StringRecord, idx: usize) -> String {
    row.get(idx).unwrap_or_default().to_string()
}

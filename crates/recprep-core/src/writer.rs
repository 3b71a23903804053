//! CSV serialization of the pipeline outputs.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::error::{Error, Result};
use crate::matrix::UserItemMatrix;
use crate::tfidf::ContentFeatures;
use crate::types::MergedTable;

/// Write the user-item matrix with `consumer_id` as the index column.
pub fn write_user_item_matrix(path: impl AsRef<Path>, matrix: &UserItemMatrix) -> Result<()> {
    let path = path.as_ref();
    write_matrix_csv(create(path)?, matrix)?;
    info!("Wrote {}x{} user-item matrix to {}", matrix.shape().0, matrix.shape().1, path.display());
    Ok(())
}

/// Write content features with `item_id` as the index column.
pub fn write_content_features(path: impl AsRef<Path>, features: &ContentFeatures) -> Result<()> {
    let path = path.as_ref();
    write_features_csv(create(path)?, features)?;
    info!("Wrote {}x{} content features to {}", features.shape().0, features.shape().1, path.display());
    Ok(())
}

/// Write the merged table without an index column.
pub fn write_merged(path: impl AsRef<Path>, merged: &MergedTable) -> Result<()> {
    let path = path.as_ref();
    write_merged_csv(create(path)?, merged)?;
    info!("Wrote {} merged rows to {}", merged.len(), path.display());
    Ok(())
}

pub fn write_matrix_csv<W: Write>(out: W, matrix: &UserItemMatrix) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(std::iter::once("consumer_id").chain(matrix.item_ids().iter().map(String::as_str)))?;
    for (consumer, row) in matrix.consumer_ids().iter().zip(matrix.values().rows()) {
        let mut record = vec![consumer.clone()];
        record.extend(row.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(|e| Error::io("<user-item matrix>", e))?;
    Ok(())
}

pub fn write_features_csv<W: Write>(out: W, features: &ContentFeatures) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(std::iter::once("item_id").chain(features.terms.iter().map(String::as_str)))?;
    for (item, row) in features.item_ids.iter().zip(features.values.rows()) {
        let mut record = vec![item.clone()];
        record.extend(row.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(|e| Error::io("<content features>", e))?;
    Ok(())
}

pub fn write_merged_csv<W: Write>(out: W, merged: &MergedTable) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(merged.headers())?;
    for record in &merged.records {
        wtr.write_record(record.to_row())?;
    }
    wtr.flush().map_err(|e| Error::io("<merged data>", e))?;
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::io(path, e))
}

//! Inner join of rated interactions with content items.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::types::{ContentItem, MergedRecord, MergedTable, RatedTable};

/// Inner-join interactions to content on `item_id`.
///
/// Rows follow interaction order. An item id that appears on several content rows
/// yields one merged row per content row.
pub fn join_content(rated: &RatedTable, content: &[ContentItem]) -> MergedTable {
    let mut by_item: HashMap<&str, Vec<&ContentItem>> = HashMap::new();
    for item in content {
        by_item.entry(item.item_id.as_str()).or_default().push(item);
    }

    let duplicated = by_item.values().filter(|rows| rows.len() > 1).count();
    if duplicated > 0 {
        warn!("{} item ids appear on more than one content row; join will fan out", duplicated);
    }

    let mut records = Vec::new();
    for rated_interaction in &rated.records {
        let Some(matches) = by_item.get(rated_interaction.interaction.item_id.as_str()) else {
            continue;
        };
        for item in matches {
            records.push(MergedRecord {
                interaction: rated_interaction.interaction.clone(),
                rating: rated_interaction.rating,
                content: item.attributes(),
            });
        }
    }

    info!("Joined {} interactions into {} rows", rated.records.len(), records.len());

    MergedTable {
        interaction_headers: rated.headers.clone(),
        records,
    }
}

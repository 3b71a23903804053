//! Content and merged-row filters.

use std::collections::HashSet;

use tracing::info;

use crate::types::{ContentItem, MergedTable};

/// Keep content items whose language matches exactly (case-sensitive).
pub fn filter_language(items: &[ContentItem], language: &str) -> Vec<ContentItem> {
    let kept: Vec<ContentItem> = items
        .iter()
        .filter(|item| item.language == language)
        .cloned()
        .collect();

    info!("Kept {}/{} content items in {}", kept.len(), items.len(), language);
    kept
}

/// Item ids of content whose status equals `active_status`.
pub fn active_item_ids<'a>(items: &'a [ContentItem], active_status: &str) -> HashSet<&'a str> {
    items
        .iter()
        .filter(|item| item.content_status == active_status)
        .map(|item| item.item_id.as_str())
        .collect()
}

/// Drop merged rows whose item is not in the active set.
pub fn retain_active(merged: &mut MergedTable, active_ids: &HashSet<&str>) {
    let before = merged.records.len();
    merged
        .records
        .retain(|record| active_ids.contains(record.item_id()));

    info!(
        "Kept {}/{} merged rows for {} active items",
        merged.records.len(),
        before,
        active_ids.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentAttributes, Interaction, MergedRecord};

    fn item(id: &str, language: &str, status: &str) -> ContentItem {
        ContentItem {
            item_id: id.into(),
            language: language.into(),
            content_status: status.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_language_filter_is_exact() {
        let items = vec![
            item("i1", "English", "content_present"),
            item("i2", "english", "content_present"),
            item("i3", "Portuguese", "content_present"),
            item("i4", "English ", "content_present"),
            item("i5", "English", "content_pulled_out"),
        ];

        let kept = filter_language(&items, "English");

        assert_eq!(kept.len(), 2);
        assert!(kept.len() <= items.len());
        assert!(kept.iter().all(|i| i.language == "English"));
    }

    #[test]
    fn test_active_ids_and_retain() {
        let items = vec![
            item("i1", "English", "content_present"),
            item("i2", "English", "content_pulled_out"),
        ];
        let active = active_item_ids(&items, "content_present");
        assert_eq!(active.len(), 1);
        assert!(active.contains("i1"));

        let record = |item_id: &str| MergedRecord {
            interaction: Interaction {
                consumer_id: "u1".into(),
                item_id: item_id.into(),
                interaction_type: "content_liked".into(),
                fields: vec![],
            },
            rating: 3,
            content: ContentAttributes::default(),
        };
        let mut merged = MergedTable {
            interaction_headers: vec![],
            records: vec![record("i1"), record("i2"), record("i1")],
        };

        retain_active(&mut merged, &active);

        assert_eq!(merged.len(), 2);
        assert!(merged.records.iter().all(|r| r.item_id() == "i1"));
    }
}

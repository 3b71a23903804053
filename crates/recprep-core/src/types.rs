//! Core record and table types.

use serde::{Deserialize, Serialize};

/// Content columns copied onto each merged row, in output order.
pub const CONTENT_ATTRIBUTE_COLUMNS: [&str; 4] = ["title", "text_description", "item_type", "language"];

/// Name of the imputed rating column.
pub const RATING_COLUMN: &str = "rating";

/// A single user interaction with a content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interaction {
    /// Consumer who performed the interaction
    pub consumer_id: String,
    /// Item that was interacted with
    pub item_id: String,
    /// Raw interaction kind, e.g. `content_liked`
    pub interaction_type: String,
    /// Every cell of the source row, in file column order
    pub fields: Vec<String>,
}

/// Interactions loaded from the transactions file.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    /// Header of the source file
    pub headers: Vec<String>,
    pub records: Vec<Interaction>,
}

impl InteractionTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// An interaction that carries a rating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RatedInteraction {
    pub interaction: Interaction,
    /// Rating derived from the interaction type (1-5 with default weights)
    pub rating: u8,
}

/// Interactions that survived rating imputation.
#[derive(Debug, Clone, Default)]
pub struct RatedTable {
    /// Header of the source file, without the rating column
    pub headers: Vec<String>,
    pub records: Vec<RatedInteraction>,
}

impl RatedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A content item from the platform catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentItem {
    pub item_id: String,
    pub title: String,
    pub text_description: String,
    pub item_type: String,
    pub language: String,
    /// Publication marker, `content_present` when the item is live.
    ///
    /// The catalog file stores this under `interaction_type`.
    pub content_status: String,
}

impl ContentItem {
    /// Attributes copied onto joined rows.
    pub fn attributes(&self) -> ContentAttributes {
        ContentAttributes {
            title: self.title.clone(),
            text_description: self.text_description.clone(),
            item_type: self.item_type.clone(),
            language: self.language.clone(),
        }
    }
}

/// Content attributes attached to a merged row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContentAttributes {
    pub title: String,
    pub text_description: String,
    pub item_type: String,
    pub language: String,
}

/// An interaction joined with the attributes of its content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergedRecord {
    pub interaction: Interaction,
    pub rating: u8,
    pub content: ContentAttributes,
}

impl MergedRecord {
    pub fn consumer_id(&self) -> &str {
        &self.interaction.consumer_id
    }

    pub fn item_id(&self) -> &str {
        &self.interaction.item_id
    }

    /// Flatten into output cells, matching [`MergedTable::headers`].
    pub fn to_row(&self) -> Vec<String> {
        let mut row = self.interaction.fields.clone();
        row.push(self.rating.to_string());
        row.push(self.content.title.clone());
        row.push(self.content.text_description.clone());
        row.push(self.content.item_type.clone());
        row.push(self.content.language.clone());
        row
    }
}

/// Interactions joined with content.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    /// Header of the interaction source file
    pub interaction_headers: Vec<String>,
    pub records: Vec<MergedRecord>,
}

impl MergedTable {
    /// Output header: interaction columns, `rating`, then content attributes.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = self.interaction_headers.clone();
        headers.push(RATING_COLUMN.to_string());
        headers.extend(CONTENT_ATTRIBUTE_COLUMNS.iter().map(|c| c.to_string()));
        headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_row_layout() {
        let table = MergedTable {
            interaction_headers: vec![
                "timestamp".into(),
                "consumer_id".into(),
                "item_id".into(),
                "interaction_type".into(),
            ],
            records: vec![MergedRecord {
                interaction: Interaction {
                    consumer_id: "u1".into(),
                    item_id: "i1".into(),
                    interaction_type: "content_liked".into(),
                    fields: vec![
                        "1465413032".into(),
                        "u1".into(),
                        "i1".into(),
                        "content_liked".into(),
                    ],
                },
                rating: 3,
                content: ContentAttributes {
                    title: "T".into(),
                    text_description: "desc".into(),
                    item_type: "article".into(),
                    language: "English".into(),
                },
            }],
        };

        let headers = table.headers();
        let row = table.records[0].to_row();
        assert_eq!(headers.len(), row.len());
        assert_eq!(headers[4], "rating");
        assert_eq!(row[4], "3");
        assert_eq!(row[0], "1465413032");
        assert_eq!(row.last().map(String::as_str), Some("English"));
    }
}

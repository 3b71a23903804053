//! Rating imputation from interaction types.

use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::types::{InteractionTable, RatedInteraction, RatedTable};

/// Attach a rating to every interaction whose type is weighted.
///
/// Interactions with an unweighted type are dropped without error.
pub fn impute_ratings(table: InteractionTable, config: &PipelineConfig) -> RatedTable {
    let total = table.records.len();

    let records: Vec<RatedInteraction> = table
        .records
        .into_iter()
        .filter_map(|interaction| {
            config
                .rating_for(&interaction.interaction_type)
                .map(|rating| RatedInteraction { interaction, rating })
        })
        .collect();

    let dropped = total - records.len();
    if dropped > 0 {
        debug!("Dropped {} interactions with unweighted types", dropped);
    }
    info!("Imputed ratings for {}/{} interactions", records.len(), total);

    RatedTable {
        headers: table.headers,
        records,
    }
}

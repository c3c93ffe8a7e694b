use crate::domain::model::Scorecard;
use crate::domain::ports::CatalogApi;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde_json::Value;

pub struct ScorecardRegistrar<C: CatalogApi> {
    api: C,
}

impl<C: CatalogApi> ScorecardRegistrar<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    /// Attaches `scorecard` to `blueprint` and returns the remote response.
    pub async fn register(&self, blueprint: &str, scorecard: &Scorecard) -> Result<Value> {
        validate_non_empty_string("blueprint", blueprint)?;
        scorecard.validate()?;

        tracing::info!(
            "📋 Registering scorecard {} on blueprint {} ({} rules)",
            scorecard.identifier,
            blueprint,
            scorecard.rules.len()
        );
        let response = self.api.create_scorecard(blueprint, scorecard).await?;
        tracing::info!("✅ Scorecard {} registered", scorecard.identifier);
        Ok(response)
    }
}

use crate::domain::model::{Blueprint, Entity, Scorecard};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// The subset of the catalog API the setup flows use.
///
/// Create calls return the decoded response body, `Value::Null` when the
/// remote answers with an empty body.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn create_blueprint(&self, blueprint: &Blueprint) -> Result<Value>;

    async fn create_entity(&self, blueprint: &str, entity: &Entity) -> Result<Value>;

    async fn list_entities(&self, blueprint: &str) -> Result<Vec<Entity>>;

    /// Partial update: only the given properties are replaced.
    async fn patch_entity_properties(
        &self,
        blueprint: &str,
        identifier: &str,
        properties: Map<String, Value>,
    ) -> Result<Value>;

    async fn create_scorecard(&self, blueprint: &str, scorecard: &Scorecard) -> Result<Value>;
}

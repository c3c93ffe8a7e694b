use crate::domain::model::{Blueprint, Entity, Scorecard};
use crate::domain::ports::{CatalogApi, ConfigProvider};
use crate::utils::error::{PortError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{json, Map, Value};
use url::Url;

/// Catalog client speaking JSON over HTTP to the Port v1 API.
#[derive(Clone)]
pub struct PortClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for PortClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl PortClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = Url::parse(config.base_url()).map_err(|e| PortError::ConfigError {
            message: format!("invalid base URL '{}': {}", config.base_url(), e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PortError::ConfigError {
                message: format!("base URL '{}' cannot carry a path", base_url),
            });
        }

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key().to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::ConfigError {
                message: format!("base URL '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Value> {
        // each segment is percent-encoded by the url crate
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, &self.api_key)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        tracing::debug!("📡 {} {}", method, path);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} {} -> {}", method, path, status);

        // keep the body so the rejection reason reaches the log
        let text = response.text().await?;
        if !status.is_success() {
            return Err(PortError::RemoteError {
                method: method.to_string(),
                path,
                status: status.as_u16(),
                body: text,
            });
        }

        // PATCH and some POSTs answer with an empty body
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| PortError::UnexpectedResponse {
            path,
            message: format!("response is not JSON: {}", e),
        })
    }
}

#[async_trait::async_trait]
impl CatalogApi for PortClient {
    async fn create_blueprint(&self, blueprint: &Blueprint) -> Result<Value> {
        self.send(Method::POST, &["blueprints"], Some(blueprint))
            .await
    }

    async fn create_entity(&self, blueprint: &str, entity: &Entity) -> Result<Value> {
        self.send(
            Method::POST,
            &["blueprints", blueprint, "entities"],
            Some(entity),
        )
        .await
    }

    async fn list_entities(&self, blueprint: &str) -> Result<Vec<Entity>> {
        let segments = ["blueprints", blueprint, "entities"];
        let mut response = self.send::<Value>(Method::GET, &segments, None).await?;

        let entities = response
            .get_mut("entities")
            .map(Value::take)
            .filter(Value::is_array)
            .ok_or_else(|| PortError::UnexpectedResponse {
                path: format!("/blueprints/{}/entities", blueprint),
                message: "missing 'entities' array".to_string(),
            })?;

        serde_json::from_value(entities).map_err(|e| PortError::UnexpectedResponse {
            path: format!("/blueprints/{}/entities", blueprint),
            message: format!("malformed entity: {}", e),
        })
    }

    async fn patch_entity_properties(
        &self,
        blueprint: &str,
        identifier: &str,
        properties: Map<String, Value>,
    ) -> Result<Value> {
        let body = json!({ "properties": properties });
        self.send(
            Method::PATCH,
            &["blueprints", blueprint, "entities", identifier],
            Some(&body),
        )
        .await
    }

    async fn create_scorecard(&self, blueprint: &str, scorecard: &Scorecard) -> Result<Value> {
        self.send(
            Method::POST,
            &["blueprints", blueprint, "scorecards"],
            Some(scorecard),
        )
        .await
    }
}

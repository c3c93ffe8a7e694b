//! In-memory catalog used by the engine tests.

use crate::domain::model::{Blueprint, Entity, Scorecard};
use crate::domain::ports::CatalogApi;
use crate::utils::error::{PortError, Result};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    blueprints: Vec<Blueprint>,
    entities: HashMap<String, Vec<Entity>>,
    scorecards: Vec<(String, Scorecard)>,
    calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockCatalog {
    state: Arc<Mutex<State>>,
    reject: Arc<HashSet<String>>,
    fail_listing: bool,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call touching `unit` (a blueprint or entity identifier) gets a 422.
    pub fn rejecting(mut self, units: &[&str]) -> Self {
        self.reject = Arc::new(units.iter().map(|u| u.to_string()).collect());
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub async fn entity(&self, blueprint: &str, identifier: &str) -> Option<Entity> {
        let state = self.state.lock().await;
        state
            .entities
            .get(blueprint)?
            .iter()
            .find(|e| e.identifier == identifier)
            .cloned()
    }

    pub async fn blueprint_ids(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state.blueprints.iter().map(|b| b.identifier.clone()).collect()
    }

    pub async fn scorecards(&self) -> Vec<(String, Scorecard)> {
        self.state.lock().await.scorecards.clone()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    fn check(&self, method: &str, path: String, unit: &str) -> Result<()> {
        if self.reject.contains(unit) {
            return Err(PortError::RemoteError {
                method: method.to_string(),
                path,
                status: 422,
                body: json!({"ok": false, "error": "rejected"}).to_string(),
            });
        }
        Ok(())
    }

    fn conflict(path: String) -> PortError {
        PortError::RemoteError {
            method: "POST".to_string(),
            path,
            status: 409,
            body: json!({"ok": false, "error": "identifier_taken"}).to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogApi for MockCatalog {
    async fn create_blueprint(&self, blueprint: &Blueprint) -> Result<Value> {
        let path = "/blueprints".to_string();
        let mut state = self.state.lock().await;
        state.calls.push(format!("POST {}", path));
        self.check("POST", path.clone(), &blueprint.identifier)?;

        if state
            .blueprints
            .iter()
            .any(|b| b.identifier == blueprint.identifier)
        {
            return Err(Self::conflict(path));
        }
        state.blueprints.push(blueprint.clone());
        Ok(json!({"ok": true}))
    }

    async fn create_entity(&self, blueprint: &str, entity: &Entity) -> Result<Value> {
        let path = format!("/blueprints/{}/entities", blueprint);
        let mut state = self.state.lock().await;
        state.calls.push(format!("POST {}", path));
        self.check("POST", path.clone(), &entity.identifier)?;

        let entities = state.entities.entry(blueprint.to_string()).or_default();
        if entities.iter().any(|e| e.identifier == entity.identifier) {
            return Err(Self::conflict(path));
        }
        entities.push(entity.clone());
        Ok(json!({"ok": true}))
    }

    async fn list_entities(&self, blueprint: &str) -> Result<Vec<Entity>> {
        let path = format!("/blueprints/{}/entities", blueprint);
        let mut state = self.state.lock().await;
        state.calls.push(format!("GET {}", path));

        if self.fail_listing {
            return Err(PortError::UnexpectedResponse {
                path,
                message: "missing 'entities' array".to_string(),
            });
        }
        Ok(state.entities.get(blueprint).cloned().unwrap_or_default())
    }

    async fn patch_entity_properties(
        &self,
        blueprint: &str,
        identifier: &str,
        properties: Map<String, Value>,
    ) -> Result<Value> {
        let path = format!("/blueprints/{}/entities/{}", blueprint, identifier);
        let mut state = self.state.lock().await;
        state.calls.push(format!("PATCH {}", path));
        self.check("PATCH", path.clone(), identifier)?;

        let entity = state
            .entities
            .get_mut(blueprint)
            .and_then(|entities| entities.iter_mut().find(|e| e.identifier == identifier))
            .ok_or_else(|| PortError::RemoteError {
                method: "PATCH".to_string(),
                path,
                status: 404,
                body: json!({"ok": false, "error": "not_found"}).to_string(),
            })?;
        entity.properties.extend(properties);
        Ok(json!({"ok": true}))
    }

    async fn create_scorecard(&self, blueprint: &str, scorecard: &Scorecard) -> Result<Value> {
        let path = format!("/blueprints/{}/scorecards", blueprint);
        let mut state = self.state.lock().await;
        state.calls.push(format!("POST {}", path));
        self.check("POST", path, &scorecard.identifier)?;

        state
            .scorecards
            .push((blueprint.to_string(), scorecard.clone()));
        Ok(json!({"ok": true, "scorecard": {"identifier": scorecard.identifier}}))
    }
}

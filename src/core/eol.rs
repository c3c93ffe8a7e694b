//! End-of-life package counts per service.

use crate::core::catalog::{
    EOL_COUNT_PROPERTY, FRAMEWORKS_RELATION, FRAMEWORK_BLUEPRINT, SERVICE_BLUEPRINT,
    STATE_PROPERTY,
};
use crate::core::report::{PhaseReport, UnitOutcome, UnitStatus};
use crate::domain::model::{Entity, FrameworkState};
use crate::domain::ports::CatalogApi;
use crate::utils::error::Result;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EolCount {
    pub service: String,
    pub eol_count: usize,
    /// Referenced identifiers with no matching framework.
    pub unresolved: Vec<String>,
}

/// framework identifier -> is EOL
pub fn eol_lookup(frameworks: &[Entity]) -> HashMap<&str, bool> {
    frameworks
        .iter()
        .map(|framework| {
            let is_eol = framework
                .property_str(STATE_PROPERTY)
                .and_then(FrameworkState::parse)
                == Some(FrameworkState::Eol);
            (framework.identifier.as_str(), is_eol)
        })
        .collect()
}

/// Counts, for every service, the distinct referenced frameworks marked EOL.
///
/// Unknown references contribute nothing; they are returned on the count
/// so the caller can report them.
pub fn compute_eol_counts(frameworks: &[Entity], services: &[Entity]) -> Vec<EolCount> {
    let lookup = eol_lookup(frameworks);

    services
        .iter()
        .map(|service| {
            let mut seen = HashSet::new();
            let mut eol_count = 0;
            let mut unresolved = Vec::new();

            for target in service.relation_targets(FRAMEWORKS_RELATION) {
                if !seen.insert(target) {
                    continue;
                }
                match lookup.get(target) {
                    Some(true) => eol_count += 1,
                    Some(false) => {}
                    None => unresolved.push(target.to_string()),
                }
            }

            EolCount {
                service: service.identifier.clone(),
                eol_count,
                unresolved,
            }
        })
        .collect()
}

/// Reads frameworks and services back, then patches each service's count.
pub struct EolSync<'a, C: CatalogApi> {
    api: &'a C,
}

impl<'a, C: CatalogApi> EolSync<'a, C> {
    pub fn new(api: &'a C) -> Self {
        Self { api }
    }

    /// Listing failures abort the sync; nothing has been written yet.
    pub async fn extract(&self) -> Result<(Vec<Entity>, Vec<Entity>)> {
        let services = self.api.list_entities(SERVICE_BLUEPRINT).await?;
        let frameworks = self.api.list_entities(FRAMEWORK_BLUEPRINT).await?;
        tracing::info!(
            "📥 Read {} services and {} frameworks",
            services.len(),
            frameworks.len()
        );
        Ok((frameworks, services))
    }

    pub fn transform(&self, frameworks: &[Entity], services: &[Entity]) -> Vec<EolCount> {
        let counts = compute_eol_counts(frameworks, services);
        for count in &counts {
            for missing in &count.unresolved {
                tracing::warn!(
                    "⚠️ {} references unknown framework '{}', counted as not EOL",
                    count.service,
                    missing
                );
            }
        }
        counts
    }

    /// Patches every service; one failed patch does not stop the others.
    pub async fn load(&self, counts: &[EolCount]) -> PhaseReport {
        let mut phase = PhaseReport::new("eol-counts");

        for count in counts {
            let mut properties = Map::new();
            properties.insert(EOL_COUNT_PROPERTY.to_string(), Value::from(count.eol_count));

            let status = match self
                .api
                .patch_entity_properties(SERVICE_BLUEPRINT, &count.service, properties)
                .await
            {
                Ok(_) => {
                    tracing::info!(
                        "✅ Updated {} with {} EOL packages",
                        count.service,
                        count.eol_count
                    );
                    UnitStatus::Updated
                }
                Err(e) => {
                    tracing::error!("❌ Error updating service {}: {}", count.service, e);
                    UnitStatus::Failed(e.to_string())
                }
            };
            phase.push(UnitOutcome::new(count.service.clone(), status));
        }

        phase
    }

    pub async fn run(&self) -> Result<(Vec<EolCount>, PhaseReport)> {
        let (frameworks, services) = self.extract().await?;
        let counts = self.transform(&frameworks, &services);
        let phase = self.load(&counts).await;
        Ok((counts, phase))
    }
}

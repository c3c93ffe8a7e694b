use crate::core::catalog::{self, FRAMEWORK_BLUEPRINT, SERVICE_BLUEPRINT};
use crate::core::eol::EolSync;
use crate::core::report::{PhaseReport, SetupReport, UnitOutcome, UnitStatus};
use crate::domain::model::{Blueprint, Entity};
use crate::domain::ports::CatalogApi;
use crate::domain::schema::validate_entity;
use crate::utils::error::{PortError, Result};
use crate::utils::validation::Validate;
use chrono::Utc;

/// Everything the demo setup sends, checked before the first request.
#[derive(Debug, Clone)]
pub struct SetupPlan {
    pub blueprints: Vec<Blueprint>,
    pub frameworks: Vec<Entity>,
    pub services: Vec<Entity>,
}

impl SetupPlan {
    pub fn demo() -> Self {
        Self {
            blueprints: catalog::blueprints(),
            frameworks: catalog::mock_frameworks(),
            services: catalog::mock_services(),
        }
    }

    fn blueprint(&self, identifier: &str) -> Result<&Blueprint> {
        self.blueprints
            .iter()
            .find(|b| b.identifier == identifier)
            .ok_or_else(|| {
                PortError::validation(format!("plan has no '{}' blueprint", identifier))
            })
    }
}

impl Validate for SetupPlan {
    fn validate(&self) -> Result<()> {
        for blueprint in &self.blueprints {
            blueprint.validate()?;
        }

        let framework = self.blueprint(FRAMEWORK_BLUEPRINT)?;
        for entity in &self.frameworks {
            validate_entity(framework, entity)?;
        }

        let service = self.blueprint(SERVICE_BLUEPRINT)?;
        for entity in &self.services {
            validate_entity(service, entity)?;
        }

        Ok(())
    }
}

pub struct SetupEngine<C: CatalogApi> {
    api: C,
    plan: SetupPlan,
}

impl<C: CatalogApi> SetupEngine<C> {
    pub fn new(api: C) -> Self {
        Self::with_plan(api, SetupPlan::demo())
    }

    pub fn with_plan(api: C, plan: SetupPlan) -> Self {
        Self { api, plan }
    }

    /// Runs the four phases in order.
    ///
    /// Local validation, a failed blueprint and a failed entity listing
    /// stop the run with an error. Failures of single entities or service
    /// patches are recorded on the report.
    pub async fn run(&self) -> Result<SetupReport> {
        let started_at = Utc::now();

        // nothing is sent unless every document passes
        self.plan.validate()?;
        tracing::info!("✅ Local schema check passed");

        let mut phases = Vec::new();

        // entities need their blueprint, so any failure here stops the run
        let blueprints = self.create_blueprints().await;
        let failed: Vec<String> = blueprints.failures().map(|o| o.unit.clone()).collect();
        if !failed.is_empty() {
            return Err(PortError::ProcessingError {
                message: format!("blueprint creation failed for: {}", failed.join(", ")),
            });
        }
        tracing::info!("🏗️ Blueprints created successfully");
        phases.push(blueprints);

        // per-item failures are recorded and seeding continues
        phases.push(
            self.create_entities("frameworks", FRAMEWORK_BLUEPRINT, &self.plan.frameworks)
                .await,
        );
        tracing::info!("🧩 Mock frameworks created");

        phases.push(
            self.create_entities("services", SERVICE_BLUEPRINT, &self.plan.services)
                .await,
        );
        tracing::info!("🧩 Mock services created");

        // read back what the catalog holds and patch the counts
        let (eol_counts, eol_phase) = EolSync::new(&self.api).run().await?;
        phases.push(eol_phase);

        Ok(SetupReport {
            started_at,
            finished_at: Utc::now(),
            phases,
            eol_counts,
        })
    }

    async fn create_blueprints(&self) -> PhaseReport {
        let mut phase = PhaseReport::new("blueprints");

        for blueprint in &self.plan.blueprints {
            let result = self.api.create_blueprint(blueprint).await;
            let status = UnitStatus::from_create(&result);
            match &status {
                UnitStatus::Failed(reason) => {
                    tracing::error!(
                        "❌ Error creating blueprint {}: {}",
                        blueprint.identifier,
                        reason
                    );
                }
                UnitStatus::AlreadyExists => {
                    tracing::warn!("⚠️ Blueprint {} already exists", blueprint.identifier);
                }
                _ => tracing::debug!("Blueprint {} created", blueprint.identifier),
            }
            phase.push(UnitOutcome::new(blueprint.identifier.clone(), status));
        }

        phase
    }

    async fn create_entities(
        &self,
        phase_name: &'static str,
        blueprint: &str,
        entities: &[Entity],
    ) -> PhaseReport {
        let mut phase = PhaseReport::new(phase_name);

        for entity in entities {
            let result = self.api.create_entity(blueprint, entity).await;
            let status = UnitStatus::from_create(&result);
            match &status {
                UnitStatus::Failed(reason) => {
                    tracing::error!(
                        "❌ Error creating {} {}: {}",
                        blueprint,
                        entity.identifier,
                        reason
                    );
                }
                UnitStatus::AlreadyExists => {
                    tracing::warn!("⚠️ {} {} already exists", blueprint, entity.identifier);
                }
                _ => tracing::debug!("{} {} created", blueprint, entity.identifier),
            }
            phase.push(UnitOutcome::new(entity.identifier.clone(), status));
        }

        phase
    }
}

use crate::core::eol::EolCount;
use crate::utils::error::PortError;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    Created,
    AlreadyExists,
    Updated,
    Failed(String),
}

impl UnitStatus {
    /// Maps the result of a create call; a remote 409 is not a failure.
    pub fn from_create<T>(result: &Result<T, PortError>) -> Self {
        match result {
            Ok(_) => UnitStatus::Created,
            Err(e) if e.is_conflict() => UnitStatus::AlreadyExists,
            Err(e) => UnitStatus::Failed(e.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UnitStatus::Failed(_))
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitStatus::Created => write!(f, "created"),
            UnitStatus::AlreadyExists => write!(f, "already exists"),
            UnitStatus::Updated => write!(f, "updated"),
            UnitStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Result of one unit of work: a blueprint, an entity or a service patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    pub unit: String,
    pub status: UnitStatus,
}

impl UnitOutcome {
    pub fn new(unit: impl Into<String>, status: UnitStatus) -> Self {
        Self {
            unit: unit.into(),
            status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: &'static str,
    pub outcomes: Vec<UnitOutcome>,
}

impl PhaseReport {
    pub fn new(phase: &'static str) -> Self {
        Self {
            phase,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: UnitOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn failures(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|o| o.status.is_failure())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.len() - self.failed_count()
    }

    pub fn outcome(&self, unit: &str) -> Option<&UnitOutcome> {
        self.outcomes.iter().find(|o| o.unit == unit)
    }
}

#[derive(Debug, Clone)]
pub struct SetupReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub phases: Vec<PhaseReport>,
    pub eol_counts: Vec<EolCount>,
}

impl SetupReport {
    pub fn phase(&self, name: &str) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == name)
    }

    pub fn failed_count(&self) -> usize {
        self.phases.iter().map(PhaseReport::failed_count).sum()
    }

    pub fn eol_count(&self, service: &str) -> Option<usize> {
        self.eol_counts
            .iter()
            .find(|c| c.service == service)
            .map(|c| c.eol_count)
    }

    pub fn log_summary(&self) {
        let elapsed = self.finished_at - self.started_at;
        for phase in &self.phases {
            tracing::info!(
                "📊 {}: {} ok, {} failed",
                phase.phase,
                phase.succeeded_count(),
                phase.failed_count()
            );
        }
        tracing::info!(
            "⏱️ Setup finished in {} ms with {} failed unit(s)",
            elapsed.num_milliseconds(),
            self.failed_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_create() {
        let ok: Result<(), PortError> = Ok(());
        assert_eq!(UnitStatus::from_create(&ok), UnitStatus::Created);

        let conflict: Result<(), PortError> = Err(PortError::RemoteError {
            method: "POST".to_string(),
            path: "/blueprints".to_string(),
            status: 409,
            body: "already exists".to_string(),
        });
        assert_eq!(UnitStatus::from_create(&conflict), UnitStatus::AlreadyExists);

        let rejected: Result<(), PortError> = Err(PortError::validation("bad"));
        assert!(UnitStatus::from_create(&rejected).is_failure());
    }

    #[test]
    fn test_phase_counts() {
        let mut phase = PhaseReport::new("services");
        phase.push(UnitOutcome::new("a", UnitStatus::Created));
        phase.push(UnitOutcome::new("b", UnitStatus::AlreadyExists));
        phase.push(UnitOutcome::new("c", UnitStatus::Failed("boom".to_string())));

        assert_eq!(phase.succeeded_count(), 2);
        assert_eq!(phase.failed_count(), 1);
        assert_eq!(phase.outcome("c").unwrap().status.to_string(), "failed: boom");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::derive::{ImpactSummary, Recommendation, RiskArea};
use crate::projects::domain::ProjectId;

/// Identifier wrapper for simulation job records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationId(pub String);

impl SimulationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Identifier wrapper for compliance check job records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplianceCheckId(pub String);

impl ComplianceCheckId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Lifecycle of a job record. Transitions only move forward; the terminal
/// states absorb every further attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub const fn can_transition(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (
                JobStatus::Pending,
                JobStatus::Running | JobStatus::Completed | JobStatus::Failed
            ) | (JobStatus::Running, JobStatus::Completed | JobStatus::Failed)
        )
    }
}

/// Raised when a write would move a job record backwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal status transition {} -> {}", from.label(), to.label())]
pub struct JobStateError {
    pub from: JobStatus,
    pub to: JobStatus,
}

/// Disaster scenario selected for a simulation. Unknown kinds are carried
/// through verbatim and score the zeroed baseline rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Earthquake,
    Flood,
    Tsunami,
    Heatwave,
    Cyclone,
    #[serde(untagged)]
    Other(String),
}

/// Caller-supplied scenario inputs. Fields irrelevant to the chosen scenario
/// are ignored; missing ones fall back to the documented defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

/// Scored outputs of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub total_area: u64,
    pub affected_area: u64,
    pub buildings_analyzed: u32,
    pub buildings_affected: u32,
    pub infrastructure_affected: u32,
    pub estimated_damage: u64,
    pub casualties: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

/// Everything the deferred run attaches to a simulation on success; applied
/// to the record as one unit so readers never observe a partial result.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub results: SimulationResults,
    pub duration_secs: u32,
    pub risk_areas: Vec<RiskArea>,
    pub recommendations: Vec<Recommendation>,
    pub impact: ImpactSummary,
}

/// Creation payload accepted by the simulations endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub scenario: ScenarioKind,
    #[serde(default)]
    pub parameters: ScenarioParameters,
    pub project_id: ProjectId,
}

/// Persisted simulation job record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: SimulationId,
    pub name: String,
    #[serde(rename = "type")]
    pub scenario: ScenarioKind,
    pub parameters: ScenarioParameters,
    pub status: JobStatus,
    pub results: Option<SimulationResults>,
    pub duration_secs: Option<u32>,
    pub risk_areas: Option<Vec<RiskArea>>,
    pub recommendations: Option<Vec<Recommendation>>,
    pub impact: Option<ImpactSummary>,
    pub project_id: ProjectId,
    pub created_at: DateTime<Utc>,
}

impl SimulationRecord {
    pub fn new(draft: SimulationDraft) -> Self {
        Self {
            id: SimulationId::generate(),
            name: draft.name,
            scenario: draft.scenario,
            parameters: draft.parameters,
            status: JobStatus::Pending,
            results: None,
            duration_secs: None,
            risk_areas: None,
            recommendations: None,
            impact: None,
            project_id: draft.project_id,
            created_at: Utc::now(),
        }
    }

    /// Move to `completed`, attaching all derived fields atomically.
    pub fn complete(&mut self, outcome: SimulationOutcome) -> Result<(), JobStateError> {
        self.transition(JobStatus::Completed)?;
        self.results = Some(outcome.results);
        self.duration_secs = Some(outcome.duration_secs);
        self.risk_areas = Some(outcome.risk_areas);
        self.recommendations = Some(outcome.recommendations);
        self.impact = Some(outcome.impact);
        Ok(())
    }

    /// Move to `failed` leaving results empty.
    pub fn fail(&mut self) -> Result<(), JobStateError> {
        self.transition(JobStatus::Failed)
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), JobStateError> {
        if !self.status.can_transition(next) {
            return Err(JobStateError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// Regulatory standard evaluated by a compliance check. Unknown identifiers
/// are carried through and receive the generic fallback table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStandard {
    Is1893,
    Nbc2016,
    IrcSp55,
    Is11799,
    Cpcb,
    #[serde(untagged)]
    Other(String),
}

impl std::str::FromStr for ComplianceStandard {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "is1893" => ComplianceStandard::Is1893,
            "nbc2016" => ComplianceStandard::Nbc2016,
            "ircsp55" => ComplianceStandard::IrcSp55,
            "is11799" => ComplianceStandard::Is11799,
            "cpcb" => ComplianceStandard::Cpcb,
            other => ComplianceStandard::Other(other.to_string()),
        })
    }
}

impl ComplianceStandard {
    pub fn display_name(&self) -> String {
        match self {
            ComplianceStandard::Is1893 => "IS 1893:2016 Earthquake Code".to_string(),
            ComplianceStandard::Nbc2016 => "NBC 2016 National Building Code".to_string(),
            ComplianceStandard::IrcSp55 => "IRC:SP:55 Road Guidelines".to_string(),
            ComplianceStandard::Is11799 => "IS 11799 Flood Protection".to_string(),
            ComplianceStandard::Cpcb => "CPCB Environmental Standards".to_string(),
            ComplianceStandard::Other(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Warning,
    Failed,
}

/// One entry of a standard's check table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardCheck {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: CheckStatus,
    pub score: u8,
    pub affected_elements: Vec<String>,
}

/// Everything the deferred run attaches to a compliance check on success.
#[derive(Debug, Clone)]
pub struct ComplianceOutcome {
    pub overall_score: u8,
    pub checks: Vec<StandardCheck>,
    pub recommendations: Vec<Recommendation>,
}

/// Creation payload accepted by the compliance endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceDraft {
    pub standard: ComplianceStandard,
    pub project_id: ProjectId,
}

/// Persisted compliance check job record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub id: ComplianceCheckId,
    pub standard: ComplianceStandard,
    pub standard_name: String,
    pub overall_score: u8,
    pub checks: Vec<StandardCheck>,
    pub recommendations: Option<Vec<Recommendation>>,
    pub status: JobStatus,
    pub run_date: DateTime<Utc>,
    pub project_id: ProjectId,
}

impl ComplianceRecord {
    pub fn new(draft: ComplianceDraft) -> Self {
        Self {
            id: ComplianceCheckId::generate(),
            standard_name: draft.standard.display_name(),
            standard: draft.standard,
            overall_score: 0,
            checks: Vec::new(),
            recommendations: None,
            status: JobStatus::Pending,
            run_date: Utc::now(),
            project_id: draft.project_id,
        }
    }

    /// Move to `completed`, attaching the check table atomically.
    pub fn complete(&mut self, outcome: ComplianceOutcome) -> Result<(), JobStateError> {
        self.transition(JobStatus::Completed)?;
        self.overall_score = outcome.overall_score;
        self.checks = outcome.checks;
        self.recommendations = Some(outcome.recommendations);
        Ok(())
    }

    pub fn fail(&mut self) -> Result<(), JobStateError> {
        self.transition(JobStatus::Failed)
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), JobStateError> {
        if !self.status.can_transition(next) {
            return Err(JobStateError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

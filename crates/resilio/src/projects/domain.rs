use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::domain::{ComplianceRecord, JobStatus, SimulationRecord};
use crate::features::domain::{FeatureCategory, MapFeature};
use crate::identity::UserId;

/// Identifier wrapper for resilience projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Lifecycle of a planning project, distinct from job record status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Initial viewport for the project map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl Default for MapCenter {
    fn default() -> Self {
        Self {
            lat: 19.0760,
            lng: 72.8777,
            zoom: 12,
        }
    }
}

/// A resilience project. The three score fields are denormalized rollups;
/// `compliance_score` always mirrors the most recently completed compliance
/// check for the project, or 0 when none has completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub status: ProjectStatus,
    pub risk_level: RiskLevel,
    pub team_size: u32,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub map_center: MapCenter,
    pub resilience_score: u8,
    pub eco_score: u8,
    pub compliance_score: u8,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(owner: UserId, draft: ProjectDraft) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::generate(),
            name: draft.name,
            description: draft.description,
            location: draft.location,
            status: ProjectStatus::Draft,
            risk_level: draft.risk_level.unwrap_or(RiskLevel::Medium),
            team_size: draft.team_size.unwrap_or(1),
            budget: draft.budget,
            start_date: draft.start_date,
            end_date: draft.end_date,
            map_center: draft.map_center.unwrap_or_default(),
            resilience_score: 0,
            eco_score: 0,
            compliance_score: 0,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, refreshing `updated_at`.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(risk_level) = patch.risk_level {
            self.risk_level = risk_level;
        }
        if let Some(team_size) = patch.team_size {
            self.team_size = team_size;
        }
        if let Some(budget) = patch.budget {
            self.budget = Some(budget);
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(map_center) = patch.map_center {
            self.map_center = map_center;
        }
        self.updated_at = Utc::now();
    }
}

/// Creation payload accepted by the projects endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub team_size: Option<u32>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub map_center: Option<MapCenter>,
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub team_size: Option<u32>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub map_center: Option<MapCenter>,
}

/// Feature tallies by category for the stats view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureCategoryCounts {
    pub infrastructure: u32,
    pub disaster: u32,
    pub eco: u32,
    pub transportation: u32,
    pub residential: u32,
    pub commercial: u32,
}

/// Dashboard summary assembled from a project and its dependents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStats {
    pub total_features: u32,
    pub features_by_category: FeatureCategoryCounts,
    pub total_simulations: u32,
    pub completed_simulations: u32,
    pub compliance_checks: u32,
    pub resilience_score: u8,
    pub eco_score: u8,
    pub compliance_score: u8,
}

impl ProjectStats {
    pub fn collect(
        project: &Project,
        features: &[MapFeature],
        simulations: &[SimulationRecord],
        checks: &[ComplianceRecord],
    ) -> Self {
        let mut by_category = FeatureCategoryCounts::default();
        for feature in features {
            match feature.category {
                FeatureCategory::Infrastructure => by_category.infrastructure += 1,
                FeatureCategory::Disaster => by_category.disaster += 1,
                FeatureCategory::Eco => by_category.eco += 1,
                FeatureCategory::Transportation => by_category.transportation += 1,
                FeatureCategory::Residential => by_category.residential += 1,
                FeatureCategory::Commercial => by_category.commercial += 1,
            }
        }

        Self {
            total_features: features.len() as u32,
            features_by_category: by_category,
            total_simulations: simulations.len() as u32,
            completed_simulations: simulations
                .iter()
                .filter(|record| record.status == JobStatus::Completed)
                .count() as u32,
            compliance_checks: checks.len() as u32,
            resilience_score: project.resilience_score,
            eco_score: project.eco_score,
            compliance_score: project.compliance_score,
        }
    }
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::UserId;
use crate::projects::domain::ProjectId;

/// Identifier wrapper for map features.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureId(pub String);

impl FeatureId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    Infrastructure,
    Disaster,
    Eco,
    Transportation,
    Residential,
    Commercial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    Existing,
    Proposed,
    UnderConstruction,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Feature geometry as plain coordinate data. Geometric correctness is a
/// collaborator concern; the service only stores and echoes shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureGeometry {
    Point { coordinates: [f64; 2] },
    Line { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    pub id: FeatureId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: FeatureCategory,
    pub status: FeatureStatus,
    pub geometry: FeatureGeometry,
    pub properties: BTreeMap<String, serde_json::Value>,
    pub resilience_score: u8,
    pub cost: Option<f64>,
    pub priority: Priority,
    pub project_id: ProjectId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl MapFeature {
    pub fn new(created_by: UserId, draft: FeatureDraft) -> Self {
        Self {
            id: FeatureId::generate(),
            name: draft.name,
            kind: draft.kind,
            category: draft.category,
            status: draft.status.unwrap_or(FeatureStatus::Proposed),
            geometry: draft.geometry,
            properties: draft.properties.unwrap_or_default(),
            resilience_score: draft.resilience_score.unwrap_or(0),
            cost: draft.cost,
            priority: draft.priority.unwrap_or(Priority::Medium),
            project_id: draft.project_id,
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, patch: FeaturePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(geometry) = patch.geometry {
            self.geometry = geometry;
        }
        if let Some(properties) = patch.properties {
            self.properties = properties;
        }
        if let Some(resilience_score) = patch.resilience_score {
            self.resilience_score = resilience_score;
        }
        if let Some(cost) = patch.cost {
            self.cost = Some(cost);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// Creation payload accepted by the features endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: FeatureCategory,
    #[serde(default)]
    pub status: Option<FeatureStatus>,
    pub geometry: FeatureGeometry,
    #[serde(default)]
    pub properties: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub resilience_score: Option<u8>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub priority: Option<Priority>,
    pub project_id: ProjectId,
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<FeatureCategory>,
    #[serde(default)]
    pub status: Option<FeatureStatus>,
    #[serde(default)]
    pub geometry: Option<FeatureGeometry>,
    #[serde(default)]
    pub properties: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub resilience_score: Option<u8>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> FeatureDraft {
        FeatureDraft {
            name: "Flood Barrier East".to_string(),
            kind: "barrier".to_string(),
            category: FeatureCategory::Infrastructure,
            status: None,
            geometry: FeatureGeometry::Point {
                coordinates: [72.8777, 19.0760],
            },
            properties: None,
            resilience_score: None,
            cost: None,
            priority: None,
            project_id: ProjectId("project-1".to_string()),
        }
    }

    #[test]
    fn new_feature_gets_defaults() {
        let feature = MapFeature::new(UserId("planner-1".to_string()), draft());
        assert_eq!(feature.status, FeatureStatus::Proposed);
        assert_eq!(feature.priority, Priority::Medium);
        assert_eq!(feature.resilience_score, 0);
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn geometry_serializes_with_type_tag() {
        let geometry = FeatureGeometry::Point {
            coordinates: [72.0, 19.0],
        };
        let value = serde_json::to_value(&geometry).expect("serializes");
        assert_eq!(value["type"], "point");
        assert_eq!(value["coordinates"][0], 72.0);
    }
}

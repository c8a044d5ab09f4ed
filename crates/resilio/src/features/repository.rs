use super::domain::{FeatureId, MapFeature};
use crate::projects::domain::ProjectId;
use crate::repository::RepositoryError;

/// Storage abstraction for map features.
pub trait FeatureRepository: Send + Sync {
    fn insert(&self, feature: MapFeature) -> Result<MapFeature, RepositoryError>;
    fn update(&self, feature: MapFeature) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &FeatureId) -> Result<Option<MapFeature>, RepositoryError>;
    fn for_project(&self, project: &ProjectId) -> Result<Vec<MapFeature>, RepositoryError>;
    fn delete(&self, id: &FeatureId) -> Result<(), RepositoryError>;
}

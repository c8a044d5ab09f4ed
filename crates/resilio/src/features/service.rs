use std::sync::Arc;

use super::domain::{FeatureDraft, FeatureId, FeaturePatch, MapFeature};
use super::repository::FeatureRepository;
use crate::identity::UserId;
use crate::projects::domain::ProjectId;
use crate::projects::repository::ProjectRepository;
use crate::repository::RepositoryError;

/// Feature CRUD reached transitively through project ownership: every
/// operation first resolves the parent project under the requester's
/// identity and reports NotFound when that fails.
pub struct FeatureService<F, P> {
    features: Arc<F>,
    projects: Arc<P>,
}

impl<F, P> FeatureService<F, P>
where
    F: FeatureRepository + 'static,
    P: ProjectRepository + 'static,
{
    pub fn new(features: Arc<F>, projects: Arc<P>) -> Self {
        Self { features, projects }
    }

    pub fn create(
        &self,
        owner: &UserId,
        draft: FeatureDraft,
    ) -> Result<MapFeature, RepositoryError> {
        self.owned_project(owner, &draft.project_id)?;
        let feature = MapFeature::new(owner.clone(), draft);
        self.features.insert(feature)
    }

    pub fn for_project(
        &self,
        owner: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<MapFeature>, RepositoryError> {
        self.owned_project(owner, project)?;
        let mut features = self.features.for_project(project)?;
        features.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(features)
    }

    pub fn update(
        &self,
        owner: &UserId,
        id: &FeatureId,
        patch: FeaturePatch,
    ) -> Result<MapFeature, RepositoryError> {
        let mut feature = self.owned_feature(owner, id)?;
        feature.apply(patch);
        self.features.update(feature.clone())?;
        Ok(feature)
    }

    pub fn delete(&self, owner: &UserId, id: &FeatureId) -> Result<(), RepositoryError> {
        let feature = self.owned_feature(owner, id)?;
        self.features.delete(&feature.id)
    }

    fn owned_feature(&self, owner: &UserId, id: &FeatureId) -> Result<MapFeature, RepositoryError> {
        let feature = self.features.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        self.owned_project(owner, &feature.project_id)?;
        Ok(feature)
    }

    fn owned_project(&self, owner: &UserId, id: &ProjectId) -> Result<(), RepositoryError> {
        match self.projects.fetch(id)? {
            Some(project) if project.owner == *owner => Ok(()),
            _ => Err(RepositoryError::NotFound),
        }
    }
}

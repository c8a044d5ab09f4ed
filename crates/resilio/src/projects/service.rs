use std::sync::Arc;

use super::domain::{Project, ProjectDraft, ProjectId, ProjectPatch};
use super::repository::ProjectRepository;
use crate::identity::UserId;
use crate::repository::RepositoryError;

/// Owner-scoped CRUD over projects. Ownership failures surface as NotFound,
/// never as a distinct authorization error.
pub struct ProjectService<P> {
    repository: Arc<P>,
}

impl<P> ProjectService<P>
where
    P: ProjectRepository + 'static,
{
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    pub fn create(&self, owner: &UserId, draft: ProjectDraft) -> Result<Project, RepositoryError> {
        let project = Project::new(owner.clone(), draft);
        self.repository.insert(project)
    }

    pub fn list(&self, owner: &UserId) -> Result<Vec<Project>, RepositoryError> {
        let mut projects = self.repository.list_for_owner(owner)?;
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(projects)
    }

    pub fn get(&self, owner: &UserId, id: &ProjectId) -> Result<Project, RepositoryError> {
        self.owned(owner, id)
    }

    pub fn update(
        &self,
        owner: &UserId,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, RepositoryError> {
        let mut project = self.owned(owner, id)?;
        project.apply(patch);
        self.repository.update(project.clone())?;
        Ok(project)
    }

    pub fn delete(&self, owner: &UserId, id: &ProjectId) -> Result<(), RepositoryError> {
        let project = self.owned(owner, id)?;
        self.repository.delete(&project.id)
    }

    fn owned(&self, owner: &UserId, id: &ProjectId) -> Result<Project, RepositoryError> {
        match self.repository.fetch(id)? {
            Some(project) if project.owner == *owner => Ok(project),
            _ => Err(RepositoryError::NotFound),
        }
    }
}

use super::domain::{Project, ProjectId};
use crate::identity::UserId;
use crate::repository::RepositoryError;

/// Storage abstraction so the project service can be exercised in isolation.
pub trait ProjectRepository: Send + Sync {
    fn insert(&self, project: Project) -> Result<Project, RepositoryError>;
    fn update(&self, project: Project) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError>;
    fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, RepositoryError>;
    fn delete(&self, id: &ProjectId) -> Result<(), RepositoryError>;
}

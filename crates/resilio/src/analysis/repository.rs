use super::domain::{ComplianceCheckId, ComplianceRecord, SimulationId, SimulationRecord};
use crate::projects::domain::ProjectId;
use crate::repository::RepositoryError;

/// Storage abstraction for simulation job records.
pub trait SimulationRepository: Send + Sync {
    fn insert(&self, record: SimulationRecord) -> Result<SimulationRecord, RepositoryError>;
    fn update(&self, record: SimulationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SimulationId) -> Result<Option<SimulationRecord>, RepositoryError>;
    fn for_project(&self, project: &ProjectId) -> Result<Vec<SimulationRecord>, RepositoryError>;
    fn delete(&self, id: &SimulationId) -> Result<(), RepositoryError>;
}

/// Storage abstraction for compliance check job records.
pub trait ComplianceRepository: Send + Sync {
    fn insert(&self, record: ComplianceRecord) -> Result<ComplianceRecord, RepositoryError>;
    fn update(&self, record: ComplianceRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ComplianceCheckId) -> Result<Option<ComplianceRecord>, RepositoryError>;
    fn for_project(&self, project: &ProjectId) -> Result<Vec<ComplianceRecord>, RepositoryError>;
    fn delete(&self, id: &ComplianceCheckId) -> Result<(), RepositoryError>;
}

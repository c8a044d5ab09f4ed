#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use resilio::analysis::{
    AnalysisService, ComplianceCheckId, ComplianceRecord, ComplianceRepository, SimulationId,
    SimulationRecord, SimulationRepository,
};
use resilio::config::AnalysisSettings;
use resilio::identity::UserId;
use resilio::projects::{Project, ProjectDraft, ProjectId, ProjectRepository};
use resilio::repository::RepositoryError;

#[derive(Default)]
pub struct MemoryProjects {
    records: Mutex<HashMap<ProjectId, Project>>,
}

impl ProjectRepository for MemoryProjects {
    fn insert(&self, project: Project) -> Result<Project, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&project.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    fn update(&self, project: Project) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&project.id) {
            guard.insert(project.id.clone(), project);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("lock")
            .values()
            .filter(|project| project.owner == *owner)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("lock")
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub struct MemorySimulations {
    records: Mutex<HashMap<SimulationId, SimulationRecord>>,
}

impl MemorySimulations {
    pub fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }
}

impl SimulationRepository for MemorySimulations {
    fn insert(&self, record: SimulationRecord) -> Result<SimulationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SimulationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SimulationId) -> Result<Option<SimulationRecord>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn for_project(&self, project: &ProjectId) -> Result<Vec<SimulationRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("lock")
            .values()
            .filter(|record| record.project_id == *project)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &SimulationId) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("lock")
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub struct MemoryCompliance {
    records: Mutex<HashMap<ComplianceCheckId, ComplianceRecord>>,
}

impl MemoryCompliance {
    pub fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }
}

impl ComplianceRepository for MemoryCompliance {
    fn insert(&self, record: ComplianceRecord) -> Result<ComplianceRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ComplianceRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ComplianceCheckId) -> Result<Option<ComplianceRecord>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn for_project(&self, project: &ProjectId) -> Result<Vec<ComplianceRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("lock")
            .values()
            .filter(|record| record.project_id == *project)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &ComplianceCheckId) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("lock")
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

pub struct TestContext {
    pub service: Arc<AnalysisService<MemorySimulations, MemoryCompliance, MemoryProjects>>,
    pub simulations: Arc<MemorySimulations>,
    pub checks: Arc<MemoryCompliance>,
    pub projects: Arc<MemoryProjects>,
}

pub fn planner() -> UserId {
    UserId("planner-1".to_string())
}

pub fn build_context(delay: Duration) -> TestContext {
    let simulations = Arc::new(MemorySimulations::default());
    let checks = Arc::new(MemoryCompliance::default());
    let projects = Arc::new(MemoryProjects::default());

    let service = Arc::new(AnalysisService::new(
        simulations.clone(),
        checks.clone(),
        projects.clone(),
        AnalysisSettings {
            simulation_delay: delay,
            compliance_delay: delay,
        },
    ));

    TestContext {
        service,
        simulations,
        checks,
        projects,
    }
}

pub fn seed_project(projects: &MemoryProjects, owner: &UserId) -> Project {
    let project = Project::new(
        owner.clone(),
        ProjectDraft {
            name: "Harbor Ward Retrofit".to_string(),
            description: None,
            location: "Mumbai".to_string(),
            risk_level: None,
            team_size: None,
            budget: None,
            start_date: None,
            end_date: None,
            map_center: None,
        },
    );
    projects.insert(project).expect("project seeds")
}

/// Poll until the record reaches a terminal state; panics after ~2 seconds.
pub async fn wait_for_simulation(
    simulations: &MemorySimulations,
    id: &SimulationId,
) -> SimulationRecord {
    for _ in 0..200 {
        if let Some(record) = simulations.fetch(id).expect("fetch") {
            if record.status.is_terminal() {
                return record;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("simulation never reached a terminal state");
}

pub async fn wait_for_compliance(
    checks: &MemoryCompliance,
    id: &ComplianceCheckId,
) -> ComplianceRecord {
    for _ in 0..200 {
        if let Some(record) = checks.fetch(id).expect("fetch") {
            if record.status.is_terminal() {
                return record;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("compliance check never reached a terminal state");
}

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, error, warn};

use super::derive;
use super::domain::{
    ComplianceCheckId, ComplianceDraft, ComplianceOutcome, ComplianceRecord, SimulationDraft,
    SimulationId, SimulationOutcome, SimulationRecord,
};
use super::repository::{ComplianceRepository, SimulationRepository};
use super::scheduler::{DeferredScheduler, JobKey};
use super::scoring;
use crate::config::AnalysisSettings;
use crate::identity::UserId;
use crate::projects::domain::ProjectId;
use crate::projects::repository::ProjectRepository;
use crate::repository::RepositoryError;

/// Facade over the two job record stores and their deferred runs.
///
/// `start_*` inserts a `pending` record, returns it immediately, and books a
/// single deferred run with the scheduler. The run performs one atomic write
/// to a terminal state; failures stay local to the run and are only visible
/// by re-fetching the record.
pub struct AnalysisService<S, C, P> {
    simulations: Arc<S>,
    checks: Arc<C>,
    projects: Arc<P>,
    scheduler: DeferredScheduler,
    settings: AnalysisSettings,
}

impl<S, C, P> AnalysisService<S, C, P>
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    pub fn new(
        simulations: Arc<S>,
        checks: Arc<C>,
        projects: Arc<P>,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            simulations,
            checks,
            projects,
            scheduler: DeferredScheduler::default(),
            settings,
        }
    }

    pub fn scheduler(&self) -> &DeferredScheduler {
        &self.scheduler
    }

    /// Accept a simulation request: persist it `pending` and book the
    /// deferred scoring run. Must be called from within a tokio runtime.
    pub fn start_simulation(
        &self,
        owner: &UserId,
        draft: SimulationDraft,
    ) -> Result<SimulationRecord, RepositoryError> {
        self.owned_project(owner, &draft.project_id)?;

        let record = self.simulations.insert(SimulationRecord::new(draft))?;

        let repository = Arc::clone(&self.simulations);
        let id = record.id.clone();
        self.scheduler.schedule(
            JobKey::Simulation(record.id.clone()),
            self.settings.simulation_delay,
            async move { run_simulation_job(repository, id).await },
        );

        Ok(record)
    }

    pub fn get_simulation(
        &self,
        owner: &UserId,
        id: &SimulationId,
    ) -> Result<SimulationRecord, RepositoryError> {
        let record = self
            .simulations
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        self.owned_project(owner, &record.project_id)?;
        Ok(record)
    }

    pub fn simulations_for_project(
        &self,
        owner: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<SimulationRecord>, RepositoryError> {
        self.owned_project(owner, project)?;
        let mut records = self.simulations.for_project(project)?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Delete regardless of status. A still-pending deferred run is aborted
    /// first so the deleted record cannot be resurrected by its write.
    pub fn delete_simulation(
        &self,
        owner: &UserId,
        id: &SimulationId,
    ) -> Result<(), RepositoryError> {
        let record = self.get_simulation(owner, id)?;
        self.scheduler.cancel(&JobKey::Simulation(record.id.clone()));
        self.simulations.delete(&record.id)
    }

    /// Accept a compliance check request; same contract as simulations, plus
    /// the project score rollup once the deferred run completes.
    pub fn start_compliance_check(
        &self,
        owner: &UserId,
        draft: ComplianceDraft,
    ) -> Result<ComplianceRecord, RepositoryError> {
        self.owned_project(owner, &draft.project_id)?;

        let record = self.checks.insert(ComplianceRecord::new(draft))?;

        let repository = Arc::clone(&self.checks);
        let projects = Arc::clone(&self.projects);
        let id = record.id.clone();
        self.scheduler.schedule(
            JobKey::Compliance(record.id.clone()),
            self.settings.compliance_delay,
            async move { run_compliance_job(repository, projects, id).await },
        );

        Ok(record)
    }

    pub fn get_compliance_check(
        &self,
        owner: &UserId,
        id: &ComplianceCheckId,
    ) -> Result<ComplianceRecord, RepositoryError> {
        let record = self.checks.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        self.owned_project(owner, &record.project_id)?;
        Ok(record)
    }

    pub fn compliance_checks_for_project(
        &self,
        owner: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<ComplianceRecord>, RepositoryError> {
        self.owned_project(owner, project)?;
        let mut records = self.checks.for_project(project)?;
        records.sort_by(|a, b| b.run_date.cmp(&a.run_date));
        Ok(records)
    }

    pub fn delete_compliance_check(
        &self,
        owner: &UserId,
        id: &ComplianceCheckId,
    ) -> Result<(), RepositoryError> {
        let record = self.get_compliance_check(owner, id)?;
        self.scheduler.cancel(&JobKey::Compliance(record.id.clone()));
        self.checks.delete(&record.id)
    }

    fn owned_project(&self, owner: &UserId, id: &ProjectId) -> Result<(), RepositoryError> {
        match self.projects.fetch(id)? {
            Some(project) if project.owner == *owner => Ok(()),
            _ => Err(RepositoryError::NotFound),
        }
    }
}

/// Deferred simulation run: score, derive, and write the terminal state
/// once. Errors are recorded on the job or logged; nothing propagates.
async fn run_simulation_job<S>(repository: Arc<S>, id: SimulationId)
where
    S: SimulationRepository,
{
    let mut record = match repository.fetch(&id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            debug!(simulation = %id.0, "record removed before deferred run");
            return;
        }
        Err(err) => {
            error!(simulation = %id.0, error = %err, "unable to load simulation for deferred run");
            return;
        }
    };

    match scoring::score_scenario(&record.scenario, &record.parameters) {
        Ok(results) => {
            let outcome = SimulationOutcome {
                duration_secs: rand::thread_rng().gen_range(10..40),
                risk_areas: derive::risk_areas(),
                recommendations: derive::scenario_recommendations(&record.scenario),
                impact: derive::impact_summary(&results),
                results,
            };
            if let Err(err) = record.complete(outcome) {
                warn!(simulation = %id.0, error = %err, "simulation already in a terminal state");
                return;
            }
        }
        Err(err) => {
            warn!(simulation = %id.0, error = %err, "simulation scoring failed");
            if record.fail().is_err() {
                return;
            }
        }
    }

    if let Err(err) = repository.update(record) {
        error!(simulation = %id.0, error = %err, "unable to persist simulation outcome");
    }
}

/// Deferred compliance run. On completion the owning project's compliance
/// score is overwritten with the new overall score (last write wins).
async fn run_compliance_job<C, P>(repository: Arc<C>, projects: Arc<P>, id: ComplianceCheckId)
where
    C: ComplianceRepository,
    P: ProjectRepository,
{
    let mut record = match repository.fetch(&id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            debug!(check = %id.0, "record removed before deferred run");
            return;
        }
        Err(err) => {
            error!(check = %id.0, error = %err, "unable to load compliance check for deferred run");
            return;
        }
    };

    let checks = scoring::standard_checks(&record.standard);
    let outcome = ComplianceOutcome {
        overall_score: scoring::overall_score(&checks),
        recommendations: derive::compliance_recommendations(&checks),
        checks,
    };
    let overall_score = outcome.overall_score;

    if let Err(err) = record.complete(outcome) {
        warn!(check = %id.0, error = %err, "compliance check already in a terminal state");
        return;
    }

    let project_id = record.project_id.clone();
    if let Err(err) = repository.update(record) {
        error!(check = %id.0, error = %err, "unable to persist compliance outcome");
        return;
    }

    match projects.fetch(&project_id) {
        Ok(Some(mut project)) => {
            project.compliance_score = overall_score;
            if let Err(err) = projects.update(project) {
                error!(project = %project_id.0, error = %err, "unable to roll up compliance score");
            }
        }
        Ok(None) => {
            debug!(project = %project_id.0, "project removed before compliance rollup");
        }
        Err(err) => {
            error!(project = %project_id.0, error = %err, "unable to load project for rollup");
        }
    }
}

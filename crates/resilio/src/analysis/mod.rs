//! Asynchronous scored computations: disaster simulations and regulatory
//! compliance checks. A request inserts a `pending` job record and returns it
//! immediately; the deferred scheduler scores the job after a fixed delay and
//! writes the outcome back in a single update. One attempt, no retry;
//! deleting a record cancels any still-pending run.

pub mod derive;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scheduler;
pub mod scoring;
pub mod service;

pub use derive::{ImpactSeverity, ImpactSummary, Recommendation, RecommendationPriority, RiskArea};
pub use domain::{
    CheckStatus, ComplianceCheckId, ComplianceDraft, ComplianceOutcome, ComplianceRecord,
    ComplianceStandard, JobStateError, JobStatus, ScenarioKind, ScenarioParameters,
    SimulationDraft, SimulationId, SimulationOutcome, SimulationRecord, SimulationResults,
    StandardCheck,
};
pub use repository::{ComplianceRepository, SimulationRepository};
pub use router::analysis_router;
pub use scheduler::{DeferredScheduler, JobKey};
pub use scoring::ScoringError;
pub use service::AnalysisService;

//! Resilience project aggregate: CRUD scoped to the owning planner, plus the
//! rolled-up scores the analysis workflows write back.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    MapCenter, Project, ProjectDraft, ProjectId, ProjectPatch, ProjectStats, ProjectStatus,
    RiskLevel,
};
pub use repository::ProjectRepository;
pub use router::project_router;
pub use service::ProjectService;

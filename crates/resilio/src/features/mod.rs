//! Map features drawn on a project's city map, reached only through the
//! owning project.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    FeatureCategory, FeatureDraft, FeatureGeometry, FeatureId, FeaturePatch, FeatureStatus,
    MapFeature, Priority,
};
pub use repository::FeatureRepository;
pub use router::feature_router;
pub use service::FeatureService;

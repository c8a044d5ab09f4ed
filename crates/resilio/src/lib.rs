//! Core library for the urban resilience planning service.
//!
//! Projects aggregate map features and two kinds of analysis job records
//! (disaster simulations and regulatory compliance checks). Analysis requests
//! are accepted immediately as `pending` records; a deferred scheduler scores
//! them after a configured delay and writes the outcome back exactly once.

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod identity;
pub mod projects;
pub mod repository;
pub mod telemetry;

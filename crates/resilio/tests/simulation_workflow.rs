//! End-to-end scenarios for the deferred simulation workflow: accept as
//! pending, score after the delay, write the terminal state exactly once.

mod common;

use std::time::Duration;

use common::{build_context, planner, seed_project, wait_for_simulation};
use resilio::analysis::{
    ImpactSeverity, JobStatus, ScenarioKind, ScenarioParameters, SimulationDraft,
    SimulationRepository,
};
use resilio::identity::UserId;
use resilio::repository::RepositoryError;

fn earthquake_draft(
    project_id: resilio::projects::ProjectId,
    magnitude: Option<f64>,
) -> SimulationDraft {
    SimulationDraft {
        name: "Seismic drill".to_string(),
        scenario: ScenarioKind::Earthquake,
        parameters: ScenarioParameters {
            magnitude,
            depth: None,
        },
        project_id,
    }
}

#[tokio::test]
async fn earthquake_simulation_runs_to_completion() {
    let context = build_context(Duration::from_millis(20));
    let owner = planner();
    let project = seed_project(&context.projects, &owner);

    let accepted = context
        .service
        .start_simulation(&owner, earthquake_draft(project.id.clone(), Some(7.0)))
        .expect("request accepted");

    // returned immediately, before the deferred run
    assert_eq!(accepted.status, JobStatus::Pending);
    assert!(accepted.results.is_none());
    assert!(accepted.recommendations.is_none());

    let completed = wait_for_simulation(&context.simulations, &accepted.id).await;
    assert_eq!(completed.status, JobStatus::Completed);

    let results = completed.results.expect("results attached");
    assert_eq!(results.estimated_damage, 350_000_000);
    assert_eq!(results.casualties, 700);
    assert_eq!(results.affected_area, 400_000);
    assert_eq!(results.buildings_affected, 60);

    let impact = completed.impact.expect("impact attached");
    assert_eq!(impact.severity, ImpactSeverity::Moderate);
    assert_eq!(impact.recovery_time, 6);

    let duration = completed.duration_secs.expect("duration attached");
    assert!((10..40).contains(&duration));

    assert_eq!(completed.risk_areas.expect("risk areas").len(), 2);
    assert_eq!(completed.recommendations.expect("recommendations").len(), 2);
}

#[tokio::test]
async fn unknown_scenario_completes_with_baseline_results() {
    let context = build_context(Duration::from_millis(20));
    let owner = planner();
    let project = seed_project(&context.projects, &owner);

    let accepted = context
        .service
        .start_simulation(
            &owner,
            SimulationDraft {
                name: "Unmapped hazard".to_string(),
                scenario: ScenarioKind::Other("landslide".to_string()),
                parameters: ScenarioParameters::default(),
                project_id: project.id.clone(),
            },
        )
        .expect("request accepted");

    let completed = wait_for_simulation(&context.simulations, &accepted.id).await;
    assert_eq!(completed.status, JobStatus::Completed);

    let results = completed.results.expect("results attached");
    assert_eq!(results.affected_area, 0);
    assert_eq!(results.estimated_damage, 0);
    assert!(completed.recommendations.expect("recommendations").is_empty());
}

#[tokio::test]
async fn non_finite_parameters_mark_the_record_failed() {
    let context = build_context(Duration::from_millis(20));
    let owner = planner();
    let project = seed_project(&context.projects, &owner);

    let accepted = context
        .service
        .start_simulation(
            &owner,
            earthquake_draft(project.id.clone(), Some(f64::NAN)),
        )
        .expect("request still accepted");
    assert_eq!(accepted.status, JobStatus::Pending);

    let failed = wait_for_simulation(&context.simulations, &accepted.id).await;
    assert_eq!(failed.status, JobStatus::Failed);
    assert!(failed.results.is_none());
    assert!(failed.recommendations.is_none());
    assert!(failed.duration_secs.is_none());
}

#[tokio::test]
async fn deleting_a_pending_simulation_cancels_its_run() {
    let context = build_context(Duration::from_millis(150));
    let owner = planner();
    let project = seed_project(&context.projects, &owner);

    let accepted = context
        .service
        .start_simulation(&owner, earthquake_draft(project.id.clone(), Some(7.0)))
        .expect("request accepted");

    context
        .service
        .delete_simulation(&owner, &accepted.id)
        .expect("delete is unconditional");

    // past the scheduled delay: the aborted run must not resurrect the row
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(context
        .simulations
        .fetch(&accepted.id)
        .expect("fetch")
        .is_none());
    assert_eq!(context.simulations.len(), 0);
    assert_eq!(context.service.scheduler().pending_count(), 0);
}

#[tokio::test]
async fn completed_simulations_can_still_be_deleted() {
    let context = build_context(Duration::from_millis(20));
    let owner = planner();
    let project = seed_project(&context.projects, &owner);

    let accepted = context
        .service
        .start_simulation(&owner, earthquake_draft(project.id.clone(), Some(6.0)))
        .expect("request accepted");
    wait_for_simulation(&context.simulations, &accepted.id).await;

    context
        .service
        .delete_simulation(&owner, &accepted.id)
        .expect("delete regardless of status");
    assert_eq!(context.simulations.len(), 0);
}

#[tokio::test]
async fn records_are_scoped_to_the_owning_planner() {
    let context = build_context(Duration::from_millis(20));
    let owner = planner();
    let project = seed_project(&context.projects, &owner);

    let accepted = context
        .service
        .start_simulation(&owner, earthquake_draft(project.id.clone(), Some(7.0)))
        .expect("request accepted");

    let stranger = UserId("planner-2".to_string());
    assert!(matches!(
        context.service.get_simulation(&stranger, &accepted.id),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        context
            .service
            .start_simulation(&stranger, earthquake_draft(project.id.clone(), Some(7.0))),
        Err(RepositoryError::NotFound)
    ));

    let listed = context
        .service
        .simulations_for_project(&owner, &project.id)
        .expect("owner lists records");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn concurrent_pending_records_complete_independently() {
    let context = build_context(Duration::from_millis(30));
    let owner = planner();
    let project = seed_project(&context.projects, &owner);

    let first = context
        .service
        .start_simulation(&owner, earthquake_draft(project.id.clone(), Some(9.0)))
        .expect("accepted");
    let second = context
        .service
        .start_simulation(
            &owner,
            SimulationDraft {
                name: "Monsoon surge".to_string(),
                scenario: ScenarioKind::Flood,
                parameters: ScenarioParameters {
                    magnitude: None,
                    depth: Some(2.0),
                },
                project_id: project.id.clone(),
            },
        )
        .expect("accepted");

    let first = wait_for_simulation(&context.simulations, &first.id).await;
    let second = wait_for_simulation(&context.simulations, &second.id).await;

    let quake = first.results.expect("earthquake results");
    assert_eq!(quake.affected_area, 800_000);
    let flood = second.results.expect("flood results");
    assert_eq!(flood.affected_area, 500_000);
    assert_eq!(flood.casualties, 100);
}

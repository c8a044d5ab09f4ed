use crate::infra::{
    InMemoryComplianceRepository, InMemoryProjectRepository, InMemorySimulationRepository,
};
use clap::Args;
use resilio::analysis::{
    AnalysisService, ComplianceDraft, ComplianceStandard, JobStatus, ScenarioKind,
    ScenarioParameters, SimulationDraft,
};
use resilio::config::AnalysisSettings;
use resilio::error::AppError;
use resilio::identity::UserId;
use resilio::projects::{ProjectDraft, ProjectService};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Earthquake magnitude for the demo simulation
    #[arg(long, default_value_t = 7.0)]
    pub(crate) magnitude: f64,
    /// Compliance standard evaluated in the demo (e.g. is1893, nbc2016)
    #[arg(long, default_value = "is1893")]
    pub(crate) standard: ComplianceStandard,
    /// Deferred-run delay in milliseconds for the demo records
    #[arg(long, default_value_t = 300)]
    pub(crate) delay_ms: u64,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        magnitude,
        standard,
        delay_ms,
    } = args;

    let planner = UserId("demo-planner".to_string());
    let delay = Duration::from_millis(delay_ms);

    let projects = Arc::new(InMemoryProjectRepository::default());
    let simulations = Arc::new(InMemorySimulationRepository::default());
    let checks = Arc::new(InMemoryComplianceRepository::default());

    let project_service = ProjectService::new(projects.clone());
    let analysis = AnalysisService::new(
        simulations,
        checks,
        projects,
        AnalysisSettings {
            simulation_delay: delay,
            compliance_delay: delay,
        },
    );

    println!("Resilience planning demo");

    let project = match project_service.create(
        &planner,
        ProjectDraft {
            name: "Coastal Ward Retrofit".to_string(),
            description: Some("Seismic and flood readiness for the harbor wards".to_string()),
            location: "Mumbai".to_string(),
            risk_level: None,
            team_size: Some(4),
            budget: Some(120_000_000.0),
            start_date: None,
            end_date: None,
            map_center: None,
        },
    ) {
        Ok(project) => project,
        Err(err) => {
            println!("  Project creation failed: {err}");
            return Ok(());
        }
    };
    println!("- Created project {} ({})", project.name, project.id.0);

    println!("\nSimulation walkthrough");
    let simulation = match analysis.start_simulation(
        &planner,
        SimulationDraft {
            name: format!("M{magnitude:.1} earthquake drill"),
            scenario: ScenarioKind::Earthquake,
            parameters: ScenarioParameters {
                magnitude: Some(magnitude),
                depth: None,
            },
            project_id: project.id.clone(),
        },
    ) {
        Ok(record) => record,
        Err(err) => {
            println!("  Simulation rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Accepted simulation {} -> status {}",
        simulation.id.0,
        simulation.status.label()
    );

    tokio::time::sleep(delay + Duration::from_millis(200)).await;
    match analysis.get_simulation(&planner, &simulation.id) {
        Ok(record) => {
            println!("- Deferred run finished -> status {}", record.status.label());
            if let Some(results) = &record.results {
                println!(
                    "  Affected area {} sq m | buildings {}/{} | estimated damage {}",
                    results.affected_area,
                    results.buildings_affected,
                    results.buildings_analyzed,
                    results.estimated_damage
                );
            }
            if let Some(impact) = &record.impact {
                println!(
                    "  Impact: {:?}, recovery {} weeks, {} casualties projected",
                    impact.severity, impact.recovery_time, impact.social_impact
                );
            }
            if let Some(recommendations) = &record.recommendations {
                println!("  Recommendations:");
                for rec in recommendations {
                    println!("    - [{:?}] {} (est. {})", rec.priority, rec.text, rec.estimated_cost);
                }
            }
        }
        Err(err) => println!("  Simulation lookup failed: {err}"),
    }

    println!("\nCompliance walkthrough ({})", standard.display_name());
    let draft = ComplianceDraft {
        standard,
        project_id: project.id.clone(),
    };
    let check = match analysis.start_compliance_check(&planner, draft) {
        Ok(record) => record,
        Err(err) => {
            println!("  Compliance check rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Accepted compliance check {} against {}",
        check.id.0, check.standard_name
    );

    tokio::time::sleep(delay + Duration::from_millis(200)).await;
    match analysis.get_compliance_check(&planner, &check.id) {
        Ok(record) => {
            println!(
                "- Deferred run finished -> status {} | overall score {}",
                record.status.label(),
                record.overall_score
            );
            for entry in &record.checks {
                println!("  - {:?} {} (score {})", entry.status, entry.title, entry.score);
            }
            if let Some(recommendations) = &record.recommendations {
                for rec in recommendations {
                    println!("  -> [{:?}] {}", rec.priority, rec.text);
                }
            }
            if record.status == JobStatus::Completed {
                if let Ok(rolled_up) = project_service.get(&planner, &project.id) {
                    println!(
                        "- Project compliance score rolled up to {}",
                        rolled_up.compliance_score
                    );
                }
            }
        }
        Err(err) => println!("  Compliance lookup failed: {err}"),
    }

    Ok(())
}

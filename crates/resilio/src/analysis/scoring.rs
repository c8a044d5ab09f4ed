//! Deterministic scoring for simulations and the static per-standard
//! compliance tables. No I/O, no randomness; the only non-deterministic
//! simulation field (reported duration) is sampled by the scheduler, not
//! here.

use super::domain::{
    CheckStatus, ComplianceStandard, ScenarioKind, ScenarioParameters, SimulationResults,
    StandardCheck,
};

pub const BASE_TOTAL_AREA_SQ_M: u64 = 1_000_000;
pub const BUILDINGS_ANALYZED: u32 = 150;

const DEFAULT_MAGNITUDE: f64 = 7.0;
const DEFAULT_FLOOD_DEPTH: f64 = 2.0;

/// Raised when a supplied numeric parameter cannot be scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("parameter `{0}` must be a finite number")]
    NonFiniteParameter(&'static str),
}

/// Score a scenario. Known kinds apply their formula with documented
/// defaults for absent parameters; unknown kinds score the zeroed baseline.
pub fn score_scenario(
    scenario: &ScenarioKind,
    parameters: &ScenarioParameters,
) -> Result<SimulationResults, ScoringError> {
    match scenario {
        ScenarioKind::Earthquake => {
            let magnitude = finite(parameters.magnitude, DEFAULT_MAGNITUDE, "magnitude")?;
            let affected_pct = ((magnitude - 5.0) * 20.0).clamp(0.0, 80.0);
            let mut results = affected_baseline(affected_pct, 25.0);
            results.estimated_damage = (magnitude * 50_000_000.0).floor() as u64;
            results.casualties = (magnitude * 100.0).floor() as u32;
            results.magnitude = Some(magnitude);
            Ok(results)
        }
        ScenarioKind::Flood => {
            let depth = finite(parameters.depth, DEFAULT_FLOOD_DEPTH, "depth")?;
            let affected_pct = (depth * 25.0).clamp(0.0, 75.0);
            let mut results = affected_baseline(affected_pct, 30.0);
            results.estimated_damage = (depth * 30_000_000.0).floor() as u64;
            results.casualties = (depth * 50.0).floor() as u32;
            results.depth = Some(depth);
            Ok(results)
        }
        ScenarioKind::Tsunami
        | ScenarioKind::Heatwave
        | ScenarioKind::Cyclone
        | ScenarioKind::Other(_) => Ok(affected_baseline(0.0, 0.0)),
    }
}

fn finite(value: Option<f64>, default: f64, name: &'static str) -> Result<f64, ScoringError> {
    let value = value.unwrap_or(default);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFiniteParameter(name))
    }
}

fn affected_baseline(affected_pct: f64, infrastructure_coeff: f64) -> SimulationResults {
    let fraction = affected_pct / 100.0;
    SimulationResults {
        total_area: BASE_TOTAL_AREA_SQ_M,
        affected_area: (BASE_TOTAL_AREA_SQ_M as f64 * fraction).floor() as u64,
        buildings_analyzed: BUILDINGS_ANALYZED,
        buildings_affected: (BUILDINGS_ANALYZED as f64 * fraction).floor() as u32,
        infrastructure_affected: (infrastructure_coeff * fraction).floor() as u32,
        estimated_damage: 0,
        casualties: 0,
        magnitude: None,
        depth: None,
    }
}

/// The fixed check table for a standard. This is deliberately configuration
/// data, not a computation over project geometry: the content varies only by
/// the chosen standard.
pub fn standard_checks(standard: &ComplianceStandard) -> Vec<StandardCheck> {
    match standard {
        ComplianceStandard::Is1893 => vec![
            check(
                "seismic-zone",
                "Building Seismic Zone Categorization",
                "Buildings are correctly categorized for seismic zone",
                CheckStatus::Passed,
                100,
                &[],
            ),
            check(
                "structural-system",
                "Structural System Requirements",
                "Structures meet ductile detailing requirements",
                CheckStatus::Passed,
                95,
                &[],
            ),
            check(
                "foundation-design",
                "Foundation Design",
                "Some foundational elements need additional reinforcement",
                CheckStatus::Warning,
                75,
                &["Northern Metro Station", "Commercial Complex B12"],
            ),
            check(
                "building-separation",
                "Building Separation Requirements",
                "Insufficient gap between adjacent tall structures",
                CheckStatus::Failed,
                45,
                &["Residential Towers R7-R9", "Office Complex East"],
            ),
            check(
                "irregularity-controls",
                "Structural Irregularity Controls",
                "Vertical irregularities detected in some buildings",
                CheckStatus::Warning,
                70,
                &["Tech Park Building A", "Hospital Tower"],
            ),
        ],
        ComplianceStandard::Nbc2016 => vec![
            check(
                "fire-safety",
                "Fire Safety Requirements",
                "Fire safety systems meet NBC standards",
                CheckStatus::Passed,
                90,
                &[],
            ),
            check(
                "accessibility",
                "Accessibility Standards",
                "Buildings comply with accessibility requirements",
                CheckStatus::Warning,
                80,
                &["Shopping Complex A", "Office Building C"],
            ),
        ],
        ComplianceStandard::IrcSp55
        | ComplianceStandard::Is11799
        | ComplianceStandard::Cpcb
        | ComplianceStandard::Other(_) => vec![check(
            "general-compliance",
            "General Compliance",
            "Basic compliance requirements met",
            CheckStatus::Passed,
            85,
            &[],
        )],
    }
}

/// Mean of the table scores, rounded to the nearest integer.
pub fn overall_score(checks: &[StandardCheck]) -> u8 {
    if checks.is_empty() {
        return 0;
    }
    let total: u32 = checks.iter().map(|check| u32::from(check.score)).sum();
    (total as f64 / checks.len() as f64).round() as u8
}

fn check(
    id: &str,
    title: &str,
    description: &str,
    status: CheckStatus,
    score: u8,
    affected_elements: &[&str],
) -> StandardCheck {
    StandardCheck {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        score,
        affected_elements: affected_elements
            .iter()
            .map(|element| element.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earthquake(magnitude: Option<f64>) -> SimulationResults {
        score_scenario(
            &ScenarioKind::Earthquake,
            &ScenarioParameters {
                magnitude,
                depth: None,
            },
        )
        .expect("finite parameters score")
    }

    fn flood(depth: Option<f64>) -> SimulationResults {
        score_scenario(
            &ScenarioKind::Flood,
            &ScenarioParameters {
                magnitude: None,
                depth,
            },
        )
        .expect("finite parameters score")
    }

    #[test]
    fn earthquake_affected_percentage_sweep() {
        assert_eq!(earthquake(Some(5.0)).affected_area, 0);
        assert_eq!(earthquake(Some(7.0)).affected_area, 400_000);
        // capped at 80%
        assert_eq!(earthquake(Some(9.0)).affected_area, 800_000);
        assert_eq!(earthquake(Some(9.5)).affected_area, 800_000);
        // clamped below as well
        assert_eq!(earthquake(Some(4.0)).affected_area, 0);
    }

    #[test]
    fn earthquake_derived_quantities_at_reference_magnitude() {
        let results = earthquake(Some(7.0));
        assert_eq!(results.buildings_affected, 60);
        assert_eq!(results.infrastructure_affected, 10);
        assert_eq!(results.estimated_damage, 350_000_000);
        assert_eq!(results.casualties, 700);
        assert_eq!(results.magnitude, Some(7.0));
    }

    #[test]
    fn earthquake_magnitude_defaults_to_seven() {
        assert_eq!(earthquake(None), earthquake(Some(7.0)));
    }

    #[test]
    fn flood_affected_percentage_sweep() {
        assert_eq!(flood(Some(2.0)).affected_area, 500_000);
        // capped at 75%
        assert_eq!(flood(Some(4.0)).affected_area, 750_000);
        assert_eq!(flood(Some(0.0)).affected_area, 0);
    }

    #[test]
    fn flood_derived_quantities_at_reference_depth() {
        let results = flood(Some(2.0));
        assert_eq!(results.buildings_affected, 75);
        assert_eq!(results.infrastructure_affected, 15);
        assert_eq!(results.estimated_damage, 60_000_000);
        assert_eq!(results.casualties, 100);
        assert_eq!(results.depth, Some(2.0));
    }

    #[test]
    fn unknown_scenarios_score_the_zeroed_baseline() {
        let results = score_scenario(
            &ScenarioKind::Other("landslide".to_string()),
            &ScenarioParameters::default(),
        )
        .expect("baseline scores");
        assert_eq!(results.total_area, BASE_TOTAL_AREA_SQ_M);
        assert_eq!(results.buildings_analyzed, BUILDINGS_ANALYZED);
        assert_eq!(results.affected_area, 0);
        assert_eq!(results.estimated_damage, 0);
        assert_eq!(results.casualties, 0);
    }

    #[test]
    fn scoring_is_deterministic() {
        assert_eq!(earthquake(Some(6.3)), earthquake(Some(6.3)));
        assert_eq!(flood(Some(1.7)), flood(Some(1.7)));
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        let err = score_scenario(
            &ScenarioKind::Earthquake,
            &ScenarioParameters {
                magnitude: Some(f64::NAN),
                depth: None,
            },
        )
        .expect_err("NaN cannot be scored");
        assert_eq!(err, ScoringError::NonFiniteParameter("magnitude"));

        assert!(score_scenario(
            &ScenarioKind::Flood,
            &ScenarioParameters {
                magnitude: None,
                depth: Some(f64::INFINITY),
            },
        )
        .is_err());
    }

    #[test]
    fn is1893_table_scores_seventy_seven() {
        let checks = standard_checks(&ComplianceStandard::Is1893);
        assert_eq!(checks.len(), 5);
        assert_eq!(overall_score(&checks), 77);
    }

    #[test]
    fn nbc2016_table_scores_eighty_five() {
        let checks = standard_checks(&ComplianceStandard::Nbc2016);
        assert_eq!(checks.len(), 2);
        assert_eq!(overall_score(&checks), 85);
    }

    #[test]
    fn unlisted_standards_fall_back_to_generic_pass() {
        for standard in [
            ComplianceStandard::IrcSp55,
            ComplianceStandard::Is11799,
            ComplianceStandard::Cpcb,
            ComplianceStandard::Other("leed".to_string()),
        ] {
            let checks = standard_checks(&standard);
            assert_eq!(checks.len(), 1);
            assert_eq!(checks[0].id, "general-compliance");
            assert_eq!(checks[0].status, CheckStatus::Passed);
            assert_eq!(overall_score(&checks), 85);
        }
    }

    #[test]
    fn overall_score_of_empty_table_is_zero() {
        assert_eq!(overall_score(&[]), 0);
    }
}

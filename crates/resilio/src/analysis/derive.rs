//! Secondary artifacts derived from a scoring result: recommendations, risk
//! areas, and the impact summary. The recommendation lists and risk areas
//! are fixed advisory content keyed by scenario or check status, carried as
//! configuration rather than computed from project geometry.

use serde::{Deserialize, Serialize};

use super::domain::{CheckStatus, ScenarioKind, SimulationResults, StandardCheck};
use crate::projects::domain::RiskLevel;

pub const REMEDIATION_COST_CRITICAL: u64 = 5_000_000;
pub const REMEDIATION_COST_IMPROVEMENT: u64 = 2_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    Medium,
    High,
}

/// Advisory entry attached to completed simulations and compliance checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub text: String,
    pub priority: RecommendationPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_check: Option<String>,
    pub estimated_cost: u64,
}

/// Named polygon flagged by a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskArea {
    pub id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactSeverity {
    Low,
    Moderate,
    Severe,
}

/// Headline consequences bucketed from the scored results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub severity: ImpactSeverity,
    pub economic_impact: u64,
    pub social_impact: u32,
    /// Hectares of green space affected.
    pub environmental_impact: u64,
    /// Estimated recovery time in weeks.
    pub recovery_time: u32,
}

/// Fixed recommendation list for a scenario; scenarios without curated
/// advice yield none.
pub fn scenario_recommendations(scenario: &ScenarioKind) -> Vec<Recommendation> {
    match scenario {
        ScenarioKind::Earthquake => vec![
            Recommendation {
                id: "eq-1".to_string(),
                text: "Upgrade buildings in high-risk zones to IS 1893 standards".to_string(),
                priority: RecommendationPriority::High,
                category: Some("infrastructure".to_string()),
                related_check: None,
                estimated_cost: 50_000_000,
            },
            Recommendation {
                id: "eq-2".to_string(),
                text: "Install seismic sensors across critical infrastructure".to_string(),
                priority: RecommendationPriority::Medium,
                category: Some("technology".to_string()),
                related_check: None,
                estimated_cost: 10_000_000,
            },
        ],
        ScenarioKind::Flood => vec![
            Recommendation {
                id: "fl-1".to_string(),
                text: "Construct flood barriers along vulnerable coastlines".to_string(),
                priority: RecommendationPriority::High,
                category: Some("infrastructure".to_string()),
                related_check: None,
                estimated_cost: 75_000_000,
            },
            Recommendation {
                id: "fl-2".to_string(),
                text: "Improve drainage systems in low-lying areas".to_string(),
                priority: RecommendationPriority::High,
                category: Some("infrastructure".to_string()),
                related_check: None,
                estimated_cost: 25_000_000,
            },
        ],
        ScenarioKind::Tsunami
        | ScenarioKind::Heatwave
        | ScenarioKind::Cyclone
        | ScenarioKind::Other(_) => Vec::new(),
    }
}

/// The two fixed polygons every simulation flags.
pub fn risk_areas() -> Vec<RiskArea> {
    vec![
        RiskArea {
            id: "risk-1".to_string(),
            name: "Central Business District".to_string(),
            risk_level: RiskLevel::High,
            coordinates: vec![
                [72.8577, 19.0560],
                [72.8977, 19.0560],
                [72.8977, 19.0960],
                [72.8577, 19.0960],
            ],
        },
        RiskArea {
            id: "risk-2".to_string(),
            name: "Residential Area North".to_string(),
            risk_level: RiskLevel::Medium,
            coordinates: vec![
                [72.8377, 19.0760],
                [72.8777, 19.0760],
                [72.8777, 19.1160],
                [72.8377, 19.1160],
            ],
        },
    ]
}

/// Bucket the scored results into the headline summary.
pub fn impact_summary(results: &SimulationResults) -> ImpactSummary {
    let severity = if results.buildings_affected > 100 {
        ImpactSeverity::Severe
    } else if results.buildings_affected > 50 {
        ImpactSeverity::Moderate
    } else {
        ImpactSeverity::Low
    };

    ImpactSummary {
        severity,
        economic_impact: results.estimated_damage,
        social_impact: results.casualties,
        environmental_impact: results.affected_area / 10_000,
        recovery_time: results.buildings_affected.div_ceil(10),
    }
}

/// One remediation entry per non-passing check: failed checks demand a
/// high-priority fix, warnings a medium-priority improvement.
pub fn compliance_recommendations(checks: &[StandardCheck]) -> Vec<Recommendation> {
    checks
        .iter()
        .filter_map(|check| match check.status {
            CheckStatus::Failed => Some(Recommendation {
                id: format!("rec-{}", check.id),
                text: format!("Address critical issues in {}", check.title),
                priority: RecommendationPriority::High,
                category: None,
                related_check: Some(check.id.clone()),
                estimated_cost: REMEDIATION_COST_CRITICAL,
            }),
            CheckStatus::Warning => Some(Recommendation {
                id: format!("rec-{}", check.id),
                text: format!("Improve {} to meet full compliance", check.title),
                priority: RecommendationPriority::Medium,
                category: None,
                related_check: Some(check.id.clone()),
                estimated_cost: REMEDIATION_COST_IMPROVEMENT,
            }),
            CheckStatus::Passed => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scoring;

    fn results(buildings_affected: u32) -> SimulationResults {
        SimulationResults {
            total_area: 1_000_000,
            affected_area: 400_000,
            buildings_analyzed: 150,
            buildings_affected,
            infrastructure_affected: 10,
            estimated_damage: 350_000_000,
            casualties: 700,
            magnitude: Some(7.0),
            depth: None,
        }
    }

    #[test]
    fn severity_buckets_on_affected_buildings() {
        assert_eq!(impact_summary(&results(101)).severity, ImpactSeverity::Severe);
        assert_eq!(
            impact_summary(&results(51)).severity,
            ImpactSeverity::Moderate
        );
        assert_eq!(impact_summary(&results(50)).severity, ImpactSeverity::Low);
    }

    #[test]
    fn recovery_time_rounds_up_to_whole_weeks() {
        assert_eq!(impact_summary(&results(60)).recovery_time, 6);
        assert_eq!(impact_summary(&results(61)).recovery_time, 7);
        assert_eq!(impact_summary(&results(0)).recovery_time, 0);
    }

    #[test]
    fn environmental_impact_is_hectares_of_affected_area() {
        assert_eq!(impact_summary(&results(60)).environmental_impact, 40);
    }

    #[test]
    fn risk_areas_are_the_two_fixed_polygons() {
        let areas = risk_areas();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].name, "Central Business District");
        assert_eq!(areas[0].risk_level, RiskLevel::High);
        assert_eq!(areas[1].coordinates.len(), 4);
    }

    #[test]
    fn earthquake_and_flood_carry_curated_recommendations() {
        assert_eq!(scenario_recommendations(&ScenarioKind::Earthquake).len(), 2);
        assert_eq!(scenario_recommendations(&ScenarioKind::Flood).len(), 2);
        assert!(scenario_recommendations(&ScenarioKind::Heatwave).is_empty());
    }

    #[test]
    fn compliance_recommendations_follow_check_status() {
        let checks = scoring::standard_checks(
            &crate::analysis::domain::ComplianceStandard::Is1893,
        );
        let recommendations = compliance_recommendations(&checks);

        let high: Vec<_> = recommendations
            .iter()
            .filter(|rec| rec.priority == RecommendationPriority::High)
            .collect();
        let medium: Vec<_> = recommendations
            .iter()
            .filter(|rec| rec.priority == RecommendationPriority::Medium)
            .collect();

        assert_eq!(high.len(), 1);
        assert_eq!(high[0].related_check.as_deref(), Some("building-separation"));
        assert_eq!(high[0].estimated_cost, REMEDIATION_COST_CRITICAL);

        assert_eq!(medium.len(), 2);
        assert!(medium
            .iter()
            .all(|rec| rec.estimated_cost == REMEDIATION_COST_IMPROVEMENT));
    }

    #[test]
    fn passing_checks_emit_no_recommendations() {
        let checks = scoring::standard_checks(
            &crate::analysis::domain::ComplianceStandard::Other("leed".to_string()),
        );
        assert!(compliance_recommendations(&checks).is_empty());
    }
}

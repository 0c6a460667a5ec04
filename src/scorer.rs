//! Health Scorer - combines findings into one overall health assessment
//!
//! Additive-penalty model: start from 100 and subtract a fixed weight per
//! finding. It runs instantly on the client, at the cost of accuracy: the
//! weights are hand-set, ignore finding confidence outside the healthy
//! case, and do not consider soil at all. Treat the score as a triage hint
//! (typically within one status bucket of an agronomist's call), not as a
//! calibrated measurement.

use crate::normalizer::DEFAULT_TREATMENT;
use crate::types::{
    DetectionResult, HealthStatus, NutrientDeficiencyResult, OverallHealth, PestDetectionResult,
    Severity, SoilAnalysisResult,
};

pub const BASELINE_SCORE: i32 = 100;
pub const HEALTHY_CONFIDENT_SCORE: i32 = 98;
pub const HEALTHY_UNCERTAIN_SCORE: i32 = 85;
pub const HEALTHY_CONFIDENCE_THRESHOLD: f64 = 0.8;

pub const HIGH_SEVERITY_IMPACT: i32 = 40;
pub const MEDIUM_SEVERITY_IMPACT: i32 = 25;
pub const LOW_SEVERITY_IMPACT: i32 = 15;
/// Extra impact for fast-spreading disease families
pub const AGGRESSIVE_DISEASE_IMPACT: i32 = 15;
pub const PEST_PENALTY: i32 = 20;
pub const NUTRIENT_PENALTY: i32 = 10;

pub const MAX_RECOMMENDATIONS: usize = 4;

/// Substrings marking aggressive diseases (matched case-sensitively)
const AGGRESSIVE_DISEASE_MARKERS: [&str; 3] = ["blight", "rot", "wilt"];

const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Monitor plant growth regularly.",
    "Ensure proper hydration and sunlight.",
];

/// Compute the overall health score, status and recommendations
///
/// # Arguments
/// * `diseases` - Disease findings; only the first (primary) one is scored
/// * `pests` - Pest findings; any finding costs a flat penalty
/// * `nutrients` - Nutrient findings; any finding costs a flat penalty
/// * `_soil` - Soil snapshot (not scored)
///
/// # Returns
/// Score clamped to [0, 100], its status bucket and at most 4
/// recommendations in the order they were produced.
pub fn calculate_overall_health(
    diseases: &[DetectionResult],
    pests: &[PestDetectionResult],
    nutrients: &[NutrientDeficiencyResult],
    _soil: &SoilAnalysisResult,
) -> OverallHealth {
    let mut score = BASELINE_SCORE;
    let mut recommendations: Vec<String> = Vec::new();

    if let Some(primary) = diseases.first() {
        if primary.is_healthy() {
            if primary.confidence > HEALTHY_CONFIDENCE_THRESHOLD {
                score = HEALTHY_CONFIDENT_SCORE;
                recommendations
                    .push("Plant appears healthy. Continue current care practices.".to_string());
            } else {
                score = HEALTHY_UNCERTAIN_SCORE;
                recommendations.push(
                    "Plant looks mostly healthy. Re-check in a few days to confirm.".to_string(),
                );
            }
        } else {
            score -= disease_impact(primary);

            if !primary.treatment.trim().is_empty() && primary.treatment != DEFAULT_TREATMENT {
                recommendations.push(format!("Treatment: {}", primary.treatment));
            }
            if let Some(measure) = primary.preventive_measures.first() {
                recommendations.push(format!("Prevention: {}", measure));
            }
        }
    }

    if let Some(pest) = pests.first() {
        score -= PEST_PENALTY;
        recommendations.push(format!(
            "Pest alert: {} detected. {}",
            display_name(&pest.pest),
            pest.treatment
        ));
    }

    if let Some(nutrient) = nutrients.first() {
        score -= NUTRIENT_PENALTY;
        recommendations.push(format!(
            "Nutrient alert: {}. {}",
            display_name(&nutrient.nutrient),
            nutrient.treatment
        ));
    }

    let score = score.clamp(0, 100) as u8;
    let status = HealthStatus::from_score(score);

    if recommendations.is_empty() {
        recommendations.extend(FALLBACK_RECOMMENDATIONS.iter().map(|r| r.to_string()));
    }
    recommendations.truncate(MAX_RECOMMENDATIONS);

    OverallHealth {
        score,
        status,
        recommendations,
    }
}

/// Severity weight plus the aggressive-family surcharge
pub fn disease_impact(disease: &DetectionResult) -> i32 {
    let base = match disease.severity {
        Severity::High => HIGH_SEVERITY_IMPACT,
        Severity::Medium => MEDIUM_SEVERITY_IMPACT,
        Severity::Low => LOW_SEVERITY_IMPACT,
    };

    let aggressive = AGGRESSIVE_DISEASE_MARKERS
        .iter()
        .any(|marker| disease.disease.contains(marker));

    if aggressive {
        base + AGGRESSIVE_DISEASE_IMPACT
    } else {
        base
    }
}

fn display_name(id: &str) -> String {
    id.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{normalize_detection, RawDetection};
    use crate::synthetic::lookup_tables::soil_entry;
    use crate::types::{PlantPart, SoilTexture};

    fn soil() -> SoilAnalysisResult {
        let base = soil_entry(SoilTexture::Loamy);
        SoilAnalysisResult {
            soil_type: base.texture,
            confidence: 0.8,
            ph: base.ph,
            moisture: base.moisture,
            organic_matter: base.organic_matter,
            drainage: base.drainage,
            fertility: base.fertility,
            recommendations: vec![],
        }
    }

    fn disease(id: &str, confidence: f64, severity: Option<&str>) -> DetectionResult {
        let raw = RawDetection {
            severity: severity.map(|s| s.to_string()),
            ..RawDetection::new(id, confidence)
        };
        normalize_detection(&raw, PlantPart::Leaf)
    }

    fn pest() -> PestDetectionResult {
        PestDetectionResult {
            pest: "aphids".to_string(),
            confidence: 0.8,
            severity: Severity::Medium,
            treatment: "Spray neem oil".to_string(),
            affected_part: PlantPart::Leaf,
            lifecycle: String::new(),
            biological_control: vec![],
            chemical_control: vec![],
            damage: String::new(),
        }
    }

    fn nutrient() -> NutrientDeficiencyResult {
        NutrientDeficiencyResult {
            nutrient: "nitrogen_deficiency".to_string(),
            confidence: 0.7,
            severity: Severity::Low,
            symptoms: vec![],
            treatment: "Apply urea".to_string(),
            fertilizer_recommendation: String::new(),
            soil_amendment: String::new(),
            affected_growth: String::new(),
        }
    }

    #[test]
    fn test_confident_healthy_plant() {
        let health = calculate_overall_health(&[disease("healthy", 0.9, None)], &[], &[], &soil());
        assert_eq!(health.score, 98);
        assert_eq!(health.status, HealthStatus::Excellent);
        assert_eq!(health.recommendations.len(), 1);
    }

    #[test]
    fn test_uncertain_healthy_plant() {
        let health = calculate_overall_health(&[disease("healthy", 0.8, None)], &[], &[], &soil());
        assert_eq!(health.score, 85);
        assert_eq!(health.status, HealthStatus::Good);
    }

    #[test]
    fn test_high_severity_blight() {
        let health = calculate_overall_health(
            &[disease("leaf_blight", 0.88, Some("high"))],
            &[],
            &[],
            &soil(),
        );
        // impact 40 + 15; 45 sits in the [25, 50) bucket
        assert_eq!(health.score, 45);
        assert_eq!(health.status, HealthStatus::Poor);
    }

    #[test]
    fn test_unrecognized_severity_costs_low_impact() {
        // "moderate" is not one of low/medium/high
        let health = calculate_overall_health(
            &[disease("leaf_spot", 0.7, Some("moderate"))],
            &[],
            &[],
            &soil(),
        );
        assert_eq!(health.score, 85);
        assert_eq!(health.status, HealthStatus::Good);
    }

    #[test]
    fn test_negated_healthy_label_is_scored_as_disease() {
        let health = calculate_overall_health(
            &[disease("unhealthy_leaf", 0.9, Some("high"))],
            &[],
            &[],
            &soil(),
        );
        assert_eq!(health.score, 60);
        assert_eq!(health.status, HealthStatus::Fair);
    }

    #[test]
    fn test_confidence_overshoot_stays_healthy() {
        let health =
            calculate_overall_health(&[disease("healthy", 1.0000001, None)], &[], &[], &soil());
        assert_eq!(health.score, 98);
        assert_eq!(health.status, HealthStatus::Excellent);
    }

    #[test]
    fn test_blank_treatment_is_not_recommended() {
        let mut d = disease("leaf_spot", 0.7, Some("low"));
        d.treatment = String::new();
        let health = calculate_overall_health(&[d], &[], &[], &soil());
        assert!(health
            .recommendations
            .iter()
            .all(|r| !r.starts_with("Treatment:")));
    }

    #[test]
    fn test_marker_match_is_case_sensitive() {
        let lower = disease("root_rot", 0.9, Some("low"));
        let upper = disease("Root_Rot", 0.9, Some("low"));
        assert_eq!(disease_impact(&lower), 30);
        assert_eq!(disease_impact(&upper), 15);
    }

    #[test]
    fn test_default_treatment_is_not_recommended() {
        let health = calculate_overall_health(&[disease("leaf_rust", 0.81, None)], &[], &[], &soil());
        assert_eq!(health.score, 75);
        assert_eq!(
            health.recommendations,
            vec!["Prevention: Practice good agricultural hygiene".to_string()]
        );
    }

    #[test]
    fn test_pest_and_nutrient_penalties() {
        let mut d = disease("leaf_spot", 0.7, Some("medium"));
        d.treatment = "Apply mancozeb".to_string();
        let health = calculate_overall_health(&[d], &[pest()], &[nutrient()], &soil());
        // 100 - 25 - 20 - 10
        assert_eq!(health.score, 45);
        assert_eq!(
            health.recommendations,
            vec![
                "Treatment: Apply mancozeb".to_string(),
                "Prevention: Practice good agricultural hygiene".to_string(),
                "Pest alert: aphids detected. Spray neem oil".to_string(),
                "Nutrient alert: nitrogen deficiency. Apply urea".to_string(),
            ]
        );
    }

    #[test]
    fn test_worst_case_is_critical() {
        let mut d = disease("stem_blight_rot", 0.9, Some("high"));
        d.treatment = "Remove plant".to_string();
        let health = calculate_overall_health(&[d], &[pest()], &[nutrient()], &soil());
        // 100 - 55 - 20 - 10 = 15
        assert_eq!(health.score, 15);
        assert_eq!(health.status, HealthStatus::Critical);
        assert!(health.recommendations.len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_fallback_recommendations() {
        let health = calculate_overall_health(&[], &[], &[], &soil());
        assert_eq!(health.score, 100);
        assert_eq!(
            health.recommendations,
            vec![
                "Monitor plant growth regularly.".to_string(),
                "Ensure proper hydration and sunlight.".to_string(),
            ]
        );
    }
}

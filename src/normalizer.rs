//! Detection-response normalizer
//!
//! The backend contract is loose: only `disease` and `confidence` are
//! guaranteed. `RawDetection` captures the full shape with optional fields
//! and `normalize_detection` fills the gaps with fixed defaults. Only absent
//! fields take a default; a field the backend sent, even empty, is kept.

use crate::types::{DetectionResult, PlantPart, Severity};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEVERITY: Severity = Severity::Medium;
pub const DEFAULT_TREATMENT: &str = "Consult agricultural expert";
pub const DEFAULT_SYMPTOM: &str = "Symptoms not specified";
pub const DEFAULT_PREVENTIVE_MEASURE: &str = "Practice good agricultural hygiene";
pub const DEFAULT_ECONOMIC_IMPACT: &str = "Economic impact varies";

/// Smallest confidence read as a percentage; (1, 2) is float overshoot
pub const PERCENT_CONFIDENCE_MIN: f64 = 2.0;

/// Raw `/detect-disease` response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDetection {
    pub disease: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preventive_measures: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_quality: Option<String>,
}

impl RawDetection {
    pub fn new(disease: impl Into<String>, confidence: f64) -> Self {
        Self {
            disease: disease.into(),
            confidence,
            ..Default::default()
        }
    }
}

/// Map a raw backend response to exactly one `DetectionResult`
///
/// Pure mapping: the disease id is copied verbatim and the confidence is
/// only brought into [0, 1] (see [`normalize_confidence`]). Missing optional
/// fields take the module defaults. Unrecognized severity labels score as
/// low, the same bucket the health aggregator uses for them.
pub fn normalize_detection(raw: &RawDetection, plant_part: PlantPart) -> DetectionResult {
    let severity = match raw.severity.as_deref() {
        None => DEFAULT_SEVERITY,
        Some(label) => Severity::parse(label).unwrap_or_else(|| {
            tracing::debug!("Unrecognized severity '{}', scoring as low", label);
            Severity::Low
        }),
    };

    DetectionResult {
        disease: raw.disease.clone(),
        confidence: normalize_confidence(raw.confidence),
        severity,
        treatment: raw
            .treatment
            .clone()
            .unwrap_or_else(|| DEFAULT_TREATMENT.to_string()),
        affected_part: plant_part,
        symptoms: raw
            .symptoms
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_SYMPTOM.to_string()]),
        preventive_measures: raw
            .preventive_measures
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_PREVENTIVE_MEASURE.to_string()]),
        economic_impact: raw
            .economic_impact
            .clone()
            .unwrap_or_else(|| DEFAULT_ECONOMIC_IMPACT.to_string()),
    }
}

/// Bring a backend confidence into [0, 1]
///
/// Values in [2, 100] are percentages. Anything else out of range is
/// clamped, so a softmax overshoot such as 1.0000001 reads as 1.0. NaN
/// becomes 0.
pub fn normalize_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else if (PERCENT_CONFIDENCE_MIN..=100.0).contains(&confidence) {
        confidence / 100.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

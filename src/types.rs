//! Result types returned by the detector
//!
//! Field names serialize in camelCase and enum values in lowercase so the
//! JSON matches what the web client already renders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Parse a backend severity label (case-insensitive)
    ///
    /// Returns None for labels outside low/medium/high.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plant organ an image or finding is associated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantPart {
    Leaf,
    Stem,
    Fruit,
    Soil,
    Root,
}

impl PlantPart {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "leaf" | "leaves" => Some(PlantPart::Leaf),
            "stem" | "stems" => Some(PlantPart::Stem),
            "fruit" | "fruits" => Some(PlantPart::Fruit),
            "soil" => Some(PlantPart::Soil),
            "root" | "roots" => Some(PlantPart::Root),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantPart::Leaf => "leaf",
            PlantPart::Stem => "stem",
            PlantPart::Fruit => "fruit",
            PlantPart::Soil => "soil",
            PlantPart::Root => "root",
        }
    }
}

impl fmt::Display for PlantPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilTexture {
    Clay,
    Sandy,
    Loamy,
    Silt,
}

impl SoilTexture {
    pub const ALL: [SoilTexture; 4] = [
        SoilTexture::Clay,
        SoilTexture::Sandy,
        SoilTexture::Loamy,
        SoilTexture::Silt,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drainage {
    Poor,
    Moderate,
    Good,
    Excessive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fertility {
    Low,
    Medium,
    High,
}

/// Qualitative health bucket derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl HealthStatus {
    /// Map a 0-100 score to its status bucket
    ///
    /// - [90, 100] → Excellent
    /// - [75, 90) → Good
    /// - [50, 75) → Fair
    /// - [25, 50) → Poor
    /// - [0, 25) → Critical
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 90 => HealthStatus::Excellent,
            s if s >= 75 => HealthStatus::Good,
            s if s >= 50 => HealthStatus::Fair,
            s if s >= 25 => HealthStatus::Poor,
            _ => HealthStatus::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Good,
    Fair,
    Poor,
}

impl ImageQuality {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "good" | "excellent" | "high" => Some(ImageQuality::Good),
            "fair" | "medium" => Some(ImageQuality::Fair),
            "poor" | "low" => Some(ImageQuality::Poor),
            _ => None,
        }
    }
}

/// One disease finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub disease: String,
    pub confidence: f64,
    pub severity: Severity,
    pub treatment: String,
    pub affected_part: PlantPart,
    pub symptoms: Vec<String>,
    pub preventive_measures: Vec<String>,
    pub economic_impact: String,
}

impl DetectionResult {
    /// True when the disease id denotes a healthy plant ("healthy", "Tomato___healthy", ...)
    pub fn is_healthy(&self) -> bool {
        is_healthy_label(&self.disease)
    }
}

/// Negations that turn a following "healthy" token into a disease label
const HEALTHY_NEGATIONS: [&str; 2] = ["not", "non"];

/// "healthy" as a whole word of the id, not preceded by a negation
///
/// Words are split on anything that is not ASCII alphanumeric, so
/// `Tomato___healthy` matches while `unhealthy_leaf` and `not_healthy` do not.
pub(crate) fn is_healthy_label(disease: &str) -> bool {
    let lower = disease.to_ascii_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    words.iter().enumerate().any(|(i, word)| {
        *word == "healthy"
            && !(i > 0 && HEALTHY_NEGATIONS.contains(&words[i - 1]))
    })
}

/// One pest finding (synthetic, see [`crate::synthetic`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PestDetectionResult {
    pub pest: String,
    pub confidence: f64,
    pub severity: Severity,
    pub treatment: String,
    pub affected_part: PlantPart,
    pub lifecycle: String,
    pub biological_control: Vec<String>,
    pub chemical_control: Vec<String>,
    pub damage: String,
}

/// One nutrient-deficiency finding (synthetic, see [`crate::synthetic`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientDeficiencyResult {
    pub nutrient: String,
    pub confidence: f64,
    pub severity: Severity,
    pub symptoms: Vec<String>,
    pub treatment: String,
    pub fertilizer_recommendation: String,
    pub soil_amendment: String,
    pub affected_growth: String,
}

/// Soil snapshot (synthetic, see [`crate::synthetic`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisResult {
    pub soil_type: SoilTexture,
    pub confidence: f64,
    pub ph: f64,
    pub moisture: f64,
    pub organic_matter: f64,
    pub drainage: Drainage,
    pub fertility: Fertility,
    pub recommendations: Vec<String>,
}

/// Composite health assessment for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallHealth {
    pub score: u8,
    pub status: HealthStatus,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub plant_part: PlantPart,
    pub quality: ImageQuality,
    /// End-to-end processing time in milliseconds
    pub processing_time: u64,
}

/// Full response for one analyzed image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiClassResult {
    pub diseases: Vec<DetectionResult>,
    pub pests: Vec<PestDetectionResult>,
    pub nutrients: Vec<NutrientDeficiencyResult>,
    pub soil: SoilAnalysisResult,
    pub overall_health: OverallHealth,
    pub image_analysis: ImageAnalysis,
}

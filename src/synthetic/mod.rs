//! Synthetic-result generators
//!
//! Plausible randomized pest, nutrient, soil and disease findings built from
//! small fixed lookup tables. They fill the panels the detection backend
//! does not model per image, and back the full fallback when the backend is
//! unreachable. None of these values are inferred from the image.
//!
//! Every generator takes the random source as a parameter so callers (and
//! tests) control determinism.

pub mod lookup_tables;
pub mod pests;
pub mod nutrients;
pub mod soil;
pub mod diseases;

pub use pests::generate_pests;
pub use nutrients::generate_nutrients;
pub use soil::generate_soil;
pub use diseases::generate_diseases;

use crate::types::{NutrientDeficiencyResult, PestDetectionResult, SoilAnalysisResult};
use rand::Rng;

/// Secondary signals attached to every analyzed image
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryFindings {
    pub pests: Vec<PestDetectionResult>,
    pub nutrients: Vec<NutrientDeficiencyResult>,
    pub soil: SoilAnalysisResult,
}

/// Run the pest, nutrient and soil generators in that order
pub fn generate_secondary<R: Rng + ?Sized>(rng: &mut R) -> SecondaryFindings {
    let pests = generate_pests(rng);
    let nutrients = generate_nutrients(rng);
    let soil = generate_soil(rng);
    SecondaryFindings { pests, nutrients, soil }
}

//! Synthetic soil analysis
//!
//! Always produces one snapshot: a uniformly chosen texture from [`SOILS`]
//! with its baseline values jittered. Filler signal, not a measurement.

use crate::synthetic::lookup_tables::{to_strings, SOILS};
use crate::types::SoilAnalysisResult;
use rand::seq::SliceRandom;
use rand::Rng;

pub const PH_JITTER: f64 = 0.3;
pub const MOISTURE_JITTER: f64 = 10.0;
pub const ORGANIC_MATTER_JITTER: f64 = 0.5;
pub const SOIL_CONFIDENCE_MIN: f64 = 0.75;
pub const SOIL_CONFIDENCE_MAX: f64 = 0.95;

/// Generate exactly one soil snapshot
///
/// pH, moisture and organic matter get independent uniform noise of
/// ±0.3, ±10 points and ±0.5 points, kept inside physical ranges.
/// Drainage, fertility and recommendations come from the texture baseline.
pub fn generate_soil<R: Rng + ?Sized>(rng: &mut R) -> SoilAnalysisResult {
    let entry = SOILS.choose(rng).unwrap_or(&SOILS[0]);

    let ph = (entry.ph + rng.gen_range(-PH_JITTER..=PH_JITTER)).clamp(0.0, 14.0);
    let moisture =
        (entry.moisture + rng.gen_range(-MOISTURE_JITTER..=MOISTURE_JITTER)).clamp(0.0, 100.0);
    let organic_matter = (entry.organic_matter
        + rng.gen_range(-ORGANIC_MATTER_JITTER..=ORGANIC_MATTER_JITTER))
    .max(0.0);
    let confidence = rng.gen_range(SOIL_CONFIDENCE_MIN..=SOIL_CONFIDENCE_MAX);

    SoilAnalysisResult {
        soil_type: entry.texture,
        confidence,
        ph,
        moisture,
        organic_matter,
        drainage: entry.drainage,
        fertility: entry.fertility,
        recommendations: to_strings(entry.recommendations),
    }
}

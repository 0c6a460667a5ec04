//! Synthetic nutrient-deficiency findings
//!
//! Filler signal drawn from [`NUTRIENTS`], not an inference result.

use crate::synthetic::lookup_tables::{to_strings, NUTRIENTS};
use crate::types::{NutrientDeficiencyResult, Severity};
use rand::seq::SliceRandom;
use rand::Rng;

pub const NUTRIENT_EMISSION_PROBABILITY: f64 = 0.6;
pub const NUTRIENT_CONFIDENCE_MIN: f64 = 0.65;
pub const NUTRIENT_CONFIDENCE_MAX: f64 = 0.90;

/// Draw zero or one nutrient finding (emitted with probability 0.6)
pub fn generate_nutrients<R: Rng + ?Sized>(rng: &mut R) -> Vec<NutrientDeficiencyResult> {
    let Some(entry) = NUTRIENTS.choose(rng) else {
        return Vec::new();
    };

    if !rng.gen_bool(NUTRIENT_EMISSION_PROBABILITY) {
        return Vec::new();
    }

    let confidence = rng.gen_range(NUTRIENT_CONFIDENCE_MIN..=NUTRIENT_CONFIDENCE_MAX);
    let severity = *Severity::ALL.choose(rng).unwrap_or(&Severity::Medium);

    vec![NutrientDeficiencyResult {
        nutrient: entry.id.to_string(),
        confidence,
        severity,
        symptoms: to_strings(entry.symptoms),
        treatment: entry.treatment.to_string(),
        fertilizer_recommendation: entry.fertilizer.to_string(),
        soil_amendment: entry.soil_amendment.to_string(),
        affected_growth: entry.affected_growth.to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let nutrients = generate_nutrients(&mut rng);
            assert!(nutrients.len() <= 1);
            for n in &nutrients {
                assert!(n.confidence >= NUTRIENT_CONFIDENCE_MIN && n.confidence <= NUTRIENT_CONFIDENCE_MAX);
                assert!(n.nutrient.ends_with("_deficiency"));
                assert!(!n.symptoms.is_empty());
            }
        }
    }

    #[test]
    fn test_emission_rate_is_roughly_sixty_percent() {
        let mut rng = StdRng::seed_from_u64(99);
        let trials = 4000;
        let emitted = (0..trials).filter(|_| !generate_nutrients(&mut rng).is_empty()).count();
        let rate = emitted as f64 / trials as f64;
        assert!((0.55..=0.65).contains(&rate), "rate {}", rate);
    }
}

//! Synthetic disease findings for the full fallback path
//!
//! Used only when the detection backend could not be reached or returned
//! an unusable response. Candidates come from the plant-part table in
//! [`diseases_for`]; none of this is inference.

use crate::synthetic::lookup_tables::{diseases_for, to_strings};
use crate::types::{DetectionResult, PlantPart, Severity};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DISEASE_CONFIDENCE_MIN: f64 = 0.75;
pub const DISEASE_CONFIDENCE_MAX: f64 = 0.95;

/// Draw one or two distinct disease candidates for a plant part
///
/// Candidates are sorted by descending confidence so the first entry is
/// the primary finding.
pub fn generate_diseases<R: Rng + ?Sized>(rng: &mut R, part: PlantPart) -> Vec<DetectionResult> {
    let table = diseases_for(part);
    let count = rng.gen_range(1..=2).min(table.len());

    let mut findings: Vec<DetectionResult> = table
        .choose_multiple(rng, count)
        .map(|entry| {
            let confidence = rng.gen_range(DISEASE_CONFIDENCE_MIN..=DISEASE_CONFIDENCE_MAX);
            let severity = *Severity::ALL.choose(rng).unwrap_or(&Severity::Medium);
            DetectionResult {
                disease: entry.id.to_string(),
                confidence,
                severity,
                treatment: entry.treatment.to_string(),
                affected_part: part,
                symptoms: to_strings(entry.symptoms),
                preventive_measures: to_strings(entry.preventive_measures),
                economic_impact: entry.economic_impact.to_string(),
            }
        })
        .collect();

    findings.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_or_two_sorted_candidates() {
        let mut rng = StdRng::seed_from_u64(21);
        for part in [PlantPart::Leaf, PlantPart::Stem, PlantPart::Fruit, PlantPart::Soil] {
            for _ in 0..100 {
                let findings = generate_diseases(&mut rng, part);
                assert!((1..=2).contains(&findings.len()));
                assert!(findings.iter().all(|f| f.affected_part == part));
                assert!(findings
                    .iter()
                    .all(|f| f.confidence >= DISEASE_CONFIDENCE_MIN && f.confidence <= DISEASE_CONFIDENCE_MAX));
                if findings.len() == 2 {
                    assert!(findings[0].confidence >= findings[1].confidence);
                    assert_ne!(findings[0].disease, findings[1].disease);
                }
            }
        }
    }
}

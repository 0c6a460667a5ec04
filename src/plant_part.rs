//! Plant-part inference
//!
//! Guesses which organ an uploaded image shows. A usable hint from the
//! detection backend wins; otherwise the filename is searched for keywords.

use crate::types::PlantPart;

/// Filename keywords, checked in priority order
const FILENAME_KEYWORDS: [(&str, PlantPart); 4] = [
    ("leaf", PlantPart::Leaf),
    ("stem", PlantPart::Stem),
    ("fruit", PlantPart::Fruit),
    ("soil", PlantPart::Soil),
];

/// Infer the plant part for an image
///
/// # Arguments
/// * `filename` - Original upload filename
/// * `hint` - Backend-supplied `affectedPart`, if any
/// * `is_healthy` - Whether the primary finding is a healthy-plant result
///
/// # Returns
/// Always a plant part. Hints of "none"/"unknown" or labels that do not name
/// a plant part are ignored. Healthy results without a hint are leaf images
/// (most of the training set); otherwise the filename decides, defaulting
/// to leaf.
pub fn infer_plant_part(filename: &str, hint: Option<&str>, is_healthy: bool) -> PlantPart {
    if let Some(part) = hint.and_then(parse_hint) {
        return part;
    }

    if is_healthy {
        return PlantPart::Leaf;
    }

    from_filename(filename)
}

/// Case-insensitive keyword match on the filename, defaulting to leaf
pub fn from_filename(filename: &str) -> PlantPart {
    let lower = filename.to_lowercase();
    FILENAME_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, part)| *part)
        .unwrap_or(PlantPart::Leaf)
}

fn parse_hint(hint: &str) -> Option<PlantPart> {
    let trimmed = hint.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("unknown")
    {
        return None;
    }
    PlantPart::parse(trimmed)
}

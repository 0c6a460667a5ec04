//! Fixed lookup tables for the synthetic generators
//!
//! Each entry carries the descriptive text the UI shows for a category.
//! Values are agronomic rules of thumb, not calibrated measurements.

use crate::types::{Drainage, Fertility, PlantPart, SoilTexture};

/// Pest category entry
#[derive(Debug, Clone)]
pub struct PestEntry {
    pub id: &'static str,
    pub treatment: &'static str,
    pub affected_part: PlantPart,
    pub lifecycle: &'static str,
    pub biological_control: &'static [&'static str],
    pub chemical_control: &'static [&'static str],
    pub damage: &'static str,
}

/// Nutrient deficiency entry
#[derive(Debug, Clone)]
pub struct NutrientEntry {
    pub id: &'static str,
    pub symptoms: &'static [&'static str],
    pub treatment: &'static str,
    pub fertilizer: &'static str,
    pub soil_amendment: &'static str,
    pub affected_growth: &'static str,
}

/// Baseline soil properties for a texture class
#[derive(Debug, Clone)]
pub struct SoilEntry {
    pub texture: SoilTexture,
    pub ph: f64,
    pub moisture: f64,
    pub organic_matter: f64,
    pub drainage: Drainage,
    pub fertility: Fertility,
    pub recommendations: &'static [&'static str],
}

/// Disease candidate for a plant part
#[derive(Debug, Clone)]
pub struct DiseaseEntry {
    pub id: &'static str,
    pub treatment: &'static str,
    pub symptoms: &'static [&'static str],
    pub preventive_measures: &'static [&'static str],
    pub economic_impact: &'static str,
}

// ============================================================================
// PESTS
// ============================================================================

pub static PESTS: &[PestEntry] = &[
    PestEntry {
        id: "aphids",
        treatment: "Spray neem oil or insecticidal soap on affected foliage",
        affected_part: PlantPart::Leaf,
        lifecycle: "Egg, nymph and adult stages; colonies reproduce asexually within 7-10 days",
        biological_control: &["Ladybird beetles", "Lacewing larvae", "Parasitic wasps (Aphidius)"],
        chemical_control: &["Imidacloprid", "Thiamethoxam"],
        damage: "Sap feeding causes curled, yellowing leaves and spreads viral diseases",
    },
    PestEntry {
        id: "thrips",
        treatment: "Use blue sticky traps and apply spinosad",
        affected_part: PlantPart::Leaf,
        lifecycle: "Egg, two larval, prepupal, pupal and adult stages over 2-3 weeks",
        biological_control: &["Predatory mites (Amblyseius)", "Minute pirate bugs"],
        chemical_control: &["Spinosad", "Fipronil"],
        damage: "Rasping feeding leaves silvery streaks and distorts flowers and fruit",
    },
    PestEntry {
        id: "caterpillars",
        treatment: "Hand-pick larvae and apply Bacillus thuringiensis (Bt)",
        affected_part: PlantPart::Fruit,
        lifecycle: "Egg, larva (several instars), pupa and adult moth or butterfly",
        biological_control: &["Bacillus thuringiensis", "Trichogramma wasps", "Birds"],
        chemical_control: &["Chlorantraniliprole", "Emamectin benzoate"],
        damage: "Chewing damage to leaves and bored fruit, opening entry points for rot",
    },
];

// ============================================================================
// NUTRIENTS
// ============================================================================

pub static NUTRIENTS: &[NutrientEntry] = &[
    NutrientEntry {
        id: "nitrogen_deficiency",
        symptoms: &["Yellowing of older leaves", "Stunted growth", "Pale green foliage"],
        treatment: "Apply nitrogen-rich fertilizer in split doses",
        fertilizer: "Urea (46-0-0) or ammonium sulfate",
        soil_amendment: "Incorporate well-rotted manure or compost",
        affected_growth: "Reduced vegetative growth and lower yield",
    },
    NutrientEntry {
        id: "phosphorus_deficiency",
        symptoms: &["Purplish leaf undersides", "Poor root development", "Delayed maturity"],
        treatment: "Apply phosphorus fertilizer near the root zone",
        fertilizer: "Single super phosphate or DAP (18-46-0)",
        soil_amendment: "Add bone meal and correct acidic pH with lime",
        affected_growth: "Weak roots and delayed flowering",
    },
    NutrientEntry {
        id: "potassium_deficiency",
        symptoms: &["Scorched leaf margins", "Weak stems", "Small fruit"],
        treatment: "Apply potash fertilizer and keep soil moisture even",
        fertilizer: "Muriate of potash (0-0-60) or sulfate of potash",
        soil_amendment: "Add wood ash or green manure",
        affected_growth: "Poor fruit quality and lower disease resistance",
    },
];

// ============================================================================
// SOIL TEXTURES
// ============================================================================

pub static SOILS: &[SoilEntry] = &[
    SoilEntry {
        texture: SoilTexture::Clay,
        ph: 7.2,
        moisture: 45.0,
        organic_matter: 3.5,
        drainage: Drainage::Poor,
        fertility: Fertility::High,
        recommendations: &[
            "Add organic matter to improve soil structure",
            "Avoid working the soil when wet",
            "Use raised beds to improve drainage",
        ],
    },
    SoilEntry {
        texture: SoilTexture::Sandy,
        ph: 6.0,
        moisture: 15.0,
        organic_matter: 1.2,
        drainage: Drainage::Excessive,
        fertility: Fertility::Low,
        recommendations: &[
            "Mulch to conserve moisture",
            "Apply fertilizer in small, frequent doses",
            "Incorporate compost to improve water retention",
        ],
    },
    SoilEntry {
        texture: SoilTexture::Loamy,
        ph: 6.5,
        moisture: 30.0,
        organic_matter: 4.0,
        drainage: Drainage::Good,
        fertility: Fertility::High,
        recommendations: &[
            "Maintain organic matter with annual compost",
            "Rotate crops to preserve soil health",
        ],
    },
    SoilEntry {
        texture: SoilTexture::Silt,
        ph: 6.8,
        moisture: 35.0,
        organic_matter: 2.5,
        drainage: Drainage::Moderate,
        fertility: Fertility::Medium,
        recommendations: &[
            "Avoid compaction from heavy machinery",
            "Use cover crops to prevent surface crusting",
            "Add coarse organic matter to improve aeration",
        ],
    },
];

// ============================================================================
// DISEASES BY PLANT PART
// ============================================================================

static LEAF_DISEASES: &[DiseaseEntry] = &[
    DiseaseEntry {
        id: "leaf_blight",
        treatment: "Apply copper-based fungicide and remove infected leaves",
        symptoms: &["Brown lesions with yellow halos", "Rapid leaf drying"],
        preventive_measures: &["Avoid overhead irrigation", "Use resistant varieties"],
        economic_impact: "Can reduce yield by 20-40% if untreated",
    },
    DiseaseEntry {
        id: "leaf_spot",
        treatment: "Apply mancozeb or chlorothalonil at 7-10 day intervals",
        symptoms: &["Small circular dark spots", "Premature leaf drop"],
        preventive_measures: &["Improve air circulation", "Remove crop debris"],
        economic_impact: "Moderate yield loss through reduced photosynthesis",
    },
    DiseaseEntry {
        id: "powdery_mildew",
        treatment: "Spray sulfur or potassium bicarbonate",
        symptoms: &["White powdery patches on leaves", "Leaf curling"],
        preventive_measures: &["Space plants for airflow", "Avoid excess nitrogen"],
        economic_impact: "Reduces plant vigor and fruit quality",
    },
    DiseaseEntry {
        id: "leaf_rust",
        treatment: "Apply triazole fungicide at first sign of pustules",
        symptoms: &["Orange-brown pustules on leaf undersides"],
        preventive_measures: &["Plant rust-resistant cultivars", "Destroy volunteer plants"],
        economic_impact: "Losses of 10-30% in susceptible cultivars",
    },
];

static STEM_DISEASES: &[DiseaseEntry] = &[
    DiseaseEntry {
        id: "stem_rot",
        treatment: "Drench base with fungicide and improve drainage",
        symptoms: &["Water-soaked lesions at stem base", "Plant collapse"],
        preventive_measures: &["Avoid waterlogging", "Use treated seed"],
        economic_impact: "Plant loss in affected patches",
    },
    DiseaseEntry {
        id: "stem_canker",
        treatment: "Prune infected stems below the canker and disinfect tools",
        symptoms: &["Sunken dark lesions on stems", "Dieback above lesion"],
        preventive_measures: &["Avoid mechanical wounds", "Sanitize pruning tools"],
        economic_impact: "Gradual decline and reduced productivity",
    },
    DiseaseEntry {
        id: "bacterial_wilt",
        treatment: "Remove and destroy infected plants; no chemical cure",
        symptoms: &["Sudden wilting in daytime", "Brown vascular tissue"],
        preventive_measures: &["Control insect vectors", "Rotate with non-host crops"],
        economic_impact: "Can destroy entire plantings",
    },
];

static FRUIT_DISEASES: &[DiseaseEntry] = &[
    DiseaseEntry {
        id: "fruit_rot",
        treatment: "Remove affected fruit and apply protective fungicide",
        symptoms: &["Soft, sunken lesions on fruit", "Fungal growth on surface"],
        preventive_measures: &["Harvest promptly", "Keep fruit off the soil"],
        economic_impact: "Direct loss of marketable produce",
    },
    DiseaseEntry {
        id: "anthracnose",
        treatment: "Spray azoxystrobin and prune for airflow",
        symptoms: &["Dark sunken spots with pink spore masses"],
        preventive_measures: &["Use disease-free seed", "Avoid wetting fruit"],
        economic_impact: "Post-harvest losses and lower market grade",
    },
    DiseaseEntry {
        id: "blossom_end_rot",
        treatment: "Apply calcium foliar spray and keep watering even",
        symptoms: &["Dark leathery patch at blossom end"],
        preventive_measures: &["Maintain consistent soil moisture", "Lime acidic soils"],
        economic_impact: "Affected fruit is unmarketable",
    },
];

static SOIL_DISEASES: &[DiseaseEntry] = &[
    DiseaseEntry {
        id: "root_rot",
        treatment: "Improve drainage and apply Trichoderma-based biofungicide",
        symptoms: &["Brown mushy roots", "Wilting despite moist soil"],
        preventive_measures: &["Avoid overwatering", "Use well-drained beds"],
        economic_impact: "Stand loss and reduced yield",
    },
    DiseaseEntry {
        id: "damping_off",
        treatment: "Treat seedbeds with captan or thiram",
        symptoms: &["Seedlings collapse at soil line"],
        preventive_measures: &["Use sterile seedling mix", "Avoid dense sowing"],
        economic_impact: "Seedling loss requiring re-sowing",
    },
];

/// Disease candidates for a plant part (roots share the soil-borne table)
pub fn diseases_for(part: PlantPart) -> &'static [DiseaseEntry] {
    match part {
        PlantPart::Leaf => LEAF_DISEASES,
        PlantPart::Stem => STEM_DISEASES,
        PlantPart::Fruit => FRUIT_DISEASES,
        PlantPart::Soil | PlantPart::Root => SOIL_DISEASES,
    }
}

/// Baseline entry for a soil texture
pub fn soil_entry(texture: SoilTexture) -> &'static SoilEntry {
    SOILS
        .iter()
        .find(|entry| entry.texture == texture)
        .unwrap_or(&SOILS[2])
}

pub(crate) fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_texture_has_entry() {
        for texture in SoilTexture::ALL {
            assert_eq!(soil_entry(texture).texture, texture);
        }
    }

    #[test]
    fn test_disease_tables_have_at_least_two_entries() {
        for part in [PlantPart::Leaf, PlantPart::Stem, PlantPart::Fruit, PlantPart::Soil, PlantPart::Root] {
            assert!(diseases_for(part).len() >= 2, "{:?}", part);
        }
    }

    #[test]
    fn test_category_ids() {
        let pests: Vec<_> = PESTS.iter().map(|p| p.id).collect();
        assert_eq!(pests, vec!["aphids", "thrips", "caterpillars"]);
        let nutrients: Vec<_> = NUTRIENTS.iter().map(|n| n.id).collect();
        assert_eq!(
            nutrients,
            vec!["nitrogen_deficiency", "phosphorus_deficiency", "potassium_deficiency"]
        );
    }
}

//! Enhanced disease detector - top-level orchestration
//!
//! One call per image: ask the backend for the disease finding, normalize
//! it, attach synthetic pest/nutrient/soil signals and score the result.
//! When the backend fails for any reason other than plant verification the
//! detector can substitute a fully synthetic result (see
//! [`DetectorConfig::allow_synthetic_fallback`]). Callers cannot tell a
//! synthetic result from a real one, so keep the fallback off wherever an
//! honest failure matters more than a populated screen.

use crate::backend::{DetectionBackend, HttpDetectionBackend, ImagePayload};
use crate::config::DetectorConfig;
use crate::error::DetectionError;
use crate::normalizer::{normalize_detection, RawDetection};
use crate::plant_part::{from_filename, infer_plant_part};
use crate::scorer::calculate_overall_health;
use crate::synthetic::{generate_diseases, generate_secondary};
use crate::types::{is_healthy_label, ImageAnalysis, ImageQuality, MultiClassResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Instant;

/// Main detector
pub struct EnhancedDiseaseDetector<B> {
    backend: B,
    rng: Mutex<StdRng>,
    allow_synthetic_fallback: bool,
}

impl EnhancedDiseaseDetector<HttpDetectionBackend> {
    /// Detector backed by the HTTP detection endpoint
    pub fn from_config(config: &DetectorConfig) -> Result<Self, DetectionError> {
        let backend = HttpDetectionBackend::new(config)?;
        Ok(Self::new(backend).with_synthetic_fallback(config.allow_synthetic_fallback))
    }
}

impl<B: DetectionBackend> EnhancedDiseaseDetector<B> {
    /// Detector with an entropy-seeded random source and fallback enabled
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            rng: Mutex::new(StdRng::from_entropy()),
            allow_synthetic_fallback: true,
        }
    }

    /// Replace the random source (seeded sources make results reproducible)
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn with_synthetic_fallback(mut self, allow: bool) -> Self {
        self.allow_synthetic_fallback = allow;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Analyze one image
    ///
    /// # Errors
    /// - Plant-verification failures, always
    /// - Any other backend failure when synthetic fallback is disabled
    pub async fn detect_multi_class(
        &self,
        image: &ImagePayload,
    ) -> Result<MultiClassResult, DetectionError> {
        let start = Instant::now();

        let mut result = match self.backend.detect(image).await {
            Ok(raw) => self.draw(|rng| assemble_result(&raw, &image.filename, rng)),
            Err(err) if err.is_plant_verification() => {
                tracing::info!("Image rejected by plant verification: {}", err);
                return Err(err);
            }
            Err(err) if self.allow_synthetic_fallback => {
                tracing::warn!("Detection failed, using synthetic result: {}", err);
                self.draw(|rng| synthetic_result(&image.filename, rng))
            }
            Err(err) => {
                tracing::error!("Detection failed: {}", err);
                return Err(err);
            }
        };

        result.image_analysis.processing_time = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Analyzed {}: disease={}, score={}, status={:?}, {}ms",
            image.filename,
            result.diseases.first().map(|d| d.disease.as_str()).unwrap_or("-"),
            result.overall_health.score,
            result.overall_health.status,
            result.image_analysis.processing_time,
        );

        Ok(result)
    }

    fn draw<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // The RNG state stays valid even if a holder panicked
        let mut guard = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *guard)
    }
}

/// Build a result from a successful backend detection
///
/// `processing_time` is left at 0 for the caller to fill in.
pub fn assemble_result<R: Rng + ?Sized>(
    raw: &RawDetection,
    filename: &str,
    rng: &mut R,
) -> MultiClassResult {
    let plant_part = infer_plant_part(
        filename,
        raw.affected_part.as_deref(),
        is_healthy_label(&raw.disease),
    );
    let disease = normalize_detection(raw, plant_part);
    let quality = raw
        .image_quality
        .as_deref()
        .and_then(ImageQuality::parse)
        .unwrap_or(ImageQuality::Good);

    let secondary = generate_secondary(rng);
    let diseases = vec![disease];
    let overall_health = calculate_overall_health(
        &diseases,
        &secondary.pests,
        &secondary.nutrients,
        &secondary.soil,
    );

    MultiClassResult {
        diseases,
        pests: secondary.pests,
        nutrients: secondary.nutrients,
        soil: secondary.soil,
        overall_health,
        image_analysis: ImageAnalysis {
            plant_part,
            quality,
            processing_time: 0,
        },
    }
}

/// Build a fully synthetic result from the filename alone
///
/// The disease generator proposes one or two candidates; the most
/// confident one becomes the primary finding.
pub fn synthetic_result<R: Rng + ?Sized>(filename: &str, rng: &mut R) -> MultiClassResult {
    let plant_part = from_filename(filename);
    let diseases: Vec<_> = generate_diseases(rng, plant_part).into_iter().take(1).collect();

    let secondary = generate_secondary(rng);
    let overall_health = calculate_overall_health(
        &diseases,
        &secondary.pests,
        &secondary.nutrients,
        &secondary.soil,
    );

    MultiClassResult {
        diseases,
        pests: secondary.pests,
        nutrients: secondary.nutrients,
        soil: secondary.soil,
        overall_health,
        image_analysis: ImageAnalysis {
            plant_part,
            quality: ImageQuality::Good,
            processing_time: 0,
        },
    }
}

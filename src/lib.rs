//! Plant Health Scorer
//!
//! Multi-signal plant health analysis for a single uploaded image.
//!
//! Pipeline:
//! - `backend/`: disease detection over HTTP (`POST /detect-disease`)
//! - `normalizer`: loose backend responses to complete `DetectionResult`s
//! - `plant_part`: which organ the image shows
//! - `synthetic/`: randomized pest, nutrient, soil and fallback disease findings
//! - `scorer`: 0-100 health score, status bucket and recommendations
//! - `detector`: `EnhancedDiseaseDetector::detect_multi_class` ties it together
//!
//! Alongside the detector, `client/` wraps the community, voice and profile
//! endpoints of the same backend and `storage` holds the signed-in profile.

pub mod types;
pub mod error;
pub mod config;
pub mod plant_part;
pub mod normalizer;
pub mod synthetic;
pub mod scorer;
pub mod backend;
pub mod detector;
pub mod client;
pub mod storage;

// Re-export commonly used types
pub use types::*;
pub use error::{ClientError, DetectionError};
pub use config::DetectorConfig;
pub use plant_part::infer_plant_part;
pub use normalizer::{normalize_detection, RawDetection};
pub use scorer::calculate_overall_health;
pub use backend::{DetectionBackend, HttpDetectionBackend, ImagePayload};
pub use detector::EnhancedDiseaseDetector;
pub use client::ApiClient;
pub use storage::{MemoryProfileStore, ProfileStore, UserProfile};

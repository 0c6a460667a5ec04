// Analyze one plant image and print the multi-class result as JSON
//
// Usage: cargo run --features cli --bin analyze_image -- <image> [config.json]

use anyhow::Context;
use plant_health_scorer::{DetectorConfig, EnhancedDiseaseDetector, ImagePayload};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plant_health_scorer=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let image_path = PathBuf::from(
        args.next()
            .context("Usage: analyze_image <image> [config.json]")?,
    );

    // Config file if given, otherwise AGRISPHERE_* environment variables
    let config = match args.next() {
        Some(path) => DetectorConfig::load(&PathBuf::from(path))?,
        None => DetectorConfig::from_env()?,
    };

    tracing::info!("Configuration:");
    tracing::info!("  API URL: {}", config.api_base_url);
    tracing::info!("  Synthetic fallback: {}", config.allow_synthetic_fallback);
    tracing::info!("  Timeout: {:?}", config.request_timeout());

    let image = ImagePayload::from_path(&image_path)
        .await
        .with_context(|| format!("Failed to read image: {:?}", image_path))?;

    let detector = EnhancedDiseaseDetector::from_config(&config)
        .context("Failed to build detection client")?;

    let result = detector
        .detect_multi_class(&image)
        .await
        .with_context(|| format!("Analysis failed for {:?}", image_path))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

//! Voice assistant query
//!
//! `POST /voice-query` answers farmer questions. When the backend cannot be
//! reached the caller still gets a scripted answer picked by keyword, marked
//! with `fallback: true`.

use crate::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceQuery {
    pub text: String,
    pub language: String,
}

impl VoiceQuery {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceAnswer {
    pub text: String,
    /// Text fed to speech synthesis; may differ from the displayed text
    pub audio_text: String,
    #[serde(default)]
    pub fallback: bool,
}

#[derive(Debug, Deserialize)]
struct VoiceResponse {
    response: VoiceResponseBody,
}

#[derive(Debug, Deserialize)]
struct VoiceResponseBody {
    text: String,
    #[serde(default)]
    audio_text: Option<String>,
}

// ============================================================================
// Scripted answers
// ============================================================================

struct ScriptedAnswer {
    keywords: &'static [&'static str],
    text: &'static str,
}

static SCRIPTED_ANSWERS: &[ScriptedAnswer] = &[
    ScriptedAnswer {
        keywords: &["weather", "rain", "forecast"],
        text: "Check the local forecast before irrigating or spraying. Avoid spraying if rain is expected within 24 hours.",
    },
    ScriptedAnswer {
        keywords: &["disease", "blight", "spot", "rot"],
        text: "Upload a clear photo of the affected leaf in the disease detection tab. Remove badly infected leaves to slow the spread.",
    },
    ScriptedAnswer {
        keywords: &["fertilizer", "fertiliser", "nutrient", "urea"],
        text: "Test your soil before adding fertilizer. Split nitrogen doses across the growing season for better uptake.",
    },
    ScriptedAnswer {
        keywords: &["price", "market", "sell"],
        text: "Compare prices at nearby mandis before selling. Prices are usually higher just before the main harvest arrives.",
    },
];

const GENERIC_ANSWER: &str =
    "I could not reach the advisory service right now. Please try again in a moment or ask the community forum.";

/// Pick the scripted answer for a question by keyword
pub fn scripted_answer(text: &str) -> VoiceAnswer {
    let lower = text.to_lowercase();
    let reply = SCRIPTED_ANSWERS
        .iter()
        .find(|answer| answer.keywords.iter().any(|k| lower.contains(k)))
        .map(|answer| answer.text)
        .unwrap_or(GENERIC_ANSWER);

    VoiceAnswer {
        text: reply.to_string(),
        audio_text: reply.to_string(),
        fallback: true,
    }
}

impl ApiClient {
    /// Ask the voice assistant; never fails
    pub async fn ask_voice(&self, query: &VoiceQuery) -> VoiceAnswer {
        match self.post_json::<_, VoiceResponse>("voice-query", query).await {
            Ok(VoiceResponse { response }) => VoiceAnswer {
                audio_text: response.audio_text.unwrap_or_else(|| response.text.clone()),
                text: response.text,
                fallback: false,
            },
            Err(e) => {
                tracing::warn!("Voice query failed, using scripted answer: {}", e);
                scripted_answer(&query.text)
            }
        }
    }
}

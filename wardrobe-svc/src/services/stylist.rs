//! Stylist API client
//!
//! Talks to the hosted generative-language service to score and describe an
//! assembled outfit. The client is stateless; the API key is resolved per
//! call so settings changes take effect immediately.
//!
//! Failures here are never surfaced: analysis degrades to a fixed fallback
//! and visualization degrades to `None`, so the outfit preview flow always
//! renders something.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use wardrobe_common::Item;

const GENERATIVE_LANGUAGE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const USER_AGENT: &str = concat!("wardrobe-svc/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

const ANALYSIS_PROMPT: &str = "You are a high-end fashion stylist. Analyze these clothing items \
as an outfit. Provide your feedback in JSON format with the following keys:\n\
- \"score\": A number from 0 to 10.\n\
- \"title\": A catchy 2-3 word name for this outfit style.\n\
- \"analysis\": A 2-sentence professional explanation of why this outfit works \
(or how to improve it).\n\
- \"occasion\": The best setting or event to wear this outfit.\n\n\
Return ONLY the JSON.";

const VISUALIZATION_PROMPT: &str = "You are a fashion magazine editor creating a visual \
description for a lookbook. Analyze these clothing items and write a vivid, detailed \
description (2-3 sentences) of how this complete outfit would look when worn together. \
Focus on the visual harmony and color coordination, the silhouette and proportions, and \
how the pieces complement each other. Write in an elegant, descriptive style as if you \
were captioning a high-end fashion editorial.\n\n\
Return ONLY the description text, no JSON or extra formatting.";

/// Stylist client errors (internal; callers only ever see fallbacks)
#[derive(Debug, Error)]
pub enum StylistError {
    #[error("Stylist API key is not configured")]
    NotConfigured,

    #[error("Failed to read outfit image {0}: {1}")]
    ImageRead(String, String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Structured outfit analysis returned by the stylist service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylingAnalysis {
    /// Styling score, 0-10
    pub score: f64,
    /// 2-3 word outfit title
    pub title: String,
    /// Short professional analysis
    pub analysis: String,
    /// Suggested occasion
    pub occasion: String,
}

/// Fixed analysis substituted whenever the service cannot be reached
/// or its response cannot be parsed
pub fn fallback_analysis() -> StylingAnalysis {
    StylingAnalysis {
        score: 8.0,
        title: "Classic Mix".to_string(),
        analysis: "This combination offers a balanced silhouette and a versatile palette \
                   suitable for various daily activities."
            .to_string(),
        occasion: "Casual Outings".to_string(),
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Inline { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

/// Generative-AI stylist client
pub struct StylistClient {
    http_client: reqwest::Client,
    model: String,
}

impl StylistClient {
    pub fn new() -> Result<Self, StylistError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StylistError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Score and describe an outfit
    ///
    /// Never fails: any transport or parse problem yields the fixed
    /// fallback analysis.
    pub async fn analyze_outfit(&self, api_key: Option<&str>, items: &[Item]) -> StylingAnalysis {
        match self.try_analyze(api_key, items).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, "Outfit analysis failed, using fallback");
                fallback_analysis()
            }
        }
    }

    /// Free-text lookbook description of the outfit, `None` on any failure
    pub async fn describe_outfit(&self, api_key: Option<&str>, items: &[Item]) -> Option<String> {
        match self.generate(api_key, VISUALIZATION_PROMPT, items).await {
            Ok(text) => Some(text.trim().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Outfit visualization failed");
                None
            }
        }
    }

    async fn try_analyze(
        &self,
        api_key: Option<&str>,
        items: &[Item],
    ) -> Result<StylingAnalysis, StylistError> {
        let text = self.generate(api_key, ANALYSIS_PROMPT, items).await?;

        let json = extract_json_object(&text)
            .ok_or_else(|| StylistError::Parse("no JSON object in model response".to_string()))?;

        serde_json::from_str(json).map_err(|e| StylistError::Parse(e.to_string()))
    }

    /// One generateContent round trip: prompt plus one inline image part
    /// per item, returning the first candidate's text
    async fn generate(
        &self,
        api_key: Option<&str>,
        prompt: &str,
        items: &[Item],
    ) -> Result<String, StylistError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(StylistError::NotConfigured)?;

        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        for item in items {
            let bytes = tokio::fs::read(&item.uri)
                .await
                .map_err(|e| StylistError::ImageRead(item.uri.clone(), e.to_string()))?;
            parts.push(Part::Inline {
                inline_data: InlineData {
                    mime_type: mime_for_path(&item.uri).to_string(),
                    data: BASE64.encode(&bytes),
                },
            });
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GENERATIVE_LANGUAGE_BASE_URL, self.model, api_key
        );

        tracing::debug!(model = %self.model, image_count = items.len(), "Querying stylist API");

        let response = self
            .http_client
            .post(&url)
            .json(&GenerateRequest {
                contents: vec![Content { parts }],
            })
            .send()
            .await
            .map_err(|e| StylistError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StylistError::Api(status.as_u16(), error_text));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| StylistError::Parse(e.to_string()))?;

        body.first_text()
            .ok_or_else(|| StylistError::Parse("empty model response".to_string()))
    }
}

/// Locate the JSON object inside a model reply, tolerating markdown code
/// fences and surrounding prose
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Mime type from the stored image's extension
fn mime_for_path(path: &str) -> &'static str {
    if path.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// The analysis client: one structured generateContent call per request
///
/// The client is constructed from explicit configuration (never read
/// ambiently at call time) so it can be exercised with fakes in tests.
/// A single attempt is made per analysis; any failure, including a
/// transient network blip, surfaces immediately as one `AnalysisError`.

use log::debug;

use super::prompt;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::config::Config;
use crate::state::data::{AnalysisRequest, AnalysisResult, ImageFile};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Everything that can go wrong during one analysis attempt
///
/// The session collapses all of these to its Error state; the messages
/// are for the log, not the user.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no Gemini API key is configured")]
    MissingApiKey,

    #[error("request to Gemini failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini returned no text payload")]
    EmptyResponse,

    #[error("response text does not match the expected shape: {0}")]
    BadPayload(#[from] serde_json::Error),

    // Never clamped: a repaired clinical score would misrepresent the
    // model's actual output.
    #[error("score {0} is outside the 0-100 range")]
    ScoreOutOfRange(u32),
}

/// Client for the Gemini generateContent endpoint
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl AnalysisClient {
    /// Build a client from the startup configuration
    ///
    /// A missing API key is not rejected here; it fails lazily on the
    /// first analysis attempt.
    pub fn new(config: &Config) -> Self {
        AnalysisClient {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Execute one multimodal structured-inference call
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or(AnalysisError::MissingApiKey)?;

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let body = build_request_body(&request);
        debug!(
            "analyzing with model {} ({} image part(s), language {:?})",
            self.model,
            if request.tongue.is_some() { 2 } else { 1 },
            request.language,
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let envelope: GenerateContentResponse = response.json().await?;
        let text = envelope.text().ok_or(AnalysisError::EmptyResponse)?;

        parse_result_text(&text)
    }
}

/// Assemble the request body: instruction, schema, text + image parts
///
/// The tongue picture is attached only when both its payload and MIME
/// type are present; partial tongue data is treated as absent.
pub fn build_request_body(request: &AnalysisRequest) -> GenerateContentRequest {
    let mut parts = vec![
        Part::text("Here is the patient's face image."),
        inline_part(&request.face),
    ];

    if let Some(tongue) = &request.tongue {
        if !tongue.data.is_empty() && !tongue.mime_type.is_empty() {
            parts.push(Part::text("Here is the patient's tongue image."));
            parts.push(inline_part(tongue));
        }
    }

    GenerateContentRequest {
        system_instruction: Content::from_parts(vec![Part::text(prompt::system_instruction(
            request.language,
        ))]),
        contents: vec![Content::from_parts(parts)],
        generation_config: GenerationConfig {
            temperature: prompt::TEMPERATURE,
            response_mime_type: "application/json".to_string(),
            response_schema: prompt::response_schema(),
        },
    }
}

fn inline_part(image: &ImageFile) -> Part {
    Part::inline_image(image.mime_type.clone(), image.data.clone())
}

/// Validate the model's text against the expected structured shape
///
/// Missing fields, wrong types and out-of-range scores are all rejected;
/// nothing is repaired or defaulted.
pub fn parse_result_text(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let result: AnalysisResult = serde_json::from_str(text)?;
    if result.score > 100 {
        return Err(AnalysisError::ScoreOutOfRange(result.score));
    }
    Ok(result)
}

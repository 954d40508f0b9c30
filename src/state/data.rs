/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the capture layer, the Gemini client, and the UI layer.

use serde::{Deserialize, Serialize};

/// A captured or uploaded image, normalized for the Gemini API
///
/// `data` is the base64-encoded payload; `mime_type` always starts with
/// "image/". Snapshots produce "image/jpeg", uploads carry the type
/// declared by the file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Base64-encoded image bytes (no data-URL prefix)
    pub data: String,
    /// MIME type, e.g. "image/jpeg"
    pub mime_type: String,
}

impl ImageFile {
    /// Decode the base64 payload back into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.decode(&self.data)
    }
}

/// The structured diagnosis returned by the model
///
/// Immutable once produced; a new analysis replaces it wholesale.
/// Field names match the response schema sent to Gemini, so this
/// deserializes directly from the model's JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Health score from 0-100
    pub score: u32,
    /// One-sentence summary of health status
    pub conclusion: String,
    /// Detailed TCM diagnosis as a numbered list
    pub diagnosis: String,
    /// Therapy suggestions as a numbered list
    pub therapy: String,
}

/// Everything one Gemini call needs; built transiently per invocation
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub face: ImageFile,
    /// Optional second picture; absent entirely when not captured
    pub tongue: Option<ImageFile>,
    pub language: Language,
}

/// Where the session currently is in the analyze flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Analyzing,
    Success,
    Error,
}

/// Display language, also requested as the model's output language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Simplified Chinese
    #[default]
    Zh,
    /// Vietnamese
    Vi,
}

impl Language {
    /// The language name the prompt asks the model to answer in
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::Zh => "Simplified Chinese (简体中文)",
            Language::Vi => "Vietnamese (Tiếng Việt)",
        }
    }
}

/// One of the two independent image-acquisition contexts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Face,
    Tongue,
}

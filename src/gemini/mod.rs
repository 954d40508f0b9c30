/// Gemini structured-inference module
///
/// This module handles the single remote call of the app:
/// - Wire-format request/response models (types.rs)
/// - The TCM physician system instruction and response schema (prompt.rs)
/// - The HTTP client executing one generateContent call (client.rs)

pub mod client;
pub mod prompt;
pub mod types;

pub use client::{AnalysisClient, AnalysisError};

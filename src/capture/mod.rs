/// Image intake module
///
/// This module produces normalized `ImageFile`s from either source,
/// with no dependency on the analysis logic:
/// - Live webcam feed with mirrored preview and JPEG snapshots (camera.rs)
/// - User-selected files read from disk (file.rs)

pub mod camera;
pub mod file;

pub use camera::CameraFeed;

/// Failures while acquiring an image
///
/// These never touch the session state; the UI shows a localized message
/// and the slot simply stays empty. Variants carry strings so the error
/// can travel inside clonable UI messages.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    /// Camera permission denied, device missing, or stream setup failed
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("failed to read {path}: {reason}")]
    FileRead { path: String, reason: String },

    /// The selected file's extension names no known image format
    #[error("not a recognized image type: {0}")]
    UnsupportedType(String),

    #[error("failed to encode snapshot: {0}")]
    Encode(String),
}

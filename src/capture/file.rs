/// File intake and JPEG snapshot encoding
///
/// Reading a user-selected image happens asynchronously; the bytes are
/// base64-encoded as-is with the MIME type declared by the extension.
/// No validation of the actual content is performed: malformed files
/// pass through and fail later at the remote service.

use std::path::{Path, PathBuf};

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use log::info;

use super::CaptureError;
use crate::state::data::ImageFile;

/// JPEG quality for camera snapshots (~0.85 in canvas terms)
pub const SNAPSHOT_JPEG_QUALITY: u8 = 85;

/// File extensions offered by the picker dialog
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tiff"];

/// Read an arbitrary user-selected image file into an `ImageFile`
pub async fn load_image_file(path: PathBuf) -> Result<ImageFile, CaptureError> {
    // Desktop files carry no declared MIME type, so the extension decides
    let mime_type = declared_mime_type(&path)?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| CaptureError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    info!("📁 Loaded {} ({} bytes, {})", path.display(), bytes.len(), mime_type);

    Ok(ImageFile {
        data: base64::engine::general_purpose::STANDARD.encode(&bytes),
        mime_type,
    })
}

/// Resolve the declared MIME type from the file extension
pub fn declared_mime_type(path: &Path) -> Result<String, CaptureError> {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .map_err(|_| CaptureError::UnsupportedType(path.display().to_string()))
}

/// Encode one RGB frame as a JPEG `ImageFile`
///
/// Shared by camera snapshots; the frame is expected to already be
/// oriented the way the user saw it in the preview.
pub fn encode_jpeg_frame(frame: &RgbImage) -> Result<ImageFile, CaptureError> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, SNAPSHOT_JPEG_QUALITY);
    encoder
        .encode_image(frame)
        .map_err(|e| CaptureError::Encode(e.to_string()))?;

    Ok(ImageFile {
        data: base64::engine::general_purpose::STANDARD.encode(&bytes),
        mime_type: "image/jpeg".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(
            declared_mime_type(Path::new("face.jpg")).unwrap(),
            "image/jpeg"
        );
        assert_eq!(
            declared_mime_type(Path::new("tongue.PNG")).unwrap(),
            "image/png"
        );
        assert!(declared_mime_type(Path::new("notes.txt")).is_err());
    }

    #[test]
    fn test_snapshot_round_trip_keeps_dimensions() {
        // A small gradient so JPEG has something to encode
        let frame = RgbImage::from_fn(64, 48, |x, y| {
            image::Rgb([(x * 4) as u8, (y * 5) as u8, 128])
        });

        let file = encode_jpeg_frame(&frame).unwrap();
        assert_eq!(file.mime_type, "image/jpeg");
        assert!(!file.data.is_empty());

        let bytes = file.decode().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }

    #[tokio::test]
    async fn test_missing_file_is_a_read_error() {
        let result = load_image_file(PathBuf::from("/nonexistent/photo.jpg")).await;
        assert!(matches!(result, Err(CaptureError::FileRead { .. })));
    }

    #[tokio::test]
    async fn test_unknown_extension_is_rejected_before_reading() {
        let result = load_image_file(PathBuf::from("/nonexistent/file.???")).await;
        assert!(matches!(result, Err(CaptureError::UnsupportedType(_))));
    }
}

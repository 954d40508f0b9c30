/// Live webcam feed
///
/// Acquiring the camera is an exclusive hardware resource acquisition, so
/// the device is held by one worker thread per feed and released as soon
/// as the stop flag is raised (snapshot taken, user cancelled, or the feed
/// replaced). The worker keeps exactly one frame: the latest, already
/// mirrored horizontally so preview and snapshot match what the user sees.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use image::RgbImage;
use log::{error, info};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use super::file::encode_jpeg_frame;
use super::CaptureError;
use crate::state::data::ImageFile;

/// A running camera stream with a shared latest-frame buffer
///
/// Clones are handles to the same underlying feed; stopping any handle
/// stops the stream.
#[derive(Debug, Clone)]
pub struct CameraFeed {
    frame: Arc<Mutex<Option<RgbImage>>>,
    stop: Arc<AtomicBool>,
}

impl CameraFeed {
    /// Request camera access and begin streaming
    ///
    /// Opening the device blocks, so it runs on the blocking pool. On
    /// denial or absence of a camera this fails with `CameraUnavailable`
    /// and no feed exists (the caller shows a localized error).
    pub async fn start() -> Result<CameraFeed, CaptureError> {
        tokio::task::spawn_blocking(Self::start_blocking)
            .await
            .map_err(|e| CaptureError::CameraUnavailable(format!("task join error: {}", e)))?
    }

    /// Blocking implementation: open the device, then hand it to a
    /// streaming worker thread
    fn start_blocking() -> Result<CameraFeed, CaptureError> {
        // The default device; on laptops this is the user-facing webcam
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(0), requested)
            .map_err(|e| CaptureError::CameraUnavailable(e.to_string()))?;

        camera
            .open_stream()
            .map_err(|e| CaptureError::CameraUnavailable(e.to_string()))?;

        info!(
            "📷 Camera acquired: {} ({})",
            camera.info().human_name(),
            camera.camera_format()
        );

        let feed = CameraFeed {
            frame: Arc::new(Mutex::new(None)),
            stop: Arc::new(AtomicBool::new(false)),
        };

        let frame = Arc::clone(&feed.frame);
        let stop = Arc::clone(&feed.stop);

        std::thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                match camera
                    .frame()
                    .and_then(|buffer| buffer.decode_image::<RgbFormat>())
                {
                    Ok(decoded) => {
                        // Rebuild from raw bytes; nokhwa carries its own
                        // image-crate version, so its buffer type never
                        // crosses into ours.
                        let (width, height) = (decoded.width(), decoded.height());
                        let Some(rgb) = RgbImage::from_raw(width, height, decoded.into_raw())
                        else {
                            error!("camera frame had an unexpected byte length");
                            break;
                        };

                        // Mirror once at the source; every consumer sees
                        // the same orientation the user saw.
                        let mirrored = image::imageops::flip_horizontal(&rgb);
                        if let Ok(mut slot) = frame.lock() {
                            *slot = Some(mirrored);
                        }
                    }
                    Err(e) => {
                        error!("camera frame failed: {}", e);
                        break;
                    }
                }
            }

            if let Err(e) = camera.stop_stream() {
                error!("failed to stop camera stream: {}", e);
            }
            info!("📷 Camera released");
        });

        Ok(feed)
    }

    /// The most recent mirrored frame, None until the first decodable
    /// frame has arrived
    pub fn latest_frame(&self) -> Option<RgbImage> {
        self.frame.lock().ok()?.clone()
    }

    /// True once the preview has something to show
    pub fn is_ready(&self) -> bool {
        self.frame
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Encode the current frame as a JPEG `ImageFile`
    ///
    /// Returns None before the feed is ready; calling early is a no-op
    /// and never produces a zero-dimension capture. The caller stops the
    /// feed after a successful snapshot.
    pub fn snapshot(&self) -> Option<ImageFile> {
        let frame = self.latest_frame()?;
        match encode_jpeg_frame(&frame) {
            Ok(file) => Some(file),
            Err(e) => {
                error!("snapshot encoding failed: {}", e);
                None
            }
        }
    }

    /// Raise the stop flag; the worker releases the device on its next
    /// loop iteration
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a feed without hardware, as the worker thread would
    fn detached_feed() -> CameraFeed {
        CameraFeed {
            frame: Arc::new(Mutex::new(None)),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[test]
    fn test_snapshot_before_ready_is_noop() {
        let feed = detached_feed();
        assert!(!feed.is_ready());
        assert!(feed.snapshot().is_none());
    }

    #[test]
    fn test_snapshot_after_frame_is_jpeg() {
        let feed = detached_feed();
        if let Ok(mut slot) = feed.frame.lock() {
            *slot = Some(RgbImage::from_pixel(32, 24, image::Rgb([10, 20, 30])));
        }

        assert!(feed.is_ready());
        let file = feed.snapshot().expect("ready feed produces a snapshot");
        assert_eq!(file.mime_type, "image/jpeg");

        let decoded = image::load_from_memory(&file.decode().unwrap()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn test_stop_is_shared_across_clones() {
        let feed = detached_feed();
        let handle = feed.clone();

        handle.stop();
        assert!(feed.stop.load(Ordering::Relaxed));
    }
}

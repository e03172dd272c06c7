mod v4l_capture;

pub use v4l_capture::WebcamCapture;

use anyhow::Result;
use crate::segmentation::Frame;

/// Trait for camera capture sources
pub trait CaptureSource {
    /// Capture a single RGBA frame at the source's fixed resolution
    fn capture_frame(&mut self) -> Result<Frame>;

    /// Get the resolution of captured frames
    fn resolution(&self) -> (u32, u32);
}

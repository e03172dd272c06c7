mod loopback;

pub use loopback::{rgba_to_yuyv, V4L2Output};

use crate::segmentation::Frame;
use anyhow::Result;

/// Trait for output destinations
pub trait OutputSink {
    /// Write one composited frame to the output
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;

    /// Get the expected output resolution
    fn resolution(&self) -> (u32, u32);
}

use crate::config::ToleranceConfig;
use crate::error::{ChromaError, Result};
use image::RgbaImage;

/// One RGBA video frame, row-major, 8 bits per channel.
pub type Frame = RgbaImage;

/// Hue in degrees [0, 360), saturation and value in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// The keyed color picked by the user.
pub type ColorSample = Hsv;

/// Binary per-pixel classification: 1 = matches the keyed color, 0 = keep.
/// Same dimensions as the frame it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// An all-zero mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Build a mask from row-major values. Any non-zero entry is stored as 1.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(ChromaError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Value at `(x, y)`, or `None` outside the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub(crate) fn set(&mut self, index: usize, on: bool) {
        self.data[index] = u8::from(on);
    }

    /// Number of pixels flagged as matching.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Pixel classifier used by the pipeline.
/// Allows swapping the HSV threshold keyer for another classification rule.
pub trait Segmenter {
    /// Classify every pixel of `frame` against `sample` under `config`.
    fn classify(&self, frame: &Frame, sample: &ColorSample, config: &ToleranceConfig) -> Mask;
}

mod chroma;
pub mod hsv;
mod smooth;
pub mod types;

pub use chroma::ChromaKeyer;
pub use hsv::{hue_distance, to_hsv};
pub use smooth::smooth;
pub use types::{ColorSample, Frame, Hsv, Mask, Segmenter};

/// Create the default segmenter (HSV threshold keyer)
pub fn create_default_segmenter() -> Box<dyn Segmenter> {
    Box::new(ChromaKeyer::new())
}

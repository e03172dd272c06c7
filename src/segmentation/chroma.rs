use super::hsv::{hue_distance, to_hsv};
use super::types::{ColorSample, Frame, Mask, Segmenter};
use crate::config::ToleranceConfig;

/// HSV threshold keyer.
///
/// A pixel matches when its hue lies within `hue_range` degrees of the
/// sample (measured around the color wheel) and its saturation and value
/// reach the configured minimums. All bounds are inclusive.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromaKeyer;

impl ChromaKeyer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn matches(r: u8, g: u8, b: u8, sample: &ColorSample, config: &ToleranceConfig) -> bool {
        let hsv = to_hsv(r, g, b);
        hue_distance(hsv.h, sample.h) <= config.hue_range
            && hsv.s >= config.sat_min
            && hsv.v >= config.val_min
    }
}

impl Segmenter for ChromaKeyer {
    fn classify(&self, frame: &Frame, sample: &ColorSample, config: &ToleranceConfig) -> Mask {
        let _span = tracing::debug_span!("classify").entered();

        let (width, height) = frame.dimensions();
        let mut mask = Mask::new(width, height);

        for (index, pixel) in frame.pixels().enumerate() {
            let [r, g, b, _] = pixel.0;
            mask.set(index, Self::matches(r, g, b, sample, config));
        }

        tracing::trace!("classified {} matching pixels", mask.count());
        mask
    }
}

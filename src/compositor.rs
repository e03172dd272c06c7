use crate::error::{ChromaError, Result};
use crate::segmentation::{Frame, Mask};

/// Color painted over matched pixels when the preview overlay is on.
pub const HIGHLIGHT: [u8; 3] = [255, 50, 50];

/// Replace masked pixels of `frame` with the background.
///
/// Only R, G and B are written; alpha keeps the live frame's value. With
/// `preview` set, masked pixels are then painted with [`HIGHLIGHT`], which
/// wins over the background. Unmasked pixels are copied through untouched.
pub fn composite(frame: &Frame, mask: &Mask, background: &Frame, preview: bool) -> Result<Frame> {
    let _span = tracing::debug_span!("composite").entered();

    let dims = frame.dimensions();
    for actual in [mask.dimensions(), background.dimensions()] {
        if actual != dims {
            return Err(ChromaError::DimensionMismatch {
                expected: dims,
                actual,
            });
        }
    }

    let mut out = frame.clone();

    for ((pixel, bg), &on) in out
        .pixels_mut()
        .zip(background.pixels())
        .zip(mask.as_slice())
    {
        if on != 0 {
            pixel.0[..3].copy_from_slice(&bg.0[..3]);
        }
    }

    if preview {
        for (pixel, &on) in out.pixels_mut().zip(mask.as_slice()) {
            if on != 0 {
                pixel.0[..3].copy_from_slice(&HIGHLIGHT);
            }
        }
    }

    Ok(out)
}

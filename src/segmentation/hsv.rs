use super::types::Hsv;

/// Convert an 8-bit RGB triple to HSV.
///
/// Hue lands in [0, 360), saturation and value in [0, 100]. Achromatic
/// colors (including black) get hue 0.
pub fn to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta / max * 100.0 };
    let v = max * 100.0;

    if delta == 0.0 {
        return Hsv { h: 0.0, s, v };
    }

    let sector = if max == r {
        let raw = (g - b) / delta;
        if raw < 0.0 {
            raw + 6.0
        } else {
            raw
        }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let mut h = sector * 60.0;
    if h >= 360.0 {
        h -= 360.0;
    }

    Hsv { h, s, v }
}

/// Angular distance between two hues on the 360° circle, in [0, 180].
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let dh = (a.rem_euclid(360.0) - b.rem_euclid(360.0)).abs();
    if dh > 180.0 {
        360.0 - dh
    } else {
        dh
    }
}

use super::types::Mask;

/// 3x3 majority filter.
///
/// A pixel stays set only when strictly more than half of its in-bounds
/// neighborhood (itself included) is set. Border pixels have fewer cells;
/// the missing ones count toward neither the sum nor the total.
pub fn smooth(mask: &Mask) -> Mask {
    let _span = tracing::debug_span!("smooth").entered();

    let (width, height) = mask.dimensions();
    let (w, h) = (width as i64, height as i64);
    let src = mask.as_slice();
    let mut out = Mask::new(width, height);

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0u32;
            let mut count = 0u32;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx >= 0 && nx < w && ny >= 0 && ny < h {
                        sum += src[(ny * w + nx) as usize] as u32;
                        count += 1;
                    }
                }
            }
            // sum / count > 0.5
            out.set((y * w + x) as usize, 2 * sum > count);
        }
    }

    out
}

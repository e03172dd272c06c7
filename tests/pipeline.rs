use chromacam::compositor::HIGHLIGHT;
use chromacam::segmentation::{self, ChromaKeyer};
use chromacam::status::StatusSink;
use chromacam::{composite, Frame, Segmenter, SessionContext, ToleranceConfig};
use image::Rgba;
use std::time::{Duration, Instant};

const KEY: Rgba<u8> = Rgba([0, 255, 0, 255]);
const WALL: Rgba<u8> = Rgba([40, 40, 200, 255]);

fn strict() -> ToleranceConfig {
    ToleranceConfig {
        hue_range: 10.0,
        sat_min: 50.0,
        val_min: 50.0,
        preview: false,
    }
}

#[test]
fn lone_matching_pixel_is_smoothed_away() {
    let mut frame = Frame::from_pixel(3, 3, WALL);
    frame.put_pixel(1, 1, KEY);
    let background = Frame::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
    let sample = segmentation::to_hsv(0, 255, 0);

    let raw = ChromaKeyer::new().classify(&frame, &sample, &strict());
    assert_eq!(raw.as_slice(), &[0, 0, 0, 0, 1, 0, 0, 0, 0]);

    let smoothed = segmentation::smooth(&raw);
    assert_eq!(smoothed.count(), 0);

    let out = composite(&frame, &smoothed, &background, false).unwrap();
    assert_eq!(out, frame);

    // same result through the session
    let mut session = SessionContext::new(3, 3);
    session.apply_config(strict()).unwrap();
    session.capture_now(&background).unwrap();
    session.sample_color_at(&frame, 1, 1).unwrap();
    assert_eq!(session.render_frame(&frame).unwrap(), frame);
}

#[test]
fn key_region_is_replaced_and_rest_untouched() {
    // left two columns are the key color, right column is not
    let mut frame = Frame::from_pixel(3, 4, KEY);
    for y in 0..4 {
        frame.put_pixel(2, y, WALL);
    }
    let background = Frame::from_fn(3, 4, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 99, 255]));

    let mut session = SessionContext::new(3, 4);
    session.apply_config(strict()).unwrap();
    session.capture_now(&background).unwrap();
    session.sample_color_at(&frame, 0, 0).unwrap();

    let out = session.render_frame(&frame).unwrap();
    for y in 0..4 {
        assert_eq!(out.get_pixel(0, y), background.get_pixel(0, y));
        assert_eq!(out.get_pixel(2, y), &WALL);
    }
}

#[test]
fn preview_paints_highlight_over_background() {
    let frame = Frame::from_pixel(3, 3, KEY);
    let background = Frame::from_pixel(3, 3, Rgba([9, 9, 9, 255]));

    let mut session = SessionContext::new(3, 3);
    session
        .apply_config(ToleranceConfig {
            preview: true,
            ..strict()
        })
        .unwrap();
    session.capture_now(&background).unwrap();
    session.sample_color_at(&frame, 0, 0).unwrap();

    let out = session.render_frame(&frame).unwrap();
    let [r, g, b] = HIGHLIGHT;
    assert!(out.pixels().all(|p| p == &Rgba([r, g, b, 255])));
}

#[test]
fn auto_capture_snapshots_after_countdown_and_settle() {
    let t0 = Instant::now();
    let first = Frame::from_pixel(2, 2, WALL);
    let later = Frame::from_pixel(2, 2, Rgba([5, 5, 5, 255]));

    let mut session = SessionContext::new(2, 2);
    session.schedule_auto_capture(t0);

    session.tick(t0 + Duration::from_secs(1), &first).unwrap();
    assert_eq!(session.status().last(), Some("Auto capture in 3..."));

    session.tick(t0 + Duration::from_secs(3), &first).unwrap();
    assert_eq!(session.status().last(), Some("Auto capture in 1..."));

    session.tick(t0 + Duration::from_secs(4), &first).unwrap();
    assert_eq!(session.status().last(), Some("Capturing background..."));
    assert!(!session.has_background());

    session
        .tick(t0 + Duration::from_millis(4300), &later)
        .unwrap();
    assert_eq!(session.status().last(), Some("Background captured!"));
    assert_eq!(session.background().get(), Some(&later));
}

#[test]
fn config_changes_apply_on_the_next_frame() {
    let frame = Frame::from_pixel(3, 3, KEY);
    let background = Frame::from_pixel(3, 3, Rgba([9, 9, 9, 255]));

    let mut session = SessionContext::new(3, 3);
    session.apply_config(strict()).unwrap();
    session.capture_now(&background).unwrap();
    session.sample_color_at(&frame, 0, 0).unwrap();
    assert_eq!(session.render_frame(&frame).unwrap(), background);

    // value floor above the key color's brightness: nothing matches anymore
    session
        .apply_config(ToleranceConfig {
            val_min: 100.0,
            ..strict()
        })
        .unwrap();
    let dim_key = Frame::from_pixel(3, 3, Rgba([0, 200, 0, 255]));
    assert_eq!(session.render_frame(&dim_key).unwrap(), dim_key);
}

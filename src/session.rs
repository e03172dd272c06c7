use crate::background::BackgroundStore;
use crate::compositor::composite;
use crate::config::ToleranceConfig;
use crate::error::{ChromaError, Result};
use crate::scheduler::{
    ScheduledEvent, Scheduler, AUTO_CAPTURE_INTERVAL, AUTO_CAPTURE_TICKS, SETTLE_DELAY,
};
use crate::segmentation::{self, to_hsv, ColorSample, Frame, Segmenter};
use crate::status::{LogStatus, StatusSink};
use std::time::Instant;

/// Clamp a pointer coordinate into a `width` x `height` frame.
pub fn clamp_coordinate(x: i64, y: i64, width: u32, height: u32) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(ChromaError::EmptyFrame);
    }
    let x = x.clamp(0, width as i64 - 1) as u32;
    let y = y.clamp(0, height as i64 - 1) as u32;
    Ok((x, y))
}

/// Like [`clamp_coordinate`], but rejects coordinates outside the frame.
pub fn checked_coordinate(x: i64, y: i64, width: u32, height: u32) -> Result<(u32, u32)> {
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        return Err(ChromaError::CoordinateOutOfBounds {
            x,
            y,
            width,
            height,
        });
    }
    Ok((x as u32, y as u32))
}

/// State for one keying session, owned by a single controller.
///
/// User commands mutate it between frames; [`SessionContext::render_frame`]
/// only reads it. Background and sample are always replaced whole.
pub struct SessionContext {
    width: u32,
    height: u32,
    background: BackgroundStore,
    sample: Option<ColorSample>,
    config: ToleranceConfig,
    scheduler: Scheduler,
    segmenter: Box<dyn Segmenter>,
    status: Box<dyn StatusSink>,
}

impl SessionContext {
    /// A session for frames of `width` x `height`, with the HSV keyer and a
    /// logging status sink.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: BackgroundStore::new(),
            sample: None,
            config: ToleranceConfig::default(),
            scheduler: Scheduler::new(),
            segmenter: segmentation::create_default_segmenter(),
            status: Box::new(LogStatus::new()),
        }
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_status(mut self, status: Box<dyn StatusSink>) -> Self {
        self.status = status;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn config(&self) -> ToleranceConfig {
        self.config
    }

    pub fn sample(&self) -> Option<ColorSample> {
        self.sample
    }

    pub fn has_background(&self) -> bool {
        self.background.has_background()
    }

    pub fn background(&self) -> &BackgroundStore {
        &self.background
    }

    pub fn status(&self) -> &dyn StatusSink {
        self.status.as_ref()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Install new thresholds. Invalid values leave the current ones in place.
    pub fn apply_config(&mut self, config: ToleranceConfig) -> Result<()> {
        config.validate()?;
        tracing::debug!("Applying config {:?}", config);
        self.config = config;
        Ok(())
    }

    /// Request a background capture; the snapshot happens once the settle
    /// delay has elapsed, on the frame passed to [`SessionContext::tick`].
    pub fn capture_background(&mut self, now: Instant) {
        self.status.post("Capturing background...");
        self.scheduler.schedule_capture(now, SETTLE_DELAY);
    }

    /// Start the auto-capture countdown, restarting one already in progress.
    pub fn schedule_auto_capture(&mut self, now: Instant) {
        self.scheduler
            .schedule_auto_capture(now, AUTO_CAPTURE_TICKS, AUTO_CAPTURE_INTERVAL);
    }

    /// Cancel pending capture work. Returns whether anything was cancelled.
    pub fn cancel_capture(&mut self) -> bool {
        let countdown = self.scheduler.cancel_auto_capture();
        let capture = self.scheduler.cancel_capture();
        if countdown || capture {
            self.status.post("Capture cancelled.");
        }
        countdown || capture
    }

    /// Snapshot `frame` as the background reference right away.
    pub fn capture_now(&mut self, frame: &Frame) -> Result<()> {
        self.check_dimensions(frame)?;
        self.background.capture(frame);
        self.status.post("Background captured!");
        Ok(())
    }

    /// Sample the keyed color from `frame` at a pointer position, clamped to
    /// the frame bounds.
    pub fn sample_color_at(&mut self, frame: &Frame, x: i64, y: i64) -> Result<ColorSample> {
        let (width, height) = frame.dimensions();
        let (x, y) = clamp_coordinate(x, y, width, height)?;

        let [r, g, b, _] = frame.get_pixel(x, y).0;
        let sample = to_hsv(r, g, b);
        self.sample = Some(sample);

        self.status.post(&format!(
            "Sampled RGB({}, {}, {}) HSV: {:.1} | {:.1} | {:.1}",
            r, g, b, sample.h, sample.s, sample.v
        ));
        Ok(sample)
    }

    /// Advance scheduled actions to `now`, then render `frame`.
    pub fn tick(&mut self, now: Instant, frame: &Frame) -> Result<Frame> {
        self.check_dimensions(frame)?;

        for event in self.scheduler.poll(now) {
            match event {
                ScheduledEvent::CountdownTick { remaining } => {
                    self.status.post(&format!("Auto capture in {}...", remaining));
                }
                ScheduledEvent::CountdownFinished => {
                    self.status.post("Capturing background...");
                }
                ScheduledEvent::CaptureDue => self.capture_now(frame)?,
            }
        }

        self.render_frame(frame)
    }

    /// Run the keying pipeline on one frame.
    ///
    /// Without both a background and a sample the frame passes through
    /// unchanged.
    pub fn render_frame(&self, frame: &Frame) -> Result<Frame> {
        self.check_dimensions(frame)?;

        let config = self.config;
        let (Some(background), Some(sample)) = (self.background.snapshot(), self.sample) else {
            return Ok(frame.clone());
        };

        let raw = self.segmenter.classify(frame, &sample, &config);
        let mask = segmentation::smooth(&raw);
        tracing::trace!("mask: {} raw, {} after smoothing", raw.count(), mask.count());

        composite(frame, &mask, &background, config.preview)
    }

    fn check_dimensions(&self, frame: &Frame) -> Result<()> {
        let actual = frame.dimensions();
        if actual != (self.width, self.height) {
            return Err(ChromaError::DimensionMismatch {
                expected: (self.width, self.height),
                actual,
            });
        }
        Ok(())
    }
}

use anyhow::{Context, Result};
use chromacam::capture::{CaptureSource, WebcamCapture};
use chromacam::command::{Command, ParseCommandError};
use chromacam::output::{OutputSink, V4L2Output};
use chromacam::{SessionContext, ToleranceConfig};
use clap::Parser;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input webcam device index
    #[arg(short, long, default_value_t = 0)]
    input_device: u32,

    /// Output v4l2loopback device path
    #[arg(short, long, default_value = "/dev/video10")]
    output_device: String,

    /// Frame width (capture, keying and output)
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height (capture, keying and output)
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Hue tolerance around the sampled color, in degrees
    #[arg(long, default_value_t = 20.0)]
    hue_range: f64,

    /// Minimum saturation for a pixel to be keyed (0-100)
    #[arg(long, default_value_t = 30.0)]
    sat_min: f64,

    /// Minimum value (brightness) for a pixel to be keyed (0-100)
    #[arg(long, default_value_t = 20.0)]
    val_min: f64,

    /// Paint keyed pixels red instead of replacing them
    #[arg(long)]
    preview: bool,

    /// Start the background auto-capture countdown on launch
    #[arg(long)]
    auto_capture: bool,

    /// Sample the key color at X,Y from the first frame
    #[arg(long, value_parser = parse_point)]
    sample: Option<(i64, i64)>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn parse_point(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad X: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y: {e}"))?;
    Ok((x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("chromacam starting");
    tracing::info!("Resolution: {}x{}", args.width, args.height);
    tracing::info!("Target FPS: {}", args.fps);

    let mut session = SessionContext::new(args.width, args.height);
    session
        .apply_config(ToleranceConfig {
            hue_range: args.hue_range,
            sat_min: args.sat_min,
            val_min: args.val_min,
            preview: args.preview,
        })
        .context("Invalid tolerance settings")?;

    // No camera means no session
    let mut capture = WebcamCapture::new(args.input_device, args.width, args.height, args.fps)
        .context("Failed to initialize webcam capture")?;

    let mut output = V4L2Output::new(&args.output_device, args.width, args.height)
        .context("Failed to initialize v4l2loopback output")?;

    if args.auto_capture {
        session.schedule_auto_capture(Instant::now());
    }

    let commands = spawn_command_reader();
    tracing::info!("Commands: capture | auto | cancel | sample X Y | hue N | sat N | val N | preview on|off");

    run_pipeline(
        &mut capture,
        &mut output,
        &mut session,
        commands,
        args.sample,
        args.fps,
    )
}

/// Read commands from stdin on a helper thread; the render loop drains them
/// between frames.
fn spawn_command_reader() -> Receiver<Result<Command, ParseCommandError>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            if tx.send(line.parse::<Command>()).is_err() {
                break;
            }
        }
        tracing::debug!("Command input closed");
    });
    rx
}

fn run_pipeline<C, O>(
    capture: &mut C,
    output: &mut O,
    session: &mut SessionContext,
    commands: Receiver<Result<Command, ParseCommandError>>,
    mut initial_sample: Option<(i64, i64)>,
    target_fps: u32,
) -> Result<()>
where
    C: CaptureSource,
    O: OutputSink,
{
    let frame_duration = Duration::from_secs_f32(1.0 / target_fps as f32);
    let mut frame_count = 0u64;
    let mut total_capture_time = Duration::ZERO;
    let mut total_render_time = Duration::ZERO;
    let mut total_output_time = Duration::ZERO;
    let mut commands_open = true;

    tracing::info!("Starting main pipeline loop");
    tracing::info!("Press Ctrl+C to stop");

    loop {
        let loop_start = Instant::now();

        // Capture frame
        let capture_start = Instant::now();
        let frame = capture
            .capture_frame()
            .context("Failed to capture frame")?;
        total_capture_time += capture_start.elapsed();

        if let Some((x, y)) = initial_sample.take() {
            session
                .sample_color_at(&frame, x, y)
                .context("Failed to sample initial color")?;
        }

        // Apply user commands between frames
        while commands_open {
            match commands.try_recv() {
                Ok(Ok(command)) => {
                    if let Err(e) = command.apply(session, &frame, Instant::now()) {
                        tracing::warn!("{:?} rejected: {}", command, e);
                    }
                }
                Ok(Err(e)) => tracing::warn!("{}", e),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => commands_open = false,
            }
        }

        // Key and composite
        let render_start = Instant::now();
        let composited = session
            .tick(Instant::now(), &frame)
            .context("Failed to render frame")?;
        total_render_time += render_start.elapsed();

        // Output frame
        let output_start = Instant::now();
        output
            .write_frame(&composited)
            .context("Failed to write frame")?;
        total_output_time += output_start.elapsed();

        frame_count += 1;

        // Log stats every 30 frames
        if frame_count % 30 == 0 {
            let avg_capture_ms = total_capture_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_render_ms = total_render_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_output_ms = total_output_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let total_ms = avg_capture_ms + avg_render_ms + avg_output_ms;
            let actual_fps = 1000.0 / total_ms;

            tracing::info!(
                "Frame {}: capture={:.1}ms, render={:.1}ms, output={:.1}ms, total={:.1}ms, fps={:.1}",
                frame_count,
                avg_capture_ms,
                avg_render_ms,
                avg_output_ms,
                total_ms,
                actual_fps
            );
        }

        // Frame rate limiting
        let elapsed = loop_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sample_point() {
        assert_eq!(parse_point("12, 30"), Ok((12, 30)));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }
}

//! Text commands for driving a live session from a terminal.
//!
//! One command per line:
//!
//! ```text
//! capture          snapshot the background after the settle delay
//! auto             start (or restart) the auto-capture countdown
//! cancel           drop any pending capture or countdown
//! sample X Y       pick the keyed color at pixel (X, Y)
//! hue N            hue range in degrees
//! sat N            saturation minimum, percent
//! val N            value minimum, percent
//! preview on|off   highlight matched pixels instead of keying them
//! ```

use crate::config::ToleranceConfig;
use crate::error::Result;
use crate::segmentation::Frame;
use crate::session::SessionContext;
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Capture,
    AutoCapture,
    Cancel,
    Sample { x: i64, y: i64 },
    HueRange(f64),
    SatMin(f64),
    ValMin(f64),
    Preview(bool),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },
}

fn number<T: FromStr>(
    arg: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> std::result::Result<T, ParseCommandError> {
    arg.and_then(|a| a.parse().ok())
        .ok_or(ParseCommandError::BadArguments { command, expected })
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;
        let first = words.next();
        let second = words.next();

        let command = match name.to_ascii_lowercase().as_str() {
            "capture" => Command::Capture,
            "auto" => Command::AutoCapture,
            "cancel" => Command::Cancel,
            "sample" => Command::Sample {
                x: number(first, "sample", "two integer pixel coordinates")?,
                y: number(second, "sample", "two integer pixel coordinates")?,
            },
            "hue" => Command::HueRange(number(first, "hue", "a number of degrees")?),
            "sat" => Command::SatMin(number(first, "sat", "a percentage")?),
            "val" => Command::ValMin(number(first, "val", "a percentage")?),
            "preview" => match first {
                Some("on") | Some("true") | Some("1") => Command::Preview(true),
                Some("off") | Some("false") | Some("0") => Command::Preview(false),
                _ => {
                    return Err(ParseCommandError::BadArguments {
                        command: "preview",
                        expected: "on or off",
                    })
                }
            },
            other => return Err(ParseCommandError::Unknown(other.to_owned())),
        };

        Ok(command)
    }
}

impl Command {
    /// Apply this command to `session`. `frame` is the most recent frame,
    /// used for color sampling.
    pub fn apply(self, session: &mut SessionContext, frame: &Frame, now: Instant) -> Result<()> {
        let current = session.config();
        match self {
            Command::Capture => session.capture_background(now),
            Command::AutoCapture => session.schedule_auto_capture(now),
            Command::Cancel => {
                session.cancel_capture();
            }
            Command::Sample { x, y } => {
                session.sample_color_at(frame, x, y)?;
            }
            Command::HueRange(hue_range) => session.apply_config(ToleranceConfig {
                hue_range,
                ..current
            })?,
            Command::SatMin(sat_min) => session.apply_config(ToleranceConfig {
                sat_min,
                ..current
            })?,
            Command::ValMin(val_min) => session.apply_config(ToleranceConfig {
                val_min,
                ..current
            })?,
            Command::Preview(preview) => session.apply_config(ToleranceConfig {
                preview,
                ..current
            })?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChromaError;

    #[test]
    fn parses_commands() {
        assert_eq!("capture".parse::<Command>(), Ok(Command::Capture));
        assert_eq!("  AUTO ".parse::<Command>(), Ok(Command::AutoCapture));
        assert_eq!(
            "sample 12 -4".parse::<Command>(),
            Ok(Command::Sample { x: 12, y: -4 })
        );
        assert_eq!("hue 35.5".parse::<Command>(), Ok(Command::HueRange(35.5)));
        assert_eq!("preview on".parse::<Command>(), Ok(Command::Preview(true)));
        assert_eq!("preview 0".parse::<Command>(), Ok(Command::Preview(false)));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "blur 3".parse::<Command>(),
            Err(ParseCommandError::Unknown("blur".into()))
        );
        assert!(matches!(
            "sample 10".parse::<Command>(),
            Err(ParseCommandError::BadArguments { command: "sample", .. })
        ));
        assert!(matches!(
            "preview maybe".parse::<Command>(),
            Err(ParseCommandError::BadArguments { .. })
        ));
    }

    #[test]
    fn config_commands_change_one_field() {
        let mut session = SessionContext::new(1, 1);
        let frame = Frame::new(1, 1);
        let now = Instant::now();

        Command::SatMin(55.0).apply(&mut session, &frame, now).unwrap();
        Command::Preview(true).apply(&mut session, &frame, now).unwrap();

        let cfg = session.config();
        assert_eq!(cfg.sat_min, 55.0);
        assert!(cfg.preview);
        assert_eq!(cfg.hue_range, ToleranceConfig::default().hue_range);

        assert!(matches!(
            Command::ValMin(-3.0).apply(&mut session, &frame, now),
            Err(ChromaError::InvalidConfig(_))
        ));
    }
}

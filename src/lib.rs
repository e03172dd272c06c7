//! Live chroma-key compositing.
//!
//! Each frame is classified against a sampled HSV color, the match mask is
//! cleaned up with a 3x3 majority filter, and matched pixels are replaced by
//! a previously captured background frame.

pub mod background;
pub mod capture;
pub mod command;
pub mod compositor;
pub mod config;
pub mod error;
pub mod output;
pub mod scheduler;
pub mod segmentation;
pub mod session;
pub mod status;

pub use background::BackgroundStore;
pub use command::Command;
pub use compositor::composite;
pub use config::ToleranceConfig;
pub use error::ChromaError;
pub use segmentation::{ColorSample, Frame, Hsv, Mask, Segmenter};
pub use session::SessionContext;

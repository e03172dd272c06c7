use crate::segmentation::Frame;
use std::sync::Arc;

/// Holds the captured background reference.
///
/// The reference is an immutable snapshot that is swapped out in one piece
/// on every capture, so a reader holding a snapshot never sees a partial
/// update.
#[derive(Debug, Default, Clone)]
pub struct BackgroundStore {
    reference: Option<Arc<Frame>>,
}

impl BackgroundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an independent copy of `frame`, discarding any earlier reference.
    pub fn capture(&mut self, frame: &Frame) {
        let (width, height) = frame.dimensions();
        tracing::info!("Background reference captured at {}x{}", width, height);
        self.reference = Some(Arc::new(frame.clone()));
    }

    pub fn has_background(&self) -> bool {
        self.reference.is_some()
    }

    /// Shared handle to the current reference, if one was captured.
    pub fn snapshot(&self) -> Option<Arc<Frame>> {
        self.reference.clone()
    }

    pub fn get(&self) -> Option<&Frame> {
        self.reference.as_deref()
    }
}

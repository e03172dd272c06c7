/// Receives short user-facing notifications (capture progress, samples).
/// Only the latest message matters; nothing is kept as history.
pub trait StatusSink {
    fn post(&mut self, message: &str);

    /// Most recent message, if any.
    fn last(&self) -> Option<&str>;
}

/// Keeps the latest message and mirrors every post to the log.
#[derive(Debug, Default)]
pub struct LogStatus {
    last: Option<String>,
}

impl LogStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusSink for LogStatus {
    fn post(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.last = Some(message.to_owned());
    }

    fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

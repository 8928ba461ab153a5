use std::time::{Duration, Instant};
use tracing::info;

/// Scoped wall-clock timer. Logs `<label>=<ms>ms` at info level when
/// dropped.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn report(&self) -> String {
        format!("{}={}ms", self.label, self.elapsed().as_secs_f64() * 1000.0)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!("{}", self.report());
    }
}

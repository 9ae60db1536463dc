use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Single-line live progress for the run, drawn to stderr so NDJSON and the
/// final summary on stdout stay machine-readable.
pub(crate) struct HumanProgress {
    inner: Mutex<Option<ProgressBar>>,
    total: Duration,
}

impl HumanProgress {
    pub(crate) fn new(total: Duration) -> Self {
        Self {
            inner: Mutex::new(None),
            total,
        }
    }

    pub(crate) fn update(&self, elapsed: Duration, message: String) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let pb = inner.get_or_insert_with(|| {
            let pb = ProgressBar::new(self.total.as_millis() as u64);
            pb.set_draw_target(ProgressDrawTarget::stderr_with_hz(5));
            pb.set_style(bar_style());
            pb.set_prefix("run");
            pb
        });

        pb.set_message(message);

        let total_ms = self.total.as_millis() as u64;
        let elapsed_ms = elapsed.as_millis() as u64;
        pb.set_position(elapsed_ms.min(total_ms));
    }

    pub(crate) fn finish(&self) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(pb) = inner.take() {
            pb.finish_and_clear();
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix} [ {bar:20.cyan/blue} ] {percent:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█░")
}

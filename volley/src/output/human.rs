use std::sync::Arc;
use std::sync::Mutex;

mod format;
mod progress;
mod summary;

use format::{format_duration, format_rate};
use progress::HumanProgress;
use summary::render;

use super::OutputFormatter;

pub(crate) struct HumanReadableOutput {
    progress: Mutex<Option<Arc<HumanProgress>>>,
}

impl HumanReadableOutput {
    pub(crate) fn new() -> Self {
        Self {
            progress: Mutex::new(None),
        }
    }
}

impl OutputFormatter for HumanReadableOutput {
    fn print_header(&self, config: &volley_core::RunConfig) {
        println!("target: {}", config.base_url);
        println!(
            "duration={} rps={} timeout={}",
            format_duration(config.duration),
            config.rate,
            format_duration(config.request_timeout)
        );
        println!("endpoints: {}", config.endpoints.join(", "));
        println!();

        let mut inner = self
            .progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *inner = Some(Arc::new(HumanProgress::new(config.duration)));
    }

    fn progress(&self) -> Option<volley_core::ProgressFn> {
        let inner = self
            .progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let progress = inner.as_ref()?.clone();

        Some(Arc::new(move |u| {
            let message = format!(
                "elapsed={} requests={} rate={}/s ok={} failed={}",
                format_duration(u.elapsed),
                u.issued_total,
                format_rate(u.rps_now),
                u.success_total,
                u.failed_total
            );
            progress.update(u.elapsed, message);
        }))
    }

    fn print_summary(&self, report: &volley_core::RunReport) -> anyhow::Result<()> {
        let inner = self
            .progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(progress) = inner.as_ref() {
            progress.finish();
        }
        drop(inner);

        print!("{}", render(report));
        Ok(())
    }
}

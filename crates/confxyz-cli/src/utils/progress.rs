use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

/// Creates a stderr spinner for streaming scans of unknown length.
///
/// The record stream performs no look-ahead, so the total is unknown until
/// the scan finishes; the spinner shows the running record count instead of
/// a bar. Call `inc(1)` per record and `finish_and_clear` when done.
pub fn scan_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner()
        .with_style(spinner_style())
        .with_message(message);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    pb
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg} ({pos} records)")
        .expect("Failed to create spinner style template")
}

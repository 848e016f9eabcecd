use chemscreen::engine::progress::{Progress, ProgressCallback};
use chemscreen::engine::state::{BatchProgress, RoundSummary};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders engine progress as an indicatif bar on stderr and report lines on stdout.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb_guard.reset();
                    pb_guard.set_length(0);
                    pb_guard.set_style(Self::spinner_style());
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(name.to_string());
                }
                Progress::PhaseFinish => {
                    pb_guard.disable_steady_tick();
                    pb_guard.finish_and_clear();
                }
                Progress::KeySpace { n, keys } => {
                    emit(&pb_guard, &key_space_lines(n, keys));
                }
                Progress::RoundStart {
                    n,
                    total_combinations,
                } => {
                    emit(&pb_guard, &round_start_lines(total_combinations));
                    pb_guard.disable_steady_tick();
                    pb_guard.reset();
                    pb_guard.set_length(total_combinations);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                    pb_guard.set_message(format!("n = {}", n));
                }
                Progress::Batch(batch) => {
                    pb_guard.set_position(batch.processed);
                    emit(&pb_guard, &[batch_line(&batch)]);
                }
                Progress::RoundFinish(summary) => {
                    if let Some(len) = pb_guard.length() {
                        pb_guard.set_position(len);
                    }
                    pb_guard.finish_and_clear();
                    emit(&pb_guard, &round_summary_lines(&summary));
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<10} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn emit(pb: &ProgressBar, lines: &[String]) {
    pb.suspend(|| {
        for line in lines {
            println!("{}", line);
        }
    });
}

pub fn key_space_lines(n: usize, keys: u64) -> Vec<String> {
    let line = format!("m = {}: {}", n, keys);
    if n == 2 {
        vec!["Combinations of known oxidation states:".to_string(), line]
    } else {
        vec![line]
    }
}

pub fn round_start_lines(total_combinations: u64) -> Vec<String> {
    vec![
        String::new(),
        format!("Counting ({} element combinations)...", total_combinations),
    ]
}

pub fn batch_line(batch: &BatchProgress) -> String {
    format!(
        "  -> {}/{} done ({:.2} %); {:.2} s elapsed, ~{:.2} s remaining",
        batch.processed,
        batch.total,
        batch.percent,
        batch.elapsed.as_secs_f64(),
        batch.remaining.as_secs_f64()
    )
}

pub fn round_summary_lines(summary: &RoundSummary) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "Number of charge-neutral stoichiometries for combinations of {} elements",
            summary.n
        ),
        format!(
            "(using known oxidation states, not including zero): {}",
            summary.count
        ),
        String::new(),
        format!(
            "Total time for counting: {:.3} sec",
            summary.elapsed.as_secs_f64()
        ),
    ]
}

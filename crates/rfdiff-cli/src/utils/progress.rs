use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rfdiff::client::progress::{Progress, ProgressCallback};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// The console line shown before the generated structure is written.
pub fn format_response_preview(status: &str, output_path: &Path, preview: &str) -> String {
    format!("{} Saving to {}:\n {} ...", status, output_path.display(), preview)
}

/// Renders workflow progress on stderr and prints the response preview on stdout.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    output_path: PathBuf,
}

impl CliProgressHandler {
    pub fn new(output_path: PathBuf) -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            output_path,
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let output_path = self.output_path.clone();

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
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::DownloadStart { total_bytes } => {
                    pb_guard.disable_steady_tick();
                    pb_guard.reset();
                    pb_guard.set_position(0);
                    match total_bytes {
                        Some(size) => {
                            pb_guard.set_length(size);
                            pb_guard.set_style(Self::download_style());
                        }
                        None => {
                            pb_guard.unset_length();
                            pb_guard.set_style(Self::spinner_style());
                            pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                        }
                    }
                    pb_guard.set_message("Downloading...");
                }
                Progress::DownloadIncrement { bytes } => {
                    pb_guard.inc(bytes);
                }
                Progress::DownloadFinish => {
                    if let Some(len) = pb_guard.length() {
                        pb_guard.set_position(len);
                    }
                    pb_guard.finish();
                }
                Progress::ResponseReceived { status, preview } => {
                    pb_guard.suspend(|| {
                        println!(
                            "{}",
                            format_response_preview(&status, &output_path, &preview)
                        );
                    });
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn download_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        )
        .expect("Failed to create download style template")
        .progress_chars("#>-")
    }
}

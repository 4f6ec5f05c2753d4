// Reestructura - main.rs
//
// Application entry point. Handles:
// 1. Logging initialisation
// 2. Base-directory resolution
// 3. Pipeline execution
// 4. Outcome notification via modal dialog
//
// The process exits 0 on both success and failure: the dialog is the
// outcome channel, there is no calling script to signal.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use reestructura::ui::notify::{DialogNotifier, Notifier};
use reestructura::{app, platform, util};

fn main() {
    util::logging::init();

    tracing::info!(
        version = util::constants::APP_VERSION,
        "Reestructura starting"
    );

    let base_dir = platform::paths::base_dir();
    let notifier = DialogNotifier;

    match app::pipeline::run(&base_dir) {
        Ok(outcome) => {
            tracing::info!(
                file = %outcome.output_path.display(),
                "Run finished successfully"
            );
            notifier.report_success(&outcome);
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            notifier.report_failure(&e);
        }
    }
}

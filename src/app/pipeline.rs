// Reestructura - app/pipeline.rs
//
// Pipeline orchestration: locate → load → transform → write.
//
// Single pass, single attempt: the first error aborts the run and is
// surfaced to the notifier by the caller. File handles are scoped to the
// load and export calls, so they are released on every exit path.

use crate::core::{export, loader, locate, transform};
use crate::util::constants;
use crate::util::error::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Where the report was written.
    pub output_path: PathBuf,

    /// Rows on the detail sheet (one per distinct active request).
    pub detail_rows: usize,

    /// Rows on the summary sheet (one per branch).
    pub branch_count: usize,

    /// Wall-clock duration of the run.
    pub duration: Duration,
}

/// Run the full pipeline against `base_dir`.
///
/// The input workbook is searched for in `base_dir` and the report is
/// written next to it as `reporte_final_reestructuraciones.xlsx`.
pub fn run(base_dir: &Path) -> Result<PipelineOutcome> {
    let started = Instant::now();

    tracing::info!(dir = %base_dir.display(), "Locating input workbook");
    let input_path = locate::find_input_file(base_dir)?;

    tracing::info!(file = %input_path.display(), "Loading workbook");
    let table = loader::load_table(&input_path)?;

    tracing::info!(rows = table.records.len(), "Transforming records");
    let report = transform::build_report(table);

    let output_path = base_dir.join(constants::OUTPUT_FILE_NAME);
    tracing::info!(file = %output_path.display(), "Writing report");
    export::write_report(&report, &output_path)?;

    let outcome = PipelineOutcome {
        output_path,
        detail_rows: report.detail.len(),
        branch_count: report.branches.len(),
        duration: started.elapsed(),
    };

    tracing::info!(
        detail_rows = outcome.detail_rows,
        branches = outcome.branch_count,
        elapsed_ms = outcome.duration.as_millis() as u64,
        "Report complete"
    );

    Ok(outcome)
}

// Reestructura - util/constants.rs
//
// Single source of truth for all named constants: file patterns, column
// headers, sheet names, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Reestructura";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input workbook
// =============================================================================

/// Glob pattern the input workbook's filename must match. The search is
/// non-recursive: only the base directory itself is examined.
pub const INPUT_PATTERN: &str = "Restructuraciones*.xlsx";

/// Header of the loan-request identifier column. A request may appear on
/// several rows, one per restructuring event.
pub const COL_REQUEST: &str = "NUMERO DE SOLICITUD";

/// Header of the restructuring-date column. Textual cells use day-first
/// ordering ("05/03/2021" is 5 March 2021).
pub const COL_DATE: &str = "FECHA DE RESTRUCTURACION";

/// Header of the current loan-status column.
pub const COL_STATUS: &str = "ESTADO DE CREDITO ACTUAL";

/// Header of the branch column.
pub const COL_BRANCH: &str = "AGENCIA";

/// Header of the outstanding-balance column.
pub const COL_BALANCE: &str = "SALDO CREDITO A LA FECHA";

/// Columns that must be present in the input header row. Checked in this
/// order; the first absent one is reported.
pub const REQUIRED_COLUMNS: &[&str] =
    &[COL_REQUEST, COL_DATE, COL_STATUS, COL_BRANCH, COL_BALANCE];

/// Status value that marks a record as active. Matching is exact: no case
/// folding, no whitespace trimming.
pub const ACTIVE_STATUS: &str = "VIGENTE";

/// Accepted textual date layouts, tried in order. All are day-first.
pub const DATE_INPUT_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y"];

// =============================================================================
// Output workbook
// =============================================================================

/// Filename of the generated report, written next to the input workbook.
/// An existing report at that path is overwritten without confirmation.
pub const OUTPUT_FILE_NAME: &str = "reporte_final_reestructuraciones.xlsx";

/// Sheet holding the deduplicated detail rows (original columns, one row per
/// request).
pub const DETAIL_SHEET_NAME: &str = "Detalle";

/// Sheet holding the per-branch summary.
pub const SUMMARY_SHEET_NAME: &str = "Resumen por Agencia";

/// Summary sheet headers, in column order.
pub const SUMMARY_HEADERS: &[&str] = &[
    "AGENCIA",
    "NUMERO_DE_REESTRUCTURACIONES",
    "SALDO_CREDITO_TOTAL",
];

/// Excel number format applied to restructuring-date cells in the detail
/// sheet.
pub const DATE_CELL_NUM_FORMAT: &str = "dd/mm/yyyy";

/// Suffix appended to the output filename while the workbook is being
/// written. The finished file is renamed over the destination in one step so
/// a failed export never leaves a truncated report behind.
pub const TMP_SUFFIX: &str = ".tmp";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when RUST_LOG is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

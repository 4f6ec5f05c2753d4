// Reestructura - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Reestructura operations.
/// Errors are categorised by the pipeline stage that produced them.
#[derive(Debug)]
pub enum ReportError {
    /// Input workbook location failed.
    Locate(LocateError),

    /// Workbook loading or row parsing failed.
    Load(LoadError),

    /// Report writing failed.
    Export(ExportError),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locate(e) => write!(f, "Locate error: {e}"),
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Locate(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Locate errors
// ---------------------------------------------------------------------------

/// Errors related to finding the input workbook.
#[derive(Debug)]
pub enum LocateError {
    /// No file in the base directory matches the input pattern.
    InputNotFound { dir: PathBuf, pattern: String },

    /// The base directory cannot be read.
    BaseDir { path: PathBuf, source: io::Error },

    /// The input glob pattern failed to compile.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound { dir, pattern } => write!(
                f,
                "No file matching '{pattern}' found in '{}'",
                dir.display()
            ),
            Self::BaseDir { path, source } => {
                write!(f, "Cannot read directory '{}': {source}", path.display())
            }
            Self::Pattern { pattern, source } => {
                write!(f, "Invalid input pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for LocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BaseDir { source, .. } => Some(source),
            Self::Pattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LocateError> for ReportError {
    fn from(e: LocateError) -> Self {
        Self::Locate(e)
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors related to reading the input workbook into records.
#[derive(Debug)]
pub enum LoadError {
    /// The workbook could not be opened or read (corrupt file, wrong format).
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },

    /// The workbook contains no sheets.
    NoWorksheet { path: PathBuf },

    /// A required column is absent from the header row.
    MissingColumn { column: String },

    /// A restructuring-date cell is neither a native date nor a parseable
    /// day-first textual date.
    InvalidDate { row: usize, value: String },

    /// A balance cell is neither numeric nor a parseable numeric string.
    InvalidBalance { row: usize, value: String },

    /// A request-identifier cell is empty.
    MissingRequestId { row: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workbook { path, source } => {
                write!(f, "Cannot read workbook '{}': {source}", path.display())
            }
            Self::NoWorksheet { path } => {
                write!(f, "Workbook '{}' contains no sheets", path.display())
            }
            Self::MissingColumn { column } => {
                write!(f, "Required column '{column}' is missing")
            }
            Self::InvalidDate { row, value } => {
                write!(f, "Row {row}: cannot parse date '{value}' (expected day-first)")
            }
            Self::InvalidBalance { row, value } => {
                write!(f, "Row {row}: cannot parse balance '{value}' as a number")
            }
            Self::MissingRequestId { row } => {
                write!(f, "Row {row}: empty request identifier")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Workbook { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for ReportError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing the report workbook.
#[derive(Debug)]
pub enum ExportError {
    /// xlsx serialisation error.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// I/O error while finalising the report file.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx { path, source } => {
                write!(f, "Cannot write report '{}': {source}", path.display())
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xlsx { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for ReportError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for Reestructura results.
pub type Result<T> = std::result::Result<T, ReportError>;

// Reestructura - core/export.rs
//
// Report workbook writer: two sheets, detail and per-branch summary.
//
// The workbook is saved to a temp sibling and renamed over the destination
// in one step, so an export failure never leaves a truncated report where
// the previous one stood. An existing report is overwritten without
// confirmation.

use crate::core::model::{BranchSummary, CellValue, Report};
use crate::util::constants;
use crate::util::error::ExportError;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `report` to `output_path`.
///
/// The detail sheet reproduces the input's columns in input order with no
/// index column; restructuring dates carry a day-first display format. The
/// summary sheet holds one row per branch.
pub fn write_report(report: &Report, output_path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();

    write_detail(workbook.add_worksheet(), report).map_err(|e| ExportError::Xlsx {
        path: output_path.to_path_buf(),
        source: e,
    })?;
    write_summary(workbook.add_worksheet(), &report.branches).map_err(|e| {
        ExportError::Xlsx {
            path: output_path.to_path_buf(),
            source: e,
        }
    })?;

    let tmp_path = temp_path(output_path);
    workbook.save(&tmp_path).map_err(|e| ExportError::Xlsx {
        path: tmp_path.clone(),
        source: e,
    })?;

    if let Err(e) = fs::rename(&tmp_path, output_path) {
        // Leave the destination as it was; only the temp file is discarded.
        let _ = fs::remove_file(&tmp_path);
        return Err(ExportError::Io {
            path: output_path.to_path_buf(),
            operation: "rename",
            source: e,
        });
    }

    tracing::debug!(
        file = %output_path.display(),
        detail_rows = report.detail.len(),
        branches = report.branches.len(),
        "Report written"
    );

    Ok(())
}

/// Temp sibling of the output file, in the same directory so the final
/// rename stays on one filesystem.
fn temp_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_os_string();
    name.push(constants::TMP_SUFFIX);
    PathBuf::from(name)
}

fn write_detail(sheet: &mut Worksheet, report: &Report) -> Result<(), XlsxError> {
    sheet.set_name(constants::DETAIL_SHEET_NAME)?;

    let date_format = Format::new().set_num_format(constants::DATE_CELL_NUM_FORMAT);

    for (col, header) in report.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header.as_str())?;
    }

    for (i, record) in report.detail.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in record.cells.iter().enumerate() {
            write_cell(sheet, row, col as u16, cell, &date_format)?;
        }
    }

    Ok(())
}

fn write_summary(sheet: &mut Worksheet, branches: &[BranchSummary]) -> Result<(), XlsxError> {
    sheet.set_name(constants::SUMMARY_SHEET_NAME)?;

    for (col, header) in constants::SUMMARY_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, summary) in branches.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, summary.branch.as_str())?;
        sheet.write_number(row, 1, summary.restructure_count as f64)?;
        sheet.write_number(row, 2, summary.total_balance)?;
    }

    Ok(())
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    date_format: &Format,
) -> Result<(), XlsxError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            sheet.write_string(row, col, s.as_str())?;
        }
        CellValue::Number(n) => {
            sheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        CellValue::DateTime(dt) => {
            sheet.write_datetime_with_format(row, col, *dt, date_format)?;
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

// Reestructura - core/loader.rs
//
// Workbook loading: reads the input spreadsheet's first sheet into a
// header-keyed `LoanTable`.
//
// Column presence is the only validation performed beyond per-cell parsing.
// The restructuring-date column accepts native Excel dates as well as
// day-first text ("05/03/2021" is 5 March 2021, never May 3rd). Fully blank
// rows (trailing formatting artefacts) are skipped.

use crate::core::model::{CellValue, LoanTable, Record, RequestId};
use crate::util::constants;
use crate::util::error::LoadError;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDate;
use std::path::Path;

/// Load the input workbook at `path` into a `LoanTable`.
///
/// Reads the first sheet. Fails when a required column is missing from the
/// header row or when a key cell (request id, date, balance) cannot be
/// parsed; the error names the offending sheet row.
pub fn load_table(path: &Path) -> Result<LoanTable, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::Workbook {
        path: path.to_path_buf(),
        source: e,
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::NoWorksheet {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Workbook {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(
        file = %path.display(),
        sheet = %sheet_name,
        rows = range.height(),
        "Workbook opened"
    );

    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_display).collect())
        .unwrap_or_default();

    let columns = ColumnMap::resolve(&headers)?;

    let mut records: Vec<Record> = Vec::new();

    for (i, row) in rows.enumerate() {
        // Sheet row number, 1-based, counting the header row.
        let source_row = i + 2;

        if row.iter().all(|c| c.is_empty()) {
            continue;
        }

        let request = parse_request_id(cell_at(row, columns.request), source_row)?;
        let date = parse_date(cell_at(row, columns.date), source_row)?;
        let balance = parse_balance(cell_at(row, columns.balance), source_row)?;
        let status = cell_text(cell_at(row, columns.status));
        let branch = cell_text(cell_at(row, columns.branch));

        let mut cells: Vec<CellValue> = row.iter().map(cell_value).collect();
        cells.resize(headers.len(), CellValue::Empty);
        // Store the parsed date back so the detail export writes a real date
        // value instead of the raw cell text.
        cells[columns.date] = CellValue::DateTime(date.and_time(chrono::NaiveTime::MIN));

        records.push(Record {
            source_row,
            request,
            date,
            status,
            branch,
            balance,
            cells,
        });
    }

    tracing::debug!(records = records.len(), "Workbook loaded");

    Ok(LoanTable { headers, records })
}

// =============================================================================
// Column resolution
// =============================================================================

/// Indexes of the five required columns within the header row.
struct ColumnMap {
    request: usize,
    date: usize,
    status: usize,
    branch: usize,
    balance: usize,
}

impl ColumnMap {
    /// Resolve required headers to column indexes. Header matching is exact.
    /// The first absent column is reported.
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        for required in constants::REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(LoadError::MissingColumn {
                    column: (*required).to_string(),
                });
            }
        }

        let index = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .unwrap_or_default()
        };

        Ok(Self {
            request: index(constants::COL_REQUEST),
            date: index(constants::COL_DATE),
            status: index(constants::COL_STATUS),
            branch: index(constants::COL_BRANCH),
            balance: index(constants::COL_BALANCE),
        })
    }
}

// =============================================================================
// Cell parsing
// =============================================================================

static EMPTY_CELL: Data = Data::Empty;

/// Cell at `col`, tolerating rows narrower than the header row.
fn cell_at(row: &[Data], col: usize) -> &Data {
    row.get(col).unwrap_or(&EMPTY_CELL)
}

fn parse_request_id(cell: &Data, row: usize) -> Result<RequestId, LoadError> {
    match cell {
        Data::Int(i) => Ok(RequestId::Number(*i)),
        Data::Float(f) if f.fract() == 0.0 => Ok(RequestId::Number(*f as i64)),
        Data::Float(f) => Ok(RequestId::Text(f.to_string())),
        Data::String(s) if s.trim().is_empty() => Err(LoadError::MissingRequestId { row }),
        Data::String(s) => Ok(RequestId::Text(s.clone())),
        Data::Empty => Err(LoadError::MissingRequestId { row }),
        other => Ok(RequestId::Text(cell_display(other))),
    }
}

fn parse_date(cell: &Data, row: usize) -> Result<NaiveDate, LoadError> {
    if let Data::String(s) = cell {
        return parse_day_first(s).ok_or_else(|| LoadError::InvalidDate {
            row,
            value: s.clone(),
        });
    }

    // Native Excel dates (and serial numbers carrying a date format).
    cell.as_datetime()
        .map(|dt| dt.date())
        .ok_or_else(|| LoadError::InvalidDate {
            row,
            value: cell_display(cell),
        })
}

/// Parse a textual date, day-first. Tries each accepted layout in order.
fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    constants::DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

fn parse_balance(cell: &Data, row: usize) -> Result<f64, LoadError> {
    match cell {
        Data::Float(f) => Ok(*f),
        Data::Int(i) => Ok(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().map_err(|_| LoadError::InvalidBalance {
            row,
            value: s.clone(),
        }),
        other => Err(LoadError::InvalidBalance {
            row,
            value: cell_display(other),
        }),
    }
}

/// Text content of a cell, exactly as stored for strings. Used for the
/// status and branch columns, where matching is whitespace-sensitive.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => cell_display(other),
    }
}

/// Human-readable rendering of any cell, for headers and error messages.
/// Integral floats render without a trailing ".0".
fn cell_display(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(e) => e.to_string(),
    }
}

/// Normalise a reader cell into the crate's `CellValue`.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            CellValue::Text(s.clone())
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const EXTRA_COL: &str = "PLAZO MESES";

    /// Write a workbook whose first sheet has the five required columns plus
    /// one extra, and one data row per entry:
    /// (request, date-text, status, branch, balance, extra).
    fn write_fixture(dir: &TempDir, rows: &[(&str, &str, &str, &str, f64, f64)]) -> PathBuf {
        let path = dir.path().join("Restructuraciones test.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        for (col, header) in constants::REQUIRED_COLUMNS
            .iter()
            .chain(std::iter::once(&EXTRA_COL))
            .enumerate()
        {
            sheet.write_string(0, col as u16, *header).expect("header");
        }

        for (i, (request, date, status, branch, balance, extra)) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet.write_string(r, 0, *request).expect("request");
            sheet.write_string(r, 1, *date).expect("date");
            sheet.write_string(r, 2, *status).expect("status");
            sheet.write_string(r, 3, *branch).expect("branch");
            sheet.write_number(r, 4, *balance).expect("balance");
            sheet.write_number(r, 5, *extra).expect("extra");
        }

        workbook.save(&path).expect("save fixture");
        path
    }

    #[test]
    fn test_loads_records_with_day_first_dates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(
            &dir,
            &[
                ("R1", "05/03/2021", "VIGENTE", "Centro", 100.0, 12.0),
                ("R2", "01/02/2020", "CANCELADO", "Norte", 50.0, 24.0),
            ],
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.records.len(), 2);

        let first = &table.records[0];
        assert_eq!(first.request, RequestId::Text("R1".to_string()));
        // Day-first: 5 March, not May 3rd.
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2021, 3, 5).unwrap());
        assert_eq!(first.status, "VIGENTE");
        assert_eq!(first.branch, "Centro");
        assert!((first.balance - 100.0).abs() < f64::EPSILON);

        // 1 February 2020, not 2 January.
        assert_eq!(
            table.records[1].date,
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_full_row_is_retained_with_parsed_date() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, &[("R1", "10/01/2021", "VIGENTE", "Sur", 75.5, 36.0)]);

        let table = load_table(&path).unwrap();
        let record = &table.records[0];
        assert_eq!(record.cells.len(), 6);
        assert_eq!(record.cells[0], CellValue::Text("R1".to_string()));
        assert_eq!(
            record.cells[1],
            CellValue::DateTime(
                NaiveDate::from_ymd_opt(2021, 1, 10)
                    .unwrap()
                    .and_time(chrono::NaiveTime::MIN)
            )
        );
        assert_eq!(record.cells[5], CellValue::Number(36.0));
    }

    #[test]
    fn test_native_date_cells_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Restructuraciones nativo.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in constants::REQUIRED_COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).expect("header");
        }
        sheet.write_string(1, 0, "R1").expect("request");
        let date = NaiveDate::from_ymd_opt(2021, 3, 5).unwrap();
        let format = rust_xlsxwriter::Format::new().set_num_format("dd/mm/yyyy");
        sheet
            .write_datetime_with_format(1, 1, date, &format)
            .expect("date");
        sheet.write_string(1, 2, "VIGENTE").expect("status");
        sheet.write_string(1, 3, "Centro").expect("branch");
        sheet.write_number(1, 4, 10.0).expect("balance");
        workbook.save(&path).expect("save");

        let table = load_table(&path).unwrap();
        assert_eq!(table.records[0].date, date);
    }

    #[test]
    fn test_missing_column_is_named() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Restructuraciones sin agencia.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let headers = [
            constants::COL_REQUEST,
            constants::COL_DATE,
            constants::COL_STATUS,
            constants::COL_BALANCE,
        ];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).expect("header");
        }
        workbook.save(&path).expect("save");

        let result = load_table(&path);
        match result {
            Err(LoadError::MissingColumn { column }) => {
                assert_eq!(column, constants::COL_BRANCH);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_date_names_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, &[("R1", "pronto", "VIGENTE", "Centro", 10.0, 1.0)]);

        let result = load_table(&path);
        match result {
            Err(LoadError::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "pronto");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_balance_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Restructuraciones saldo.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in constants::REQUIRED_COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).expect("header");
        }
        sheet.write_string(1, 0, "R1").expect("request");
        sheet.write_string(1, 1, "05/03/2021").expect("date");
        sheet.write_string(1, 2, "VIGENTE").expect("status");
        sheet.write_string(1, 3, "Centro").expect("branch");
        sheet.write_string(1, 4, "sin saldo").expect("balance");
        workbook.save(&path).expect("save");

        let result = load_table(&path);
        assert!(matches!(result, Err(LoadError::InvalidBalance { row: 2, .. })));
    }

    #[test]
    fn test_numeric_balance_text_is_coerced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Restructuraciones texto.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in constants::REQUIRED_COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).expect("header");
        }
        sheet.write_number(1, 0, 1001.0).expect("request");
        sheet.write_string(1, 1, "05/03/2021").expect("date");
        sheet.write_string(1, 2, "VIGENTE").expect("status");
        sheet.write_string(1, 3, "Centro").expect("branch");
        sheet.write_string(1, 4, " 125.75 ").expect("balance");
        workbook.save(&path).expect("save");

        let table = load_table(&path).unwrap();
        assert_eq!(table.records[0].request, RequestId::Number(1001));
        assert!((table.records[0].balance - 125.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Restructuraciones blancos.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in constants::REQUIRED_COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).expect("header");
        }
        sheet.write_string(1, 0, "R1").expect("request");
        sheet.write_string(1, 1, "05/03/2021").expect("date");
        sheet.write_string(1, 2, "VIGENTE").expect("status");
        sheet.write_string(1, 3, "Centro").expect("branch");
        sheet.write_number(1, 4, 10.0).expect("balance");
        // Row 2 left entirely blank; row 3 has data again.
        sheet.write_string(3, 0, "R2").expect("request");
        sheet.write_string(3, 1, "06/03/2021").expect("date");
        sheet.write_string(3, 2, "VIGENTE").expect("status");
        sheet.write_string(3, 3, "Norte").expect("branch");
        sheet.write_number(3, 4, 20.0).expect("balance");
        workbook.save(&path).expect("save");

        let table = load_table(&path).unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[1].source_row, 4);
    }

    #[test]
    fn test_missing_file_is_workbook_error() {
        let result = load_table(Path::new("/nonexistent/Restructuraciones.xlsx"));
        assert!(matches!(result, Err(LoadError::Workbook { .. })));
    }
}

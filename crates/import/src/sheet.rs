//! Spreadsheet loading.
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read with
//! `calamine`, flat files with `csv`. Either way the first row is the
//! header row and every following non-blank row becomes a [`HeaderRow`]
//! holding a cell for every named column.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rugcat_core::cell::CellValue;
use rugcat_core::headers::HeaderRow;

use crate::error::SheetError;

/// Sheet name reported for CSV input, which has no sheets.
pub const CSV_SHEET_NAME: &str = "csv";

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A sheet read into memory.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    /// Actual sheet name used (may differ in case from the request).
    pub name: String,
    /// Raw header cells of the first row, in column order.
    pub headers: Vec<String>,
    /// Data rows, blank rows dropped.
    pub rows: Vec<HeaderRow>,
}

/// Load `sheet` from the spreadsheet at `path`.
///
/// For CSV input the sheet name is ignored.
pub fn load_sheet(path: &Path, sheet: &str) -> Result<LoadedSheet, SheetError> {
    if !path.exists() {
        return Err(SheetError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension == "csv" {
        load_csv(path)
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        load_workbook(path, sheet)
    } else {
        Err(SheetError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Pick the sheet to read: an exact name match wins, otherwise the first
/// name equal after trimming and lower-casing both sides.
pub fn find_sheet_name<'a>(available: &'a [String], requested: &str) -> Option<&'a str> {
    if let Some(exact) = available.iter().find(|n| *n == requested) {
        return Some(exact.as_str());
    }
    let wanted = requested.trim().to_lowercase();
    available
        .iter()
        .find(|n| n.trim().to_lowercase() == wanted)
        .map(String::as_str)
}

fn load_workbook(path: &Path, sheet: &str) -> Result<LoadedSheet, SheetError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| SheetError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let available = workbook.sheet_names();
    let name = find_sheet_name(&available, sheet)
        .ok_or_else(|| SheetError::SheetNotFound {
            requested: sheet.to_string(),
            available: available.clone(),
        })?
        .to_string();

    let range = workbook
        .worksheet_range(&name)
        .map_err(|source| SheetError::Range {
            sheet: name.clone(),
            source,
        })?;

    let mut grid = range.rows().map(|row| row.iter().map(cell_from_data).collect());
    let (headers, rows) = split_header(&mut grid);
    Ok(LoadedSheet {
        name,
        headers,
        rows,
    })
}

fn load_csv(path: &Path) -> Result<LoadedSheet, SheetError> {
    let csv_error = |source| SheetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let cells: Vec<CellValue> = record.iter().map(|field| CellValue::text(field)).collect();
        grid.push(cells);
    }

    let (headers, rows) = split_header(&mut grid.into_iter());
    Ok(LoadedSheet {
        name: CSV_SHEET_NAME.to_string(),
        headers,
        rows,
    })
}

/// Map a calamine cell onto the loosely-typed cell model. Dates stay
/// numeric (Excel serial days); error cells read as empty.
pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            CellValue::text(s.as_str())
        }
        Data::Bool(b) => CellValue::text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

/// Split a cell grid into the header row and keyed data rows.
///
/// Columns with a blank header are dropped. Short rows are padded with
/// empty cells so every named column is present in every row.
pub fn split_header<I>(grid: &mut I) -> (Vec<String>, Vec<HeaderRow>)
where
    I: Iterator<Item = Vec<CellValue>>,
{
    let Some(header_cells) = grid.next() else {
        return (Vec::new(), Vec::new());
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|c| c.to_trimmed().unwrap_or_default())
        .collect();

    let rows = grid
        .filter(|cells| cells.iter().any(|c| c.to_trimmed().is_some()))
        .map(|cells| {
            let mut cells = cells.into_iter();
            HeaderRow::from_pairs(
                headers
                    .iter()
                    .map(|h| (h, cells.next().unwrap_or_default()))
                    .filter(|(h, _)| !h.is_empty()),
            )
        })
        .collect();

    (headers, rows)
}

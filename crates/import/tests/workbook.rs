//! Loading a real `.xlsx` workbook through calamine.
//!
//! `fixtures/teppiche.xlsx` holds two sheets: `Notizen` and ` TEPPICHE `
//! (padded, upper case). The stock sheet has a header row, two rugs and a
//! blank row between them.

use std::path::PathBuf;

use assert_matches::assert_matches;
use rugcat_core::cell::CellValue;
use rugcat_core::headers::{
    COLOR_HEADERS, LENGTH_HEADERS, PRICE_HEADERS, RUG_NUMBER_HEADERS, SORT_HEADERS,
};
use rugcat_import::error::SheetError;
use rugcat_import::sheet::load_sheet;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/teppiche.xlsx")
}

#[test]
fn sheet_is_found_by_trimmed_case_insensitive_name() {
    let sheet = load_sheet(&fixture(), "Teppiche").unwrap();

    assert_eq!(sheet.name, " TEPPICHE ");
    assert_eq!(
        sheet.headers,
        vec!["Nummer", "Länge", "Breite", "Farbe", "Preis Gesamt", "sort"]
    );
    assert_eq!(sheet.rows.len(), 2);

    let first = &sheet.rows[0];
    assert_eq!(first.pick(RUG_NUMBER_HEADERS), Some(&CellValue::Number(1073.0)));
    assert_eq!(first.pick(LENGTH_HEADERS), Some(&CellValue::Number(141.0)));
    assert_eq!(first.pick(COLOR_HEADERS), Some(&CellValue::from("rot")));
    assert_eq!(first.pick(PRICE_HEADERS), Some(&CellValue::from("1.480,92")));
    assert_eq!(first.pick(SORT_HEADERS), Some(&CellValue::Number(24860.0)));

    let second = &sheet.rows[1];
    assert_eq!(second.pick(RUG_NUMBER_HEADERS), Some(&CellValue::Number(1074.0)));
    assert_eq!(second.pick(COLOR_HEADERS), Some(&CellValue::Empty));
    assert_eq!(second.pick(PRICE_HEADERS), Some(&CellValue::Number(990.5)));
}

#[test]
fn unknown_sheet_lists_the_workbook_sheets() {
    let err = load_sheet(&fixture(), "Sheet1").unwrap_err();
    assert_matches!(
        err,
        SheetError::SheetNotFound { requested, available }
            if requested == "Sheet1" && available == vec!["Notizen", " TEPPICHE "]
    );
}

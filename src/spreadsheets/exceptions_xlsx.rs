use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::domain::models::{CandidateRecord, MergedMatch};
use crate::errors::AppError;

/// One rejected row bound for the exception report.
#[derive(Debug, Clone)]
pub struct ExceptionRow {
    pub reason: &'static str,
    pub row: MergedMatch,
}

const EXCEPTION_HEADERS: [&str; 17] = [
    "Exception Reason",
    "Property Id",
    "Property No",
    "Responsible Party",
    "Property Status",
    "Address Id",
    "Current Address",
    "Suburb And Postcode",
    "GURAS Prop Id",
    "GURAS SP Prop Id",
    "Unique Id",
    "GURAS Road Name",
    "GURAS Road Type",
    "GURAS Suburb",
    "GURAS Postcode",
    "Matches Per Property",
    "Matches Per GURAS Id",
];

const UNMATCHED_HEADERS: [&str; 8] = [
    "Property Id",
    "Property No",
    "Responsible Party",
    "Property Status",
    "Address Id",
    "Current Address",
    "Suburb And Postcode",
    "Lot Key",
];

/// Writes the two-sheet run report: rejected rows with their reason, and
/// candidate rows for which no GURAS record was found. Returns the path of
/// the timestamped workbook.
pub fn export_exceptions_xlsx(
    exceptions: &[ExceptionRow],
    unmatched: &[CandidateRecord],
    report_dir: &Path,
) -> Result<PathBuf, AppError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("GURAS-GPR Exceptions")?;
    write_headers(sheet, &EXCEPTION_HEADERS)?;
    for (i, exception) in exceptions.iter().enumerate() {
        let r = (i + 1) as u32;
        let m = &exception.row;
        let c = &m.candidate;

        sheet.write_string(r, 0, exception.reason)?;
        sheet.write_number(r, 1, c.property_id as f64)?;
        sheet.write_number(r, 2, c.property_no as f64)?;
        sheet.write_string(r, 3, &c.responsible_party)?;
        sheet.write_string(r, 4, c.property_status.as_str())?;
        sheet.write_number(r, 5, c.address_id as f64)?;
        sheet.write_string(r, 6, &c.address_text)?;
        sheet.write_string(r, 7, &c.suburb_and_postcode)?;
        sheet.write_number(r, 8, m.address.prop_id.unwrap_or(0) as f64)?;
        sheet.write_number(r, 9, m.address.sp_prop_id.unwrap_or(0) as f64)?;
        sheet.write_number(r, 10, m.address.unique_id as f64)?;
        sheet.write_string(r, 11, m.address.road_1_name.as_deref().unwrap_or(""))?;
        sheet.write_string(r, 12, m.address.road_1_type.as_deref().unwrap_or(""))?;
        sheet.write_string(r, 13, m.address.suburb_name.as_deref().unwrap_or(""))?;
        sheet.write_number(r, 14, m.address.postcode.unwrap_or(0) as f64)?;
        sheet.write_number(r, 15, m.matches_per_property as f64)?;
        sheet.write_number(r, 16, m.matches_per_identity as f64)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("No GURAS")?;
    write_headers(sheet, &UNMATCHED_HEADERS)?;
    for (i, c) in unmatched.iter().enumerate() {
        let r = (i + 1) as u32;

        sheet.write_number(r, 0, c.property_id as f64)?;
        sheet.write_number(r, 1, c.property_no as f64)?;
        sheet.write_string(r, 2, &c.responsible_party)?;
        sheet.write_string(r, 3, c.property_status.as_str())?;
        sheet.write_number(r, 4, c.address_id as f64)?;
        sheet.write_string(r, 5, &c.address_text)?;
        sheet.write_string(r, 6, &c.suburb_and_postcode)?;
        sheet.write_string(r, 7, &c.lot_key)?;
    }

    fs::create_dir_all(report_dir)?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = report_dir.join(format!("AddressUpdateExceptions_{stamp}.xlsx"));
    workbook.save(&path)?;

    Ok(path)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<(), AppError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    Ok(())
}

//! CSV and spreadsheet export encoders.
//!
//! Both encoders consume a listing snapshot and render display-formatted
//! times. The spreadsheet adds a computed per-row duration column and a
//! summary block (total, per-role counts, average duration over parseable
//! shifts).

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};
use thiserror::Error;

use super::store::{average_shift_hours, count_by_role, round_one_decimal};
use super::types::Shift;

/// Header fill color for the spreadsheet export.
const HEADER_FILL: Color = Color::RGB(0x2F75B5);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet encoding failed: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV writer I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Render shifts as CSV with a `Name,Role,Shift Start,Shift End` header.
pub fn write_csv(shifts: &[Shift]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["Name", "Role", "Shift Start", "Shift End"])?;
    for shift in shifts {
        writer.write_record([
            &shift.name,
            &shift.role,
            &shift.display_start,
            &shift.display_end,
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Render shifts as an `.xlsx` workbook with durations and a summary block.
pub fn write_workbook(shifts: &[Shift]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Shifts")?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let bold = Format::new().set_bold();

    let headers = ["Name", "Role", "Shift Start", "Shift End", "Duration (hours)"];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    let mut row = 1u32;
    for shift in shifts {
        // Duration falls back to 0 for malformed stored times
        let duration = shift
            .duration_hours()
            .map(round_one_decimal)
            .unwrap_or(0.0);

        worksheet.write(row, 0, shift.name.as_str())?;
        worksheet.write(row, 1, shift.role.as_str())?;
        worksheet.write(row, 2, shift.display_start.as_str())?;
        worksheet.write(row, 3, shift.display_end.as_str())?;
        worksheet.write(row, 4, duration)?;
        row += 1;
    }

    // Summary block, separated by a blank row
    row += 2;
    worksheet.write_with_format(row, 0, "Summary", &bold)?;
    row += 1;

    worksheet.write(row, 0, "Total Shifts:")?;
    worksheet.write(row, 1, shifts.len() as u32)?;
    row += 1;

    worksheet.write_with_format(row, 0, "Shifts by Role:", &bold)?;
    row += 1;

    for (role, count) in count_by_role(shifts) {
        worksheet.write(row, 0, role.as_str())?;
        worksheet.write(row, 1, count as u32)?;
        row += 1;
    }

    row += 1;
    worksheet.write(row, 0, "Average Shift Length:")?;
    worksheet.write(row, 1, format!("{} hours", average_shift_hours(shifts)))?;

    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

//! Employee Export
//!
//! Employees are written to a single sheet with a fixed header row. The
//! workbook is built entirely in memory.

use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};

use crate::domain::employees::records::EmployeeRecord;

pub const EXPORT_SHEET_NAME: &str = "Employees";

pub const EXPORT_HEADERS: [&str; 9] = [
    "Id",
    "First Name",
    "Last Name",
    "Email",
    "Mobile",
    "Date of Birth",
    "Department",
    "Job Title",
    "Date of Hire",
];

const HEADER_FILL: u32 = 0x00D3_D3D3;

/// A single exported value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

/// The exported cells for one employee, in header order.
#[must_use]
pub fn employee_row(employee: &EmployeeRecord) -> [Cell; 9] {
    #[expect(clippy::cast_precision_loss, reason = "Ids stay far below 2^53")]
    let id = employee.id.into_i64() as f64;

    [
        Cell::Number(id),
        Cell::Text(employee.first_name.clone()),
        Cell::Text(employee.last_name.clone()),
        Cell::Text(employee.email.clone()),
        Cell::Text(employee.phone_number.clone()),
        Cell::Text(employee.date_of_birth.strftime("%Y-%m-%d").to_string()),
        Cell::Text(employee.department_name.clone()),
        Cell::Text(employee.job_name.clone()),
        Cell::Text(employee.hire_date.strftime("%Y-%m-%d").to_string()),
    ]
}

/// The data rows of the sheet, one per employee, in the given order.
#[must_use]
pub fn sheet_rows(employees: &[EmployeeRecord]) -> Vec<[Cell; 9]> {
    employees.iter().map(employee_row).collect()
}

/// Serialize a header row followed by `rows` into an `.xlsx` file.
///
/// # Errors
///
/// Returns an error when the workbook cannot be written.
pub fn write_workbook(rows: &[[Cell; 9]]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    {
        let worksheet = workbook.add_worksheet();

        worksheet.set_name(EXPORT_SHEET_NAME)?;

        let header = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(HEADER_FILL));

        for (col, title) in (0u16..).zip(EXPORT_HEADERS) {
            worksheet.write_string_with_format(0, col, title, &header)?;
        }

        for (row, cells) in (1u32..).zip(rows) {
            for (col, cell) in (0u16..).zip(cells) {
                match cell {
                    Cell::Number(value) => worksheet.write_number(row, col, *value)?,
                    Cell::Text(value) => worksheet.write_string(row, col, value.as_str())?,
                };
            }
        }

        worksheet.autofit();
    }

    workbook.save_to_buffer()
}

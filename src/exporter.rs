use std::path::{Path, PathBuf};

use actix_web::web;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use strum::IntoEnumIterator;
use tracing::info;

use crate::db::Database;
use crate::error::AppResult;
use crate::model::employee::Employee;
use crate::repository::employee::list_employees;
use crate::schema::Column;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Dumps the whole employee table to `path`, replacing any previous export.
/// Returns the number of rows written.
pub async fn export_employees(db: &Database, path: &Path, sheet: &str) -> AppResult<usize> {
    let employees = list_employees(db, None).await?;
    let count = employees.len();

    let target: PathBuf = path.to_path_buf();
    let sheet_name = sheet.to_string();
    web::block(move || write_workbook(&target, &sheet_name, &employees)).await??;

    info!(count, path = %path.display(), "Exported employees");
    Ok(count)
}

/// Header row `id, funcionario, ..., supervisor`, then one row per record.
/// NULL cells are left blank.
pub fn write_workbook(path: &Path, sheet: &str, employees: &[Employee]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    worksheet.write_string_with_format(0, 0, "id", &bold)?;
    for (index, column) in Column::iter().enumerate() {
        worksheet.write_string_with_format(0, index as u16 + 1, column.name(), &bold)?;
    }

    for (offset, employee) in employees.iter().enumerate() {
        let row = offset as u32 + 1;
        worksheet.write_number(row, 0, employee.id as f64)?;
        for (index, value) in employee.values.iter().enumerate() {
            if let Some(value) = value {
                worksheet.write_string(row, index as u16 + 1, value)?;
            }
        }
    }

    workbook.save(path)
}

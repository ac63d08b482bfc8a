use std::path::{Path, PathBuf};

use actix_web::web;
use calamine::{Data, Reader, open_workbook_auto};
use chrono::Timelike;
use sqlx::Connection;
use tracing::{debug, info};

use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::repository::employee::count_employees;
use crate::schema::{Column, EMPLOYEE_TABLE, column_for_header};
use crate::utils::db_utils::{FieldValues, build_insert_sql, execute};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(usize),
    Skipped { existing: i64 },
}

/// Seeds `funcionarios` from a workbook, but only while the table is empty.
///
/// Safe to run on every startup: a populated table short-circuits before the
/// file is opened, and the emptiness check is repeated inside the insert
/// transaction. An empty table with no readable workbook is an error.
pub async fn import_spreadsheet(
    db: &Database,
    path: &Path,
    sheet: &str,
) -> AppResult<ImportOutcome> {
    let existing = count_employees(db).await?;
    if existing > 0 {
        info!(existing, "Employee table already has data, skipping import");
        return Ok(ImportOutcome::Skipped { existing });
    }

    let source: PathBuf = path.to_path_buf();
    let sheet_name = sheet.to_string();
    let rows = web::block(move || read_spreadsheet(&source, &sheet_name)).await??;

    let outcome = import_rows(db, &rows).await?;
    if let ImportOutcome::Imported(count) = outcome {
        info!(count, path = %path.display(), sheet, "Imported employees from spreadsheet");
    }
    Ok(outcome)
}

/// Reads `sheet` and maps every data row onto the schema columns.
///
/// The first row is the header row. An `id` header or an empty header cell
/// drops that column; any other header that maps to no column is an error.
pub fn read_spreadsheet(path: &Path, sheet: &str) -> AppResult<Vec<FieldValues>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range(sheet)?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => map_headers(header_row)?,
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut fields = FieldValues::new();
        for (column, cell) in headers.iter().zip(row) {
            if let (Some(column), Some(value)) = (column, cell_text(cell)) {
                fields.insert(*column, value);
            }
        }
        if !fields.is_empty() {
            records.push(fields);
        }
    }

    debug!(rows = records.len(), sheet, "Read spreadsheet rows");
    Ok(records)
}

/// Bulk-inserts `rows` in one transaction if the table is still empty.
pub async fn import_rows(db: &Database, rows: &[FieldValues]) -> AppResult<ImportOutcome> {
    let mut conn = db.connect().await?;
    let mut tx = conn.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM funcionarios")
        .fetch_one(&mut *tx)
        .await?;

    if existing > 0 {
        tx.rollback().await?;
        conn.close().await?;
        return Ok(ImportOutcome::Skipped { existing });
    }

    for fields in rows {
        let statement = build_insert_sql(EMPLOYEE_TABLE, fields)?;
        execute(&mut tx, statement).await?;
    }

    tx.commit().await?;
    conn.close().await?;
    Ok(ImportOutcome::Imported(rows.len()))
}

fn map_headers(row: &[Data]) -> AppResult<Vec<Option<Column>>> {
    row.iter()
        .map(|cell| match cell_text(cell) {
            None => Ok(None),
            Some(header) if header.trim().eq_ignore_ascii_case("id") => Ok(None),
            Some(header) => column_for_header(&header)
                .map(Some)
                .ok_or(AppError::UnknownHeader(header)),
        })
        .collect()
}

/// Text stored for a cell; `None` for blanks.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.time().num_seconds_from_midnight() == 0 => {
                Some(value.format("%Y-%m-%d").to_string())
            }
            Some(value) => Some(value.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Some(dt.as_f64().to_string()),
        },
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::write_workbook;
    use crate::repository::employee::{create_employee, delete_employee, list_employees};
    use crate::test_support::{fields, scratch_db};
    use rust_xlsxwriter::Workbook;

    fn write_headcount(path: &Path, sheet: &str, headers: &[&str], rows: &[&[&str]]) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet
                        .write_string(r as u32 + 1, col as u16, *value)
                        .unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }

    #[actix_web::test]
    async fn imports_rows_under_mapped_headers() {
        let (dir, db) = scratch_db().await;
        let path = dir.path().join("headcount.xlsx");
        write_headcount(
            &path,
            "Planilha1",
            &["FUNCIONÁRIO(A):", "CARGO:", "Municipio de Moradia", "Placa"],
            &[
                &["Ana Silva", "Motorista", "Recife", "ABC1D23"],
                &["Bruno Lima", "Analista", "Olinda", ""],
            ],
        );

        let outcome = import_spreadsheet(&db, &path, "Planilha1").await.unwrap();
        assert_eq!(outcome, ImportOutcome::Imported(2));

        let employees = list_employees(&db, None).await.unwrap();
        assert_eq!(employees.len(), 2);
        let bruno = employees
            .iter()
            .find(|e| e.get(Column::Funcionario) == Some("Bruno Lima"))
            .unwrap();
        assert_eq!(bruno.get(Column::Cargo), Some("Analista"));
        assert_eq!(bruno.get(Column::Municipio), Some("Olinda"));
        assert_eq!(bruno.get(Column::Placa), None);
    }

    #[actix_web::test]
    async fn second_import_is_skipped() {
        let (dir, db) = scratch_db().await;
        let path = dir.path().join("headcount.xlsx");
        write_headcount(&path, "Planilha1", &["FUNCIONÁRIO(A):"], &[&["Ana"], &["Bruno"]]);

        import_spreadsheet(&db, &path, "Planilha1").await.unwrap();
        let outcome = import_spreadsheet(&db, &path, "Planilha1").await.unwrap();

        assert_eq!(outcome, ImportOutcome::Skipped { existing: 2 });
        assert_eq!(count_employees(&db).await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn populated_table_is_never_overwritten() {
        let (_dir, db) = scratch_db().await;
        create_employee(&db, &fields(&[("funcionario", "Existente")]))
            .await
            .unwrap();

        let outcome = import_rows(&db, &[fields(&[("funcionario", "Novo")])])
            .await
            .unwrap();

        assert_eq!(outcome, ImportOutcome::Skipped { existing: 1 });
        assert_eq!(count_employees(&db).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn unknown_header_aborts_without_inserting() {
        let (dir, db) = scratch_db().await;
        let path = dir.path().join("headcount.xlsx");
        write_headcount(
            &path,
            "Planilha1",
            &["FUNCIONÁRIO(A):", "Observações"],
            &[&["Ana", "x"]],
        );

        let err = import_spreadsheet(&db, &path, "Planilha1").await.unwrap_err();

        assert!(matches!(err, AppError::UnknownHeader(h) if h == "Observações"));
        assert_eq!(count_employees(&db).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn wrong_sheet_name_is_an_error() {
        let (dir, db) = scratch_db().await;
        let path = dir.path().join("headcount.xlsx");
        write_headcount(&path, "Sheet1", &["CPF"], &[&["123"]]);

        let err = import_spreadsheet(&db, &path, "Planilha1").await.unwrap_err();
        assert!(matches!(err, AppError::Spreadsheet(_)));
    }

    #[actix_web::test]
    async fn missing_source_on_empty_table_is_an_error() {
        let (dir, db) = scratch_db().await;

        let err = import_spreadsheet(&db, &dir.path().join("headcount 2.xlsx"), "Planilha1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Spreadsheet(_)));
        assert_eq!(count_employees(&db).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn missing_source_is_not_opened_when_table_has_rows() {
        let (dir, db) = scratch_db().await;
        create_employee(&db, &fields(&[("funcionario", "Ana")]))
            .await
            .unwrap();

        let outcome = import_spreadsheet(&db, &dir.path().join("headcount 2.xlsx"), "Planilha1")
            .await
            .unwrap();

        assert_eq!(outcome, ImportOutcome::Skipped { existing: 1 });
    }

    #[actix_web::test]
    async fn emptied_table_is_seeded_again_on_next_import() {
        let (dir, db) = scratch_db().await;
        let path = dir.path().join("headcount.xlsx");
        write_headcount(&path, "Planilha1", &["FUNCIONÁRIO(A):"], &[&["Ana"]]);

        import_spreadsheet(&db, &path, "Planilha1").await.unwrap();
        for employee in list_employees(&db, None).await.unwrap() {
            delete_employee(&db, employee.id).await.unwrap();
        }

        let outcome = import_spreadsheet(&db, &path, "Planilha1").await.unwrap();
        assert_eq!(outcome, ImportOutcome::Imported(1));
    }

    #[actix_web::test]
    async fn export_then_import_reproduces_the_records() {
        let (source_dir, source) = scratch_db().await;
        create_employee(
            &source,
            &fields(&[("funcionario", "Ana Silva"), ("cargo", "Motorista"), ("cpf", "123.456.789-00")]),
        )
        .await
        .unwrap();
        create_employee(&source, &fields(&[("funcionario", "Bruno"), ("placa", "XYZ9K87")]))
            .await
            .unwrap();
        let original = list_employees(&source, None).await.unwrap();

        let path = source_dir.path().join("export.xlsx");
        write_workbook(&path, "Planilha1", &original).unwrap();

        let (_target_dir, target) = scratch_db().await;
        let outcome = import_spreadsheet(&target, &path, "Planilha1").await.unwrap();
        assert_eq!(outcome, ImportOutcome::Imported(2));

        let mut expected: Vec<_> = original.into_iter().map(|e| e.values).collect();
        let mut imported: Vec<_> = list_employees(&target, None)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.values)
            .collect();
        expected.sort();
        imported.sort();
        assert_eq!(imported, expected);
    }

    #[test]
    fn numeric_cells_lose_trailing_zero_fraction() {
        assert_eq!(cell_text(&Data::Float(12345.0)), Some("12345".to_string()));
        assert_eq!(cell_text(&Data::Float(1.5)), Some("1.5".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
        assert_eq!(cell_text(&Data::String("  ".to_string())), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }
}

use sqlx::Connection;
use tracing::debug;

use crate::db::Database;
use crate::error::AppResult;
use crate::model::employee::{Employee, EmployeeFilter};
use crate::schema::{EMPLOYEE_SELECT_COLUMNS, EMPLOYEE_TABLE};
use crate::utils::db_utils::{
    FieldValues, SqlValue, build_insert_sql, build_select_sql, build_update_sql, execute,
};

/// All records, or those whose `filter.column` contains `filter.value`.
/// Rows come back in natural store order.
pub async fn list_employees(
    db: &Database,
    filter: Option<&EmployeeFilter>,
) -> AppResult<Vec<Employee>> {
    let statement = build_select_sql(filter);
    debug!(sql = %statement.sql, "Fetching employees");

    let mut conn = db.connect().await?;

    let mut query = sqlx::query_as::<_, Employee>(&statement.sql);
    for value in statement.values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
        };
    }
    let employees = query.fetch_all(&mut conn).await?;

    conn.close().await?;
    Ok(employees)
}

pub async fn find_employee(db: &Database, id: i64) -> AppResult<Option<Employee>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?",
        EMPLOYEE_SELECT_COLUMNS.as_str(),
        EMPLOYEE_TABLE
    );

    let mut conn = db.connect().await?;
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;

    conn.close().await?;
    Ok(employee)
}

/// Inserts one record from the supplied fields and returns its new id.
pub async fn create_employee(db: &Database, fields: &FieldValues) -> AppResult<i64> {
    let statement = build_insert_sql(EMPLOYEE_TABLE, fields)?;
    debug!(sql = %statement.sql, "Inserting employee");

    let mut conn = db.connect().await?;
    let result = execute(&mut conn, statement).await?;

    conn.close().await?;
    Ok(result.last_insert_rowid())
}

/// Returns the number of rows touched; `0` when `id` does not exist.
pub async fn update_employee(db: &Database, id: i64, fields: &FieldValues) -> AppResult<u64> {
    let statement = build_update_sql(EMPLOYEE_TABLE, fields, "id", id)?;
    debug!(sql = %statement.sql, employee_id = id, "Updating employee");

    let mut conn = db.connect().await?;
    let result = execute(&mut conn, statement).await?;

    conn.close().await?;
    Ok(result.rows_affected())
}

/// Returns the number of rows removed; `0` when `id` does not exist.
pub async fn delete_employee(db: &Database, id: i64) -> AppResult<u64> {
    let mut conn = db.connect().await?;

    let result = sqlx::query("DELETE FROM funcionarios WHERE id = ?")
        .bind(id)
        .execute(&mut conn)
        .await?;

    conn.close().await?;
    Ok(result.rows_affected())
}

pub async fn count_employees(db: &Database) -> AppResult<i64> {
    let mut conn = db.connect().await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM funcionarios")
        .fetch_one(&mut conn)
        .await?;

    conn.close().await?;
    Ok(total)
}

use std::collections::BTreeMap;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnection, SqliteQueryResult};

use crate::error::{AppError, AppResult};
use crate::model::employee::EmployeeFilter;
use crate::schema::{Column, EMPLOYEE_SELECT_COLUMNS, EMPLOYEE_TABLE};

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    I64(i64),
}

/// ===============================
/// SQL statement container
/// ===============================
#[derive(Debug)]
pub struct SqlStatement {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Caller-chosen subset of columns
/// ===============================
///
/// Only constructible from names that parse as [`Column`], so every key is
/// safe to use as an identifier. A repeated name keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues(BTreeMap<Column, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `name=value` pairs, rejecting any name outside the schema.
    pub fn from_pairs<I>(pairs: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields = Self::new();
        for (name, value) in pairs {
            let column =
                Column::from_str(&name).map_err(|_| AppError::UnknownColumn(name.clone()))?;
            fields.insert(column, value);
        }
        Ok(fields)
    }

    pub fn insert(&mut self, column: Column, value: String) {
        self.0.insert(column, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Column, &str)> {
        self.0.iter().map(|(column, value)| (*column, value.as_str()))
    }
}

/// ===============================
/// Build SELECT, optionally filtered
/// ===============================
pub fn build_select_sql(filter: Option<&EmployeeFilter>) -> SqlStatement {
    match filter {
        Some(filter) => SqlStatement {
            sql: format!(
                "SELECT {} FROM {} WHERE {} LIKE ?",
                EMPLOYEE_SELECT_COLUMNS.as_str(),
                EMPLOYEE_TABLE,
                filter.column.name()
            ),
            values: vec![SqlValue::Text(format!("%{}%", filter.value))],
        },
        None => SqlStatement {
            sql: format!(
                "SELECT {} FROM {}",
                EMPLOYEE_SELECT_COLUMNS.as_str(),
                EMPLOYEE_TABLE
            ),
            values: Vec::new(),
        },
    }
}

/// ===============================
/// Build dynamic INSERT SQL
/// ===============================
pub fn build_insert_sql(table: &str, fields: &FieldValues) -> AppResult<SqlStatement> {
    if fields.is_empty() {
        return Err(AppError::EmptyFields);
    }

    let columns = fields
        .iter()
        .map(|(column, _)| column.name())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; fields.len()].join(", ");

    let sql = format!("INSERT INTO {} ({}) VALUES ({})", table, columns, placeholders);
    let values = fields
        .iter()
        .map(|(_, value)| SqlValue::Text(value.to_string()))
        .collect();

    Ok(SqlStatement { sql, values })
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
pub fn build_update_sql(
    table: &str,
    fields: &FieldValues,
    id_column: &str,
    id_value: i64,
) -> AppResult<SqlStatement> {
    if fields.is_empty() {
        return Err(AppError::EmptyFields);
    }

    // Build SET clause
    let set_clause = fields
        .iter()
        .map(|(column, _)| format!("{} = ?", column.name()))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!("UPDATE {} SET {} WHERE {} = ?", table, set_clause, id_column);

    let mut values = Vec::with_capacity(fields.len() + 1);
    values.extend(fields.iter().map(|(_, value)| SqlValue::Text(value.to_string())));

    // WHERE id = ?
    values.push(SqlValue::I64(id_value));

    Ok(SqlStatement { sql, values })
}

/// ===============================
/// Execute a write statement
/// ===============================
pub async fn execute(
    conn: &mut SqliteConnection,
    statement: SqlStatement,
) -> Result<SqliteQueryResult, sqlx::Error> {
    let mut query = sqlx::query(&statement.sql);

    for value in statement.values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
        };
    }

    query.execute(conn).await
}

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use strum::IntoEnumIterator;

use crate::schema::Column;

/// One row of `funcionarios`.
///
/// `values` holds the attributes in [`Column`] order; `None` is a NULL cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub values: Vec<Option<String>>,
}

impl Employee {
    pub fn get(&self, column: Column) -> Option<&str> {
        self.values
            .get(column as usize)
            .and_then(|value| value.as_deref())
    }
}

impl<'r> FromRow<'r, SqliteRow> for Employee {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let values = Column::iter()
            .map(|column| row.try_get::<Option<String>, _>(column.name()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { id, values })
    }
}

/// `column LIKE %value%`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub column: Column,
    pub value: String,
}

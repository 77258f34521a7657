//! Database access for questions answered with SQL.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup creates the shared `SQLx` pool when `DATABASE_URL` is set. The ask
//! service reads the schema to prompt the model for a query, then runs the
//! generated query through [`SqlDatabase::select`].
//!
//! DESIGN
//! ======
//! The database is read-only from this crate's point of view: anything that
//! does not start with `SELECT` is refused before it reaches the server.
//! Cells are converted to JSON values so results can be rendered without
//! knowing the schema at compile time.

use serde_json::Value;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

const SCHEMA_QUERY: &str = "SELECT CAST(TABLE_NAME AS CHAR), CAST(COLUMN_NAME AS CHAR), CAST(COLUMN_TYPE AS CHAR) \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() \
     ORDER BY TABLE_NAME, ORDINAL_POSITION";

fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
}

/// Initialize the `MySQL` connection pool.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn init_pool(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(db_max_connections())
        .connect(database_url)
        .await
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Permesse solo query SELECT.")]
    NotSelect,

    #[error("Errore MySQL: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
}

/// Result set of a `SELECT`: column names plus one JSON value per cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Read-only SQL access. Enables mocking in tests.
#[async_trait::async_trait]
pub trait SqlDatabase: Send + Sync {
    /// Tables of the current database with their columns, in table order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sql`] if the catalog cannot be read.
    async fn schema(&self) -> Result<Vec<TableSchema>, DbError>;

    /// Run one `SELECT` statement.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotSelect`] for any other statement, or the driver error.
    async fn select(&self, sql: &str) -> Result<QueryRows, DbError>;
}

// =============================================================================
// MYSQL
// =============================================================================

pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SqlDatabase for MySqlDatabase {
    async fn schema(&self) -> Result<Vec<TableSchema>, DbError> {
        let rows = sqlx::query_as::<_, (String, String, String)>(SCHEMA_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(group_columns(rows))
    }

    async fn select(&self, sql: &str) -> Result<QueryRows, DbError> {
        if !is_select_query(sql) {
            tracing::warn!(sql, "non-SELECT query refused");
            return Err(DbError::NotSelect);
        }

        tracing::info!(sql, "running generated query");
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        let columns = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_owned()).collect())
            .unwrap_or_default();
        let rows = rows.iter().map(row_to_json).collect();
        Ok(QueryRows { columns, rows })
    }
}

fn row_to_json(row: &MySqlRow) -> Vec<Value> {
    (0..row.columns().len()).map(|i| cell_to_json(row, i)).collect()
}

fn cell_to_json(row: &MySqlRow, index: usize) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Err(_) => return Value::Null,
        Ok(_) => {}
    }

    let type_name = row.columns()[index].type_info().name().to_owned();
    let typed = match type_name.as_str() {
        "BOOLEAN" => row.try_get::<bool, _>(index).map(Value::from).ok(),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row.try_get::<i64, _>(index).map(Value::from).ok(),
        t if t.ends_with("UNSIGNED") => row.try_get::<u64, _>(index).map(Value::from).ok(),
        "FLOAT" | "DOUBLE" => row.try_get::<f64, _>(index).map(Value::from).ok(),
        "DATETIME" | "TIMESTAMP" => row
            .try_get::<time::PrimitiveDateTime, _>(index)
            .map(|v| Value::from(v.to_string()))
            .ok(),
        "DATE" => row.try_get::<time::Date, _>(index).map(|v| Value::from(v.to_string())).ok(),
        "TIME" => row.try_get::<time::Time, _>(index).map(|v| Value::from(v.to_string())).ok(),
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(|v| Value::from(String::from_utf8_lossy(&v).into_owned()))
            .ok(),
        _ => None,
    };
    typed
        .or_else(|| row.try_get_unchecked::<String, _>(index).map(Value::from).ok())
        .unwrap_or(Value::Null)
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// True if the statement starts with `SELECT`, ignoring case and leading space.
#[must_use]
pub fn is_select_query(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("SELECT"))
}

/// Group `(table, column, type)` catalog rows, already ordered by table, into tables.
#[must_use]
pub fn group_columns(rows: Vec<(String, String, String)>) -> Vec<TableSchema> {
    let mut tables: Vec<TableSchema> = Vec::new();
    for (table, name, data_type) in rows {
        let column = ColumnSchema { name, data_type };
        match tables.last_mut() {
            Some(last) if last.name == table => last.columns.push(column),
            _ => tables.push(TableSchema { name: table, columns: vec![column] }),
        }
    }
    tables
}

/// Render the schema as the plain-text block handed to the model.
#[must_use]
pub fn format_schema(tables: &[TableSchema]) -> String {
    let mut out = String::from("Schema Database:\n");
    for table in tables {
        out.push_str(&format!("\nTabella: {}\nColonne:\n", table.name));
        for column in &table.columns {
            out.push_str(&format!("  - {} ({})\n", column.name, column.data_type));
        }
    }
    out
}

/// Render one result row as `col: value, col: value`.
#[must_use]
pub fn format_row(columns: &[String], row: &[Value]) -> String {
    columns
        .iter()
        .zip(row)
        .map(|(column, value)| format!("{column}: {}", format_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_owned(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

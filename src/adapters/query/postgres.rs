//! PostgreSQL query service implementation
//!
//! Executes the registered SQL templates against a pooled PostgreSQL
//! connection. The pool is the only shared mutable resource in the system
//! and is synchronized by deadpool; the core treats this adapter as an
//! opaque dependency.

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use tokio_postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use tokio_postgres::{NoTls, Row};

use crate::adapters::query::params::{bind_named, request_params, ParamValue};
use crate::adapters::query::templates::TemplateRegistry;
use crate::adapters::query::traits::QueryService;
use crate::config::schema::DatabaseConfig;
use crate::domain::errors::{QueryError, VantageError};
use crate::domain::request::ExportRequest;
use crate::domain::result::Result;
use crate::domain::table::{CellValue, Table};

/// Query service backed by PostgreSQL
pub struct PostgresQueryService {
    pool: Pool,
    registry: TemplateRegistry,
}

impl PostgresQueryService {
    /// Creates the service and verifies connectivity
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built or the connection
    /// probe fails.
    pub async fn connect(config: &DatabaseConfig, registry: TemplateRegistry) -> Result<Self> {
        let password: &str = config.password.expose_secret().as_ref();
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .dbname(&config.dbname)
            .user(&config.user)
            .password(password);

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .build()
            .map_err(|e| {
                VantageError::Configuration(format!("Failed to create connection pool: {e}"))
            })?;

        let service = Self { pool, registry };
        service.test_connection().await?;
        Ok(service)
    }

    /// Probes the connection with a trivial query
    pub async fn test_connection(&self) -> Result<()> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| VantageError::Query(QueryError::Backend(e.to_string())))?;
        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| VantageError::Query(QueryError::Backend(e.to_string())))?;
        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    async fn execute(
        &self,
        sql: &str,
        request: &ExportRequest,
    ) -> std::result::Result<(Vec<String>, Vec<Row>), QueryError> {
        let params = request_params(request);
        let (sql, values) = bind_named(sql, &params)?;

        let client = self
            .pool
            .get()
            .await
            .map_err(|e| QueryError::Backend(format!("Failed to get connection: {e}")))?;
        let statement = client
            .prepare(&sql)
            .await
            .map_err(|e| QueryError::Backend(format!("Failed to prepare query: {e}")))?;

        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let refs: Vec<&(dyn ToSql + Sync)> =
            values.iter().map(|v| v as &(dyn ToSql + Sync)).collect();
        let rows = client
            .query(&statement, &refs)
            .await
            .map_err(|e| QueryError::Backend(format!("Query execution failed: {e}")))?;

        Ok((columns, rows))
    }
}

#[async_trait]
impl QueryService for PostgresQueryService {
    async fn count(&self, request: &ExportRequest) -> std::result::Result<u64, QueryError> {
        let pair = self.registry.pair(request.data_source)?;
        let (_, rows) = self.execute(&pair.count, request).await?;
        let Some(row) = rows.first() else {
            return Ok(0);
        };
        let count: i64 = row
            .try_get(0)
            .map_err(|e| QueryError::Backend(format!("Count query returned no integer: {e}")))?;
        Ok(count.max(0) as u64)
    }

    async fn rows(
        &self,
        request: &ExportRequest,
        limit: Option<usize>,
    ) -> std::result::Result<Table, QueryError> {
        let pair = self.registry.pair(request.data_source)?;
        let sql = match limit {
            Some(n) => format!("{} LIMIT {n}", pair.data.trim_end().trim_end_matches(';')),
            None => pair.data.clone(),
        };

        let (columns, rows) = self.execute(&sql, request).await?;
        let mut table = Table::new(columns);
        for row in &rows {
            let cells = (0..row.len())
                .map(|idx| cell_from_row(row, idx))
                .collect::<std::result::Result<Vec<_>, QueryError>>()?;
            table
                .push_row(cells)
                .map_err(|e| QueryError::Backend(e.to_string()))?;
        }
        Ok(table)
    }
}

/// Decodes one cell into the domain cell model
///
/// Unknown column types fall back through text and numeric decodings; a
/// column that decodes as none of them fails the query as a backend error
/// rather than silently emptying the cell.
fn cell_from_row(row: &Row, idx: usize) -> std::result::Result<CellValue, QueryError> {
    let column = &row.columns()[idx];
    let name = column.name();
    let ty = column.type_();
    match *ty {
        Type::BOOL => opt_cell(row.try_get::<_, Option<bool>>(idx), name, ty, CellValue::Bool),
        Type::INT2 => opt_cell(row.try_get::<_, Option<i16>>(idx), name, ty, |v| {
            CellValue::Int(v as i64)
        }),
        Type::INT4 => opt_cell(row.try_get::<_, Option<i32>>(idx), name, ty, |v| {
            CellValue::Int(v as i64)
        }),
        Type::INT8 => opt_cell(row.try_get::<_, Option<i64>>(idx), name, ty, CellValue::Int),
        Type::FLOAT4 => opt_cell(row.try_get::<_, Option<f32>>(idx), name, ty, |v| {
            CellValue::Float(v as f64)
        }),
        Type::FLOAT8 => opt_cell(row.try_get::<_, Option<f64>>(idx), name, ty, CellValue::Float),
        // NUMERIC keeps its exact scale by rendering through Decimal
        Type::NUMERIC => opt_cell(row.try_get::<_, Option<Decimal>>(idx), name, ty, |v| {
            CellValue::Text(v.to_string())
        }),
        Type::DATE => opt_cell(row.try_get::<_, Option<NaiveDate>>(idx), name, ty, CellValue::Date),
        Type::TIMESTAMP => opt_cell(row.try_get::<_, Option<NaiveDateTime>>(idx), name, ty, |v| {
            CellValue::Timestamp(DateTime::from_naive_utc_and_offset(v, Utc))
        }),
        Type::TIMESTAMPTZ => opt_cell(
            row.try_get::<_, Option<DateTime<Utc>>>(idx),
            name,
            ty,
            CellValue::Timestamp,
        ),
        _ => {
            if let Ok(v) = row.try_get::<_, Option<String>>(idx) {
                Ok(v.map(CellValue::Text).unwrap_or(CellValue::Null))
            } else if let Ok(v) = row.try_get::<_, Option<i64>>(idx) {
                Ok(v.map(CellValue::Int).unwrap_or(CellValue::Null))
            } else if let Ok(v) = row.try_get::<_, Option<f64>>(idx) {
                Ok(v.map(CellValue::Float).unwrap_or(CellValue::Null))
            } else {
                Err(decode_error(name, ty))
            }
        }
    }
}

fn opt_cell<T>(
    value: std::result::Result<Option<T>, tokio_postgres::Error>,
    name: &str,
    ty: &Type,
    into: impl FnOnce(T) -> CellValue,
) -> std::result::Result<CellValue, QueryError> {
    match value {
        Ok(Some(v)) => Ok(into(v)),
        Ok(None) => Ok(CellValue::Null),
        Err(_) => Err(decode_error(name, ty)),
    }
}

fn decode_error(name: &str, ty: &Type) -> QueryError {
    QueryError::Backend(format!("Cannot decode column '{name}' of type {ty}"))
}

impl ToSql for ParamValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            ParamValue::Int(v) => v.to_sql(ty, out),
            ParamValue::IntList(v) => v.to_sql(ty, out),
            ParamValue::Text(v) => v.to_sql(ty, out),
        }
    }

    // The variant, not the Rust type, decides what is acceptable; the
    // delegated to_sql rejects real mismatches.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_decode_error_is_backend_and_names_the_column() {
        let err = decode_error("spend", &Type::MONEY);
        assert!(err.is_backend());
        let text = err.to_string();
        assert!(text.contains("spend"));
        assert!(text.contains("money"));
    }

    #[test]
    fn test_numeric_cells_keep_scale() {
        let value = Decimal::from_str("12.3400").unwrap();
        let cell = CellValue::Text(value.to_string());
        assert_eq!(cell.to_string(), "12.3400");
    }

    #[test]
    fn test_null_cells_pass_through() {
        let value: std::result::Result<Option<i64>, tokio_postgres::Error> = Ok(None);
        let cell = opt_cell(value, "clicks", &Type::INT8, CellValue::Int).unwrap();
        assert_eq!(cell, CellValue::Null);
    }
}

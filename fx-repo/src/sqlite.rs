//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

use fx_types::{
    Currency, CurrencyCode, CurrencyId, NewRate, Rate, RateId, RatesRepository, RepoError,
};

use crate::types::{DbCount, SqliteCurrencyRow, SqliteRateRow, db_error, format_date};

const RATE_SELECT: &str = r#"
    SELECT r.id, cb.code AS currency_base, ct.code AS currency_target, r.rate, r.date
    FROM rates r
    JOIN currencies cb ON cb.id = r.currency_base_id
    JOIN currencies ct ON ct.id = r.currency_target_id
"#;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &SqlitePool, sql: &str, name: &str) -> anyhow::Result<()> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_currencies.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_rates.sql"),
        "0002",
    )
    .await?;

    tracing::debug!("SQLite migrations applied");
    Ok(())
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives as long as its connection, so keep exactly one.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = pool_options.connect_with(options).await?;

        run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn rate_conflict(rate: &NewRate) -> impl FnOnce() -> String + '_ {
    move || {
        format!(
            "Rate {}/{} for {} already exists",
            rate.base.code, rate.target.code, rate.date
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RatesRepository for SqliteRepo {
    async fn create_currency(&self, code: CurrencyCode) -> Result<Currency, RepoError> {
        let currency = Currency::new(code);
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(r#"INSERT INTO currencies (id, code, created_at) VALUES (?, ?, ?)"#)
            .bind(currency.id.to_string())
            .bind(code.as_str())
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, || "Currency already registered".into()))?;

        Ok(currency)
    }

    async fn update_currency(
        &self,
        id: CurrencyId,
        code: CurrencyCode,
    ) -> Result<Currency, RepoError> {
        let result = sqlx::query(r#"UPDATE currencies SET code = ? WHERE id = ?"#)
            .bind(code.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, || format!("Currency {} already registered", code)))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(Currency::from_parts(id, code))
    }

    async fn delete_currency(&self, code: CurrencyCode) -> Result<(), RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let row: Option<SqliteCurrencyRow> =
            sqlx::query_as(r#"SELECT id, code FROM currencies WHERE code = ?"#)
                .bind(code.as_str())
                .fetch_optional(&mut *db_tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        let currency = row.ok_or(RepoError::NotFound)?;

        let refs: DbCount = sqlx::query_as(
            r#"SELECT COUNT(*) AS count FROM rates WHERE currency_base_id = ? OR currency_target_id = ?"#,
        )
        .bind(&currency.id)
        .bind(&currency.id)
        .fetch_one(&mut *db_tx)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if refs.count > 0 {
            return Err(RepoError::Conflict(format!(
                "Currency {} is used by {} rate(s)",
                code, refs.count
            )));
        }

        sqlx::query(r#"DELETE FROM currencies WHERE id = ?"#)
            .bind(&currency.id)
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_currency_by_code(
        &self,
        code: CurrencyCode,
    ) -> Result<Option<Currency>, RepoError> {
        let row: Option<SqliteCurrencyRow> =
            sqlx::query_as(r#"SELECT id, code FROM currencies WHERE code = ?"#)
                .bind(code.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqliteCurrencyRow::into_domain).transpose()
    }

    async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError> {
        let rows: Vec<SqliteCurrencyRow> =
            sqlx::query_as(r#"SELECT id, code FROM currencies ORDER BY code"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqliteCurrencyRow::into_domain).collect()
    }

    async fn create_rate(&self, rate: NewRate) -> Result<Rate, RepoError> {
        let id = RateId::from_uuid(Uuid::new_v4());
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO rates (id, currency_base_id, currency_target_id, date, rate, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(id.to_string())
        .bind(rate.base.id.to_string())
        .bind(rate.target.id.to_string())
        .bind(format_date(rate.date))
        .bind(rate.rate)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, rate_conflict(&rate)))?;

        Ok(rate.into_rate(id))
    }

    async fn update_rate(&self, id: RateId, rate: NewRate) -> Result<Rate, RepoError> {
        let result = sqlx::query(
            r#"UPDATE rates SET currency_base_id = ?, currency_target_id = ?, date = ?, rate = ?
               WHERE id = ?"#,
        )
        .bind(rate.base.id.to_string())
        .bind(rate.target.id.to_string())
        .bind(format_date(rate.date))
        .bind(rate.rate)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, rate_conflict(&rate)))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(rate.into_rate(id))
    }

    async fn delete_rate(&self, id: RateId) -> Result<(), RepoError> {
        let result = sqlx::query(r#"DELETE FROM rates WHERE id = ?"#)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn get_rate(&self, id: RateId) -> Result<Option<Rate>, RepoError> {
        let sql = format!("{RATE_SELECT} WHERE r.id = ?");
        let row: Option<SqliteRateRow> = sqlx::query_as(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqliteRateRow::into_domain).transpose()
    }

    async fn list_rates(
        &self,
        base: Option<CurrencyId>,
        target: Option<CurrencyId>,
    ) -> Result<Vec<Rate>, RepoError> {
        let sql = format!(
            "{RATE_SELECT} WHERE (? IS NULL OR r.currency_base_id = ?)
               AND (? IS NULL OR r.currency_target_id = ?)
             ORDER BY r.date, r.rowid"
        );
        let base = base.map(|id| id.to_string());
        let target = target.map(|id| id.to_string());
        let rows: Vec<SqliteRateRow> = sqlx::query_as(&sql)
            .bind(&base)
            .bind(&base)
            .bind(&target)
            .bind(&target)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqliteRateRow::into_domain).collect()
    }

    async fn list_rates_for_date(&self, date: NaiveDate) -> Result<Vec<Rate>, RepoError> {
        let sql = format!("{RATE_SELECT} WHERE r.date = ? ORDER BY r.rowid");
        let rows: Vec<SqliteRateRow> = sqlx::query_as(&sql)
            .bind(format_date(date))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqliteRateRow::into_domain).collect()
    }
}

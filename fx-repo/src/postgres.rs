//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fx_types::{
    Currency, CurrencyCode, CurrencyId, NewRate, Rate, RateId, RatesRepository, RepoError,
};

use crate::types::{DbCount, PgCurrencyRow, PgRateRow, db_error};

const RATE_SELECT: &str = r#"
    SELECT r.id, cb.code AS currency_base, ct.code AS currency_target, r.rate, r.date
    FROM rates r
    JOIN currencies cb ON cb.id = r.currency_base_id
    JOIN currencies ct ON ct.id = r.currency_target_id
"#;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
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

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_currencies_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_rates_pg.sql"),
        "0002",
    )
    .await?;

    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
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
impl RatesRepository for PostgresRepo {
    async fn create_currency(&self, code: CurrencyCode) -> Result<Currency, RepoError> {
        let currency = Currency::new(code);

        sqlx::query(r#"INSERT INTO currencies (id, code, created_at) VALUES ($1, $2, $3)"#)
            .bind(currency.id.as_uuid())
            .bind(code.as_str())
            .bind(Utc::now())
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
        let result = sqlx::query(r#"UPDATE currencies SET code = $1 WHERE id = $2"#)
            .bind(code.as_str())
            .bind(id.as_uuid())
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

        // Lock the currency row so no rate can start referencing it mid-delete.
        let row: Option<PgCurrencyRow> =
            sqlx::query_as(r#"SELECT id, code FROM currencies WHERE code = $1 FOR UPDATE"#)
                .bind(code.as_str())
                .fetch_optional(&mut *db_tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        let currency = row.ok_or(RepoError::NotFound)?;

        let refs: DbCount = sqlx::query_as(
            r#"SELECT COUNT(*) AS count FROM rates WHERE currency_base_id = $1 OR currency_target_id = $1"#,
        )
        .bind(currency.id)
        .fetch_one(&mut *db_tx)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if refs.count > 0 {
            return Err(RepoError::Conflict(format!(
                "Currency {} is used by {} rate(s)",
                code, refs.count
            )));
        }

        sqlx::query(r#"DELETE FROM currencies WHERE id = $1"#)
            .bind(currency.id)
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
        let row: Option<PgCurrencyRow> =
            sqlx::query_as(r#"SELECT id, code FROM currencies WHERE code = $1"#)
                .bind(code.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(PgCurrencyRow::into_domain).transpose()
    }

    async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError> {
        let rows: Vec<PgCurrencyRow> =
            sqlx::query_as(r#"SELECT id, code FROM currencies ORDER BY code"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgCurrencyRow::into_domain).collect()
    }

    async fn create_rate(&self, rate: NewRate) -> Result<Rate, RepoError> {
        let id = RateId::from_uuid(Uuid::new_v4());

        sqlx::query(
            r#"INSERT INTO rates (id, currency_base_id, currency_target_id, date, rate, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(id.as_uuid())
        .bind(rate.base.id.as_uuid())
        .bind(rate.target.id.as_uuid())
        .bind(rate.date)
        .bind(rate.rate)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, rate_conflict(&rate)))?;

        Ok(rate.into_rate(id))
    }

    async fn update_rate(&self, id: RateId, rate: NewRate) -> Result<Rate, RepoError> {
        let result = sqlx::query(
            r#"UPDATE rates SET currency_base_id = $1, currency_target_id = $2, date = $3, rate = $4
               WHERE id = $5"#,
        )
        .bind(rate.base.id.as_uuid())
        .bind(rate.target.id.as_uuid())
        .bind(rate.date)
        .bind(rate.rate)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(e, rate_conflict(&rate)))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(rate.into_rate(id))
    }

    async fn delete_rate(&self, id: RateId) -> Result<(), RepoError> {
        let result = sqlx::query(r#"DELETE FROM rates WHERE id = $1"#)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn get_rate(&self, id: RateId) -> Result<Option<Rate>, RepoError> {
        let sql = format!("{RATE_SELECT} WHERE r.id = $1");
        let row: Option<PgRateRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(PgRateRow::into_domain).transpose()
    }

    async fn list_rates(
        &self,
        base: Option<CurrencyId>,
        target: Option<CurrencyId>,
    ) -> Result<Vec<Rate>, RepoError> {
        let sql = format!(
            "{RATE_SELECT} WHERE ($1::uuid IS NULL OR r.currency_base_id = $1)
               AND ($2::uuid IS NULL OR r.currency_target_id = $2)
             ORDER BY r.date, r.seq"
        );
        let rows: Vec<PgRateRow> = sqlx::query_as(&sql)
            .bind(base.map(CurrencyId::into_uuid))
            .bind(target.map(CurrencyId::into_uuid))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgRateRow::into_domain).collect()
    }

    async fn list_rates_for_date(&self, date: NaiveDate) -> Result<Vec<Rate>, RepoError> {
        let sql = format!("{RATE_SELECT} WHERE r.date = $1 ORDER BY r.seq");
        let rows: Vec<PgRateRow> = sqlx::query_as(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgRateRow::into_domain).collect()
    }
}

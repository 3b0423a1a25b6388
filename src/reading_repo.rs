// SQLite reading store. One row per ingested sample; rows are never updated.
//
// `timestamp` keeps whatever representation the writer produced: RFC 3339 text
// assigned by the store (collector path), an epoch-seconds integer (imported rows)
// or NULL. `ts_epoch` mirrors it as integer seconds for ordering and window
// filtering; NULL when the timestamp is missing, which sorts those rows last.

use crate::models::{NormalizedTimestamp, ReadingValues, StoredTimestamp, WeatherReading};
use crate::timestamp::parse_stored_text;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

/// Upper bound for GET /history.
pub const HISTORY_LIMIT: u32 = 100;

const SELECT_COLUMNS: &str = "city, temperature, humidity, wind_speed, pressure, conditions,
    CASE WHEN typeof(timestamp) = 'integer' THEN timestamp END AS ts_int,
    CASE WHEN typeof(timestamp) = 'text' THEN timestamp END AS ts_text";

pub struct ReadingRepo {
    pool: SqlitePool,
}

impl ReadingRepo {
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS weather_readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                city TEXT NOT NULL,
                temperature REAL NOT NULL,
                humidity REAL NOT NULL,
                wind_speed REAL NOT NULL,
                pressure REAL NOT NULL,
                conditions TEXT NOT NULL,
                timestamp,
                ts_epoch INTEGER
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_readings_ts_epoch ON weather_readings(ts_epoch)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Closes the pool; called once by the process entry point on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Inserts a sample stamped by the store at write time.
    #[instrument(skip(self, values), fields(repo = "readings", operation = "save_reading", city = %values.city))]
    pub async fn save_reading(&self, values: &ReadingValues) -> anyhow::Result<i64> {
        let r = sqlx::query(
            "INSERT INTO weather_readings (city, temperature, humidity, wind_speed, pressure, conditions, timestamp, ts_epoch)
             VALUES ($1, $2, $3, $4, $5, $6, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), CAST(strftime('%s', 'now') AS INTEGER))",
        )
        .bind(&values.city)
        .bind(values.temperature)
        .bind(values.humidity)
        .bind(values.wind_speed)
        .bind(values.pressure)
        .bind(&values.conditions)
        .execute(&self.pool)
        .await?;
        Ok(r.last_insert_rowid())
    }

    /// Inserts a sample with an explicit timestamp representation (imports, fixtures).
    #[instrument(skip(self, values), fields(repo = "readings", operation = "insert_reading"))]
    pub async fn insert_reading(
        &self,
        values: &ReadingValues,
        timestamp: StoredTimestamp,
    ) -> anyhow::Result<i64> {
        let ts_epoch = timestamp.instant().map(|t| t.timestamp());
        let query = sqlx::query(
            "INSERT INTO weather_readings (city, temperature, humidity, wind_speed, pressure, conditions, timestamp, ts_epoch)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&values.city)
        .bind(values.temperature)
        .bind(values.humidity)
        .bind(values.wind_speed)
        .bind(values.pressure)
        .bind(&values.conditions);
        let query = match timestamp {
            StoredTimestamp::Native(dt) => {
                query.bind(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            StoredTimestamp::Normalized(ts) => query.bind(ts.0),
            StoredTimestamp::Missing => query.bind(Option::<i64>::None),
        };
        let r = query.bind(ts_epoch).execute(&self.pool).await?;
        Ok(r.last_insert_rowid())
    }

    /// Most recently written reading, by timestamp.
    #[instrument(skip(self), fields(repo = "readings", operation = "latest_reading"))]
    pub async fn latest_reading(&self) -> anyhow::Result<Option<WeatherReading>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM weather_readings ORDER BY ts_epoch DESC, id DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(Self::parse_reading_row).transpose()
    }

    /// Up to `limit` readings, newest first.
    #[instrument(skip(self), fields(repo = "readings", operation = "recent_readings"))]
    pub async fn recent_readings(&self, limit: u32) -> anyhow::Result<Vec<WeatherReading>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM weather_readings ORDER BY ts_epoch DESC, id DESC LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::parse_reading_row(&row)?);
        }
        Ok(out)
    }

    /// Readings at or after `from` at whole-second precision. Callers needing a
    /// strict bound re-filter on the exact instant.
    #[instrument(skip(self), fields(repo = "readings", operation = "readings_since"))]
    pub async fn readings_since(&self, from: DateTime<Utc>) -> anyhow::Result<Vec<WeatherReading>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM weather_readings WHERE ts_epoch >= $1 ORDER BY ts_epoch ASC, id ASC"
        ))
        .bind(from.timestamp())
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::parse_reading_row(&row)?);
        }
        Ok(out)
    }

    fn parse_reading_row(row: &sqlx::sqlite::SqliteRow) -> anyhow::Result<WeatherReading> {
        let values = ReadingValues {
            city: row.try_get("city")?,
            temperature: row.try_get("temperature")?,
            humidity: row.try_get("humidity")?,
            wind_speed: row.try_get("wind_speed")?,
            pressure: row.try_get("pressure")?,
            conditions: row.try_get("conditions")?,
        };
        let ts_int: Option<i64> = row.try_get("ts_int")?;
        let ts_text: Option<String> = row.try_get("ts_text")?;
        let timestamp = match (ts_int, ts_text) {
            (Some(secs), _) => StoredTimestamp::Normalized(NormalizedTimestamp(secs)),
            (None, Some(text)) => parse_stored_text(&text),
            (None, None) => StoredTimestamp::Missing,
        };
        Ok(WeatherReading { values, timestamp })
    }
}

//! Query layer over the two-table observation dataset.
//!
//! The schema is fixed and known up front, so rows bind to explicit typed
//! records; there is no runtime reflection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{
    format_description::BorrowedFormatItem, macros::format_description,
    util::days_in_year_month, Date,
};
use utoipa::ToSchema;

use super::Database;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date string: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("Failed to parse date string: {0}")]
    TimeParse(#[from] time::error::Parse),
    #[error("Failed to build cutoff date: {0}")]
    InvalidDate(#[from] time::error::ComponentRange),
    #[error("Dataset has no measurements")]
    EmptyDataset,
}

/// A daily station reading as stored in the `measurement` table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Measurement {
    pub station: String,
    /// Calendar date as a lexically sortable `YYYY-MM-DD` string
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// A weather-reporting location as stored in the `station` table.
///
/// Only the identifier is surfaced by the API; the descriptive attributes
/// ride along because the dataset carries them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// A single date/temperature observation.
#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct TemperatureReading {
    pub date: String,
    pub temperature: f64,
}

/// Aggregate temperature summary over a date range. All fields are null when
/// the range matches no measurements.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Daily precipitation keyed by date for the trailing 12 calendar months.
    async fn precipitation_report(&self) -> Result<BTreeMap<String, Option<f64>>, Error>;
    /// Distinct station identifiers present in the dataset.
    async fn station_ids(&self) -> Result<Vec<String>, Error>;
    /// Temperature readings over the trailing 12 calendar months for the
    /// station with the most measurements.
    async fn temperature_observations(&self) -> Result<Vec<TemperatureReading>, Error>;
    /// MIN/AVG/MAX of the temperature observations between `start` and `end`
    /// (both inclusive); `end` unset means everything from `start` onward.
    async fn temperature_stats(
        &self,
        start: String,
        end: Option<String>,
    ) -> Result<TemperatureStats, Error>;
}

pub struct ClimateAccess {
    db: Database,
}

impl ClimateAccess {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn most_recent_date(&self) -> Result<String, Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT date FROM measurement ORDER BY date DESC LIMIT 1")
                .fetch_optional(self.db.pool())
                .await?;

        row.map(|(date,)| date).ok_or(Error::EmptyDataset)
    }

    /// The station with the highest measurement row count. Ties break toward
    /// the lowest station identifier so the result is deterministic.
    async fn most_active_station(&self) -> Result<String, Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT station FROM measurement
             GROUP BY station
             ORDER BY COUNT(station) DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|(station,)| station).ok_or(Error::EmptyDataset)
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn precipitation_report(&self) -> Result<BTreeMap<String, Option<f64>>, Error> {
        let cutoff = one_year_before(&self.most_recent_date().await?)?;

        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            "SELECT date, prcp FROM measurement WHERE date >= ? ORDER BY date ASC",
        )
        .bind(&cutoff)
        .fetch_all(self.db.pool())
        .await?;

        // Rows sharing a date collapse to the last one seen
        Ok(rows.into_iter().collect())
    }

    async fn station_ids(&self) -> Result<Vec<String>, Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT DISTINCT station FROM station")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.into_iter().map(|(station,)| station).collect())
    }

    async fn temperature_observations(&self) -> Result<Vec<TemperatureReading>, Error> {
        let station = self.most_active_station().await?;
        let cutoff = one_year_before(&self.most_recent_date().await?)?;

        let rows: Vec<(String, f64)> = sqlx::query_as(
            "SELECT date, tobs FROM measurement
             WHERE station = ? AND date >= ?
             ORDER BY date ASC",
        )
        .bind(&station)
        .bind(&cutoff)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, temperature)| TemperatureReading { date, temperature })
            .collect())
    }

    async fn temperature_stats(
        &self,
        start: String,
        end: Option<String>,
    ) -> Result<TemperatureStats, Error> {
        // start/end go to the query unvalidated; a malformed date lexically
        // matches nothing and yields the all-null record
        let (tmin, tavg, tmax): (Option<f64>, Option<f64>, Option<f64>) = match end {
            Some(end) => {
                sqlx::query_as(
                    "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
                     WHERE date >= ? AND date <= ?",
                )
                .bind(&start)
                .bind(&end)
                .fetch_one(self.db.pool())
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
                     WHERE date >= ?",
                )
                .bind(&start)
                .fetch_one(self.db.pool())
                .await?
            }
        };

        Ok(TemperatureStats { tmin, tavg, tmax })
    }
}

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Same calendar day one year earlier, with the day clamped to the target
/// month's length (2016-02-29 becomes 2015-02-28).
pub fn one_year_before(date: &str) -> Result<String, Error> {
    let parsed = Date::parse(date, &DATE_FORMAT)?;
    let year = parsed.year() - 1;
    let day = parsed.day().min(days_in_year_month(year, parsed.month()));
    let cutoff = Date::from_calendar_date(year, parsed.month(), day)?;

    Ok(cutoff.format(&DATE_FORMAT)?)
}

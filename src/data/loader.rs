use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::model::{AirQualityTable, Observation, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// LoadError – the discriminated failure result
// ---------------------------------------------------------------------------

/// Fatal load failures. Conversion problems in individual cells are not
/// errors: they become null cells in the returned table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found at: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the air-quality dataset from a CSV file.
///
/// The returned table has exactly one `Observation` per source row. Cells
/// that cannot be coerced (non-numeric measurements, impossible calendar
/// dates) come back as `None`; only a missing file, malformed CSV, or an
/// incomplete column set fails the whole load.
pub fn load(path: &Path) -> Result<AirQualityTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path)?;
    parse_bytes(&bytes)
}

/// Parse CSV content that is already in memory.
pub fn parse_bytes(bytes: &[u8]) -> Result<AirQualityTable, LoadError> {
    let mut reader = csv::Reader::from_reader(bytes);

    // Collect every missing column before failing, not just the first.
    let headers = reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Schema { missing });
    }

    let mut observations = Vec::new();
    for result in reader.deserialize() {
        let raw: RawRow = result?;
        observations.push(raw.into_observation());
    }

    Ok(AirQualityTable::from_observations(observations))
}

// ---------------------------------------------------------------------------
// CachedLoader – memoize by (path, content fingerprint)
// ---------------------------------------------------------------------------

/// Wraps [`load`] and reuses the parsed table while the file content is
/// unchanged. The host UI may ask for the dataset on every interaction, so
/// re-parsing is only worth it when the bytes actually differ.
#[derive(Default)]
pub struct CachedLoader {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    path: PathBuf,
    fingerprint: u64,
    table: Arc<AirQualityTable>,
}

impl CachedLoader {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Load the dataset, reusing the cached parse when the content
    /// fingerprint matches.
    pub fn load(&mut self, path: &Path) -> Result<Arc<AirQualityTable>, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = fs::read(path)?;
        let fingerprint = content_fingerprint(&bytes);

        if let Some(entry) = &self.entry {
            if entry.path == path && entry.fingerprint == fingerprint {
                log::debug!("dataset unchanged, reusing parsed table");
                return Ok(Arc::clone(&entry.table));
            }
        }

        let table = Arc::new(parse_bytes(&bytes)?);
        self.entry = Some(CacheEntry {
            path: path.to_path_buf(),
            fingerprint,
            table: Arc::clone(&table),
        });
        Ok(table)
    }
}

fn content_fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// Row deserialization
// ---------------------------------------------------------------------------

/// One CSV row as deserialized by serde. The `No` column is a plain row
/// counter with no consumer, so it is validated for presence but not kept.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(deserialize_with = "lenient_i32")]
    year: Option<i32>,
    #[serde(deserialize_with = "lenient_u32")]
    month: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    day: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    hour: Option<u32>,
    #[serde(rename = "PM2.5", deserialize_with = "lenient_f64")]
    pm2_5: Option<f64>,
    #[serde(rename = "PM10", deserialize_with = "lenient_f64")]
    pm10: Option<f64>,
    #[serde(rename = "SO2", deserialize_with = "lenient_f64")]
    so2: Option<f64>,
    #[serde(rename = "NO2", deserialize_with = "lenient_f64")]
    no2: Option<f64>,
    #[serde(rename = "CO", deserialize_with = "lenient_f64")]
    co: Option<f64>,
    #[serde(rename = "O3", deserialize_with = "lenient_f64")]
    o3: Option<f64>,
    #[serde(rename = "TEMP", deserialize_with = "lenient_f64")]
    temp: Option<f64>,
    #[serde(rename = "PRES", deserialize_with = "lenient_f64")]
    pres: Option<f64>,
    #[serde(rename = "DEWP", deserialize_with = "lenient_f64")]
    dewp: Option<f64>,
    #[serde(rename = "RAIN", deserialize_with = "lenient_f64")]
    rain: Option<f64>,
    wd: Option<String>,
    #[serde(rename = "WSPM", deserialize_with = "lenient_f64")]
    wspm: Option<f64>,
    station: String,
}

impl RawRow {
    fn into_observation(self) -> Observation {
        let timestamp = derive_timestamp(self.year, self.month, self.day, self.hour);
        Observation {
            station: self.station,
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            timestamp,
            pm2_5: self.pm2_5,
            pm10: self.pm10,
            so2: self.so2,
            no2: self.no2,
            co: self.co,
            o3: self.o3,
            temp: self.temp,
            pres: self.pres,
            dewp: self.dewp,
            rain: self.rain,
            wspm: self.wspm,
            wd: self.wd.filter(|s| !s.is_empty()),
        }
    }
}

/// Combine the calendar fields at minute/second zero. Impossible dates
/// (e.g. February 30th, hour 24) resolve to `None` instead of an error so
/// the row survives the load and is dropped only by downstream aggregation.
fn derive_timestamp(
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year?, month?, day?)?.and_hms_opt(hour?, 0, 0)
}

// -- Lenient field parsers: unparseable or non-finite values become null --

fn lenient_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

fn lenient_i32<'de, D>(de: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| s.trim().parse::<i32>().ok()))
}

fn lenient_u32<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| s.trim().parse::<u32>().ok()))
}

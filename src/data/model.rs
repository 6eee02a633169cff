use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Schema constants
// ---------------------------------------------------------------------------

/// Every column the source CSV must carry. Absence of any of these is a
/// load-time failure, not a partial result.
pub const REQUIRED_COLUMNS: [&str; 18] = [
    "No", "year", "month", "day", "hour", "PM2.5", "PM10", "SO2", "NO2", "CO",
    "O3", "TEMP", "PRES", "DEWP", "RAIN", "wd", "WSPM", "station",
];

// ---------------------------------------------------------------------------
// Pollutant – the six criteria pollutants
// ---------------------------------------------------------------------------

/// The six regulated air-quality measurements selectable in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Column header in the source CSV.
    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    /// The corresponding measurement cell of an observation.
    pub fn value(&self, obs: &Observation) -> Option<f64> {
        match self {
            Pollutant::Pm25 => obs.pm2_5,
            Pollutant::Pm10 => obs.pm10,
            Pollutant::So2 => obs.so2,
            Pollutant::No2 => obs.no2,
            Pollutant::Co => obs.co,
            Pollutant::O3 => obs.o3,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the dataset
// ---------------------------------------------------------------------------

/// A single (station, hour) reading.
///
/// Every measurement is nullable: values the source file could not express as
/// a number arrive here as `None`, and `timestamp` is `None` when the four
/// calendar fields do not form a valid date. Rows are never dropped at load
/// time; filtering of nulls happens in the aggregation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station: String,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    /// Derived from (year, month, day, hour) at minute/second zero.
    pub timestamp: Option<NaiveDateTime>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub so2: Option<f64>,
    pub no2: Option<f64>,
    pub co: Option<f64>,
    pub o3: Option<f64>,
    pub temp: Option<f64>,
    pub pres: Option<f64>,
    pub dewp: Option<f64>,
    pub rain: Option<f64>,
    pub wspm: Option<f64>,
    /// Wind-direction category, passed through unchanged.
    pub wd: Option<String>,
}

// ---------------------------------------------------------------------------
// AirQualityTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with its pre-computed station index.
///
/// Constructed once per load and immutable afterwards; downstream consumers
/// allocate their own output instead of mutating the table.
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityTable {
    /// All observations (rows), in file order.
    pub observations: Vec<Observation>,
    /// Sorted distinct `station` values.
    pub stations: Vec<String>,
}

impl AirQualityTable {
    /// Build the station index from the loaded rows.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let stations: BTreeSet<String> = observations
            .iter()
            .map(|obs| obs.station.clone())
            .collect();
        AirQualityTable {
            observations,
            stations: stations.into_iter().collect(),
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

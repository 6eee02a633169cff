use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Timelike};

const STATIONS: [&str; 12] = [
    "Aotizhongxin",
    "Changping",
    "Dingling",
    "Dongsi",
    "Guanyuan",
    "Gucheng",
    "Huairou",
    "Nongzhanguan",
    "Shunyi",
    "Tiantan",
    "Wanliu",
    "Wanshouxigong",
];

const WIND_DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW",
    "W", "WNW", "NW", "NNW",
];

/// Fraction of measurement cells written as `NA`.
const MISSING_RATE: f64 = 0.02;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// 1.0 in mid-winter, 0.0 in mid-summer.
fn winter_factor(day_of_year: u32) -> f64 {
    let phase = (day_of_year as f64 / 365.0) * 2.0 * std::f64::consts::PI;
    (phase.cos() + 1.0) / 2.0
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let start = NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid start date");
    let end = NaiveDate::from_ymd_opt(2016, 12, 31).expect("valid end date");

    let output_path = "sample_air_quality.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        "No", "year", "month", "day", "hour", "PM2.5", "PM10", "SO2", "NO2",
        "CO", "O3", "TEMP", "PRES", "DEWP", "RAIN", "wd", "WSPM", "station",
    ])?;

    let mut row_id: u64 = 0;
    for (station_idx, station) in STATIONS.iter().enumerate() {
        // Stations differ by a fixed pollution offset (urban vs. suburban).
        let station_bias = 1.0 + 0.06 * station_idx as f64;

        let mut timestamp = start.and_hms_opt(0, 0, 0).expect("valid start hour");
        let end_of_data = end.and_hms_opt(23, 0, 0).expect("valid end hour");

        while timestamp <= end_of_data {
            let winter = winter_factor(timestamp.date().ordinal());
            let hour = timestamp.hour();
            // Traffic peaks in the morning and evening.
            let rush = if (7..=9).contains(&hour) || (17..=20).contains(&hour) {
                1.3
            } else {
                1.0
            };

            let pm2_5 = (rng.gauss(25.0 + 70.0 * winter, 18.0) * station_bias * rush).max(1.0);
            let pm10 = (pm2_5 * rng.gauss(1.5, 0.2)).max(1.0);
            let so2 = (rng.gauss(4.0 + 20.0 * winter, 5.0) * station_bias).max(0.5);
            let no2 = (rng.gauss(20.0 + 35.0 * winter, 10.0) * station_bias * rush).max(1.0);
            let co = (rng.gauss(500.0 + 1200.0 * winter, 250.0) * station_bias).max(100.0);
            // Ozone forms in sunlight: summer afternoons peak.
            let daylight = if (10..=17).contains(&hour) { 1.6 } else { 0.8 };
            let o3 = (rng.gauss(20.0 + 70.0 * (1.0 - winter), 12.0) * daylight).max(1.0);

            let temp = rng.gauss(14.0 - 22.0 * winter + 3.0 * daylight, 2.5);
            let pres = rng.gauss(1012.0 + 8.0 * winter, 4.0);
            let dewp = temp - rng.gauss(8.0, 2.0);
            let rain = if rng.next_f64() < 0.04 * (1.3 - winter) {
                rng.next_f64() * 5.0
            } else {
                0.0
            };
            let wspm = rng.gauss(2.2, 1.2).max(0.1);
            let wd = WIND_DIRECTIONS[(rng.next_u64() % 16) as usize];

            row_id += 1;
            let date = timestamp.date();
            writer.write_record([
                row_id.to_string(),
                date.year().to_string(),
                date.month().to_string(),
                date.day().to_string(),
                hour.to_string(),
                cell(pm2_5, &mut rng),
                cell(pm10, &mut rng),
                cell(so2, &mut rng),
                cell(no2, &mut rng),
                cell(co, &mut rng),
                cell(o3, &mut rng),
                cell(temp, &mut rng),
                cell(pres, &mut rng),
                cell(dewp, &mut rng),
                cell(rain, &mut rng),
                wd.to_string(),
                cell(wspm, &mut rng),
                station.to_string(),
            ])?;

            timestamp = timestamp + Duration::hours(1);
        }
    }

    writer.flush()?;
    println!(
        "Wrote {row_id} observations for {} stations to {output_path}",
        STATIONS.len()
    );
    Ok(())
}

/// Format one measurement cell, occasionally dropping it to `NA`.
fn cell(value: f64, rng: &mut SimpleRng) -> String {
    if rng.next_f64() < MISSING_RATE {
        "NA".to_string()
    } else {
        format!("{value:.1}")
    }
}

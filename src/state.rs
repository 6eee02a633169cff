use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::PollutantColors;
use crate::data::aggregate::{monthly_mean, station_summary, MonthlyPoint, StationSummary};
use crate::data::loader::CachedLoader;
use crate::data::model::{AirQualityTable, Pollutant};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<AirQualityTable>>,

    /// Where the current dataset came from.
    pub source_path: Option<PathBuf>,

    /// Memoizing loader, reused across reloads of the same file.
    pub loader: CachedLoader,

    /// Currently selected monitoring station.
    pub selected_station: Option<String>,

    /// Currently selected pollutant for the temporal analysis.
    pub selected_pollutant: Pollutant,

    /// Cached per-station means for the metric cards.
    pub summary: Option<StationSummary>,

    /// Cached monthly series for the selected pollutant.
    pub monthly: Vec<MonthlyPoint>,

    /// Stable pollutant display colours.
    pub colors: PollutantColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source_path: None,
            loader: CachedLoader::new(),
            selected_station: None,
            selected_pollutant: Pollutant::Pm25,
            summary: None,
            monthly: Vec::new(),
            colors: PollutantColors::new(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Load (or reload) the dataset from a file, replacing the current table
    /// on success. A failure leaves the previous dataset untouched and shows
    /// the loader's message instead.
    pub fn load_from_path(&mut self, path: &Path) {
        self.loading = true;
        match self.loader.load(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} observations from {} ({} stations)",
                    table.len(),
                    path.display(),
                    table.stations.len()
                );
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(table);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the selections.
    pub fn set_dataset(&mut self, dataset: Arc<AirQualityTable>) {
        self.selected_station = dataset.stations.first().cloned();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refresh();
    }

    /// Change the selected station and recompute the metric cards.
    pub fn select_station(&mut self, station: String) {
        self.selected_station = Some(station);
        self.refresh();
    }

    /// Change the selected pollutant and recompute the monthly series.
    pub fn select_pollutant(&mut self, pollutant: Pollutant) {
        self.selected_pollutant = pollutant;
        self.refresh();
    }

    /// Recompute the cached summary and monthly series from the current
    /// selections. Both are derived copies; the table itself never changes.
    fn refresh(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.summary = None;
            self.monthly.clear();
            return;
        };
        self.summary = self
            .selected_station
            .as_deref()
            .map(|station| station_summary(dataset, station));
        self.monthly = monthly_mean(dataset, self.selected_pollutant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_bytes;

    const SAMPLE: &str = "\
No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station
1,2016,1,1,0,10.0,20.0,3.0,15.0,800.0,60.0,1.0,1012.0,-2.0,0.0,NW,2.1,Tiantan
2,2016,1,1,1,30.0,20.0,3.0,15.0,800.0,60.0,1.0,1012.0,-2.0,0.0,NW,2.1,Tiantan
3,2016,1,1,0,50.0,20.0,3.0,15.0,800.0,60.0,1.0,1012.0,-2.0,0.0,NW,2.1,Changping
";

    #[test]
    fn set_dataset_selects_first_station_and_caches_series() {
        let table = Arc::new(parse_bytes(SAMPLE.as_bytes()).unwrap());
        let mut state = AppState::default();
        state.set_dataset(table);

        assert_eq!(state.selected_station.as_deref(), Some("Changping"));
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.means[0].1, Some(50.0));
        // Monthly series spans all stations.
        assert_eq!(state.monthly.len(), 1);
        assert_eq!(state.monthly[0].mean, 30.0);
    }

    #[test]
    fn selection_changes_recompute_caches() {
        let table = Arc::new(parse_bytes(SAMPLE.as_bytes()).unwrap());
        let mut state = AppState::default();
        state.set_dataset(table);

        state.select_station("Tiantan".to_string());
        assert_eq!(state.summary.as_ref().unwrap().means[0].1, Some(20.0));

        state.select_pollutant(Pollutant::O3);
        assert_eq!(state.monthly[0].mean, 60.0);
    }
}

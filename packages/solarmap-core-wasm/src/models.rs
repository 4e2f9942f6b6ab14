// This is the models module containing the structures that cross the
// wasm boundary as serialized JS values.
use serde::{Deserialize, Serialize};

/// Result of a dataset load, successful or fallen back to empty.
#[derive(Serialize, Deserialize)]
pub struct LoadSummary {
    pub feature_count: usize,
    pub has_area_attribute: bool,
    /// [minLng, minLat, maxLng, maxLat], absent for an empty table.
    pub bbox: Option<[f64; 4]>,
    pub max_area: Option<f64>,
    /// Features discarded at parse time for carrying no geometry.
    pub dropped_features: usize,
    /// True when the loader substituted the empty fallback table.
    pub fallback: bool,
}

/// Counts backing the page's info line and download-button state.
#[derive(Serialize, Deserialize)]
pub struct FilterSummary {
    pub total: usize,
    pub matched: usize,
    pub threshold: f64,
    /// True when the area attribute is missing and the filter passed
    /// the table through unchanged.
    pub degraded: bool,
    pub download_enabled: bool,
}

/// Slider bounds for the min-area control.
#[derive(Serialize, Deserialize)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Serialize, Deserialize)]
pub struct DatasetStats {
    pub loaded: bool,
    pub feature_count: usize,
    pub has_area_attribute: bool,
    pub bbox_key: Option<String>,
    pub session_count: usize,
    pub filter_invocations: usize,
    pub degraded_filters: usize,
}

/// Payload for the download action.
#[derive(Serialize, Deserialize)]
pub struct ExportResult {
    pub filename: String,
    pub geojson: String,
    pub feature_count: usize,
}

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::bounds::{self, Bbox};
use crate::feature_table::{self, FeatureTable};
use crate::models::LoadSummary;
use crate::module_state::ModuleState;
use crate::{console_log, console_warn, fetch};

pub struct ParsedDataset {
    pub table: FeatureTable,
    pub bbox: Option<Bbox>,
    pub dropped: usize,
}

/// Parse a GeoJSON document and derive its total bounds.
pub fn parse_dataset(text: &str) -> Result<ParsedDataset, String> {
    let (table, dropped) = feature_table::parse_feature_collection(text)?;
    let bbox = bounds::table_bounds(table.features());
    Ok(ParsedDataset { table, bbox, dropped })
}

fn summary_for(table: &FeatureTable, bbox: Option<&Bbox>, dropped: usize, fallback: bool) -> LoadSummary {
    LoadSummary {
        feature_count: table.len(),
        has_area_attribute: table.has_area(),
        bbox: bbox.map(|b| b.to_array()),
        max_area: table.max_area(),
        dropped_features: dropped,
        fallback,
    }
}

fn install_parsed(parsed: ParsedDataset) -> LoadSummary {
    if parsed.dropped > 0 {
        console_warn!(
            "Dropped {} feature(s) without usable geometry",
            parsed.dropped
        );
    }
    if !parsed.table.has_area() {
        console_warn!("Dataset has no '{}' attribute; filtering will pass features through", feature_table::AREA_ATTRIBUTE);
    }
    let summary = summary_for(&parsed.table, parsed.bbox.as_ref(), parsed.dropped, false);
    console_log!(
        "Installed panel dataset: {} feature(s), bbox {:?}",
        summary.feature_count,
        parsed.bbox.as_ref().map(|b| b.key())
    );
    ModuleState::with_mut(|state| state.install_dataset(parsed.table, parsed.bbox));
    summary
}

// Any load failure lands here: the empty table with a defined area
// column is installed and a warning logged. The caller still gets an
// Ok summary.
fn install_fallback(reason: &str) -> LoadSummary {
    console_warn!("Panel dataset unavailable ({}); using empty data", reason);
    ModuleState::with_mut(|state| state.clear_dataset());
    summary_for(&FeatureTable::empty(), None, 0, true)
}

/// Load a dataset the host already holds as text. Never rejects for
/// data problems; a parse failure falls back to the empty table.
#[wasm_bindgen]
pub fn load_dataset_from_str(text: &str) -> Result<JsValue, JsValue> {
    let summary = match parse_dataset(text) {
        Ok(parsed) => install_parsed(parsed),
        Err(reason) => install_fallback(&reason),
    };
    Ok(serde_wasm_bindgen::to_value(&summary)?)
}

/// Fetch and load the dataset from a URL via the host fetch helper.
/// Resolves with a fallback summary on any fetch or parse failure.
#[wasm_bindgen]
pub async fn load_dataset(url: String) -> Result<JsValue, JsValue> {
    console_log!("Loading panel dataset from {}", url);
    let summary = match fetch_text(&url).await {
        Ok(text) => match parse_dataset(&text) {
            Ok(parsed) => install_parsed(parsed),
            Err(reason) => install_fallback(&reason),
        },
        Err(reason) => install_fallback(&reason),
    };
    Ok(serde_wasm_bindgen::to_value(&summary)?)
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let promise = fetch(url).map_err(|e| format!("fetch helper rejected: {:?}", e))?;
    let response = JsFuture::from(promise)
        .await
        .map_err(|e| format!("request failed: {:?}", e))?;
    response
        .as_string()
        .ok_or_else(|| "response was not text".to_string())
}

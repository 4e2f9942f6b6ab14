use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

// Create a console module for logging
pub mod console;
// Threshold filtering over the feature table
mod area_filter;
// Dataset bounds handling
mod bounds;
// Download serialization
mod export;
// The feature table and GeoJSON (de)construction
mod feature_table;
// Dataset loading with the empty-table fallback
mod loader;
// Layer operation planning for the host map
mod map_view;
// Shared boundary models
mod models;
// Module state management
mod module_state;
// Per-session threshold state
mod session;

use area_filter::{filter_by_min_area, FilteredView};
use models::FilterSummary;
use module_state::ModuleState;

// Enable better panic messages in console during development
#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

#[wasm_bindgen]
extern "C" {
    // JavaScript function to fetch data from URL
    #[wasm_bindgen(js_namespace = wasmJsHelpers, catch)]
    pub fn fetch(url: &str) -> Result<js_sys::Promise, JsValue>;
}

// Use the macros from our console module
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => ($crate::console::log(&format!($($t)*)))
}

#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => ($crate::console::warn(&format!($($t)*)))
}

use std::sync::Once;
static INIT: Once = Once::new();

#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("Solarmap WASM core initialized");
    });
}

// Re-export the dataset loading functions
pub use loader::{load_dataset, load_dataset_from_str};

fn summarize(view: &FilteredView, total: usize) -> FilterSummary {
    FilterSummary {
        total,
        matched: view.len(),
        threshold: view.threshold,
        degraded: view.degraded,
        download_enabled: !view.is_empty(),
    }
}

// Recompute the filtered view for a session and bump the diagnostics
// counters. The degraded passthrough is logged here, at the boundary,
// so the filter itself stays pure.
fn run_filter(state: &mut ModuleState, session_id: &str) -> Result<FilteredView, String> {
    let threshold = state
        .session(session_id)
        .ok_or_else(|| format!("unknown session: {}", session_id))?
        .min_area;
    let view = filter_by_min_area(&state.table, threshold);
    state.filter_invocations += 1;
    if view.degraded {
        state.degraded_filters += 1;
        console_warn!(
            "'{}' attribute missing; returning unfiltered features",
            feature_table::AREA_ATTRIBUTE
        );
    }
    Ok(view)
}

/// Register a new session with the default threshold and return its id.
#[wasm_bindgen]
pub fn create_session() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    ModuleState::with_mut(|state| state.create_session(id.clone()));
    console_log!("Session {} created", id);
    id
}

/// Drop a session's state. Returns false for an unknown id.
#[wasm_bindgen]
pub fn remove_session(session_id: &str) -> bool {
    ModuleState::with_mut(|state| state.remove_session(session_id))
}

/// Set a session's min-area threshold. Returns the clamped value.
#[wasm_bindgen]
pub fn set_min_area(session_id: &str, value: f64) -> Result<f64, JsValue> {
    ModuleState::with_mut(|state| {
        let session = state
            .session_mut(session_id)
            .ok_or_else(|| JsValue::from_str(&format!("unknown session: {}", session_id)))?;
        session.min_area = session::clamp_min_area(value);
        Ok(session.min_area)
    })
}

/// Counts for the info line and the download-button state.
#[wasm_bindgen]
pub fn filter_summary(session_id: &str) -> Result<JsValue, JsValue> {
    ModuleState::with_mut(|state| {
        let view = run_filter(state, session_id).map_err(|e| JsValue::from_str(&e))?;
        let summary = summarize(&view, state.table.len());
        Ok(to_value(&summary)?)
    })
}

/// Recompute the filtered view and return the layer operations the
/// host applies to its long-lived map, plus the filter summary.
#[wasm_bindgen]
pub fn update_map_view(session_id: &str) -> Result<JsValue, JsValue> {
    ModuleState::with_mut(|state| {
        let view = run_filter(state, session_id).map_err(|e| JsValue::from_str(&e))?;
        let total = state.table.len();
        let bbox = state.bbox;
        let session = state
            .session_mut(session_id)
            .ok_or_else(|| JsValue::from_str(&format!("unknown session: {}", session_id)))?;
        let ops = map_view::plan_layer_ops(&mut session.view, &view, bbox.as_ref());
        let plan = map_view::MapViewPlan {
            ops,
            summary: summarize(&view, total),
        };
        Ok(to_value(&plan)?)
    })
}

/// Slider bounds derived from the loaded data.
#[wasm_bindgen]
pub fn slider_config() -> Result<JsValue, JsValue> {
    ModuleState::with(|state| Ok(to_value(&session::slider_config(state.table.max_area()))?))
}

/// Dataset and diagnostics snapshot.
#[wasm_bindgen]
pub fn get_dataset_stats() -> Result<JsValue, JsValue> {
    ModuleState::with(|state| Ok(to_value(&state.stats())?))
}

/// Reset to the empty fallback table.
#[wasm_bindgen]
pub fn clear_dataset() -> bool {
    ModuleState::with_mut(|state| state.clear_dataset());
    console_log!("Dataset cleared");
    true
}

/// Serialize the session's filtered view for download. Errors when the
/// filtered view is empty.
#[wasm_bindgen]
pub fn export_filtered_geojson(session_id: &str) -> Result<JsValue, JsValue> {
    ModuleState::with_mut(|state| {
        let view = run_filter(state, session_id).map_err(|e| JsValue::from_str(&e))?;
        let result =
            export::export_view(&view, state.bbox.as_ref()).map_err(|e| JsValue::from_str(&e))?;
        console_log!(
            "Exported {} feature(s) as {}",
            result.feature_count,
            result.filename
        );
        Ok(to_value(&result)?)
    })
}

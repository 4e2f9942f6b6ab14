use geojson::JsonObject;
use serde::{Deserialize, Serialize};

use crate::area_filter::FilteredView;
use crate::bounds::Bbox;
use crate::feature_table;
use crate::models::FilterSummary;

/// Name of the replaceable overlay carrying the filtered detections.
pub const OVERLAY_LAYER: &str = "solarmap-filtered-panels";
/// Name of the imagery base layer, added at most once per map.
pub const IMAGERY_LAYER: &str = "Original Imagery";
/// XYZ tile service standing in for the survey imagery.
pub const IMAGERY_TILE_URL: &str =
    "https://server.arcgisonline.com/arcgis/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

/// Fixed paint for the overlay, embedded in the GeoJSON properties so
/// the host needs no style arguments.
pub struct OverlayStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub fill_opacity: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayStyle {
            fill: "#FFD700",
            stroke: "#FF4500",
            stroke_width: 2.0,
            fill_opacity: 0.7,
        }
    }
}

impl OverlayStyle {
    /// Property map merged into every overlay feature.
    pub fn to_properties(&self) -> JsonObject {
        let mut props = JsonObject::new();
        props.insert("fill".to_string(), serde_json::json!(self.fill));
        props.insert("stroke".to_string(), serde_json::json!(self.stroke));
        props.insert("stroke-width".to_string(), serde_json::json!(self.stroke_width));
        props.insert("fill-opacity".to_string(), serde_json::json!(self.fill_opacity));
        props
    }
}

/// One instruction for the host's long-lived MapLibre map.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum LayerOp {
    /// Add the named tile layer unless the map already has it.
    EnsureTileLayer { name: String, url: String, opacity: f64 },
    /// Remove the named layer and its source.
    RemoveLayer { name: String },
    /// Add a GeoJSON layer under the given name.
    AddGeoJson { name: String, data: serde_json::Value },
    /// Frame the view to [minLng, minLat, maxLng, maxLat].
    FitBounds { bbox: [f64; 4] },
}

/// What the host map is known to hold for one session.
///
/// Tracking this here keeps every re-plan minimal: the base layer is
/// ensured once, the overlay is removed only when present, and bounds
/// are framed once per load.
#[derive(Default, Clone)]
pub struct MapViewState {
    base_layer_installed: bool,
    overlay_installed: bool,
    bounds_framed: bool,
}

impl MapViewState {
    /// Re-frame on the next plan; called when a new dataset lands. The
    /// layer flags stay, they describe the host map, not the data.
    pub fn reset_framing(&mut self) {
        self.bounds_framed = false;
    }
}

/// Plan and summary returned to the host per threshold change.
#[derive(Serialize, Deserialize)]
pub struct MapViewPlan {
    pub ops: Vec<LayerOp>,
    pub summary: FilterSummary,
}

/// Compute the layer operations turning the host map's current state
/// into a view of `filtered`.
pub fn plan_layer_ops(
    view: &mut MapViewState,
    filtered: &FilteredView,
    bbox: Option<&Bbox>,
) -> Vec<LayerOp> {
    let mut ops = Vec::new();

    if !view.base_layer_installed {
        ops.push(LayerOp::EnsureTileLayer {
            name: IMAGERY_LAYER.to_string(),
            url: IMAGERY_TILE_URL.to_string(),
            opacity: 1.0,
        });
        view.base_layer_installed = true;
    }

    // Previous overlay goes first so the add below never collides with
    // an existing layer id.
    if view.overlay_installed {
        ops.push(LayerOp::RemoveLayer {
            name: OVERLAY_LAYER.to_string(),
        });
        view.overlay_installed = false;
    }

    if !filtered.is_empty() {
        let style = OverlayStyle::default().to_properties();
        let fc = feature_table::to_feature_collection(&filtered.features, Some(&style));
        let data = serde_json::to_value(&fc)
            .unwrap_or_else(|_| serde_json::json!({"type": "FeatureCollection", "features": []}));
        ops.push(LayerOp::AddGeoJson {
            name: OVERLAY_LAYER.to_string(),
            data,
        });
        view.overlay_installed = true;
    }

    if !view.bounds_framed {
        if let Some(b) = bbox {
            ops.push(LayerOp::FitBounds { bbox: b.to_array() });
            view.bounds_framed = true;
        }
    }

    ops
}

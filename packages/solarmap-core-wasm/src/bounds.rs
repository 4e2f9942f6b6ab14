use geo::BoundingRect;
use serde::{Deserialize, Serialize};

use crate::feature_table::PanelFeature;

/// Axis-aligned bounds of the dataset in WGS84 lon/lat.
///
/// Serialized order is always [minLng, minLat, maxLng, maxLat], the
/// order MapLibre's `fitBounds` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl Bbox {
    pub fn from_rect(rect: &geo_types::Rect<f64>) -> Self {
        Bbox {
            min_lng: rect.min().x,
            min_lat: rect.min().y,
            max_lng: rect.max().x,
            max_lat: rect.max().y,
        }
    }

    /// Smallest box containing both inputs.
    pub fn merged(&self, other: &Bbox) -> Bbox {
        Bbox {
            min_lng: self.min_lng.min(other.min_lng),
            min_lat: self.min_lat.min(other.min_lat),
            max_lng: self.max_lng.max(other.max_lng),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lng, self.min_lat, self.max_lng, self.max_lat]
    }

    pub fn key(&self) -> String {
        make_bbox_key(self.min_lng, self.min_lat, self.max_lng, self.max_lat)
    }
}

/// Generate a consistent key for a bounding box: "minLng_minLat_maxLng_maxLat".
pub fn make_bbox_key(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> String {
    format!("{}_{}_{}_{}", min_lng, min_lat, max_lng, max_lat)
}

/// Total bounds of a feature slice, `None` when no geometry yields a
/// rectangle (empty table).
pub fn table_bounds(features: &[PanelFeature]) -> Option<Bbox> {
    let mut acc: Option<Bbox> = None;
    for feature in features {
        if let Some(rect) = feature.geometry.bounding_rect() {
            let b = Bbox::from_rect(&rect);
            acc = Some(match acc {
                Some(existing) => existing.merged(&b),
                None => b,
            });
        }
    }
    acc
}

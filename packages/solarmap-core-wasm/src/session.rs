use crate::map_view::MapViewState;
use crate::models::SliderConfig;

/// Threshold a fresh session starts with.
pub const DEFAULT_MIN_AREA: f64 = 10.0;
/// Slider increment.
pub const SLIDER_STEP: f64 = 10.0;
/// Slider ceiling when the table is empty or carries no areas.
pub const SLIDER_MAX_FALLBACK: f64 = 500.0;
/// Headroom factor over the largest observed area.
pub const SLIDER_HEADROOM: f64 = 1.1;

/// Per-session state: the one mutable value the user owns, plus what
/// this session's host map currently displays.
pub struct SessionState {
    pub min_area: f64,
    pub view: MapViewState,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            min_area: DEFAULT_MIN_AREA,
            view: MapViewState::default(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Thresholds live in [0, +inf); NaN and negatives clamp to 0.
pub fn clamp_min_area(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Slider bounds: 0 up to 1.1x the largest observed area, stepping by
/// 10, with a fixed ceiling when no area data exists.
pub fn slider_config(max_area: Option<f64>) -> SliderConfig {
    let max = max_area
        .filter(|m| m.is_finite() && *m > 0.0)
        .map(|m| m * SLIDER_HEADROOM)
        .unwrap_or(SLIDER_MAX_FALLBACK);
    SliderConfig {
        min: 0.0,
        max,
        step: SLIDER_STEP,
    }
}

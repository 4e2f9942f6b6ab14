use crate::area_filter::FilteredView;
use crate::bounds::Bbox;
use crate::feature_table;
use crate::models::ExportResult;

/// Serialize the filtered view for download as a GeoJSON document.
///
/// The exported text carries the source attributes only; the paint
/// properties the map view injects are not part of the data. An empty
/// view is an error here, the host disables the control beforehand via
/// `FilterSummary::download_enabled`.
pub fn export_view(filtered: &FilteredView, bbox: Option<&Bbox>) -> Result<ExportResult, String> {
    if filtered.is_empty() {
        return Err("nothing to export: filtered view is empty".to_string());
    }

    let fc = feature_table::to_feature_collection(&filtered.features, None);
    let geojson = serde_json::to_string(&fc).map_err(|e| format!("failed to serialize GeoJSON: {}", e))?;

    let stem = bbox.map(|b| b.key()).unwrap_or_else(|| "all".to_string());
    Ok(ExportResult {
        filename: format!("filtered_solar_panels_{}.geojson", stem),
        geojson,
        feature_count: filtered.len(),
    })
}

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use solarmap_core_wasm::{
    clear_dataset, create_session, export_filtered_geojson, filter_summary,
    load_dataset_from_str, remove_session, set_min_area, update_map_view,
};

const SAMPLE: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [120.9, 23.7]},
            "properties": {"area_m2": 5.0}
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [121.0, 23.8]},
            "properties": {"area_m2": 15.0}
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [121.1, 23.9]},
            "properties": {"area_m2": 25.0}
        }
    ]
}"#;

#[wasm_bindgen_test]
fn slider_drives_filter_and_map_plan() {
    load_dataset_from_str(SAMPLE).unwrap();
    let session = create_session();

    set_min_area(&session, 10.0).unwrap();
    let summary = filter_summary(&session).unwrap();
    let matched = js_sys::Reflect::get(&summary, &"matched".into())
        .unwrap()
        .as_f64()
        .unwrap();
    assert_eq!(matched, 2.0);

    let plan = update_map_view(&session).unwrap();
    let ops = js_sys::Reflect::get(&plan, &"ops".into()).unwrap();
    assert!(js_sys::Array::is_array(&ops));

    let export = export_filtered_geojson(&session).unwrap();
    let count = js_sys::Reflect::get(&export, &"feature_count".into())
        .unwrap()
        .as_f64()
        .unwrap();
    assert_eq!(count, 2.0);

    assert!(remove_session(&session));
    clear_dataset();
}

#[wasm_bindgen_test]
fn garbage_input_falls_back_to_empty_table() {
    let summary = load_dataset_from_str("definitely not geojson").unwrap();
    let fallback = js_sys::Reflect::get(&summary, &"fallback".into())
        .unwrap()
        .as_bool()
        .unwrap();
    assert!(fallback);

    let session = create_session();
    let summary = filter_summary(&session).unwrap();
    let total = js_sys::Reflect::get(&summary, &"total".into())
        .unwrap()
        .as_f64()
        .unwrap();
    assert_eq!(total, 0.0);
    assert!(export_filtered_geojson(&session).is_err());
    remove_session(&session);
}

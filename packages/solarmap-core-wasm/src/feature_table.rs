use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};

/// Attribute carrying the detected panel footprint in square meters.
pub const AREA_ATTRIBUTE: &str = "area_m2";

// One detection result: a geometry plus the attributes it arrived with.
// The area value is pulled out of the properties at parse time so the
// filter does not re-read JSON on every slider change.
#[derive(Clone)]
pub struct PanelFeature {
    pub geometry: geo_types::Geometry<f64>,
    pub area_m2: Option<f64>,
    pub properties: JsonObject,
}

/// Ordered collection of panel detections, preserving source order.
///
/// `has_area` records whether the source carried the area attribute at
/// all. The empty fallback table reports `true`: its schema defines the
/// column even though no rows exist.
pub struct FeatureTable {
    features: Vec<PanelFeature>,
    has_area: bool,
}

impl FeatureTable {
    /// The fallback table: zero rows, defined area column.
    pub fn empty() -> Self {
        FeatureTable {
            features: Vec::new(),
            has_area: true,
        }
    }

    pub fn from_features(features: Vec<PanelFeature>) -> Self {
        // A table where no feature carries the attribute degrades to
        // unfiltered passthrough downstream; rows with a missing value
        // in an otherwise present column are simply never matched.
        let has_area = features.is_empty() || features.iter().any(|f| f.area_m2.is_some());
        FeatureTable { features, has_area }
    }

    pub fn features(&self) -> &[PanelFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn has_area(&self) -> bool {
        self.has_area
    }

    /// Largest observed area, used to scale the slider.
    pub fn max_area(&self) -> Option<f64> {
        self.features
            .iter()
            .filter_map(|f| f.area_m2)
            .filter(|a| a.is_finite())
            .fold(None, |acc, a| Some(acc.map_or(a, |m: f64| m.max(a))))
    }
}

/// Parse a GeoJSON document into a feature table.
///
/// Accepts a FeatureCollection, a single Feature, or a bare Geometry.
/// Features without a usable geometry are dropped; the count of dropped
/// features is returned alongside the table so the caller can log it.
pub fn parse_feature_collection(text: &str) -> Result<(FeatureTable, usize), String> {
    let geojson = text
        .parse::<GeoJson>()
        .map_err(|e| format!("invalid GeoJSON: {}", e))?;

    let raw_features: Vec<Feature> = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(g) => vec![Feature {
            bbox: None,
            geometry: Some(g),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    let mut features = Vec::with_capacity(raw_features.len());
    let mut dropped = 0usize;

    for raw in raw_features {
        let geometry = match raw.geometry {
            Some(g) => match geo_types::Geometry::<f64>::try_from(g) {
                Ok(g) => g,
                Err(_) => {
                    dropped += 1;
                    continue;
                }
            },
            None => {
                dropped += 1;
                continue;
            }
        };

        let properties = raw.properties.unwrap_or_default();
        let area_m2 = properties.get(AREA_ATTRIBUTE).and_then(|v| v.as_f64());

        features.push(PanelFeature {
            geometry,
            area_m2,
            properties,
        });
    }

    Ok((FeatureTable::from_features(features), dropped))
}

/// Build a GeoJSON FeatureCollection from a slice of features.
///
/// `extra_properties` entries are merged into each feature's properties,
/// overriding same-named keys. The map view uses this to embed its paint
/// style; the export path passes `None` and gets the source attributes
/// untouched.
pub fn to_feature_collection(
    features: &[PanelFeature],
    extra_properties: Option<&JsonObject>,
) -> FeatureCollection {
    let features = features
        .iter()
        .map(|pf| {
            let mut properties = pf.properties.clone();
            if let Some(extra) = extra_properties {
                for (k, v) in extra {
                    properties.insert(k.clone(), v.clone());
                }
            }
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::from(&pf.geometry))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

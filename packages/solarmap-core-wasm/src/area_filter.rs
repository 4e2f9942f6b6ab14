use crate::feature_table::{FeatureTable, PanelFeature};

/// Read-only subset of the feature table for one threshold value.
///
/// Recomputed on every threshold change and handed to the map view and
/// the export path; never mutated in place.
pub struct FilteredView {
    pub features: Vec<PanelFeature>,
    pub threshold: f64,
    /// True when the area attribute is missing from the table and the
    /// filter passed everything through unchanged.
    pub degraded: bool,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Keep the features whose area is at least `min_area`, in source order.
///
/// An empty table short-circuits to an empty view. A table without the
/// area attribute passes through unfiltered (degraded, not an error).
/// Rows with a missing value in an otherwise present column never match.
pub fn filter_by_min_area(table: &FeatureTable, min_area: f64) -> FilteredView {
    if table.is_empty() {
        return FilteredView {
            features: Vec::new(),
            threshold: min_area,
            degraded: false,
        };
    }

    if !table.has_area() {
        return FilteredView {
            features: table.features().to_vec(),
            threshold: min_area,
            degraded: true,
        };
    }

    let features = table
        .features()
        .iter()
        .filter(|f| f.area_m2.map_or(false, |a| a >= min_area))
        .cloned()
        .collect();

    FilteredView {
        features,
        threshold: min_area,
        degraded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_table::test_support::panel;

    fn table(areas: &[f64]) -> FeatureTable {
        FeatureTable::from_features(
            areas
                .iter()
                .enumerate()
                .map(|(i, &a)| panel(i as u64, Some(a)))
                .collect(),
        )
    }

    fn matched_areas(view: &FilteredView) -> Vec<f64> {
        view.features.iter().filter_map(|f| f.area_m2).collect()
    }

    #[test]
    fn keeps_features_at_or_above_threshold() {
        let view = filter_by_min_area(&table(&[5.0, 15.0, 25.0]), 10.0);
        assert_eq!(matched_areas(&view), vec![15.0, 25.0]);
        assert!(!view.degraded);
    }

    #[test]
    fn threshold_above_all_areas_yields_empty_view() {
        let view = filter_by_min_area(&table(&[5.0, 15.0, 25.0]), 30.0);
        assert!(view.is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        let view = filter_by_min_area(&table(&[5.0, 15.0, 25.0]), 15.0);
        assert_eq!(matched_areas(&view), vec![15.0, 25.0]);
    }

    #[test]
    fn preserves_source_order() {
        let view = filter_by_min_area(&table(&[40.0, 12.0, 33.0, 8.0, 21.0]), 10.0);
        assert_eq!(matched_areas(&view), vec![40.0, 12.0, 33.0, 21.0]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let first = filter_by_min_area(&table(&[5.0, 15.0, 25.0]), 10.0);
        let second = filter_by_min_area(&FeatureTable::from_features(first.features.clone()), 10.0);
        assert_eq!(matched_areas(&first), matched_areas(&second));
    }

    #[test]
    fn raising_threshold_never_grows_the_view() {
        let t = table(&[3.0, 18.0, 44.0, 97.0, 120.0]);
        let mut previous = usize::MAX;
        for threshold in [0.0, 10.0, 20.0, 50.0, 100.0, 200.0] {
            let count = filter_by_min_area(&t, threshold).len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn empty_table_yields_empty_view_for_any_threshold() {
        for threshold in [0.0, 10.0, 1e9] {
            let view = filter_by_min_area(&FeatureTable::empty(), threshold);
            assert!(view.is_empty());
            assert!(!view.degraded);
        }
    }

    #[test]
    fn missing_area_attribute_passes_table_through() {
        let t = FeatureTable::from_features(vec![panel(1, None), panel(2, None), panel(3, None)]);
        let view = filter_by_min_area(&t, 50.0);
        assert_eq!(view.len(), 3);
        assert!(view.degraded);
    }

    #[test]
    fn rows_without_value_in_present_column_never_match() {
        let t = FeatureTable::from_features(vec![
            panel(1, Some(20.0)),
            panel(2, None),
            panel(3, Some(30.0)),
        ]);
        let view = filter_by_min_area(&t, 0.0);
        assert_eq!(matched_areas(&view), vec![20.0, 30.0]);
        assert!(!view.degraded);
    }
}

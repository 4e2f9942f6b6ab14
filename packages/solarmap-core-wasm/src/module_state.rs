use lazy_static::lazy_static;
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::bounds::Bbox;
use crate::feature_table::FeatureTable;
use crate::models::DatasetStats;
use crate::session::SessionState;

// Module state holding the loaded dataset and the live sessions. The
// table and bbox are written once per load and read on every filter;
// sessions own the only per-user mutable value.
pub struct ModuleState {
    pub table: FeatureTable,
    pub bbox: Option<Bbox>,
    pub loaded: bool,
    pub sessions: HashMap<String, SessionState>,

    // Diagnostics surfaced through get_dataset_stats
    pub filter_invocations: usize,
    pub degraded_filters: usize,
}

lazy_static! {
    static ref MODULE_STATE: ReentrantMutex<RefCell<ModuleState>> =
        ReentrantMutex::new(RefCell::new(ModuleState::new()));
}

impl ModuleState {
    pub fn new() -> Self {
        ModuleState {
            table: FeatureTable::empty(),
            bbox: None,
            loaded: false,
            sessions: HashMap::new(),
            filter_invocations: 0,
            degraded_filters: 0,
        }
    }

    pub fn with_mut<F, R>(f: F) -> R
    where
        F: FnOnce(&mut ModuleState) -> R,
    {
        let guard = MODULE_STATE.lock();
        let mut borrow = guard.borrow_mut();
        f(&mut borrow)
    }

    pub fn with<F, R>(f: F) -> R
    where
        F: FnOnce(&ModuleState) -> R,
    {
        let guard = MODULE_STATE.lock();
        let borrow = guard.borrow();
        f(&borrow)
    }

    /// Replace the dataset and schedule a re-frame for every session.
    pub fn install_dataset(&mut self, table: FeatureTable, bbox: Option<Bbox>) {
        self.table = table;
        self.bbox = bbox;
        self.loaded = true;
        for session in self.sessions.values_mut() {
            session.view.reset_framing();
        }
    }

    /// Back to the empty fallback table.
    pub fn clear_dataset(&mut self) {
        self.table = FeatureTable::empty();
        self.bbox = None;
        self.loaded = false;
        for session in self.sessions.values_mut() {
            session.view.reset_framing();
        }
    }

    pub fn create_session(&mut self, id: String) {
        self.sessions.insert(id, SessionState::new());
    }

    pub fn remove_session(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn session(&self, id: &str) -> Option<&SessionState> {
        self.sessions.get(id)
    }

    pub fn session_mut(&mut self, id: &str) -> Option<&mut SessionState> {
        self.sessions.get_mut(id)
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            loaded: self.loaded,
            feature_count: self.table.len(),
            has_area_attribute: self.table.has_area(),
            bbox_key: self.bbox.as_ref().map(|b| b.key()),
            session_count: self.sessions.len(),
            filter_invocations: self.filter_invocations,
            degraded_filters: self.degraded_filters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_table::test_support::panel;

    fn small_table() -> FeatureTable {
        FeatureTable::from_features(vec![panel(1, Some(10.0)), panel(2, Some(20.0))])
    }

    #[test]
    fn starts_with_empty_fallback() {
        let state = ModuleState::new();
        assert!(!state.loaded);
        assert!(state.table.is_empty());
        assert!(state.bbox.is_none());
    }

    #[test]
    fn install_and_clear_round_trip() {
        let mut state = ModuleState::new();
        state.install_dataset(small_table(), Some(crate::bounds::table_bounds(small_table().features()).unwrap()));
        assert!(state.loaded);
        assert_eq!(state.table.len(), 2);
        assert!(state.bbox.is_some());

        state.clear_dataset();
        assert!(!state.loaded);
        assert!(state.table.is_empty());
        assert!(state.bbox.is_none());
        // Fallback schema still defines the area column
        assert!(state.table.has_area());
    }

    #[test]
    fn session_lifecycle() {
        let mut state = ModuleState::new();
        state.create_session("a".to_string());
        assert!(state.session("a").is_some());
        assert_eq!(state.stats().session_count, 1);
        assert!(state.remove_session("a"));
        assert!(!state.remove_session("a"));
        assert!(state.session("a").is_none());
    }

    #[test]
    fn stats_reflect_dataset() {
        let mut state = ModuleState::new();
        state.install_dataset(small_table(), None);
        let stats = state.stats();
        assert!(stats.loaded);
        assert_eq!(stats.feature_count, 2);
        assert!(stats.has_area_attribute);
        assert_eq!(stats.bbox_key, None);
    }
}

use std::sync::Arc;

use super::*;
use crate::services::orders::LogOrderSink;

#[test]
fn from_config_seeds_catalog_when_enabled() {
    let config = Config::default();
    let state = AppState::from_config(&config, Arc::new(LogOrderSink));
    let catalog = state.catalog.try_read().unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.background("default").is_some());
    assert_eq!(state.uploads.url_prefix(), "/uploads");
}

#[test]
fn from_config_starts_empty_without_seed() {
    let config = Config { seed_catalog: false, ..Config::default() };
    let state = AppState::from_config(&config, Arc::new(LogOrderSink));
    assert!(state.catalog.try_read().unwrap().is_empty());
}

#[test]
fn clones_share_the_catalog() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    clone.catalog.try_write().unwrap().add_background("Rustik", "/uploads/rustik.png");
    assert_eq!(state.catalog.try_read().unwrap().len(), 2);
}

#[test]
fn scratch_dirs_are_distinct() {
    let a = test_helpers::scratch_dir("distinct");
    let b = test_helpers::scratch_dir("distinct");
    assert_ne!(a, b);
    assert!(a.is_dir() && b.is_dir());
}

//! Tests for the process-wide store lifecycle.
//!
//! The store is global, so every test holds `LOCK` and starts from a torn
//! down store with the default configuration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use atomdb::store::{self, StoreState};
use atomdb::{AtomdbError, LoaderConfig, TableSource, METASTATE_LEVELS};

static LOCK: Mutex<()> = Mutex::new(());

fn fresh_store() -> MutexGuard<'static, ()> {
    let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    store::teardown();
    store::configure(LoaderConfig::default());
    guard
}

/// A table declaring one more element than it contains.
const CORRUPTED: &str = "# element_count: 3\n\
    atomic_number,symbol,mass_number,relative_atomic_mass,\
    isotopic_composition,standard_atomic_weight,notes\n\
    1,H,1,1.00782503207(10),0.999885(70),1.00794(7),\n\
    2,He,4,4.00260325415(6),0.99999866(3),4.002602(2),\n";

fn corrupted_config() -> LoaderConfig {
    LoaderConfig {
        source: TableSource::Inline(CORRUPTED.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_first_lookup_loads() {
    let _guard = fresh_store();
    assert_eq!(store::state(), StoreState::Unloaded);

    let hydrogen = atomdb::get_element(1).unwrap().unwrap();
    assert_eq!(hydrogen.symbol, "H");
    assert_eq!(store::state(), StoreState::Loaded);
}

#[test]
fn test_each_lookup_triggers_load() {
    let _guard = fresh_store();
    let isotope = atomdb::get_isotope(1, 1).unwrap().unwrap();
    assert_eq!(isotope.mass_number, 1);
    assert!(store::is_loaded());

    store::teardown();
    let state = atomdb::get_isotope_metastate(1, 1, 1).unwrap().unwrap();
    assert_eq!(state.level, 1);
    assert!(store::is_loaded());
}

#[test]
fn test_lookups_share_one_catalog() {
    let _guard = fresh_store();
    atomdb::get_element(26).unwrap();
    let first = store::catalog().unwrap();
    atomdb::get_isotope(26, 56).unwrap();
    let second = store::catalog().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.element_count(), 118);
    assert_eq!(first.isotope_count(), second.isotope_count());
}

#[test]
fn test_init_is_idempotent() {
    let _guard = fresh_store();
    store::init().unwrap();
    let first = store::catalog().unwrap();
    store::init().unwrap();
    store::init_with(corrupted_config()).unwrap();
    let second = store::catalog().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_not_found_is_ok_none() {
    let _guard = fresh_store();
    assert!(atomdb::get_element(0).unwrap().is_none());
    assert!(atomdb::get_element(119).unwrap().is_none());
    assert!(atomdb::get_isotope(1, 8).unwrap().is_none());
    assert!(atomdb::get_isotope_metastate(1, 1, METASTATE_LEVELS + 1).unwrap().is_none());
    assert!(atomdb::get_isotope_metastate(1, 1, 256).unwrap().is_none());
    assert!(atomdb::get_isotope_metastate(1, 1, u32::MAX).unwrap().is_none());
    assert!(atomdb::get_isotope_metastate(1, 8, 1).unwrap().is_none());
}

#[test]
fn test_failed_load_stays_unloaded() {
    let _guard = fresh_store();
    store::configure(corrupted_config());

    assert!(matches!(
        atomdb::get_element(1),
        Err(AtomdbError::ElementCountMismatch { declared: 3, found: 2 })
    ));
    assert!(atomdb::get_isotope(1, 1).is_err());
    assert!(atomdb::get_isotope_metastate(1, 1, 1).is_err());
    assert_eq!(store::state(), StoreState::Unloaded);
}

#[test]
fn test_retry_after_failed_load() {
    let _guard = fresh_store();
    assert!(store::init_with(corrupted_config()).is_err());
    assert!(!store::is_loaded());

    store::configure(LoaderConfig::default());
    assert_eq!(atomdb::get_element(2).unwrap().unwrap().symbol, "He");
    assert!(store::is_loaded());
}

#[test]
fn test_teardown_resets() {
    let _guard = fresh_store();
    let before = store::catalog().unwrap();
    store::teardown();
    assert_eq!(store::state(), StoreState::Unloaded);

    // Handed-out catalogs outlive the teardown.
    assert_eq!(before.element(1).unwrap().symbol, "H");

    let after = store::catalog().unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.isotope_count(), after.isotope_count());
}

#[test]
fn test_concurrent_first_access_loads_once() {
    let _guard = fresh_store();

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| store::catalog().unwrap()))
        .collect();
    let catalogs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for catalog in &catalogs[1..] {
        assert!(Arc::ptr_eq(&catalogs[0], catalog));
    }
}

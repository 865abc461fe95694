//! Process-wide catalog with an explicit `Unloaded`/`Loaded` lifecycle.
//!
//! The first lookup loads the configured table. A failed load leaves the store
//! unloaded and is reported to the caller, so a later call retries. The
//! `Unloaded → Loaded` transition happens under a write lock, so concurrent
//! first lookups load the table once.
//!
//! ```no_run
//! let hydrogen = atomdb::get_element(1)?.expect("hydrogen is in the table");
//! assert_eq!(hydrogen.symbol, "H");
//!
//! let deuterium = atomdb::get_isotope(1, 2)?;
//! let ground = atomdb::get_isotope_metastate(1, 2, 1)?;
//! # Ok::<(), atomdb::AtomdbError>(())
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use log::{error, info};
use once_cell::sync::Lazy;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::loader::{Loader, LoaderConfig};
use crate::model::{Element, Isotope, IsotopeMetaState};

/// Lifecycle state of the process-wide store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// No catalog loaded yet, or torn down.
    Unloaded,
    /// A catalog is loaded and serves lookups.
    Loaded,
}

#[derive(Default)]
struct Store {
    config: LoaderConfig,
    catalog: Option<Arc<Catalog>>,
}

static STORE: Lazy<RwLock<Store>> = Lazy::new(|| RwLock::new(Store::default()));

/// Current lifecycle state.
pub fn state() -> StoreState {
    let store = STORE.read().unwrap_or_else(PoisonError::into_inner);
    if store.catalog.is_some() {
        StoreState::Loaded
    } else {
        StoreState::Unloaded
    }
}

/// Whether a catalog is loaded.
pub fn is_loaded() -> bool {
    state() == StoreState::Loaded
}

/// Set the configuration used by the next load.
///
/// An already loaded catalog is kept; call [`teardown`] to reload.
pub fn configure(config: LoaderConfig) {
    let mut store = STORE.write().unwrap_or_else(PoisonError::into_inner);
    store.config = config;
}

/// The loaded catalog, loading it first if needed.
pub fn catalog() -> Result<Arc<Catalog>> {
    {
        let store = STORE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = &store.catalog {
            return Ok(Arc::clone(catalog));
        }
    }

    let mut store = STORE.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(catalog) = &store.catalog {
        return Ok(Arc::clone(catalog));
    }

    match Loader::with_config(store.config.clone()).load() {
        Ok(catalog) => {
            info!(
                "loaded {} elements, {} isotopes, {} metastates from {}",
                catalog.element_count(),
                catalog.isotope_count(),
                catalog.metastate_count(),
                catalog.source().source
            );
            let catalog = Arc::new(catalog);
            store.catalog = Some(Arc::clone(&catalog));
            Ok(catalog)
        }
        Err(e) => {
            error!("failed to load reference table: {}", e);
            Err(e)
        }
    }
}

/// Load the catalog with the current configuration. No-op when loaded.
pub fn init() -> Result<()> {
    catalog().map(|_| ())
}

/// Configure and load. No-op when already loaded.
pub fn init_with(config: LoaderConfig) -> Result<()> {
    if is_loaded() {
        return Ok(());
    }
    configure(config);
    init()
}

/// Drop the loaded catalog and return to `Unloaded`.
///
/// Catalogs already handed out through [`catalog`] stay valid. The
/// configuration is kept.
pub fn teardown() {
    let mut store = STORE.write().unwrap_or_else(PoisonError::into_inner);
    if store.catalog.take().is_some() {
        info!("reference catalog torn down");
    }
}

/// Element by atomic number.
///
/// `Err` only when the implicit load fails; `Ok(None)` when not found.
pub fn get_element(atomic_number: u32) -> Result<Option<Element>> {
    Ok(catalog()?.element(atomic_number).cloned())
}

/// Isotope by atomic and mass number.
pub fn get_isotope(atomic_number: u32, mass_number: u32) -> Result<Option<Isotope>> {
    Ok(catalog()?.isotope(atomic_number, mass_number).cloned())
}

/// Isotope metastate by atomic number, mass number and level.
pub fn get_isotope_metastate(
    atomic_number: u32,
    mass_number: u32,
    level: u32,
) -> Result<Option<IsotopeMetaState>> {
    Ok(catalog()?
        .metastate(atomic_number, mass_number, level)
        .copied())
}

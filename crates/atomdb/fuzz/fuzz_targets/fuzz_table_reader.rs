//! Fuzz target for the table reader and loader.
//!
//! This fuzzer tests that reading and loading a table:
//! 1. Never panics on malformed CSV or JSON
//! 2. Either fails cleanly or yields a catalog whose invariants hold

#![no_main]

use atomdb::{Loader, TableReader, METASTATE_LEVELS};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(table) = TableReader::new().read_str(text) else {
        return;
    };

    if let Ok(catalog) = Loader::new().load_table(&table) {
        assert_eq!(catalog.element_count() as u32, table.element_count);
        assert_eq!(
            catalog.metastate_count(),
            catalog.isotope_count() * METASTATE_LEVELS as usize
        );
    }
});

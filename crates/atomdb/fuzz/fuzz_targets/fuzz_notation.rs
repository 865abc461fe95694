//! Fuzz target for NIST value notation parsing.

#![no_main]

use atomdb::{Measured, StandardAtomicWeight};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = s.parse::<Measured>();
        let _ = s.parse::<StandardAtomicWeight>();
    }
});

//! Typed entities: elements, isotopes and isotope metastates.

mod element;
mod isotope;
mod measured;

pub use element::{Element, StandardAtomicWeight};
pub use isotope::{Isotope, IsotopeKey, IsotopeMetaState, Note, METASTATE_LEVELS};
pub use measured::Measured;

//! Defense system - elemental affinities

mod resistance;

pub use resistance::{resolve_element, ElementalModifier, ResistanceTable};

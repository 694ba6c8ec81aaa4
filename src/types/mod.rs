//! Domain newtypes shared across the crate.

mod ids;

pub use ids::*;

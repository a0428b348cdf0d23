//! Core layer: pure transformations.

mod index;
mod progress;

pub use index::parse_index;
pub use progress::percentage;

//! Catalog index: the immutable, ordered list of tracks the player can select.
//!
//! A catalog is built once at startup, either from an index file (JSON or
//! TOML) or by scanning a directory tree, and never changes afterwards.

mod load;
mod model;
mod scan;

pub use load::{load_index, open};
pub use model::*;
pub use scan::scan;

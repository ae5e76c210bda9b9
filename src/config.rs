//! User settings: seek increments, rate step, catalog location and logging.
//!
//! Values come from struct defaults, an optional TOML file and `MONLIS__`
//! environment variables, in increasing priority.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;

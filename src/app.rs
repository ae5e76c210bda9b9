//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the active screen and the
//! catalog cursor. Playback state lives in the controller.

mod model;

pub use model::*;

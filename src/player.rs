//! Playback controller: owns the current selection and playback state and
//! drives a [`MediaSurface`].
//!
//! The controller is framework-independent. Every mutation method spells out
//! its side effects on the surface, and surface notifications come back as
//! [`MediaEvent`]s tagged with the [`Generation`] of the resource they belong to.

mod controller;
mod surface;
mod types;

pub use controller::PlaybackController;
pub use surface::MediaSurface;
pub use types::*;

#[cfg(test)]
mod tests;

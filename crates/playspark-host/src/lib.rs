//! Headless execution host for generated games.
//!
//! [`GameRegistry`] turns a [`GameProgram`](playspark_core::program::GameProgram)
//! into a live game module; [`GameHost`] drives it frame by frame the way the
//! browser page does.

pub mod host;
pub mod registry;

pub use host::{GameHost, HostEvent};
pub use registry::{GameRegistry, HostError};

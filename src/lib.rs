//! Coded Aperture Capture Sim - library crate.
//!
//! Provides mask synthesis, circular convolution, and the noise model
//! for use by the main application and tests.

pub mod capture;
pub mod image_io;
pub mod pipeline;
pub mod render;

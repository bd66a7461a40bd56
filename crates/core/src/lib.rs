#![deny(unsafe_code)]
//! Core of the plexus particle background.
//!
//! Provides the [`Particle`] and [`ParticleField`] model (initialisation,
//! edge reflection, proximity links), the [`Surface`] drawing abstraction,
//! the [`Simulator`] lifecycle with cancellation, headless frame scheduling,
//! the [`FieldConfig`] parameters, the [`Xorshift64`] random source and the
//! [`Recipe`] format.

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod params;
pub mod particle;
pub mod prng;
pub mod recipe;
pub mod schedule;
pub mod simulator;
pub mod surface;

pub use color::{Rgba, Srgb};
pub use config::{FieldConfig, MAX_PARTICLES};
pub use error::FieldError;
pub use field::{Link, ParticleField, Pointer};
pub use particle::Particle;
pub use prng::{RandomSource, Xorshift64};
pub use recipe::Recipe;
pub use schedule::{AnimationLoop, FrameId, FrameQueue};
pub use simulator::Simulator;
pub use surface::{DrawCommand, RecordingSurface, Surface};

/// Re-exported so hosts can build positions without naming glam.
pub use glam::DVec2;

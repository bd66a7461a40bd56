//! The particle field simulator: one surface, one field, one random source,
//! and the running/cancelled state of its animation loop.
//!
//! The simulator does not schedule itself. A host (browser
//! `requestAnimationFrame`, [`AnimationLoop`](crate::schedule::AnimationLoop))
//! calls [`Simulator::frame`] once per display refresh and reschedules only
//! while it returns `true`.

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::prng::RandomSource;
use crate::surface::Surface;

/// Owns a surface and the particle field drawn on it.
#[derive(Debug)]
pub struct Simulator<S: Surface, R: RandomSource> {
    surface: S,
    field: ParticleField,
    rng: R,
    cancelled: bool,
    frames: u64,
}

impl<S: Surface, R: RandomSource> Simulator<S, R> {
    /// Sizes `surface` to `width`×`height` and populates the field.
    ///
    /// Returns `None` when no surface could be acquired; nothing is started
    /// in that case.
    pub fn mount(
        surface: Option<S>,
        width: f64,
        height: f64,
        config: FieldConfig,
        rng: R,
    ) -> Option<Self> {
        let surface = surface?;
        let mut sim = Self {
            surface,
            field: ParticleField::new(config),
            rng,
            cancelled: false,
            frames: 0,
        };
        sim.resize(width, height);
        Some(sim)
    }

    /// Draws one frame: clear, move and draw every particle, then links.
    ///
    /// Returns `false` without touching the surface once the simulator has
    /// been cancelled; the caller must not reschedule.
    pub fn frame(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        self.surface.clear();
        self.field.update(&mut self.surface);
        self.field.connect(&mut self.surface);
        self.frames += 1;
        true
    }

    /// Resizes the surface and rebuilds the field from scratch.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
        self.field.init(width, height, &mut self.rng);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.field.pointer_moved(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.field.pointer_left();
    }

    /// Stops the loop. Every later [`frame`](Self::frame) is a no-op.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            log::info!("particle field stopped after {} frames", self.frames);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Gives the surface back, ending the simulation.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

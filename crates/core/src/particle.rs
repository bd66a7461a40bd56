//! A single drifting point of the field.

use crate::color::Srgb;
use crate::surface::Surface;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One animated point: position and velocity in surface pixels, a radius and
/// the field's accent color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    /// Pixels per frame.
    pub velocity: DVec2,
    pub size: f64,
    pub color: Srgb,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, size: f64, color: Srgb) -> Self {
        Self {
            position,
            velocity,
            size,
            color,
        }
    }

    /// Reflects off the surface edges, then advances by one frame.
    ///
    /// The edge test uses the pre-advance position: a component is negated
    /// when the particle sits on or past an edge and is still heading
    /// outward. The advance is not corrected afterwards, so a particle can
    /// overshoot an edge by at most one velocity step before it turns.
    pub fn update(&mut self, width: f64, height: f64) {
        let p = self.position;
        let v = self.velocity;
        if (p.x <= 0.0 && v.x < 0.0) || (p.x >= width && v.x > 0.0) {
            self.velocity.x = -v.x;
        }
        if (p.y <= 0.0 && v.y < 0.0) || (p.y >= height && v.y > 0.0) {
            self.velocity.y = -v.y;
        }
        self.position += self.velocity;
    }

    /// Fills this particle's disc on `surface`.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(self.position, self.size, self.color.with_alpha(1.0));
    }
}

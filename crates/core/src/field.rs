//! The particle field: every particle plus the shared surface dimensions and
//! the pointer record.
//!
//! A field is rebuilt wholesale by [`ParticleField::init`] whenever the
//! surface changes size. Each frame the owner calls [`ParticleField::update`]
//! (move and draw every particle) and then [`ParticleField::connect`] (draw a
//! fading line between every pair closer than the size-relative threshold).

use crate::config::{FieldConfig, MAX_PARTICLES};
use crate::particle::Particle;
use crate::prng::RandomSource;
use crate::surface::Surface;
use glam::DVec2;
use serde::Serialize;

/// Last known pointer position and its influence radius.
///
/// Tracked for hosts that want to react to the pointer; particle motion and
/// linking do not read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pointer {
    pub position: Option<DVec2>,
    pub radius: f64,
}

/// A connected pair of particles, by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub squared_distance: f64,
    pub opacity: f64,
}

/// The particle collection of one simulator.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Pointer,
}

/// Number of particles for a `width`×`height` surface: `floor(area / density)`,
/// never more than [`MAX_PARTICLES`].
///
/// Degenerate sizes (zero, negative, NaN) give an empty field. Hosts reject
/// over-dense configs up front with [`FieldConfig::check_surface`]; the
/// ceiling here still holds when a surface grows after mounting.
pub fn particle_count(width: f64, height: f64, density: f64) -> usize {
    let n = (width * height / density).floor();
    if n.is_nan() || n <= 0.0 {
        0
    } else if n >= MAX_PARTICLES as f64 {
        MAX_PARTICLES
    } else {
        n as usize
    }
}

/// Samples `particle_count(width, height, config.density)` particles.
///
/// Each radius is drawn from `[min_size, max_size)`, each position from the
/// surface inset by twice the radius, and each velocity component from
/// `[-max_speed, max_speed)`.
pub fn spawn_particles<R: RandomSource + ?Sized>(
    width: f64,
    height: f64,
    config: &FieldConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let count = particle_count(width, height, config.density);
    (0..count)
        .map(|_| {
            let size = rng.next_range(config.min_size, config.max_size);
            let inset = size * 2.0;
            let x = rng.next_range(inset, width - inset);
            let y = rng.next_range(inset, height - inset);
            let vx = rng.next_range(-config.max_speed, config.max_speed);
            let vy = rng.next_range(-config.max_speed, config.max_speed);
            Particle::new(DVec2::new(x, y), DVec2::new(vx, vy), size, config.color)
        })
        .collect()
}

impl ParticleField {
    /// An empty field; call [`init`](Self::init) to populate it.
    pub fn new(config: FieldConfig) -> Self {
        let pointer = Pointer {
            position: None,
            radius: config.influence_radius,
        };
        Self {
            config,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer,
        }
    }

    /// Discards every particle and spawns a fresh set sized for `width`×`height`.
    pub fn init<R: RandomSource + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width;
        self.height = height;
        self.particles = spawn_particles(width, height, &self.config, rng);
        log::debug!(
            "particle field initialised: {}x{} -> {} particles",
            width,
            height,
            self.particles.len()
        );
    }

    /// Moves every particle one frame (reflecting off the edges) and draws it.
    pub fn update<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (w, h) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.update(w, h);
            particle.draw(surface);
        }
    }

    /// Squared distance under which two particles are linked.
    pub fn link_threshold(&self) -> f64 {
        let d = self.config.link_divisor;
        (self.width / d) * (self.height / d)
    }

    /// Line opacity for a pair at squared distance `d2`.
    pub fn link_opacity(&self, d2: f64) -> f64 {
        let opacity = 1.0 - d2 / self.config.opacity_falloff;
        if self.config.clamp_opacity {
            opacity.clamp(0.0, 1.0)
        } else {
            opacity
        }
    }

    /// Every unordered pair `a < b` closer than [`link_threshold`](Self::link_threshold).
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let threshold = self.link_threshold();
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |a| {
            (a + 1..particles.len()).filter_map(move |b| {
                let d2 = particles[a]
                    .position
                    .distance_squared(particles[b].position);
                (d2 < threshold).then(|| Link {
                    a,
                    b,
                    squared_distance: d2,
                    opacity: self.link_opacity(d2),
                })
            })
        })
    }

    /// Strokes a line for every link, faded by distance.
    pub fn connect<S: Surface + ?Sized>(&self, surface: &mut S) {
        for link in self.links() {
            surface.stroke_line(
                self.particles[link.a].position,
                self.particles[link.b].position,
                self.config.line_width,
                self.config.color.with_alpha(link.opacity),
            );
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.position = Some(DVec2::new(x, y));
    }

    pub fn pointer_left(&mut self) {
        self.pointer.position = None;
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access, for hosts and tests that place particles directly.
    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

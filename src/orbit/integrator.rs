//! Frame Integrator.
//!
//! Advances each bubble along its orbit once per rendered frame:
//! - Revolution: angle grows by `speed * dt`, never reset
//! - Floating: sine bob around the band height
//! - Recenter: the focus target eases toward the origin instead of orbiting
//! - Spin: the mesh turns a little every frame, whatever else happens

use glam::Vec3;

use super::params::OrbitParams;

/// Per-bubble state carried between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitBody {
    /// Current orbital angle (radians). Monotonic.
    pub angle: f32,
    /// Cosmetic mesh rotation about Y (radians)
    pub spin: f32,
    /// Position while easing toward the origin as focus target
    pub recenter: Option<Vec3>,
}

impl OrbitBody {
    pub fn new(params: &OrbitParams) -> Self {
        Self {
            angle: params.phase,
            spin: 0.0,
            recenter: None,
        }
    }

    /// Advance the orbit by `dt` seconds and return the position at `elapsed`.
    pub fn advance(&mut self, params: &OrbitParams, dt: f32, elapsed: f32) -> Vec3 {
        self.angle += params.speed * dt.max(0.0);
        orbit_point(params, self.angle, elapsed)
    }

    /// Where the orbit puts this body now, without advancing.
    pub fn orbital_position(&self, params: &OrbitParams, elapsed: f32) -> Vec3 {
        orbit_point(params, self.angle, elapsed)
    }

    /// Ease toward the origin by `damping` of the remaining distance.
    ///
    /// `from` seeds the easing on the first recenter frame.
    pub fn recenter_step(&mut self, from: Vec3, damping: f32) -> Vec3 {
        let current = self.recenter.unwrap_or(from);
        let next = current.lerp(Vec3::ZERO, damping.clamp(0.0, 1.0));
        self.recenter = Some(next);
        next
    }

    pub fn spin_step(&mut self, rate: f32) {
        self.spin += rate;
    }
}

/// `(cos(a) * r, h + sin(t * f + a) * amp, sin(a) * r)`
pub fn orbit_point(params: &OrbitParams, angle: f32, elapsed: f32) -> Vec3 {
    Vec3::new(
        angle.cos() * params.radius,
        params.height + (elapsed * params.bob_frequency + angle).sin() * params.bob_amplitude,
        angle.sin() * params.radius,
    )
}

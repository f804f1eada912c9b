//! Repulsion Solver.
//!
//! One-step overlap avoidance: each bubble is nudged away from neighbors
//! whose last recorded position lies closer than `min_distance`. Corrections
//! are summed and applied once; post-correction distances are not
//! re-checked within the same frame. Running every frame is what settles
//! the layout.

use glam::Vec3;

use super::config::OrbitConfig;
use super::registry::RegistryFrame;

/// Below this separation two positions are treated as coincident.
const COINCIDENT_EPSILON: f32 = 1e-5;

const GOLDEN_ANGLE: f32 = 2.399_963_1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepulsionSolver {
    pub min_distance: f32,
    pub stiffness: f32,
}

/// Outcome of one solver call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsed {
    pub position: Vec3,
    /// Neighbors closer than `min_distance`
    pub contacts: usize,
}

impl RepulsionSolver {
    pub fn new(min_distance: f32, stiffness: f32) -> Self {
        Self {
            min_distance,
            stiffness,
        }
    }

    pub fn from_config(config: &OrbitConfig) -> Self {
        Self::new(config.min_distance, config.stiffness)
    }

    /// Correction pushing `position` away from `neighbor`, zero if far enough.
    pub fn push(&self, position: Vec3, neighbor: Vec3, index: usize) -> Vec3 {
        let away = position - neighbor;
        let distance = away.length();
        if distance >= self.min_distance {
            return Vec3::ZERO;
        }
        let dir = if distance > COINCIDENT_EPSILON {
            away / distance
        } else {
            fallback_direction(index)
        };
        dir * (self.min_distance - distance) * self.stiffness
    }

    /// Correct `base` against every recorded neighbor and record the result.
    ///
    /// A bubble without a recorded position of its own (first frame, freshly
    /// reallocated registry, or an index past the registry's end) keeps
    /// `base` unchanged.
    pub fn resolve(&self, frame: &mut RegistryFrame<'_>, index: usize, base: Vec3) -> Repulsed {
        if frame.get(index).is_none() {
            frame.record(index, base);
            return Repulsed {
                position: base,
                contacts: 0,
            };
        }

        let mut correction = Vec3::ZERO;
        let mut contacts = 0;
        for (_, neighbor) in frame.neighbors(index) {
            let push = self.push(base, neighbor, index);
            if push != Vec3::ZERO {
                correction += push;
                contacts += 1;
            }
        }

        let position = base + correction;
        frame.record(index, position);
        Repulsed { position, contacts }
    }
}

/// Deterministic escape direction for exactly coincident bubbles.
fn fallback_direction(index: usize) -> Vec3 {
    let a = index as f32 * GOLDEN_ANGLE;
    Vec3::new(a.cos(), 0.0, a.sin())
}

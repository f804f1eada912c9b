//! Orbit Parameter Generator.
//!
//! Maps `(index, weight, total)` to the orbit a bubble follows and the way
//! it looks. Pure functions of their inputs: a re-render with an unchanged
//! list lands every bubble on exactly the same orbit.

use std::f32::consts::PI;

use rayon::prelude::*;

use super::config::OrbitConfig;

/// Glow tier keyed to popularity thresholds. Ordered dimmest to brightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlowTier {
    /// weight < 5
    Ember,
    /// 5 <= weight < 10
    Warm,
    /// 10 <= weight < 15
    Bright,
    /// weight >= 15
    Radiant,
}

impl GlowTier {
    pub fn from_weight(weight: u32) -> Self {
        match weight {
            0..=4 => GlowTier::Ember,
            5..=9 => GlowTier::Warm,
            10..=14 => GlowTier::Bright,
            _ => GlowTier::Radiant,
        }
    }

    /// Base color, RGBA in 0..1. Luminance rises with the tier.
    pub fn color(self) -> [f32; 4] {
        match self {
            GlowTier::Ember => [0.839, 0.620, 0.180, 0.8],   // #d69e2e
            GlowTier::Warm => [0.898, 0.773, 0.278, 0.8],    // #e5c547
            GlowTier::Bright => [0.949, 0.816, 0.435, 0.85], // #f2d06f
            GlowTier::Radiant => [1.0, 0.953, 0.690, 0.9],   // #fff3b0
        }
    }

    pub fn emissive(self) -> f32 {
        match self {
            GlowTier::Ember => 0.2,
            GlowTier::Warm => 0.3,
            GlowTier::Bright => 0.45,
            GlowTier::Radiant => 0.65,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GlowTier::Ember => "ember",
            GlowTier::Warm => "warm",
            GlowTier::Bright => "bright",
            GlowTier::Radiant => "radiant",
        }
    }
}

/// How a bubble looks, derived from its weight alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleLook {
    /// Sphere radius
    pub size: f32,
    pub tier: GlowTier,
    pub color: [f32; 4],
    pub emissive: f32,
}

/// Per-bubble orbit, recomputed every frame from index and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub group: usize,
    pub radius: f32,
    /// rad/s, always > 0
    pub speed: f32,
    /// Starting angle on the circle
    pub phase: f32,
    /// Vertical offset of the orbit plane
    pub height: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub look: BubbleLook,
}

/// Size and tier for a popularity weight.
pub fn bubble_look(config: &OrbitConfig, weight: u32) -> BubbleLook {
    let saturation = config.size_saturation_weight.max(1);
    let t = weight.min(saturation) as f32 / saturation as f32;
    let size = (config.size_min + (config.size_max - config.size_min) * t)
        .clamp(config.size_min, config.size_max);
    let tier = GlowTier::from_weight(weight);
    BubbleLook {
        size,
        tier,
        color: tier.color(),
        emissive: tier.emissive(),
    }
}

/// Orbit for the bubble at `index` of a list of `total`.
pub fn orbit_params(config: &OrbitConfig, index: usize, weight: u32, total: usize) -> OrbitParams {
    let groups = config.orbit_groups.max(1);
    let group = index % groups;

    let radius = config.base_radius
        + group as f32 * config.radius_step
        + (index % config.jitter_modulus.max(1)) as f32 * config.jitter_step;

    let speed = (config.base_speed + group as f32 * config.speed_step
        - (index % config.speed_jitter_modulus.max(1)) as f32 * config.speed_jitter_step)
        .max(config.min_speed);

    // index * (pi / (total / 2)); an empty or single list must not divide by zero
    let half = total.max(1) as f32 / 2.0;
    let phase = index as f32 * (PI / half);

    let height = ((index % 3) as f32 - 1.0) * config.height_step;
    let bob_amplitude = config.bob_amplitude
        + if index % 2 == 1 {
            config.bob_amplitude_odd
        } else {
            0.0
        };

    OrbitParams {
        group,
        radius,
        speed,
        phase,
        height,
        bob_amplitude,
        bob_frequency: config.bob_frequency,
        look: bubble_look(config, weight),
    }
}

/// Orbit parameters for a whole list of weights, in list order.
pub fn orbit_layout(config: &OrbitConfig, weights: &[u32]) -> Vec<OrbitParams> {
    let total = weights.len();
    weights
        .par_iter()
        .enumerate()
        .map(|(i, &w)| orbit_params(config, i, w, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bands_and_jitter() {
        let c = OrbitConfig::default();
        let p0 = orbit_params(&c, 0, 0, 10);
        let p1 = orbit_params(&c, 1, 0, 10);
        let p5 = orbit_params(&c, 5, 0, 10);
        assert_eq!(p0.group, 0);
        assert_eq!(p1.group, 1);
        assert_eq!(p5.group, 0);
        assert!((p0.radius - 4.0).abs() < 1e-6);
        assert!((p1.radius - (4.0 + 1.5 + 0.3)).abs() < 1e-6);
        // same band, different jitter: never coincide
        assert!((p0.radius - p5.radius).abs() > 1e-3);
    }

    #[test]
    fn phases_spread_evenly() {
        let c = OrbitConfig::default();
        let step = orbit_params(&c, 1, 0, 8).phase;
        assert!((step - PI / 4.0).abs() < 1e-6);
        assert!((orbit_params(&c, 4, 0, 8).phase - PI).abs() < 1e-5);
    }

    #[test]
    fn empty_total_does_not_divide_by_zero() {
        let c = OrbitConfig::default();
        let p = orbit_params(&c, 3, 0, 0);
        assert!(p.phase.is_finite());
        let single = orbit_params(&c, 0, 0, 1);
        assert_eq!(single.phase, 0.0);
    }

    #[test]
    fn radiant_at_fifteen() {
        let c = OrbitConfig::default();
        let look = bubble_look(&c, 15);
        assert_eq!(look.tier, GlowTier::Radiant);
        assert_eq!(look.size, c.size_max);
        let look = bubble_look(&c, 0);
        assert_eq!(look.tier, GlowTier::Ember);
        assert_eq!(look.size, c.size_min);
    }

    #[test]
    fn layout_matches_single_calls() {
        let c = OrbitConfig::default();
        let weights = [0, 3, 7, 12, 20, 1];
        let layout = orbit_layout(&c, &weights);
        for (i, p) in layout.iter().enumerate() {
            assert_eq!(*p, orbit_params(&c, i, weights[i], weights.len()));
        }
    }

    fn luminance(c: [f32; 4]) -> f32 {
        0.2126 * c[0] + 0.7152 * c[1] + 0.0722 * c[2]
    }

    proptest! {
        #[test]
        fn deterministic(index in 0usize..500, weight in 0u32..100, total in 0usize..500) {
            let c = OrbitConfig::default();
            prop_assert_eq!(
                orbit_params(&c, index, weight, total),
                orbit_params(&c, index, weight, total)
            );
        }

        #[test]
        fn speed_stays_positive(index in 0usize..10_000, total in 1usize..10_000) {
            let c = OrbitConfig::default();
            prop_assert!(orbit_params(&c, index, 0, total).speed > 0.0);
        }

        #[test]
        fn look_is_monotonic(w1 in 0u32..200, w2 in 0u32..200) {
            let c = OrbitConfig::default();
            let (lo, hi) = if w1 <= w2 { (w1, w2) } else { (w2, w1) };
            let a = bubble_look(&c, lo);
            let b = bubble_look(&c, hi);
            prop_assert!(b.size >= a.size);
            prop_assert!(b.tier >= a.tier);
            prop_assert!(b.emissive >= a.emissive);
            prop_assert!(luminance(b.color) >= luminance(a.color));
            prop_assert!(a.size >= c.size_min && b.size <= c.size_max);
        }
    }
}

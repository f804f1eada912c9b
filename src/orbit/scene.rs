//! Scene Composer.
//!
//! Owns the bubble list, the position registry, per-bubble orbit state,
//! hover state, the focus controller and the camera, and turns them into
//! one [`SceneFrame`] per rendered frame.
//!
//! Per frame, in list order: fresh orbit parameters → integrator → repulsion
//! against the registry → final position. Repulsion therefore reads
//! neighbors' positions from the previous frame (or from earlier in this
//! one), never from the future.

use std::collections::HashMap;

use glam::Vec3;

use super::config::OrbitConfig;
use super::focus::{CameraRig, FocusController, FocusState};
use super::integrator::OrbitBody;
use super::navigation::{NavigationSink, PendingNavigation};
use super::params::{orbit_layout, orbit_params, BubbleLook, GlowTier};
use super::registry::PositionRegistry;
use super::repulsion::RepulsionSolver;
use crate::bubble::Bubble;
use crate::hash::unit;
use crate::render::{CameraView, Light, OrbitFrame, SceneFrame, SceneNode};

/// Frame time is clamped so a stalled window does not fling bubbles.
const MAX_DT: f32 = 0.1;

const HOVER_SCALE: f32 = 1.15;
const FOCUS_SCALE: f32 = 1.5;
const HOVER_EMISSIVE_BOOST: f32 = 0.3;
const LABEL_GAP: f32 = 0.3;
const LABEL_FONT_SIZE: f32 = 0.2;

const BACKGROUND: [f32; 4] = [0.035, 0.035, 0.07, 1.0];
const ANCHOR_COLOR: [f32; 4] = [0.965, 0.878, 0.369, 1.0];
const LABEL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub const PLACEHOLDER_MESSAGE: &str = "No bubbles floating yet. Start one to get the orbit going!";

/// Where a bubble ended up on the last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    /// Final position after repulsion (or recentering)
    position: Vec3,
    /// Position on the orbit before repulsion
    orbital: Vec3,
    look: BubbleLook,
    spin: f32,
}

/// Screen-space hover overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub bubble_id: String,
    pub title: String,
    pub detail: String,
    pub x: f32,
    pub y: f32,
}

/// Counters for the last tick, shown in the stats panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub entities: usize,
    pub orbit_evaluations: usize,
    pub repulsion_contacts: usize,
    pub total_orbit_evaluations: u64,
    pub registry_resets: u64,
    pub focus_phase: &'static str,
    /// Seconds until a scheduled navigation fires
    pub pending_navigation: Option<f32>,
}

#[derive(Debug, Clone, Default)]
struct HoverState {
    bubble_id: Option<String>,
    pointer: Option<(f32, f32)>,
}

pub struct OrbitScene {
    config: OrbitConfig,
    bubbles: Vec<Bubble>,
    registry: PositionRegistry,
    bodies: HashMap<String, OrbitBody>,
    placements: Vec<Placement>,
    solver: RepulsionSolver,
    focus: FocusController,
    camera: CameraRig,
    hover: HoverState,
    pending: Option<PendingNavigation>,
    stars: Vec<(Vec3, f32)>,
    elapsed: f32,
    stats: FrameStats,
}

impl OrbitScene {
    pub fn new(config: OrbitConfig) -> Self {
        let stars = star_field(config.star_count, config.star_radius);
        Self {
            solver: RepulsionSolver::from_config(&config),
            focus: FocusController::from_config(&config),
            camera: CameraRig::from_config(&config),
            config,
            bubbles: Vec::new(),
            registry: PositionRegistry::default(),
            bodies: HashMap::new(),
            placements: Vec::new(),
            hover: HoverState::default(),
            pending: None,
            stars,
            elapsed: 0.0,
            stats: FrameStats {
                focus_phase: "idle",
                ..FrameStats::default()
            },
        }
    }

    pub fn with_bubbles(config: OrbitConfig, bubbles: Vec<Bubble>) -> Self {
        let mut scene = Self::new(config);
        scene.set_bubbles(bubbles);
        scene
    }

    // ── Entity source ──

    /// Replace the bubble list wholesale.
    ///
    /// The registry is reallocated only when the count changes. Orbit state
    /// of bubbles that stay in the list is kept.
    pub fn set_bubbles(&mut self, bubbles: Vec<Bubble>) {
        if bubbles.len() != self.registry.len() {
            log::debug!(
                "registry: {} -> {} slots",
                self.registry.len(),
                bubbles.len()
            );
            self.registry.reset(bubbles.len());
            self.stats.registry_resets += 1;
        }

        self.bodies
            .retain(|id, _| bubbles.iter().any(|b| &b.id == id));
        if let Some(id) = self.hover.bubble_id.as_deref() {
            if !bubbles.iter().any(|b| b.id == id) {
                self.hover.bubble_id = None;
            }
        }

        self.placements.clear();
        self.stats.entities = bubbles.len();
        self.bubbles = bubbles;
    }

    /// Someone reflected on a bubble. Returns false for an unknown id.
    pub fn set_weight(&mut self, bubble_id: &str, reflect_count: i64) -> bool {
        match self.bubbles.iter_mut().find(|b| b.id == bubble_id) {
            Some(b) => {
                b.reflect_count = Some(reflect_count);
                true
            }
            None => false,
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn bubble(&self, bubble_id: &str) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == bubble_id)
    }

    // ── Frame ──

    /// Advance one rendered frame.
    ///
    /// `dt` is the time since the previous frame, `elapsed` the time since
    /// the scene was mounted. Calls `sink` at most once per navigation.
    pub fn tick<S: NavigationSink + ?Sized>(&mut self, dt: f32, elapsed: f32, sink: &mut S) {
        let dt = dt.clamp(0.0, MAX_DT);
        self.elapsed = elapsed;
        self.stats.orbit_evaluations = 0;
        self.stats.repulsion_contacts = 0;

        // Reallocation happens here, between frames, never mid-solve.
        if self.registry.len() != self.bubbles.len() {
            log::warn!(
                "registry length {} != {} bubbles; reallocating",
                self.registry.len(),
                self.bubbles.len()
            );
            self.registry.reset(self.bubbles.len());
            self.stats.registry_resets += 1;
        }

        let total = self.bubbles.len();
        let recentering = self.focus.state().target_id().map(str::to_owned);
        self.placements.clear();
        // Empty list: placeholder only, no orbit work. Focus and a pending
        // navigation still run below.
        if !self.bubbles.is_empty() {
            let weights: Vec<u32> = self.bubbles.iter().map(Bubble::weight).collect();
            let layout = orbit_layout(&self.config, &weights);
            self.stats.orbit_evaluations = layout.len();

            let mut frame = self.registry.frame();
            for (i, (bubble, params)) in self.bubbles.iter().zip(&layout).enumerate() {
                let body = self
                    .bodies
                    .entry(bubble.id.clone())
                    .or_insert_with(|| OrbitBody::new(params));
                body.spin_step(self.config.spin_rate);
                let orbital = body.advance(params, dt, elapsed);

                let position = if recentering.as_deref() == Some(bubble.id.as_str()) {
                    let p = body.recenter_step(orbital, self.config.recenter_damping);
                    frame.record(i, p);
                    p
                } else {
                    body.recenter = None;
                    let r = self.solver.resolve(&mut frame, i, orbital);
                    self.stats.repulsion_contacts += r.contacts;
                    r.position
                };

                self.placements.push(Placement {
                    position,
                    orbital,
                    look: params.look,
                    spin: body.spin,
                });
            }
        }
        self.stats.total_orbit_evaluations += self.stats.orbit_evaluations as u64;

        // Navigation scheduled on an earlier frame
        let due = self.pending.as_mut().map(|p| p.tick(dt)).unwrap_or(false);
        if due {
            if let Some(pending) = self.pending.take() {
                log::info!("navigating to bubble {}", pending.bubble_id());
                sink.navigate(pending.bubble_id());
            }
        }

        if self.focus.controls_enabled() {
            self.camera.sync_controls();
        } else if let Some(arrived) = self.focus.step(&mut self.camera) {
            log::debug!(
                "arrived at {}, navigating in {:.2}s",
                arrived,
                self.config.navigation_delay
            );
            self.pending = Some(PendingNavigation::new(arrived, self.config.navigation_delay));
        }

        self.stats.entities = total;
        self.stats.focus_phase = self.focus.state().phase_name();
        self.stats.pending_navigation = self.pending.as_ref().map(|p| p.remaining().max(0.0));
    }

    /// Describe the current frame for the renderer.
    pub fn frame(&self) -> SceneFrame {
        if self.bubbles.is_empty() {
            return SceneFrame::Placeholder {
                message: PLACEHOLDER_MESSAGE.to_string(),
                background_color: BACKGROUND,
            };
        }

        let focus_target = self.focus.state().target_id();
        let hovered = self.hover.bubble_id.as_deref();
        let mut nodes = Vec::with_capacity(self.stars.len() + self.placements.len() + 2);

        for &(position, brightness) in &self.stars {
            nodes.push(SceneNode::Star {
                position,
                brightness,
            });
        }

        if self.focus.state().is_idle() {
            nodes.push(SceneNode::Anchor {
                center: Vec3::ZERO,
                radius: self.config.anchor_radius,
                color: ANCHOR_COLOR,
            });
        }

        for (bubble, placed) in self.bubbles.iter().zip(&self.placements) {
            let is_hovered = hovered == Some(bubble.id.as_str());
            let is_focused = focus_target == Some(bubble.id.as_str());
            let scale = if is_focused {
                FOCUS_SCALE
            } else if is_hovered {
                HOVER_SCALE
            } else {
                1.0
            };
            let emissive = if is_hovered {
                placed.look.emissive + HOVER_EMISSIVE_BOOST
            } else {
                placed.look.emissive
            };

            nodes.push(SceneNode::Sphere {
                bubble_id: bubble.id.clone(),
                center: placed.position,
                radius: placed.look.size,
                color: placed.look.color,
                emissive,
                scale,
                spin: placed.spin,
                hovered: is_hovered,
                focused: is_focused,
            });

            if is_hovered {
                nodes.push(SceneNode::Label {
                    position: placed.position
                        + Vec3::new(0.0, placed.look.size * scale + LABEL_GAP, 0.0),
                    text: bubble.topic.clone(),
                    font_size: LABEL_FONT_SIZE,
                    color: LABEL_COLOR,
                });
            }
        }

        SceneFrame::Orbit(OrbitFrame {
            camera: self.camera_view(),
            lights: vec![
                Light::Ambient { intensity: 0.5 },
                Light::Point {
                    position: Vec3::new(10.0, 10.0, 10.0),
                    intensity: 1.0,
                },
            ],
            nodes,
            background_color: BACKGROUND,
        })
    }

    pub fn camera_view(&self) -> CameraView {
        CameraView {
            position: self.camera.position,
            look_at: self.camera.look_at,
            fov_y: self.camera.fov_y,
        }
    }

    // ── Pointer input ──

    /// Click on a bubble: start a focus transition toward its orbital
    /// position, unless one is already in flight.
    pub fn click(&mut self, bubble_id: &str) -> bool {
        if !self.focus.state().is_idle() {
            log::debug!("click on {} ignored: focus in flight", bubble_id);
            return false;
        }
        let Some(index) = self.bubbles.iter().position(|b| b.id == bubble_id) else {
            return false;
        };
        let target = match self.placements.get(index) {
            Some(placed) => placed.orbital,
            None => {
                let bubble = &self.bubbles[index];
                let total = self.bubbles.len();
                let params = orbit_params(&self.config, index, bubble.weight(), total);
                let body = self
                    .bodies
                    .get(bubble_id)
                    .cloned()
                    .unwrap_or_else(|| OrbitBody::new(&params));
                body.orbital_position(&params, self.elapsed)
            }
        };
        self.focus.begin(bubble_id, target)
    }

    /// Pointer entered a bubble. Replaces any previous hover.
    pub fn pointer_over(&mut self, bubble_id: &str) {
        if self.bubbles.iter().any(|b| b.id == bubble_id) {
            self.hover.bubble_id = Some(bubble_id.to_string());
        }
    }

    /// Pointer left a bubble. Ignored if another bubble is hovered now.
    pub fn pointer_out(&mut self, bubble_id: &str) {
        if self.hover.bubble_id.as_deref() == Some(bubble_id) {
            self.hover.bubble_id = None;
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.hover.pointer = Some((x, y));
    }

    pub fn pointer_left_view(&mut self) {
        self.hover = HoverState::default();
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.bubble_id.as_deref()
    }

    /// Overlay for the hovered bubble at the pointer, if any.
    pub fn tooltip(&self) -> Option<Tooltip> {
        let id = self.hover.bubble_id.as_deref()?;
        let (x, y) = self.hover.pointer?;
        let bubble = self.bubble(id)?;
        Some(Tooltip {
            bubble_id: bubble.id.clone(),
            title: bubble.topic.clone(),
            detail: format!(
                "{} · {} reflections · {}",
                bubble.display_name(),
                bubble.weight(),
                GlowTier::from_weight(bubble.weight()).label()
            ),
            x,
            y,
        })
    }

    // ── Camera ──

    /// Drag to rotate. No effect during a focus transition.
    pub fn rotate_camera(&mut self, dx: f32, dy: f32) -> bool {
        if !self.focus.controls_enabled() {
            return false;
        }
        self.camera.controls.rotate(dx, dy);
        self.camera.sync_controls();
        true
    }

    /// Scroll to zoom. No effect during a focus transition.
    pub fn zoom_camera(&mut self, scroll: f32) -> bool {
        if !self.focus.controls_enabled() {
            return false;
        }
        self.camera.controls.zoom(scroll);
        self.camera.sync_controls();
        true
    }

    /// Abort the focus transition; the camera snaps home.
    pub fn cancel_focus(&mut self) {
        self.focus.cancel(&mut self.camera);
        self.pending = None;
        for body in self.bodies.values_mut() {
            body.recenter = None;
        }
    }

    // ── Inspection ──

    pub fn focus_state(&self) -> &FocusState {
        self.focus.state()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn registry(&self) -> &PositionRegistry {
        &self.registry
    }

    /// Final position of a bubble on the last tick.
    pub fn position_of(&self, bubble_id: &str) -> Option<Vec3> {
        let index = self.bubbles.iter().position(|b| b.id == bubble_id)?;
        self.placements.get(index).map(|p| p.position)
    }

    /// Look of a bubble on the last tick.
    pub fn look_of(&self, bubble_id: &str) -> Option<BubbleLook> {
        let index = self.bubbles.iter().position(|b| b.id == bubble_id)?;
        self.placements.get(index).map(|p| p.look)
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Points scattered over a sphere shell, the same every mount.
fn star_field(count: usize, radius: f32) -> Vec<(Vec3, f32)> {
    (0..count)
        .map(|i| {
            let u = unit(i * 3 + 1);
            let v = unit(i * 3 + 2);
            let theta = u * std::f32::consts::TAU;
            let y = v * 2.0 - 1.0;
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let r = radius * (0.8 + 0.2 * unit(i * 3 + 3));
            let position = Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * r;
            (position, 0.3 + 0.7 * unit(i * 7 + 5))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::mock::spread_weights;
    use crate::orbit::focus::steps_to_arrive;
    use crate::orbit::params::GlowTier;

    const DT: f32 = 1.0 / 60.0;

    fn bubbles(weights: &[u32]) -> Vec<Bubble> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| Bubble::new(format!("b{}", i), format!("Topic {}", i), w as i64))
            .collect()
    }

    /// Run `frames` ticks, collecting navigation calls.
    fn run(scene: &mut OrbitScene, start_frame: u32, frames: u32, calls: &mut Vec<String>) {
        let mut sink = |id: &str| calls.push(id.to_string());
        for f in start_frame..start_frame + frames {
            scene.tick(DT, f as f32 * DT, &mut sink);
        }
    }

    fn spin_of(scene: &OrbitScene, bubble_id: &str) -> f32 {
        scene
            .frame()
            .nodes()
            .iter()
            .find_map(|n| match n {
                SceneNode::Sphere {
                    bubble_id: id,
                    spin,
                    ..
                } if id == bubble_id => Some(*spin),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn empty_list_renders_placeholder_without_orbit_work() {
        let mut scene = OrbitScene::new(OrbitConfig::default());
        let mut calls = Vec::new();
        run(&mut scene, 0, 30, &mut calls);
        assert!(scene.frame().is_placeholder());
        assert_eq!(scene.stats().orbit_evaluations, 0);
        assert_eq!(scene.stats().total_orbit_evaluations, 0);
        assert!(calls.is_empty());
    }

    #[test]
    fn emptied_list_stops_orbit_work() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[1, 2]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 3, &mut calls);
        assert_eq!(scene.stats().orbit_evaluations, 2);
        assert_eq!(scene.stats().total_orbit_evaluations, 6);

        scene.set_bubbles(Vec::new());
        run(&mut scene, 3, 10, &mut calls);
        assert!(scene.frame().is_placeholder());
        assert_eq!(scene.stats().orbit_evaluations, 0);
        assert_eq!(scene.stats().total_orbit_evaluations, 6);
        assert!(scene.bodies.is_empty());
        assert!(scene.placements.is_empty());
    }

    #[test]
    fn scheduled_navigation_survives_an_emptied_list() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[3]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 1, &mut calls);
        scene.click("b0");
        let mut frame = 1;
        while !matches!(scene.focus_state(), FocusState::Arrived { .. }) {
            run(&mut scene, frame, 1, &mut calls);
            frame += 1;
            assert!(frame < 200);
        }
        scene.set_bubbles(Vec::new());
        run(&mut scene, frame, 60, &mut calls);
        assert_eq!(calls, vec!["b0".to_string()]);
    }

    #[test]
    fn spin_advances_every_frame_including_focus_target() {
        let config = OrbitConfig::default();
        let rate = config.spin_rate;
        let mut scene = OrbitScene::with_bubbles(config, bubbles(&[2, 5, 9]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 1, &mut calls);
        assert!(scene.click("b1"));

        let target_before = spin_of(&scene, "b1");
        let other_before = spin_of(&scene, "b2");
        let n = 5;
        run(&mut scene, 1, n, &mut calls);
        assert!(!scene.focus_state().is_idle());

        let grown = n as f32 * rate;
        assert!((spin_of(&scene, "b1") - target_before - grown).abs() < 1e-5);
        assert!((spin_of(&scene, "b2") - other_before - grown).abs() < 1e-5);
    }

    #[test]
    fn cancel_returns_camera_home_and_it_stays_there() {
        let config = OrbitConfig {
            home_camera: [0.0, 3.0, 20.0],
            ..OrbitConfig::default()
        };
        assert!(config.validate().is_ok());
        let home = Vec3::from_array(config.home_camera);
        let mut scene = OrbitScene::with_bubbles(config, bubbles(&[1, 4]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 1, &mut calls);
        assert!((scene.camera().position - home).length() < 1e-4);

        scene.click("b0");
        run(&mut scene, 1, 2, &mut calls);
        scene.cancel_focus();
        assert_eq!(scene.camera().position, home);
        run(&mut scene, 3, 5, &mut calls);
        assert!((scene.camera().position - home).length() < 1e-4);
    }

    #[test]
    fn registry_follows_count_changes() {
        let mut scene = OrbitScene::new(OrbitConfig::default());
        let mut calls = Vec::new();
        for &n in &[3usize, 3, 7, 0, 2, 12, 12, 1] {
            scene.set_bubbles(bubbles(&vec![1; n]));
            assert_eq!(scene.registry().len(), n);
            run(&mut scene, 0, 2, &mut calls);
            assert_eq!(scene.registry().len(), n);
            assert_eq!(scene.registry().recorded(), n);
            assert_eq!(scene.registry().get(n), None);
        }
    }

    #[test]
    fn same_count_replacement_keeps_registry_and_orbits() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[1, 2, 3]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 10, &mut calls);
        let resets = scene.stats().registry_resets;
        let before = scene.position_of("b1").unwrap();

        let mut same = bubbles(&[1, 2, 3]);
        same[1].reflect_count = Some(9);
        scene.set_bubbles(same);
        assert_eq!(scene.stats().registry_resets, resets);
        assert_eq!(scene.registry().recorded(), 3);

        run(&mut scene, 10, 1, &mut calls);
        let after = scene.position_of("b1").unwrap();
        // one frame of motion, no jump back to the initial phase
        assert!((after - before).length() < 0.2);
    }

    #[test]
    fn weight_change_updates_look() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[0, 0]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 1, &mut calls);
        assert_eq!(scene.look_of("b0").unwrap().tier, GlowTier::Ember);
        assert!(scene.set_weight("b0", 16));
        assert!(!scene.set_weight("nope", 3));
        run(&mut scene, 1, 1, &mut calls);
        assert_eq!(scene.look_of("b0").unwrap().tier, GlowTier::Radiant);
    }

    #[test]
    fn second_click_mid_approach_is_ignored() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[1, 4]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 5, &mut calls);

        assert!(scene.click("b0"));
        run(&mut scene, 5, 1, &mut calls);
        assert!(matches!(scene.focus_state(), FocusState::Approaching { .. }));
        assert!(!scene.click("b1"));
        assert_eq!(scene.focus_state().target_id(), Some("b0"));
    }

    #[test]
    fn click_targets_orbital_position() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[1, 1, 1]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 3, &mut calls);
        let orbital = scene.placements[2].orbital;
        scene.click("b2");
        match scene.focus_state() {
            FocusState::Approaching { target_pos, .. } => assert_eq!(*target_pos, orbital),
            other => panic!("expected approach, got {:?}", other),
        }
    }

    #[test]
    fn controls_and_anchor_are_off_during_focus() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[1, 2]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 1, &mut calls);
        assert!(scene.frame().has_anchor());
        assert!(scene.rotate_camera(10.0, 0.0));

        scene.click("b1");
        assert!(!scene.rotate_camera(10.0, 0.0));
        assert!(!scene.zoom_camera(1.0));
        run(&mut scene, 1, 1, &mut calls);
        assert!(!scene.frame().has_anchor());

        scene.cancel_focus();
        assert_eq!(scene.camera().position, scene.camera().home);
        assert!(scene.rotate_camera(10.0, 0.0));
        run(&mut scene, 2, 1, &mut calls);
        assert!(scene.frame().has_anchor());
    }

    #[test]
    fn hover_tracks_one_bubble_and_drives_tooltip() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[1, 2, 3]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 1, &mut calls);
        assert!(scene.tooltip().is_none());

        scene.pointer_moved(120.0, 80.0);
        assert!(scene.tooltip().is_none());

        scene.pointer_over("b0");
        scene.pointer_over("b2");
        assert_eq!(scene.hovered(), Some("b2"));
        scene.pointer_out("b0");
        assert_eq!(scene.hovered(), Some("b2"));

        let tip = scene.tooltip().unwrap();
        assert_eq!(tip.bubble_id, "b2");
        assert_eq!((tip.x, tip.y), (120.0, 80.0));
        assert!(tip.detail.ends_with("ember"));

        let labels = scene
            .frame()
            .nodes()
            .iter()
            .filter(|n| matches!(n, SceneNode::Label { .. }))
            .count();
        assert_eq!(labels, 1);

        scene.pointer_out("b2");
        assert!(scene.tooltip().is_none());
    }

    #[test]
    fn hover_cleared_when_bubble_leaves_list() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[1, 2, 3]));
        scene.pointer_over("b2");
        scene.set_bubbles(bubbles(&[1, 2]));
        assert_eq!(scene.hovered(), None);
    }

    #[test]
    fn unmount_before_delay_drops_navigation() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[3]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 1, &mut calls);
        scene.click("b0");
        let mut frame = 1;
        while !matches!(scene.focus_state(), FocusState::Arrived { .. }) {
            run(&mut scene, frame, 1, &mut calls);
            frame += 1;
            assert!(frame < 200);
        }
        assert!(scene.stats().pending_navigation.is_some());
        drop(scene);
        assert!(calls.is_empty());
    }

    #[test]
    fn focus_target_recenters_toward_origin() {
        let mut scene = OrbitScene::with_bubbles(OrbitConfig::default(), bubbles(&[2, 2, 2, 2]));
        let mut calls = Vec::new();
        run(&mut scene, 0, 2, &mut calls);
        let start = scene.position_of("b3").unwrap().length();
        scene.click("b3");
        run(&mut scene, 2, 30, &mut calls);
        assert!(scene.position_of("b3").unwrap().length() < start * 0.5);
    }

    /// 20 bubbles spread over every tier; click the most reflected one and
    /// expect exactly one navigation after the camera arrives.
    #[test]
    fn end_to_end_focus_and_navigate() {
        let config = OrbitConfig::default();
        let weights = spread_weights(20, 15);
        assert_eq!(weights[0], 0);
        assert_eq!(weights[19], 15);

        let mut scene = OrbitScene::with_bubbles(config.clone(), bubbles(&weights));
        let mut calls = Vec::new();
        run(&mut scene, 0, 1, &mut calls);

        let top = scene.look_of("b19").unwrap();
        assert_eq!(top.size, config.size_max);
        assert_eq!(top.tier, GlowTier::Radiant);
        for b in scene.bubbles() {
            assert!(scene.look_of(&b.id).unwrap().size <= top.size);
        }
        assert_eq!(scene.look_of("b0").unwrap().tier, GlowTier::Ember);
        assert_eq!(scene.look_of("b0").unwrap().size, config.size_min);

        assert!(scene.click("b19"));
        let target = match scene.focus_state() {
            FocusState::Approaching { target_pos, .. } => *target_pos,
            other => panic!("expected approach, got {:?}", other),
        };
        let d0 = scene.camera().position.distance(target);
        let arrive = steps_to_arrive(d0, config.approach_fraction, config.arrival_threshold);
        let delay_frames = (config.navigation_delay / DT).ceil() as u32 + 2;

        // one spare frame for float rounding at the threshold
        run(&mut scene, 1, arrive + 1, &mut calls);
        assert!(matches!(scene.focus_state(), FocusState::Arrived { .. }));
        assert!(calls.is_empty());

        run(&mut scene, 2 + arrive, delay_frames + 120, &mut calls);
        assert_eq!(calls, vec!["b19".to_string()]);
    }

    #[test]
    fn stars_are_deterministic() {
        assert_eq!(star_field(50, 60.0), star_field(50, 60.0));
        assert!(star_field(50, 60.0)
            .iter()
            .all(|(p, _)| p.length() <= 60.0 + 1e-3));
    }
}

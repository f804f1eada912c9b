//! Content-area rendering for `BubbleApp`.
//!
//! - `draw_content`     — dispatcher (orbit viewport or detail page)
//! - `draw_orbit`       — ticks the scene and paints its frame, routes pointer input
//! - `draw_detail`      — one bubble's page
//! - `draw_stats_panel` — right-side statistics panel

use std::time::Instant;

use chrono::Utc;
use glam::Vec3;

use bubble_orbit::bubble::format_remaining;
use bubble_orbit::orbit::{GlowTier, OrbitScene, Tooltip};
use bubble_orbit::render::projection::Projector;
use bubble_orbit::render::{Light, SceneFrame, SceneNode};

use super::{BubbleApp, View};
use crate::ui::{color32, truncate_str, with_alpha};

/// One projected thing to paint, ordered back to front.
struct Drawable {
    depth: f32,
    shape: Shape,
}

enum Shape {
    Star {
        pos: egui::Pos2,
        radius: f32,
        brightness: f32,
    },
    Ball {
        bubble_id: Option<String>,
        pos: egui::Pos2,
        radius: f32,
        color: [f32; 4],
        emissive: f32,
        /// Ambient plus diffuse, before emissive
        light: f32,
        /// Screen direction toward the key light
        highlight: egui::Vec2,
        spin: f32,
        hovered: bool,
        focused: bool,
    },
    Text {
        pos: egui::Pos2,
        text: String,
        size: f32,
        color: egui::Color32,
    },
}

impl BubbleApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match self.view.clone() {
            View::Orbit => self.draw_orbit(ui, ctx),
            View::Detail(id) => {
                egui::Frame::central_panel(ui.style()).show(ui, |ui| {
                    self.draw_detail(ui, &id);
                });
            }
        }
    }

    // ── Orbit viewport ───────────────────────────────────────────────────────

    pub fn draw_orbit(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.scene.is_none() {
            self.mount_scene();
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32().min(0.1);
        self.last_frame_time = now;
        let elapsed = (now - self.mounted_at).as_secs_f32();

        let mut navigate_to: Option<String> = None;
        scene.tick(dt, elapsed, &mut |id: &str| {
            navigate_to = Some(id.to_string());
        });

        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let frame = scene.frame();
        painter.rect_filled(rect, 0.0, color32(frame.background_color(), 1.0));

        match &frame {
            SceneFrame::Placeholder { message, .. } => {
                let text = if self.loading {
                    "Loading bubbles..."
                } else {
                    message.as_str()
                };
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(18.0),
                    egui::Color32::from_gray(200),
                );
                scene.pointer_left_view();
            }
            SceneFrame::Orbit(orbit) => {
                let projector = Projector::new(&orbit.camera, rect.width(), rect.height());
                let lighting = Lighting::new(&orbit.lights, orbit.camera.position);

                let mut drawables = project_nodes(&projector, &lighting, rect.min, &orbit.nodes);
                drawables.sort_by(|a, b| b.depth.total_cmp(&a.depth));

                route_pointer(ui, &response, rect, scene, &drawables);

                for d in &drawables {
                    paint_shape(&painter, &d.shape);
                }

                if let Some(tip) = scene.tooltip() {
                    paint_tooltip(&painter, rect, &tip);
                }
            }
        }

        if let Some(error) = &self.error {
            painter.text(
                rect.left_bottom() + egui::vec2(12.0, -12.0),
                egui::Align2::LEFT_BOTTOM,
                truncate_str(error, 120),
                egui::FontId::proportional(13.0),
                egui::Color32::from_rgb(255, 80, 80),
            );
        }

        ctx.request_repaint();

        if let Some(id) = navigate_to {
            self.open_detail(id);
        }
    }

    // ── Detail page ──────────────────────────────────────────────────────────

    pub fn draw_detail(&mut self, ui: &mut egui::Ui, bubble_id: &str) {
        let Some(bubble) = self.bubbles.iter().find(|b| b.id == bubble_id) else {
            ui.heading("This bubble has popped.");
            if ui.button("Back to orbit").clicked() {
                self.back_to_orbit();
            }
            return;
        };

        ui.heading(bubble.display_name());
        ui.label(egui::RichText::new(&bubble.topic).size(18.0).strong());
        ui.add_space(8.0);

        if let Some(description) = bubble.description.as_deref() {
            ui.label(description);
            ui.add_space(8.0);
        }

        ui.separator();
        egui::Grid::new("bubble_detail")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.label("Started by");
                ui.label(
                    bubble
                        .username
                        .as_deref()
                        .map(|u| format!("@{}", u))
                        .unwrap_or_else(|| "anonymous".to_string()),
                );
                ui.end_row();

                ui.label("Reflections");
                ui.label(bubble.weight().to_string());
                ui.end_row();

                ui.label("Size");
                ui.label(bubble.size_class().as_str());
                ui.end_row();

                ui.label("Glow");
                ui.label(GlowTier::from_weight(bubble.weight()).label());
                ui.end_row();

                ui.label("Pops in");
                let remaining = match bubble.expires_at {
                    None => "never".to_string(),
                    Some(_) => bubble
                        .time_remaining(Utc::now())
                        .map(format_remaining)
                        .unwrap_or_else(|| "popped".to_string()),
                };
                ui.label(remaining);
                ui.end_row();
            });

        ui.add_space(12.0);
        if ui.button("Back to orbit").clicked() {
            self.back_to_orbit();
        }
    }

    // ── Stats panel ──────────────────────────────────────────────────────────

    pub fn draw_stats_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Orbit");
        ui.separator();

        match &self.scene {
            Some(scene) => {
                let stats = scene.stats();
                ui.label(format!("Bubbles: {}", stats.entities));
                ui.label(format!("Orbit evaluations: {}", stats.orbit_evaluations));
                ui.colored_label(
                    egui::Color32::from_rgb(255, 160, 0),
                    format!("Repulsion contacts: {}", stats.repulsion_contacts),
                );
                ui.label(format!("Total evaluations: {}", stats.total_orbit_evaluations));
                ui.label(format!("Registry resets: {}", stats.registry_resets));
                ui.label(format!("Mounted: {:.1}s", scene.elapsed()));

                ui.separator();
                ui.heading("Camera");
                ui.label(format!("Focus: {}", stats.focus_phase));
                if let Some(target) = scene.focus_state().target_id() {
                    ui.label(format!("Target: {}", target));
                }
                if let Some(left) = stats.pending_navigation {
                    ui.label(format!("Navigating in {:.2}s", left));
                }
                let cam = scene.camera().position;
                ui.label(format!("Position: ({:.1}, {:.1}, {:.1})", cam.x, cam.y, cam.z));
            }
            None => {
                ui.label("Scene unmounted");
            }
        }

        ui.separator();
        ui.heading("Source");
        ui.label(truncate_str(&self.source.describe(), 32));
        ui.label(format!("Loaded: {}", self.bubbles.len()));
        ui.label(format!("Filter: {:?}", self.filter));
    }
}

/// Ambient and point lights as seen from one eye position.
struct Lighting {
    ambient: f32,
    points: Vec<(Vec3, f32)>,
    eye: Vec3,
}

impl Lighting {
    fn new(lights: &[Light], eye: Vec3) -> Self {
        let mut ambient = 0.0;
        let mut points = Vec::new();
        for light in lights {
            match *light {
                Light::Ambient { intensity } => ambient += intensity,
                Light::Point {
                    position,
                    intensity,
                } => points.push((position, intensity)),
            }
        }
        Self {
            ambient,
            points,
            eye,
        }
    }

    /// Lambert term at the point of the sphere nearest the eye.
    fn shade(&self, center: Vec3) -> f32 {
        let normal = (self.eye - center).normalize_or_zero();
        let diffuse: f32 = self
            .points
            .iter()
            .map(|(position, intensity)| {
                let to_light = (*position - center).normalize_or_zero();
                intensity * normal.dot(to_light).max(0.0)
            })
            .sum();
        self.ambient + diffuse
    }

    /// Brightest point light
    fn key(&self) -> Option<Vec3> {
        self.points
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(position, _)| *position)
    }
}

/// Unit screen direction from a sphere's center toward the key light.
/// Upper-left when there is no point light or it projects onto the center.
fn highlight_dir(projector: &Projector, lighting: &Lighting, center: Vec3) -> egui::Vec2 {
    let fallback = egui::vec2(-1.0, -1.0).normalized();
    let Some(key) = lighting.key() else {
        return fallback;
    };
    let toward = (key - center).normalize_or_zero();
    match (projector.project(center), projector.project(center + toward)) {
        (Some(a), Some(b)) => {
            let d = egui::vec2(b.x - a.x, b.y - a.y);
            if d.length() < 1e-3 {
                fallback
            } else {
                d.normalized()
            }
        }
        _ => fallback,
    }
}

/// Surface marker turning with the mesh about Y, `None` while it is on the far side.
fn spin_marker(pos: egui::Pos2, radius: f32, spin: f32) -> Option<(egui::Pos2, f32)> {
    let facing = spin.cos();
    if facing <= 0.0 {
        return None;
    }
    Some((pos + egui::vec2(spin.sin() * radius * 0.7, radius * 0.15), facing))
}

/// Project scene nodes into viewport pixels. Nodes behind the camera are dropped.
fn project_nodes(
    projector: &Projector,
    lighting: &Lighting,
    origin: egui::Pos2,
    nodes: &[SceneNode],
) -> Vec<Drawable> {
    let to_pos = |x: f32, y: f32| origin + egui::vec2(x, y);
    nodes
        .iter()
        .filter_map(|node| match node {
            SceneNode::Star {
                position,
                brightness,
            } => projector.project(*position).map(|p| Drawable {
                depth: p.depth,
                shape: Shape::Star {
                    pos: to_pos(p.x, p.y),
                    radius: (0.08 * p.scale).clamp(0.5, 2.0),
                    brightness: *brightness,
                },
            }),
            SceneNode::Anchor {
                center,
                radius,
                color,
            } => projector.project_sphere(*center, *radius).map(|(p, r)| Drawable {
                depth: p.depth,
                shape: Shape::Ball {
                    bubble_id: None,
                    pos: to_pos(p.x, p.y),
                    radius: r,
                    color: *color,
                    emissive: 0.5,
                    light: lighting.shade(*center),
                    highlight: highlight_dir(projector, lighting, *center),
                    spin: 0.0,
                    hovered: false,
                    focused: false,
                },
            }),
            SceneNode::Sphere {
                bubble_id,
                center,
                radius,
                color,
                emissive,
                scale,
                spin,
                hovered,
                focused,
            } => projector
                .project_sphere(*center, radius * scale)
                .map(|(p, r)| Drawable {
                    depth: p.depth,
                    shape: Shape::Ball {
                        bubble_id: Some(bubble_id.clone()),
                        pos: to_pos(p.x, p.y),
                        radius: r,
                        color: *color,
                        emissive: *emissive,
                        light: lighting.shade(*center),
                        highlight: highlight_dir(projector, lighting, *center),
                        spin: *spin,
                        hovered: *hovered,
                        focused: *focused,
                    },
                }),
            SceneNode::Label {
                position,
                text,
                font_size,
                color,
            } => projector.project(*position).map(|p| Drawable {
                // labels sit in front of their own bubble
                depth: p.depth - 0.5,
                shape: Shape::Text {
                    pos: to_pos(p.x, p.y),
                    text: text.clone(),
                    size: (font_size * p.scale).clamp(10.0, 28.0),
                    color: color32(*color, 1.0),
                },
            }),
        })
        .collect()
}

/// Nearest bubble under `pointer`.
fn hit_test(drawables: &[Drawable], pointer: egui::Pos2) -> Option<&str> {
    drawables
        .iter()
        .filter_map(|d| match &d.shape {
            Shape::Ball {
                bubble_id: Some(id),
                pos,
                radius,
                ..
            } if pos.distance(pointer) <= *radius => Some((d.depth, id.as_str())),
            _ => None,
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

/// Hover, click, drag and scroll go to the scene as bubble ids.
fn route_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
    scene: &mut OrbitScene,
    drawables: &[Drawable],
) {
    match response.hover_pos() {
        Some(pointer) => {
            scene.pointer_moved(pointer.x - rect.min.x, pointer.y - rect.min.y);
            let hit = hit_test(drawables, pointer).map(str::to_owned);
            let previous = scene.hovered().map(str::to_owned);
            if hit != previous {
                if let Some(old) = previous {
                    scene.pointer_out(&old);
                }
                if let Some(new) = &hit {
                    scene.pointer_over(new);
                }
            }
            if response.clicked() {
                if let Some(id) = &hit {
                    scene.click(id);
                }
            }
        }
        None => scene.pointer_left_view(),
    }

    if response.dragged() {
        let delta = response.drag_delta();
        scene.rotate_camera(delta.x, delta.y);
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            scene.zoom_camera(scroll);
        }
    }
    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        scene.cancel_focus();
    }
}

fn paint_shape(painter: &egui::Painter, shape: &Shape) {
    match shape {
        Shape::Star {
            pos,
            radius,
            brightness,
        } => {
            let gray = (brightness.clamp(0.0, 1.0) * 255.0) as u8;
            painter.circle_filled(*pos, *radius, egui::Color32::from_gray(gray));
        }
        Shape::Ball {
            pos,
            radius,
            color,
            emissive,
            light,
            highlight,
            spin,
            hovered,
            focused,
            ..
        } => {
            let base = color32(*color, 1.0);
            // glow halo
            let halo = with_alpha(base, emissive * 0.25);
            painter.circle_filled(*pos, radius * (1.0 + emissive), halo);
            painter.circle_filled(*pos, *radius, color32(*color, (light + emissive).min(1.0)));
            if let Some((at, facing)) = spin_marker(*pos, *radius, *spin) {
                let tint = with_alpha(color32(*color, 0.6), 0.5 * facing);
                painter.circle_filled(at, radius * 0.12, tint);
            }
            painter.circle_filled(
                *pos + *highlight * (0.42 * radius),
                radius * 0.35,
                with_alpha(egui::Color32::WHITE, 0.35),
            );
            if *hovered || *focused {
                let ring = egui::Stroke::new(1.5, egui::Color32::WHITE);
                painter.circle_stroke(*pos, radius + 2.0, ring);
            }
        }
        Shape::Text {
            pos,
            text,
            size,
            color,
        } => {
            painter.text(
                *pos,
                egui::Align2::CENTER_BOTTOM,
                text,
                egui::FontId::proportional(*size),
                *color,
            );
        }
    }
}

fn paint_tooltip(painter: &egui::Painter, rect: egui::Rect, tip: &Tooltip) {
    let text = format!("{}\n{}", truncate_str(&tip.title, 40), tip.detail);
    let galley = painter.layout_no_wrap(
        text,
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
    let pos = rect.min + egui::vec2(tip.x + 14.0, tip.y + 14.0);
    let bg = egui::Rect::from_min_size(pos, galley.size()).expand(6.0);
    painter.rect_filled(bg, 6.0, egui::Color32::from_rgba_unmultiplied(20, 20, 30, 220));
    painter.galley(pos, galley, egui::Color32::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(id: &str, x: f32, depth: f32, radius: f32) -> Drawable {
        Drawable {
            depth,
            shape: Shape::Ball {
                bubble_id: Some(id.to_string()),
                pos: egui::pos2(x, 100.0),
                radius,
                color: [1.0; 4],
                emissive: 0.2,
                light: 0.5,
                highlight: egui::vec2(-1.0, -1.0).normalized(),
                spin: 0.0,
                hovered: false,
                focused: false,
            },
        }
    }

    fn lit(eye: Vec3) -> Lighting {
        Lighting::new(
            &[
                Light::Ambient { intensity: 0.5 },
                Light::Point {
                    position: Vec3::new(10.0, 10.0, 10.0),
                    intensity: 1.0,
                },
            ],
            eye,
        )
    }

    fn projector() -> Projector {
        let camera = bubble_orbit::render::CameraView {
            position: Vec3::new(0.0, 0.0, 20.0),
            look_at: Vec3::ZERO,
            fov_y: 60f32.to_radians(),
        };
        Projector::new(&camera, 800.0, 600.0)
    }

    #[test]
    fn hit_test_prefers_nearest() {
        let drawables = vec![ball("far", 100.0, 20.0, 30.0), ball("near", 110.0, 10.0, 30.0)];
        assert_eq!(hit_test(&drawables, egui::pos2(105.0, 100.0)), Some("near"));
        assert_eq!(hit_test(&drawables, egui::pos2(400.0, 100.0)), None);
    }

    #[test]
    fn anchor_is_not_clickable() {
        let mut drawables = vec![ball("a", 100.0, 10.0, 20.0)];
        if let Shape::Ball { bubble_id, .. } = &mut drawables[0].shape {
            *bubble_id = None;
        }
        assert_eq!(hit_test(&drawables, egui::pos2(100.0, 100.0)), None);
    }

    #[test]
    fn side_facing_the_point_light_is_brighter() {
        let eye = Vec3::new(0.0, 0.0, 20.0);
        let lighting = lit(eye);
        let toward = lighting.shade(Vec3::ZERO);
        // camera sees this one from the side away from the light
        let away = Lighting::new(
            &[
                Light::Ambient { intensity: 0.5 },
                Light::Point {
                    position: Vec3::new(10.0, 10.0, -10.0),
                    intensity: 1.0,
                },
            ],
            eye,
        )
        .shade(Vec3::ZERO);
        assert!(toward > away);
        assert!((away - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ambient_only_when_no_point_light() {
        let lighting = Lighting::new(&[Light::Ambient { intensity: 0.4 }], Vec3::Z * 10.0);
        assert_eq!(lighting.shade(Vec3::ZERO), 0.4);
        assert!(lighting.key().is_none());
        let dir = highlight_dir(&projector(), &lighting, Vec3::ZERO);
        assert!(dir.x < 0.0 && dir.y < 0.0);
    }

    #[test]
    fn highlight_points_toward_the_light() {
        // light up and to the right of the camera: +x on screen, -y in pixels
        let dir = highlight_dir(&projector(), &lit(Vec3::new(0.0, 0.0, 20.0)), Vec3::ZERO);
        assert!(dir.x > 0.0);
        assert!(dir.y < 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn spin_moves_the_marker() {
        let pos = egui::pos2(100.0, 100.0);
        let (a, _) = spin_marker(pos, 20.0, 0.0).unwrap();
        let (b, _) = spin_marker(pos, 20.0, 0.5).unwrap();
        assert!(b.x > a.x);
        assert_eq!(a.y, b.y);
        // far side of the mesh
        assert!(spin_marker(pos, 20.0, std::f32::consts::PI).is_none());
    }
}

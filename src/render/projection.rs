//! Perspective projection from world space onto a viewport.
//!
//! Look-at camera, vertical FOV. Points behind the near plane are culled.

use glam::Vec3;

use super::CameraView;

const NEAR: f32 = 0.1;

/// Projected point in viewport pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Distance along the view direction
    pub depth: f32,
    /// Pixels per world unit at this depth
    pub scale: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Projector {
    eye: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    /// Pixels per unit at depth 1
    focal: f32,
    half_w: f32,
    half_h: f32,
}

impl Projector {
    pub fn new(camera: &CameraView, width: f32, height: f32) -> Self {
        let eye = camera.position;
        let mut forward = camera.look_at - eye;
        if forward.length_squared() < 1e-8 {
            forward = Vec3::NEG_Z;
        }
        let forward = forward.normalize();

        // Looking straight up or down: pick another reference axis
        let reference = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(reference).normalize();
        let up = right.cross(forward);

        let half_h = height.max(1.0) * 0.5;
        let half_w = width.max(1.0) * 0.5;
        let tan_half = (camera.fov_y * 0.5).tan().max(1e-4);

        Self {
            eye,
            forward,
            right,
            up,
            focal: half_h / tan_half,
            half_w,
            half_h,
        }
    }

    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        let rel = world - self.eye;
        let depth = rel.dot(self.forward);
        if depth < NEAR {
            return None;
        }
        let scale = self.focal / depth;
        Some(ScreenPoint {
            x: self.half_w + rel.dot(self.right) * scale,
            y: self.half_h - rel.dot(self.up) * scale,
            depth,
            scale,
        })
    }

    /// Projected radius in pixels of a sphere of `radius` at `center`.
    pub fn project_sphere(&self, center: Vec3, radius: f32) -> Option<(ScreenPoint, f32)> {
        self.project(center).map(|p| (p, radius * p.scale))
    }
}

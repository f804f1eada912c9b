//! Declarative scene description.
//!
//! The orbit scene emits one `SceneFrame` per rendered frame. Any renderer
//! that can draw spheres, text and points from a movable camera can
//! consume it; the egui shell projects it onto a 2D painter.

pub mod projection;

use glam::Vec3;

/// Camera as the renderer should place it this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view, radians
    pub fov_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { intensity: f32 },
    Point { position: Vec3, intensity: f32 },
}

/// Scene graph node types
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// One bubble
    Sphere {
        bubble_id: String,
        center: Vec3,
        radius: f32,
        color: [f32; 4],
        emissive: f32,
        /// Display scale (hover / selected)
        scale: f32,
        /// Mesh rotation about Y
        spin: f32,
        hovered: bool,
        focused: bool,
    },
    /// Central anchor the bubbles orbit. Absent during a focus transition.
    Anchor {
        center: Vec3,
        radius: f32,
        color: [f32; 4],
    },
    /// 3D text anchored in the world (hover label)
    Label {
        position: Vec3,
        text: String,
        font_size: f32,
        color: [f32; 4],
    },
    /// Background star
    Star { position: Vec3, brightness: f32 },
}

/// Populated scene
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitFrame {
    pub camera: CameraView,
    pub lights: Vec<Light>,
    pub nodes: Vec<SceneNode>,
    pub background_color: [f32; 4],
}

/// What to draw this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneFrame {
    /// No bubbles: show a message instead of an empty scene
    Placeholder {
        message: String,
        background_color: [f32; 4],
    },
    Orbit(OrbitFrame),
}

impl SceneFrame {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SceneFrame::Placeholder { .. })
    }

    pub fn nodes(&self) -> &[SceneNode] {
        match self {
            SceneFrame::Placeholder { .. } => &[],
            SceneFrame::Orbit(frame) => &frame.nodes,
        }
    }

    pub fn background_color(&self) -> [f32; 4] {
        match self {
            SceneFrame::Placeholder {
                background_color, ..
            } => *background_color,
            SceneFrame::Orbit(frame) => frame.background_color,
        }
    }

    pub fn has_anchor(&self) -> bool {
        self.nodes()
            .iter()
            .any(|n| matches!(n, SceneNode::Anchor { .. }))
    }
}

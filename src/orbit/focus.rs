//! Camera Focus Controller.
//!
//! `Idle` → `Approaching` → `Arrived`. Only one approach can be in flight;
//! free-orbit camera controls are disabled outside `Idle`.

use glam::Vec3;

use super::config::OrbitConfig;

const ROTATE_SPEED: f32 = 0.008;
const ZOOM_SPEED: f32 = 0.003;
const ELEVATION_LIMIT: f32 = 1.4;
/// Zoom range of the free-orbit controls. `home_camera` must lie inside it.
pub const MIN_CAMERA_DISTANCE: f32 = 4.0;
pub const MAX_CAMERA_DISTANCE: f32 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub enum FocusState {
    /// Free orbit, user controls the camera
    Idle,
    /// Camera closes in on `target_pos` every frame
    Approaching { target_id: String, target_pos: Vec3 },
    /// Within the arrival threshold; navigation has been requested
    Arrived { target_id: String },
}

impl FocusState {
    pub fn target_id(&self) -> Option<&str> {
        match self {
            FocusState::Idle => None,
            FocusState::Approaching { target_id, .. } | FocusState::Arrived { target_id } => {
                Some(target_id)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FocusState::Idle)
    }

    pub fn phase_name(&self) -> &'static str {
        match self {
            FocusState::Idle => "idle",
            FocusState::Approaching { .. } => "approaching",
            FocusState::Arrived { .. } => "arrived",
        }
    }
}

/// Drag-to-rotate / scroll-to-zoom orbit around the look-at point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    /// Horizontal angle in radians (0 = +Z)
    pub azimuth: f32,
    /// Vertical angle in radians (0 = level)
    pub elevation: f32,
    pub distance: f32,
}

impl OrbitControls {
    /// Controls that reproduce `position` when orbiting the origin.
    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length().max(MIN_CAMERA_DISTANCE);
        let elevation = (position.y / distance).clamp(-1.0, 1.0).asin();
        let azimuth = position.x.atan2(position.z);
        Self {
            azimuth,
            elevation,
            distance,
        }
    }

    pub fn eye(&self, target: Vec3) -> Vec3 {
        target
            + Vec3::new(
                self.distance * self.azimuth.sin() * self.elevation.cos(),
                self.distance * self.elevation.sin(),
                self.distance * self.azimuth.cos() * self.elevation.cos(),
            )
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * ROTATE_SPEED;
        self.elevation =
            (self.elevation + dy * ROTATE_SPEED).clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (1.0 - scroll * ZOOM_SPEED))
            .clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
    }
}

/// The scene camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
    pub home: Vec3,
    /// Vertical field of view, radians
    pub fov_y: f32,
    pub controls: OrbitControls,
}

impl CameraRig {
    pub fn new(home: Vec3, fov_y: f32) -> Self {
        Self {
            position: home,
            look_at: Vec3::ZERO,
            home,
            fov_y,
            controls: OrbitControls::from_position(home),
        }
    }

    pub fn from_config(config: &OrbitConfig) -> Self {
        Self::new(
            Vec3::from_array(config.home_camera),
            config.fov_y_degrees.to_radians(),
        )
    }

    /// Re-derive the free-orbit position from the controls.
    pub fn sync_controls(&mut self) {
        self.look_at = Vec3::ZERO;
        self.position = self.controls.eye(self.look_at);
    }

    /// Snap back to the home position, no smoothing.
    pub fn snap_home(&mut self) {
        self.position = self.home;
        self.look_at = Vec3::ZERO;
        self.controls = OrbitControls::from_position(self.home);
    }
}

#[derive(Debug, Clone)]
pub struct FocusController {
    state: FocusState,
    /// Fraction of the remaining distance closed per frame
    pub fraction: f32,
    /// Arrival distance
    pub threshold: f32,
}

impl FocusController {
    pub fn new(fraction: f32, threshold: f32) -> Self {
        Self {
            state: FocusState::Idle,
            fraction,
            threshold,
        }
    }

    pub fn from_config(config: &OrbitConfig) -> Self {
        Self::new(config.approach_fraction, config.arrival_threshold)
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// User camera controls are live only while idle.
    pub fn controls_enabled(&self) -> bool {
        self.state.is_idle()
    }

    /// Start an approach. Rejected while another transition is in flight.
    pub fn begin(&mut self, target_id: &str, target_pos: Vec3) -> bool {
        match &self.state {
            FocusState::Idle => {
                log::debug!("focus: idle -> approaching {}", target_id);
                self.state = FocusState::Approaching {
                    target_id: target_id.to_string(),
                    target_pos,
                };
                true
            }
            other => {
                log::debug!(
                    "focus: ignoring {} while {} {:?}",
                    target_id,
                    other.phase_name(),
                    other.target_id()
                );
                false
            }
        }
    }

    /// Move the camera one frame. Returns the target id on the frame the
    /// camera arrives, and never again.
    pub fn step(&mut self, camera: &mut CameraRig) -> Option<String> {
        let (target_id, target_pos) = match &self.state {
            FocusState::Approaching {
                target_id,
                target_pos,
            } => (target_id.clone(), *target_pos),
            _ => return None,
        };

        camera.look_at = target_pos;
        let to_target = target_pos - camera.position;
        if to_target.length() > self.threshold {
            camera.position += to_target * self.fraction;
        }

        if camera.position.distance(target_pos) <= self.threshold {
            log::debug!("focus: approaching -> arrived {}", target_id);
            self.state = FocusState::Arrived {
                target_id: target_id.clone(),
            };
            return Some(target_id);
        }
        None
    }

    /// Drop any transition and put the camera back home.
    pub fn cancel(&mut self, camera: &mut CameraRig) {
        if !self.state.is_idle() {
            log::debug!("focus: {} -> idle (cancelled)", self.state.phase_name());
        }
        self.state = FocusState::Idle;
        camera.snap_home();
    }
}

/// Frames needed to close from `d0` to within `threshold` when each frame
/// covers `fraction` of the remaining distance: smallest `n` with
/// `d0 * (1 - fraction)^n <= threshold`.
pub fn steps_to_arrive(d0: f32, fraction: f32, threshold: f32) -> u32 {
    if d0 <= threshold {
        return 0;
    }
    let keep = (1.0 - fraction as f64).clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON);
    ((threshold as f64 / d0 as f64).ln() / keep.ln()).ceil() as u32
}

//! Orbital visualization engine.
//!
//! - `params`     — pure per-bubble orbit parameters from (index, weight, total)
//! - `registry`   — last-known positions, shared by the repulsion pass
//! - `repulsion`  — one-step neighbor push-out
//! - `integrator` — per-frame orbit advance, recentering, spin
//! - `focus`      — click-to-focus camera state machine
//! - `navigation` — delayed hand-off to the host
//! - `scene`      — ties the above into one frame

pub mod config;
pub mod focus;
pub mod integrator;
pub mod navigation;
pub mod params;
pub mod registry;
pub mod repulsion;
pub mod scene;

pub use config::OrbitConfig;
pub use focus::{CameraRig, FocusController, FocusState};
pub use navigation::NavigationSink;
pub use params::{bubble_look, orbit_layout, orbit_params, BubbleLook, GlowTier, OrbitParams};
pub use registry::PositionRegistry;
pub use repulsion::RepulsionSolver;
pub use scene::{FrameStats, OrbitScene, Tooltip};

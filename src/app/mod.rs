//! `BubbleApp` — the top-level egui application state.
//!
//! This module declares the `BubbleApp` struct and its constructor.
//! All methods are split across the sibling sub-modules:
//!
//! - `navigation` — source loading, filter, orbit ⇄ detail view switching
//! - `toolbar`    — filter toggle, reload, stats toggle
//! - `content`    — orbit viewport, detail view, stats panel

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::sync::mpsc;
use std::time::Instant;

use bubble_orbit::bubble::{trending, Bubble};
use bubble_orbit::error::SourceError;
use bubble_orbit::net::BubbleSource;
use bubble_orbit::orbit::{OrbitConfig, OrbitScene};

/// Which slice of the list orbits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Trending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Orbit,
    Detail(String),
}

// ─── Application state ───────────────────────────────────────────────────────

pub struct BubbleApp {
    pub source: BubbleSource,
    pub config: OrbitConfig,
    pub trending_limit: usize,
    /// Everything the source returned, unfiltered
    pub bubbles: Vec<Bubble>,
    pub filter: Filter,
    pub view: View,
    /// Mounted only while the orbit view is showing
    pub scene: Option<OrbitScene>,
    pub error: Option<String>,
    pub loading: bool,
    pub fetch_rx: Option<mpsc::Receiver<Result<Vec<Bubble>, SourceError>>>,
    pub show_stats: bool,
    pub mounted_at: Instant,
    pub last_frame_time: Instant,
}

impl BubbleApp {
    pub fn new(source: BubbleSource, config: OrbitConfig, trending_limit: usize) -> Self {
        let now = Instant::now();
        let mut app = Self {
            source,
            config,
            trending_limit,
            bubbles: Vec::new(),
            filter: Filter::All,
            view: View::Orbit,
            scene: None,
            error: None,
            loading: false,
            fetch_rx: None,
            show_stats: false,
            mounted_at: now,
            last_frame_time: now,
        };
        app.mount_scene();
        app
    }

    /// The bubbles that should be orbiting under the current filter.
    pub fn visible_bubbles(&self) -> Vec<Bubble> {
        match self.filter {
            Filter::All => self.bubbles.clone(),
            Filter::Trending => trending(&self.bubbles, self.trending_limit),
        }
    }
}

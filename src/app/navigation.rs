//! Loading and view switching for `BubbleApp`.
//!
//! The source is loaded on a background thread (`reload`, `check_fetch`).
//! Navigating to a bubble unmounts the orbit scene; going back mounts a
//! fresh one.

use std::sync::mpsc;
use std::time::Instant;

use chrono::Utc;
use eframe::egui;

use bubble_orbit::orbit::OrbitScene;

use super::{BubbleApp, Filter, View};

impl BubbleApp {
    /// Start an async load of the bubble list.
    pub fn reload(&mut self, ctx: &egui::Context) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let source = self.source.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = source.load(Utc::now());
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Poll the load channel and hand a new list to the scene.
    pub fn check_fetch(&mut self) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };
        let Ok(result) = rx.try_recv() else {
            return;
        };
        match result {
            Ok(bubbles) => {
                self.bubbles = bubbles;
                self.error = None;
                self.apply_filter();
            }
            Err(e) => {
                log::warn!("loading {} failed: {}", self.source.describe(), e);
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
        self.fetch_rx = None;
    }

    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.apply_filter();
        }
    }

    /// Push the filtered list into the mounted scene.
    pub fn apply_filter(&mut self) {
        let visible = self.visible_bubbles();
        if let Some(scene) = self.scene.as_mut() {
            scene.set_bubbles(visible);
        }
    }

    /// Fresh scene in `Idle` with the current list.
    pub fn mount_scene(&mut self) {
        self.scene = Some(OrbitScene::with_bubbles(
            self.config.clone(),
            self.visible_bubbles(),
        ));
        self.mounted_at = Instant::now();
        self.last_frame_time = self.mounted_at;
    }

    /// Leave the orbit for a bubble's page. Any pending scene work dies with it.
    pub fn open_detail(&mut self, bubble_id: String) {
        log::info!("opening bubble {}", bubble_id);
        self.scene = None;
        self.view = View::Detail(bubble_id);
    }

    pub fn back_to_orbit(&mut self) {
        self.view = View::Orbit;
        self.mount_scene();
    }
}

//! Navigation Sink and the short delay between camera arrival and navigation.

/// Receives the id of the bubble to open. Fire-and-forget.
pub trait NavigationSink {
    fn navigate(&mut self, bubble_id: &str);
}

impl<F: FnMut(&str)> NavigationSink for F {
    fn navigate(&mut self, bubble_id: &str) {
        self(bubble_id)
    }
}

/// Navigation waiting out the arrival delay, counted in frame time.
///
/// There is no cancel: dropping the owner drops the pending call.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingNavigation {
    bubble_id: String,
    remaining: f32,
}

impl PendingNavigation {
    pub fn new(bubble_id: String, delay: f32) -> Self {
        Self {
            bubble_id,
            remaining: delay.max(0.0),
        }
    }

    pub fn bubble_id(&self) -> &str {
        &self.bubble_id
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down by `dt`; true once the delay has run out.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt.max(0.0);
        self.remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_delay() {
        let mut p = PendingNavigation::new("b1".into(), 0.5);
        let mut frames = 0;
        while !p.tick(0.1) {
            frames += 1;
        }
        // 0.5 - 5 * 0.1 reaches zero on the fifth tick (within float error)
        assert!((4..=5).contains(&frames));
    }

    #[test]
    fn closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |id: &str| seen.push(id.to_string());
            sink.navigate("b7");
        }
        assert_eq!(seen, vec!["b7"]);
    }
}

//! Small egui helpers shared by the orbit viewport and the side panels.

use egui::Color32;

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}

// ─── Colors ───────────────────────────────────────────────────────────────────

/// Linear RGBA in `0..=1` scaled by `light`, alpha untouched.
pub fn color32(rgba: [f32; 4], light: f32) -> Color32 {
    let c = |v: f32| ((v * light).clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(
        c(rgba[0]),
        c(rgba[1]),
        c(rgba[2]),
        (rgba[3].clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let [r, g, b, _] = color.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

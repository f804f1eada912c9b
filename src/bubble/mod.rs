//! Bubble entities as delivered by the hosted backend.
//!
//! A bubble is an ephemeral discussion topic. The orbit engine only reads
//! `id`, `topic`, `name` and the reflect count; the remaining columns are
//! carried for the detail view.

pub mod mock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `bubbles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub topic: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Popularity weight. Nullable in the schema.
    #[serde(default)]
    pub reflect_count: Option<i64>,
    /// Stored size tag ("sm" / "md" / "lg"). Nullable in the schema.
    #[serde(default)]
    pub size: Option<String>,
}

/// Coarse size tag derived from popularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    Sm,
    Md,
    Lg,
}

impl SizeClass {
    /// Tag for a popularity weight: >10 large, >5 medium, otherwise small.
    pub fn from_weight(weight: u32) -> Self {
        if weight > 10 {
            SizeClass::Lg
        } else if weight > 5 {
            SizeClass::Md
        } else {
            SizeClass::Sm
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "sm" | "small" => Some(SizeClass::Sm),
            "md" | "medium" => Some(SizeClass::Md),
            "lg" | "large" => Some(SizeClass::Lg),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Sm => "sm",
            SizeClass::Md => "md",
            SizeClass::Lg => "lg",
        }
    }
}

impl Bubble {
    /// Minimal bubble with only the fields the orbit engine reads.
    pub fn new(id: impl Into<String>, topic: impl Into<String>, reflect_count: i64) -> Self {
        Self {
            id: id.into(),
            name: None,
            topic: topic.into(),
            description: None,
            author_id: None,
            username: None,
            created_at: None,
            expires_at: None,
            reflect_count: Some(reflect_count),
            size: None,
        }
    }

    /// Popularity weight. Missing and negative counts read as zero.
    pub fn weight(&self) -> u32 {
        self.reflect_count
            .map(|c| c.clamp(0, u32::MAX as i64) as u32)
            .unwrap_or(0)
    }

    /// Stored size tag if it parses, otherwise derived from the weight.
    pub fn size_class(&self) -> SizeClass {
        self.size
            .as_deref()
            .and_then(SizeClass::parse)
            .unwrap_or_else(|| SizeClass::from_weight(self.weight()))
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(n) if !n.trim().is_empty() => n,
            _ => &self.topic,
        }
    }

    /// A bubble without an expiry never pops.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|t| t <= now).unwrap_or(false)
    }

    /// Time until the bubble pops, `None` if it has no expiry or already popped.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let expires = self.expires_at?;
        let left = expires - now;
        (left > Duration::zero()).then_some(left)
    }
}

/// The "most reflected" list: highest weight first, ties keep list order.
pub fn trending(bubbles: &[Bubble], limit: usize) -> Vec<Bubble> {
    let mut ranked: Vec<Bubble> = bubbles.to_vec();
    ranked.sort_by(|a, b| b.weight().cmp(&a.weight()));
    ranked.truncate(limit);
    ranked
}

/// Drop bubbles that have already popped.
pub fn active(bubbles: Vec<Bubble>, now: DateTime<Utc>) -> Vec<Bubble> {
    bubbles.into_iter().filter(|b| !b.is_expired(now)).collect()
}

/// Short human string for a remaining duration ("3h 12m", "45m", "<1m").
pub fn format_remaining(left: Duration) -> String {
    let minutes = left.num_minutes();
    if minutes < 1 {
        return "<1m".to_string();
    }
    let days = minutes / (60 * 24);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn missing_or_negative_weight_is_zero() {
        let mut b = Bubble::new("a", "Topic", 0);
        b.reflect_count = None;
        assert_eq!(b.weight(), 0);
        b.reflect_count = Some(-4);
        assert_eq!(b.weight(), 0);
        b.reflect_count = Some(7);
        assert_eq!(b.weight(), 7);
    }

    #[test]
    fn size_class_prefers_stored_tag() {
        let mut b = Bubble::new("a", "Topic", 12);
        assert_eq!(b.size_class(), SizeClass::Lg);
        b.size = Some("sm".into());
        assert_eq!(b.size_class(), SizeClass::Sm);
        b.size = Some("huge".into());
        assert_eq!(b.size_class(), SizeClass::Lg);
    }

    #[test]
    fn size_class_thresholds() {
        assert_eq!(SizeClass::from_weight(5), SizeClass::Sm);
        assert_eq!(SizeClass::from_weight(6), SizeClass::Md);
        assert_eq!(SizeClass::from_weight(10), SizeClass::Md);
        assert_eq!(SizeClass::from_weight(11), SizeClass::Lg);
    }

    #[test]
    fn decodes_backend_row_with_nulls() {
        let json = r#"{
            "id": "b1", "name": null, "topic": "AI Ethics", "description": null,
            "author_id": null, "username": "sarah", "created_at": "2026-10-18T10:00:00Z",
            "expires_at": null, "reflect_count": null, "size": null
        }"#;
        let b: Bubble = serde_json::from_str(json).unwrap();
        assert_eq!(b.weight(), 0);
        assert_eq!(b.display_name(), "AI Ethics");
        assert_eq!(b.created_at, Some(at("2026-10-18T10:00:00Z")));
    }

    #[test]
    fn trending_orders_by_weight_and_is_stable() {
        let list = vec![
            Bubble::new("a", "A", 3),
            Bubble::new("b", "B", 9),
            Bubble::new("c", "C", 3),
            Bubble::new("d", "D", 1),
        ];
        let top: Vec<String> = trending(&list, 3).into_iter().map(|b| b.id).collect();
        assert_eq!(top, vec!["b", "a", "c"]);
    }

    #[test]
    fn expired_bubbles_are_dropped() {
        let now = at("2026-10-19T12:00:00Z");
        let mut live = Bubble::new("live", "Live", 1);
        live.expires_at = Some(at("2026-10-19T15:30:00Z"));
        let mut gone = Bubble::new("gone", "Gone", 1);
        gone.expires_at = Some(at("2026-10-19T11:00:00Z"));
        let forever = Bubble::new("forever", "Forever", 1);

        let kept: Vec<String> = active(vec![live.clone(), gone, forever], now)
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(kept, vec!["live", "forever"]);
        assert_eq!(
            live.time_remaining(now).map(format_remaining).as_deref(),
            Some("3h 30m")
        );
    }
}

//! Deterministic mock bubbles for offline runs and tests.

use chrono::{DateTime, Duration, Utc};

use super::{Bubble, SizeClass};
use crate::hash::hash16;

const MOCK_TOPICS: &[&str] = &[
    "Climate Change",
    "AI Ethics",
    "Space Exploration",
    "Remote Work",
    "Renewable Energy",
    "Quantum Computing",
    "Mental Health",
    "Digital Privacy",
    "Future of Education",
    "Sustainable Fashion",
    "Blockchain",
    "Biotech Innovations",
    "Plant-Based Diet",
    "Urban Planning",
    "Creative Writing",
    "Global Economics",
    "Music Production",
    "Virtual Reality",
    "Minimalism",
    "Coffee Culture",
];

const WEEK_MINUTES: u32 = 7 * 24 * 60;

/// `count` bubbles with cycled topics and hash-derived reflect counts in `0..20`.
pub fn mock_bubbles(count: usize, now: DateTime<Utc>) -> Vec<Bubble> {
    (0..count)
        .map(|index| {
            let topic = MOCK_TOPICS[index % MOCK_TOPICS.len()];
            let reflect_count = (hash16(index) % 20) as i64;
            let age = hash16(index + 101) % WEEK_MINUTES;
            let ttl = hash16(index + 211) % WEEK_MINUTES + 60;

            Bubble {
                id: format!("mock-{}", index),
                name: Some(format!("Bubble {}", index + 1)),
                topic: topic.to_string(),
                description: Some(format!(
                    "Discussion about {} and related ideas.",
                    topic.to_lowercase()
                )),
                author_id: Some(format!("user-{}", index % 5)),
                username: Some(format!("user{}", index % 5)),
                created_at: Some(now - Duration::minutes(age as i64)),
                expires_at: Some(now + Duration::minutes(ttl as i64)),
                reflect_count: Some(reflect_count),
                size: Some(SizeClass::from_weight(reflect_count as u32).as_str().to_string()),
            }
        })
        .collect()
}

/// Evenly tiered weights `[0, 0, 1, 1, ..., max]` spread over `count` slots.
pub fn spread_weights(count: usize, max: u32) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![max];
    }
    (0..count)
        .map(|i| ((i as u64 * max as u64) / (count as u64 - 1)) as u32)
        .collect()
}

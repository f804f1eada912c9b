pub mod fetch;

pub use fetch::{load_bubbles_file, BubbleSource};

#[cfg(feature = "remote")]
pub use fetch::fetch_bubbles;

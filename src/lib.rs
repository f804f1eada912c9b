pub mod bubble;
pub mod error;
pub mod hash;
pub mod net;
pub mod orbit;
pub mod render;

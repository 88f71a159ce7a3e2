//! HTML countdown page for the Y2K38 rollover.
//!
//! One parameterized template renders both page variants; the variant picks
//! the decomposition policy, styling and first-sample behaviour.

pub mod render;
pub mod variant;

pub use render::{CONTENT_TYPE, render};
pub use variant::Variant;

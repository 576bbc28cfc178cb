//! Pure text-normalization helpers
//!
//! These functions convert the human-formatted text the platform renders
//! (abbreviated counts, free-text descriptions) into structured values.
//! They never fail and hold no state.

mod count;
mod hashtags;

pub use count::normalize_count;
pub use hashtags::extract_hashtags;

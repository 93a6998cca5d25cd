//! Fixed pipeline knobs.

/// Passages retrieved per question by default.
pub const DEFAULT_ASK_TOP_K: usize = 6;

/// Passages returned by a raw similarity search by default.
pub const DEFAULT_SEARCH_TOP_K: usize = 4;

/// Display width of one formatted source snippet, in characters.
pub const SOURCE_WIDTH: usize = 90;

/// Marks a snippet that was shortened.
pub const SOURCE_PLACEHOLDER: &str = "…";

//! This module is separated into its own crate to enable simple dynamic linking for `chanim`, and should not be used directly.

/// `use chanim::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use chanim_player;
pub use chanim_types;

// Re-export commonly used types at crate root
pub use chanim_player::{Animator, AnimatorError, Catalog, ConfigError, PlaybackState, PlayerConfig, RenderStats};
pub use chanim_types::error::{PaintError, PixmapError};

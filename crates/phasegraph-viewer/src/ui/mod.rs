pub mod help;
pub mod hud;
pub mod shortcuts;

pub use help::help_overlay;
pub use hud::hud_overlay;
pub use shortcuts::{handle_shortcuts, handle_zoom};

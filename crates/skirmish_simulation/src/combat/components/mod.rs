//! Combat components

pub mod profile;
pub mod state;

// Re-export all components
pub use profile::*;
pub use state::*;

// Render module - renderer-agnostic view of a parsed deck

pub mod resolved;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use resolved::{ResolvedDeck, ResolvedSlide};
pub use resolver::{resolve_deck, ResolveConfig};

//! Loader for remark-style markdown slide decks.
//!
//! The slide source is plain text: slides are separated by `---` lines,
//! each slide may start with `key: value` directives, `--` splits a slide
//! into incremental steps and `???` starts presenter notes. Fenced code
//! blocks are opaque, so a `---` inside a code sample never ends a slide.
//!
//! ```
//! let deck = remark_deck::parse_deck("class: center\n# Hello\n---\n# World").unwrap();
//! assert_eq!(deck.len(), 2);
//! assert_eq!(deck[1].resolved().get("class"), Some("center"));
//! ```

pub mod deck;
pub mod directive;
pub mod error;
pub mod parser;
pub mod presenter;
pub mod render;
pub mod source;

pub use deck::{Deck, Slide};
pub use directive::Directives;
pub use error::{Error, Result};
pub use parser::{parse_deck, parse_deck_with, ParseOptions};
pub use presenter::Presenter;
pub use render::{resolve_deck, ResolveConfig, ResolvedDeck, ResolvedSlide};
pub use source::{extract_textarea, load_path};

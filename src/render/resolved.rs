// Resolved slide structures - fully processed and ready for rendering

use serde::Serialize;

use super::types::{BackgroundSpec, RenderDimensions, TextAlign, TextPosition, Theme};

/// A fully resolved slide ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSlide {
    pub index: usize,
    pub name: Option<String>,
    pub classes: Vec<String>,
    pub background: BackgroundSpec,
    pub theme: Theme,
    pub text_position: TextPosition,
    pub text_align: TextAlign,
    pub steps: Vec<String>,
    pub notes: Option<String>,
    pub hidden: bool,
    pub counted: bool,
}

/// A fully resolved deck ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDeck {
    pub slides: Vec<ResolvedSlide>,
    pub dimensions: RenderDimensions,
}

impl ResolvedDeck {
    /// Slides a viewer actually shows.
    pub fn visible(&self) -> impl Iterator<Item = &ResolvedSlide> {
        self.slides.iter().filter(|s| !s.hidden)
    }
}

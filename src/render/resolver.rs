// Logic to resolve a Deck into a ResolvedDeck

use log::debug;

use super::resolved::{ResolvedDeck, ResolvedSlide};
use super::types::{BackgroundScale, BackgroundSpec, RenderDimensions, TextAlign, TextPosition, Theme};
use crate::deck::{Deck, Slide};
use crate::directive::Directives;

/// Configuration for deck resolution
#[derive(Debug, Clone, Default)]
pub struct ResolveConfig {
    pub dimensions: RenderDimensions,
    /// Background for slides without a `background-image`.
    pub default_background: BackgroundSpec,
}

/// Resolve a parsed Deck into a ResolvedDeck ready for rendering
pub fn resolve_deck(deck: &Deck, config: &ResolveConfig) -> ResolvedDeck {
    let slides: Vec<ResolvedSlide> = deck.iter().map(|slide| resolve_slide(slide, config)).collect();
    debug!(
        "resolved {} slides ({} visible)",
        slides.len(),
        slides.iter().filter(|s| !s.hidden).count()
    );

    ResolvedDeck {
        slides,
        dimensions: config.dimensions,
    }
}

/// Resolve a single slide
fn resolve_slide(slide: &Slide, config: &ResolveConfig) -> ResolvedSlide {
    let directives = slide.resolved();
    let classes = directives.classes();

    let theme = if classes.contains(&"inverse") {
        Theme::inverse()
    } else {
        Theme::default()
    };

    // Image first, then the inverse theme's color, then the configured default
    let background = if let Some(url) = get_background_image(directives) {
        BackgroundSpec::Image {
            url,
            scale: get_background_scale(directives),
        }
    } else if classes.contains(&"inverse") {
        BackgroundSpec::SolidColor(theme.background)
    } else {
        config.default_background.clone()
    };

    ResolvedSlide {
        index: slide.index(),
        name: slide.name().map(str::to_string),
        text_position: get_text_position(&classes),
        text_align: get_text_align(&classes),
        classes: classes.iter().map(|c| c.to_string()).collect(),
        background,
        theme,
        steps: slide.steps().to_vec(),
        notes: slide.notes().map(str::to_string),
        hidden: slide.is_hidden(),
        counted: slide.is_counted(),
    }
}

/// Get the vertical text position from classes; the last one written wins
pub fn get_text_position(classes: &[&str]) -> TextPosition {
    classes
        .iter()
        .rev()
        .find_map(|class| match *class {
            "top" => Some(TextPosition::Top),
            "middle" => Some(TextPosition::Center),
            "bottom" => Some(TextPosition::Bottom),
            _ => None,
        })
        .unwrap_or_default()
}

/// Get the text alignment from classes; the last one written wins
pub fn get_text_align(classes: &[&str]) -> TextAlign {
    classes
        .iter()
        .rev()
        .find_map(|class| match *class {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            _ => None,
        })
        .unwrap_or_default()
}

/// Get the background image from a `background-image: url(...)` directive
pub fn get_background_image(directives: &Directives) -> Option<String> {
    let value = directives.get("background-image")?.trim();
    let inner = value.strip_prefix("url(")?.strip_suffix(')')?;
    let url = extract_quoted_value(inner).unwrap_or_else(|| inner.trim().to_string());
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

/// Get the background scale from a `background-size` directive
pub fn get_background_scale(directives: &Directives) -> BackgroundScale {
    match directives.get("background-size").map(str::trim) {
        Some("cover") => BackgroundScale::Fill,
        Some("contain") => BackgroundScale::Fit,
        Some("100% 100%") => BackgroundScale::Stretch,
        Some("auto") => BackgroundScale::Unscaled,
        _ => BackgroundScale::Fit,
    }
}

/// Extract a quoted value from a string like "'value'" or "\"value\""
fn extract_quoted_value(s: &str) -> Option<String> {
    let s = s.trim();
    let quote_char = s.chars().next()?;
    if quote_char == '\'' || quote_char == '"' {
        if let Some(end) = s[1..].find(quote_char) {
            return Some(s[1..end + 1].to_string());
        }
    }
    None
}

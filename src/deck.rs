//! Deck and slide records produced by the parser.

use std::ops::Index;

use serde::Serialize;

use crate::directive::Directives;
use crate::error::{Error, Result};
use crate::parser::{split_on_marker, ParseOptions};

/// One delimited segment of the slide source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    index: usize,
    line: usize,
    raw_content: String,
    directives: Directives,
    resolved: Directives,
    steps: Vec<String>,
    notes: Option<String>,
    #[serde(skip)]
    body_offset: usize,
    #[serde(skip)]
    content_len: usize,
}

impl Slide {
    pub(crate) fn new(
        index: usize,
        line: usize,
        raw: &str,
        body_offset: usize,
        directives: Directives,
        resolved: Directives,
        options: &ParseOptions,
    ) -> Self {
        let body = &raw[body_offset..];

        let sections = split_on_marker(body, &options.notes_marker);
        let content = &body[..sections.parts[0].end];
        let notes = sections
            .parts
            .get(1)
            .map(|part| body[part.start..].to_string());

        let increments = split_on_marker(content, &options.increment_marker);
        let mut steps = Vec::with_capacity(increments.parts.len());
        let mut shown = String::new();
        for (i, part) in increments.parts.iter().enumerate() {
            if i > 0 {
                shown.push('\n');
            }
            shown.push_str(&content[part.start..part.end]);
            steps.push(shown.clone());
        }

        Self {
            index,
            line,
            raw_content: raw.to_string(),
            directives,
            resolved,
            steps,
            notes,
            body_offset,
            content_len: content.len(),
        }
    }

    /// Zero-based position in the deck.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based source line of the slide's first line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The segment exactly as written, directive header included.
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// Directives written on this slide.
    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    /// Directives in effect after inheritance from earlier slides.
    pub fn resolved(&self) -> &Directives {
        &self.resolved
    }

    /// Everything after the directive header.
    pub fn body(&self) -> &str {
        &self.raw_content[self.body_offset..]
    }

    /// The body without presenter notes.
    pub fn content(&self) -> &str {
        &self.body()[..self.content_len]
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Cumulative reveal steps; the last one is the full content.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn name(&self) -> Option<&str> {
        self.directives.get("name")
    }

    /// A `layout: true` slide is a template for the slides after it.
    pub fn is_layout(&self) -> bool {
        self.directives.flag("layout") == Some(true)
    }

    pub fn is_excluded(&self) -> bool {
        self.directives.flag("exclude") == Some(true)
    }

    /// Hidden slides are kept in the deck but never shown.
    pub fn is_hidden(&self) -> bool {
        self.is_layout() || self.is_excluded()
    }

    /// Whether the slide takes part in slide numbering (`count: false` opts out).
    pub fn is_counted(&self) -> bool {
        self.directives.flag("count") != Some(false)
    }
}

/// The ordered, non-empty collection of slides from one source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    slides: Vec<Slide>,
    /// The exact text between consecutive slides, delimiter line and
    /// surrounding line endings included.
    #[serde(skip)]
    separators: Vec<String>,
}

impl Deck {
    pub(crate) fn from_slides(slides: Vec<Slide>, separators: Vec<String>) -> Result<Self> {
        if slides.is_empty() {
            return Err(Error::MalformedDeck("no slides found".to_string()));
        }
        Ok(Self { slides, separators })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false: a deck cannot be built without slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }

    /// First slide carrying `name: <name>`.
    pub fn find_by_name(&self, name: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.name() == Some(name))
    }

    /// Rebuild the source text: the raw slides joined by the separators
    /// they were split on.
    pub fn to_source(&self) -> String {
        let mut source = String::new();
        for (i, slide) in self.slides.iter().enumerate() {
            if i > 0 {
                if let Some(separator) = self.separators.get(i - 1) {
                    source.push_str(separator);
                }
            }
            source.push_str(slide.raw_content());
        }
        source
    }
}

impl Index<usize> for Deck {
    type Output = Slide;

    fn index(&self, index: usize) -> &Slide {
        &self.slides[index]
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

// Slide source grammar (remark convention):
//
//   deck     := segment ( "\n" delimiter "\n" segment )*
//   segment  := header body
//   header   := directive*                 (see directive.rs)
//   body     := content ( "\n???\n" notes )?
//   content  := step ( "\n--\n" step )*
//
// Delimiter-like lines only count when they stand alone on a line and are not
// inside a fenced code block. A fence opens with three or more backticks or
// tildes (indented at most three spaces) and closes with a run of the same
// character that is at least as long and followed by nothing but whitespace.

use log::{debug, trace, warn};
use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    sequence::preceded,
};

use crate::deck::{Deck, Slide};
use crate::directive::{parse_header, resolve_inherited};
use crate::error::{Error, Result};

/// Configuration for deck parsing
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Line separating two slides.
    pub delimiter: String,
    /// Line separating two incremental steps of one slide.
    pub increment_marker: String,
    /// Line separating slide content from presenter notes.
    pub notes_marker: String,
    /// Fail on a fence that is still open at end of input. When off, the
    /// fence is closed implicitly.
    pub strict_fences: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: "---".to_string(),
            increment_marker: "--".to_string(),
            notes_marker: "???".to_string(),
            strict_fences: true,
        }
    }
}

/// An open fenced code block.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fence {
    pub marker: String,
    /// One-based line, relative to the scanned text.
    pub line: usize,
}

impl Fence {
    fn fence_char(&self) -> char {
        self.marker.chars().next().unwrap_or('`')
    }

    /// Whether `line` is a closing fence for this block.
    fn closed_by(&self, line: &str) -> bool {
        match fence_marker(line) {
            Ok((rest, marker)) => {
                marker.starts_with(self.fence_char())
                    && marker.len() >= self.marker.len()
                    && rest.trim().is_empty()
            }
            Err(_) => false,
        }
    }
}

/// A byte range of scanned text between two marker lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Part {
    pub start: usize,
    pub end: usize,
    /// One-based line of the part's first line.
    pub line: usize,
}

/// Result of splitting text on a standalone marker line.
#[derive(Debug)]
pub(crate) struct Split {
    pub parts: Vec<Part>,
    /// A fence still open at end of input, if any.
    pub unterminated: Option<(usize, Fence)>,
}

// Up to three spaces of indentation, then a run of at least three ` or ~
fn fence_marker(input: &str) -> nom::IResult<&str, &str> {
    preceded(
        take_while_m_n(0, 3, |c: char| c == ' '),
        alt((
            take_while_m_n(3, usize::MAX, |c: char| c == '`'),
            take_while_m_n(3, usize::MAX, |c: char| c == '~'),
        )),
    )(input)
}

fn fence_open(line: &str, line_no: usize) -> Option<Fence> {
    let (info, marker) = fence_marker(line).ok()?;
    // backtick fences may not carry backticks in their info string
    if marker.starts_with('`') && info.contains('`') {
        return None;
    }
    Some(Fence {
        marker: marker.to_string(),
        line: line_no,
    })
}

/// Split `text` on lines equal to `marker`, skipping fenced code blocks.
///
/// Each part excludes the line endings before and after the marker line; the
/// text between two consecutive parts is the separator they were split on.
pub(crate) fn split_on_marker(text: &str, marker: &str) -> Split {
    let mut parts = Vec::new();
    let mut fence: Option<Fence> = None;
    let mut start = 0;
    let mut start_line = 1;
    let mut offset = 0;

    for (i, raw_line) in text.split_inclusive('\n').enumerate() {
        let line_no = i + 1;
        let line = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(open) = &fence {
            if open.closed_by(line) {
                trace!("line {}: closes fence opened at line {}", line_no, open.line);
                fence = None;
            }
        } else if let Some(open) = fence_open(line, line_no) {
            trace!("line {}: opens {} fence", line_no, open.marker);
            fence = Some(open);
        } else if line == marker {
            let before = &text[start..offset];
            let end = start + before.strip_suffix('\n').map_or(before.len(), |b| {
                b.strip_suffix('\r').unwrap_or(b).len()
            });
            trace!("line {}: slide boundary", line_no);
            parts.push(Part {
                start,
                end,
                line: start_line,
            });
            start = offset + raw_line.len();
            start_line = line_no + 1;
        }

        offset += raw_line.len();
    }

    let unterminated = fence.map(|open| (parts.len(), open));
    parts.push(Part {
        start,
        end: text.len(),
        line: start_line,
    });

    Split {
        parts,
        unterminated,
    }
}

/// Parse a slide source with the default options.
pub fn parse_deck(input: &str) -> Result<Deck> {
    parse_deck_with(input, &ParseOptions::default())
}

/// Parse a slide source into a [`Deck`].
///
/// Fails with [`Error::MalformedDeck`] on empty input and with
/// [`Error::UnterminatedBlock`] when a fenced code block never closes.
pub fn parse_deck_with(input: &str, options: &ParseOptions) -> Result<Deck> {
    if input.trim().is_empty() {
        return Err(Error::MalformedDeck("input is empty".to_string()));
    }

    let split = split_on_marker(input, &options.delimiter);

    if let Some((slide, fence)) = split.unterminated {
        if options.strict_fences {
            return Err(Error::UnterminatedBlock {
                slide,
                line: fence.line,
                fence: fence.marker,
            });
        }
        warn!(
            "{} fence opened at line {} is never closed; closing it at end of input",
            fence.marker, fence.line
        );
    }

    let segments: Vec<(&str, usize)> = split
        .parts
        .iter()
        .map(|part| (&input[part.start..part.end], part.line))
        .collect();

    let headers: Vec<_> = segments.iter().map(|(raw, _)| parse_header(raw)).collect();
    let own: Vec<_> = headers.iter().map(|(d, _)| d.clone()).collect();
    let resolved = resolve_inherited(&own);

    let slides: Vec<Slide> = segments
        .iter()
        .zip(headers)
        .zip(resolved)
        .enumerate()
        .map(|(index, (((raw, line), (directives, body)), resolved))| {
            let body_offset = raw.len() - body.len();
            Slide::new(index, *line, raw, body_offset, directives, resolved, options)
        })
        .collect();

    let separators: Vec<String> = split
        .parts
        .windows(2)
        .map(|pair| input[pair[0].end..pair[1].start].to_string())
        .collect();

    debug!("parsed {} slides", slides.len());
    Deck::from_slides(slides, separators)
}

//! Locating the slide source: either a bare markdown file or the
//! `<textarea id="source">` of a slideshow page.

use std::fs;
use std::path::Path;

use log::debug;
use nom::{
    bytes::complete::{tag, take_until},
    sequence::{pair, preceded, terminated},
};
use quick_xml::escape::unescape_with;

use crate::error::{Error, Result};

/// Read a slide source from disk.
///
/// `.html` and `.htm` files have their textarea extracted; anything else is
/// returned as-is.
pub fn load_path(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    let is_html = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
        .unwrap_or(false);

    if is_html {
        debug!("extracting slide source from {}", path.display());
        extract_textarea(&text)
    } else {
        Ok(text)
    }
}

// "<textarea" attrs ">" body "</textarea>", returning (attrs, body)
fn textarea(input: &str) -> nom::IResult<&str, (&str, &str)> {
    preceded(
        pair(take_until("<textarea"), tag("<textarea")),
        pair(
            terminated(take_until(">"), tag(">")),
            terminated(take_until("</textarea"), tag("</textarea")),
        ),
    )(input)
}

fn has_source_id(attrs: &str) -> bool {
    attrs
        .split_whitespace()
        .any(|attr| matches!(attr, "id=\"source\"" | "id='source'" | "id=source"))
}

/// Pull the slide source out of an HTML page.
///
/// Prefers the textarea with `id="source"`, falling back to the first
/// textarea on the page. The newline right after the opening tag is dropped
/// as an HTML parser would, and character references are decoded.
pub fn extract_textarea(html: &str) -> Result<String> {
    // ASCII lowercasing keeps byte offsets intact
    let lowered = html.to_ascii_lowercase();

    let mut found: Vec<(bool, usize, usize)> = Vec::new();
    let mut rest = lowered.as_str();
    while let Ok((next, (attrs, body))) = textarea(rest) {
        let start = body.as_ptr() as usize - lowered.as_ptr() as usize;
        found.push((has_source_id(attrs), start, start + body.len()));
        rest = next;
    }

    let (_, start, end) = found
        .iter()
        .find(|(is_source, _, _)| *is_source)
        .or_else(|| found.first())
        .copied()
        .ok_or(Error::MissingSource)?;

    let body = &html[start..end];
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);
    Ok(decode_entities(body))
}

fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        "nbsp" => Some("\u{a0}"),
        _ => None,
    }
}

/// Decode character references, leaving anything unrecognized as written.
fn decode_entities(text: &str) -> String {
    match unescape_with(text, html_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            debug!("decoding entities one at a time: {}", e);
            decode_each_entity(text)
        }
    }
}

// Pages often carry a bare `&` in code samples, which fails a whole-text
// unescape; decode every `&name;` candidate on its own instead.
fn decode_each_entity(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let name_len = tail[1..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '#'))
            .unwrap_or(tail.len() - 1);
        if name_len > 0 && tail[1 + name_len..].starts_with(';') {
            let entity = &tail[..name_len + 2];
            match unescape_with(entity, html_entity) {
                Ok(value) => decoded.push_str(&value),
                Err(_) => decoded.push_str(entity),
            }
            rest = &tail[entity.len()..];
        } else {
            decoded.push('&');
            rest = &tail[1..];
        }
    }
    decoded.push_str(rest);
    decoded
}

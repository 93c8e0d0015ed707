// Slide directives: the `key: value` header lines at the top of a slide.
//
// A directive header is every leading line of a slide that matches
//
//   key   := [A-Za-z0-9_-]+
//   line  := key ":" [ \t]* value (EOL | EOF)
//
// where value is the non-empty remainder of the line. Blank lines may precede
// the first directive. The header ends at the first line that does not match.

use std::collections::BTreeMap;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, line_ending, not_line_ending, space0},
    combinator::{eof, verify},
    multi::{many0, many1},
    sequence::{preceded, separated_pair, terminated},
};
use serde::Serialize;

/// Keys that only apply to the slide they are written on.
const NON_INHERITED: [&str; 4] = ["name", "layout", "exclude", "count"];

/// An ordered map of directive names to their raw values.
///
/// Keys are case-sensitive. Later writes of the same key win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Directives(BTreeMap<String, String>);

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Interpret a directive as a boolean flag (`true` / `false`).
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)?.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// The comma-separated `class` directive as an ordered list without
    /// duplicates, e.g. `class: center, middle, inverse`.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = Vec::new();
        if let Some(value) = self.get("class") {
            for class in value.split(',').map(str::trim).filter(|c| !c.is_empty()) {
                if !classes.contains(&class) {
                    classes.push(class);
                }
            }
        }
        classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// This set with every entry of `other` written over it.
    fn overlay(&self, other: &Directives) -> Directives {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.insert(key, value);
        }
        merged
    }

    /// The part of a resolved set that carries forward to the next slide.
    fn carried(&self) -> Directives {
        let mut carried = self.clone();
        for key in NON_INHERITED {
            carried.0.remove(key);
        }
        carried
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Directives {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut directives = Directives::new();
        for (key, value) in iter {
            directives.insert(key, value);
        }
        directives
    }
}

fn key(input: &str) -> nom::IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}

fn value(input: &str) -> nom::IResult<&str, &str> {
    let (input, value) = verify(not_line_ending, |v: &str| !v.trim().is_empty())(input)?;
    Ok((input, value.trim_end()))
}

// Directive lines look like "class: center, middle\n"
fn directive(input: &str) -> nom::IResult<&str, (&str, &str)> {
    terminated(
        separated_pair(key, terminated(char(':'), space0), value),
        alt((line_ending, eof)),
    )(input)
}

fn header(input: &str) -> nom::IResult<&str, Vec<(&str, &str)>> {
    preceded(many0(blank_line), many1(directive))(input)
}

fn blank_line(input: &str) -> nom::IResult<&str, &str> {
    terminated(space0, line_ending)(input)
}

/// Split the directive header off the top of a slide.
///
/// Blank lines before the first directive belong to the header. Returns the
/// parsed directives and the remaining body text; a slide without directives
/// is returned whole.
pub fn parse_header(input: &str) -> (Directives, &str) {
    match header(input) {
        Ok((body, pairs)) => (pairs.into_iter().collect(), body),
        Err(_) => (Directives::new(), input),
    }
}

/// Resolve inherited directives for a whole deck.
///
/// This is a left fold with the "current directive set" as accumulator:
/// every slide sees the accumulator overlaid with its own directives, and
/// the result (minus per-slide keys) carries on to the next slide.
/// `layout: false` starts a slide from an empty accumulator. An
/// `exclude: true` slide still inherits but passes nothing on.
pub fn resolve_inherited(own: &[Directives]) -> Vec<Directives> {
    own.iter()
        .scan(Directives::new(), |current, directives| {
            let base = if directives.flag("layout") == Some(false) {
                Directives::new()
            } else {
                current.clone()
            };
            let resolved = base.overlay(directives);
            if directives.flag("exclude") != Some(true) {
                *current = resolved.carried();
            }
            Some(resolved)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(pairs: &[(&str, &str)]) -> Directives {
        pairs.iter().copied().collect()
    }

    #[test]
    fn directive_test() {
        assert_eq!(directive("class: a\n"), Ok(("", ("class", "a"))));
        assert_eq!(directive("layout:false"), Ok(("", ("layout", "false"))));
        assert_eq!(
            directive("background-image: url(x.png)  \r\nrest"),
            Ok(("rest", ("background-image", "url(x.png)")))
        );
        assert!(directive("# Title\n").is_err());
        assert!(directive("Agenda:\n").is_err());
        assert!(directive(" class: a\n").is_err());
    }

    #[test]
    fn test_parse_header() {
        let (d, body) = parse_header("class: center, middle\nname: intro\n# Hello\nclass: nope");
        assert_eq!(d.get("class"), Some("center, middle"));
        assert_eq!(d.get("name"), Some("intro"));
        assert_eq!(d.len(), 2);
        assert_eq!(body, "# Hello\nclass: nope");
    }

    #[test]
    fn test_parse_header_empty() {
        let (d, body) = parse_header("# Just a title");
        assert!(d.is_empty());
        assert_eq!(body, "# Just a title");

        let (d, body) = parse_header("");
        assert!(d.is_empty());
        assert_eq!(body, "");

        let (d, body) = parse_header("\n\n# Title");
        assert!(d.is_empty());
        assert_eq!(body, "\n\n# Title");
    }

    #[test]
    fn test_parse_header_after_blank_lines() {
        let (d, body) = parse_header("\n  \nclass: center\n\n# Title");
        assert_eq!(d.get("class"), Some("center"));
        assert_eq!(body, "\n# Title");
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let (d, _) = parse_header("Class: a\n");
        assert_eq!(d.get("Class"), Some("a"));
        assert_eq!(d.get("class"), None);
    }

    #[test]
    fn test_classes_ordered_without_duplicates() {
        let d = directives(&[("class", "center, middle, inverse, center,")]);
        assert_eq!(d.classes(), vec!["center", "middle", "inverse"]);
        assert!(d.has_class("inverse"));
        assert!(!d.has_class("left"));
    }

    #[test]
    fn test_flag() {
        let d = directives(&[("layout", "true"), ("count", "false"), ("name", "x")]);
        assert_eq!(d.flag("layout"), Some(true));
        assert_eq!(d.flag("count"), Some(false));
        assert_eq!(d.flag("name"), None);
        assert_eq!(d.flag("missing"), None);
    }

    #[test]
    fn test_inheritance_carries_forward() {
        let own = vec![
            directives(&[("class", "a")]),
            Directives::new(),
            directives(&[("class", "b")]),
        ];
        let classes: Vec<Option<String>> = resolve_inherited(&own)
            .iter()
            .map(|d| d.get("class").map(str::to_string))
            .collect();
        assert_eq!(
            classes,
            vec![Some("a".into()), Some("a".into()), Some("b".into())]
        );
    }

    #[test]
    fn test_inheritance_skips_per_slide_keys() {
        let own = vec![
            directives(&[("name", "intro"), ("class", "a"), ("count", "false")]),
            Directives::new(),
        ];
        let resolved = resolve_inherited(&own);
        assert_eq!(resolved[0].get("name"), Some("intro"));
        assert_eq!(resolved[1].get("name"), None);
        assert_eq!(resolved[1].get("count"), None);
        assert_eq!(resolved[1].get("class"), Some("a"));
    }

    #[test]
    fn test_excluded_slide_passes_nothing_on() {
        let own = vec![
            directives(&[("class", "a")]),
            directives(&[("exclude", "true"), ("class", "inverse")]),
            Directives::new(),
        ];
        let resolved = resolve_inherited(&own);
        assert_eq!(resolved[1].classes(), vec!["inverse"]);
        assert_eq!(resolved[2].classes(), vec!["a"]);
    }

    #[test]
    fn test_layout_false_resets() {
        let own = vec![
            directives(&[("class", "a"), ("background-image", "url(x.png)")]),
            directives(&[("layout", "false"), ("class", "b")]),
            Directives::new(),
        ];
        let resolved = resolve_inherited(&own);
        assert_eq!(resolved[1].get("class"), Some("b"));
        assert_eq!(resolved[1].get("background-image"), None);
        assert_eq!(resolved[2].get("class"), Some("b"));
        assert_eq!(resolved[2].get("layout"), None);
    }

    #[test]
    fn test_layout_true_feeds_following_slides() {
        let own = vec![
            directives(&[("layout", "true"), ("class", "inverse")]),
            Directives::new(),
        ];
        let resolved = resolve_inherited(&own);
        assert_eq!(resolved[0].flag("layout"), Some(true));
        assert_eq!(resolved[1].get("class"), Some("inverse"));
        assert_eq!(resolved[1].get("layout"), None);
    }
}

//! Slide navigation for a rendering front end.
//!
//! A [`Presenter`] walks the visible slides of a [`Deck`] the way a viewer
//! does: `next` reveals the following increment of the current slide before
//! moving on to the next slide, `previous` walks back the same way. Layout
//! templates and excluded slides are skipped.

use log::trace;

use crate::deck::{Deck, Slide};

/// Cursor over a deck's visible slides and their increments.
#[derive(Debug, Clone)]
pub struct Presenter<'a> {
    deck: &'a Deck,
    slide: usize,
    step: usize,
}

impl<'a> Presenter<'a> {
    /// Start on the first visible slide, or `None` when every slide is a
    /// layout template or excluded.
    pub fn new(deck: &'a Deck) -> Option<Self> {
        let slide = Self::visible_from(deck, 0)?;
        Some(Self {
            deck,
            slide,
            step: 0,
        })
    }

    fn visible_from(deck: &Deck, start: usize) -> Option<usize> {
        (start..deck.len()).find(|&i| !deck[i].is_hidden())
    }

    fn visible_before(deck: &Deck, end: usize) -> Option<usize> {
        (0..end).rev().find(|&i| !deck[i].is_hidden())
    }

    fn last_step(slide: &Slide) -> usize {
        slide.steps().len().saturating_sub(1)
    }

    pub fn current(&self) -> &'a Slide {
        let deck: &'a Deck = self.deck;
        &deck[self.slide]
    }

    /// Index of the current slide in the deck.
    pub fn position(&self) -> usize {
        self.slide
    }

    /// Zero-based increment within the current slide.
    pub fn step(&self) -> usize {
        self.step
    }

    /// The text shown at the current increment.
    pub fn current_text(&self) -> &'a str {
        self.current()
            .steps()
            .get(self.step)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Advance one increment or slide. Returns false at the end of the deck.
    pub fn next(&mut self) -> bool {
        if self.step < Self::last_step(self.current()) {
            self.step += 1;
            return true;
        }
        match Self::visible_from(self.deck, self.slide + 1) {
            Some(slide) => {
                trace!("slide {} -> {}", self.slide, slide);
                self.slide = slide;
                self.step = 0;
                true
            }
            None => false,
        }
    }

    /// Go back one increment or slide. Returns false at the start of the deck.
    pub fn previous(&mut self) -> bool {
        if self.step > 0 {
            self.step -= 1;
            return true;
        }
        match Self::visible_before(self.deck, self.slide) {
            Some(slide) => {
                trace!("slide {} -> {}", self.slide, slide);
                self.slide = slide;
                self.step = Self::last_step(&self.deck[slide]);
                true
            }
            None => false,
        }
    }

    pub fn first(&mut self) {
        self.slide = Self::visible_from(self.deck, 0).unwrap_or(self.slide);
        self.step = 0;
    }

    /// Jump to the fully revealed last visible slide.
    pub fn last(&mut self) {
        self.slide = Self::visible_before(self.deck, self.deck.len()).unwrap_or(self.slide);
        self.step = Self::last_step(self.current());
    }

    /// Jump to a slide by deck index. Hidden or out-of-range slides are refused.
    pub fn goto(&mut self, index: usize) -> bool {
        match self.deck.get(index) {
            Some(slide) if !slide.is_hidden() => {
                self.slide = index;
                self.step = 0;
                true
            }
            _ => false,
        }
    }

    /// Jump to the slide carrying `name: <name>`.
    pub fn goto_name(&mut self, name: &str) -> bool {
        match self.deck.find_by_name(name) {
            Some(slide) => self.goto(slide.index()),
            None => false,
        }
    }

    /// Slide number display, e.g. "3 / 10", over visible counted slides.
    pub fn counter(&self) -> String {
        let counted = |slide: &&Slide| !slide.is_hidden() && slide.is_counted();
        let total = self.deck.iter().filter(counted).count();
        let number = self.deck.iter().take(self.slide + 1).filter(counted).count();
        format!("{} / {}", number, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_deck;
    use indoc::indoc;

    fn deck() -> Deck {
        parse_deck(indoc! {"
            layout: true
            class: inverse
            ---
            name: title
            # Title
            ---
            # List
            - a
            --
            - b
            ---
            exclude: true
            # Draft
            ---
            count: false
            # Thanks"})
        .unwrap()
    }

    #[test]
    fn test_starts_on_first_visible() {
        let deck = deck();
        let presenter = Presenter::new(&deck).unwrap();
        assert_eq!(presenter.position(), 1);
        assert_eq!(presenter.current().name(), Some("title"));
        assert_eq!(presenter.counter(), "1 / 2");
    }

    #[test]
    fn test_next_walks_steps_and_skips_hidden() {
        let deck = deck();
        let mut presenter = Presenter::new(&deck).unwrap();

        assert!(presenter.next());
        assert_eq!((presenter.position(), presenter.step()), (2, 0));
        assert_eq!(presenter.current_text(), "# List\n- a");

        assert!(presenter.next());
        assert_eq!((presenter.position(), presenter.step()), (2, 1));
        assert_eq!(presenter.current_text(), "# List\n- a\n- b");

        assert!(presenter.next());
        assert_eq!(presenter.position(), 4);
        assert_eq!(presenter.counter(), "2 / 2");

        assert!(!presenter.next());
        assert_eq!(presenter.position(), 4);
    }

    #[test]
    fn test_previous_returns_to_last_step() {
        let deck = deck();
        let mut presenter = Presenter::new(&deck).unwrap();
        presenter.last();
        assert_eq!(presenter.position(), 4);

        assert!(presenter.previous());
        assert_eq!((presenter.position(), presenter.step()), (2, 1));
        assert!(presenter.previous());
        assert_eq!((presenter.position(), presenter.step()), (2, 0));
        assert!(presenter.previous());
        assert_eq!(presenter.position(), 1);
        assert!(!presenter.previous());
    }

    #[test]
    fn test_goto() {
        let deck = deck();
        let mut presenter = Presenter::new(&deck).unwrap();
        assert!(presenter.goto(2));
        assert_eq!(presenter.position(), 2);
        assert!(!presenter.goto(3));
        assert!(!presenter.goto(0));
        assert!(!presenter.goto(99));
        assert_eq!(presenter.position(), 2);

        assert!(presenter.goto_name("title"));
        assert_eq!(presenter.position(), 1);
        assert!(!presenter.goto_name("missing"));

        presenter.last();
        presenter.first();
        assert_eq!((presenter.position(), presenter.step()), (1, 0));
    }

    #[test]
    fn test_all_hidden_has_no_presenter() {
        let deck = parse_deck("layout: true\nclass: inverse\n---\nexclude: true\n# Draft").unwrap();
        assert!(Presenter::new(&deck).is_none());
    }

    #[test]
    fn test_single_slide() {
        let deck = parse_deck("only").unwrap();
        let mut presenter = Presenter::new(&deck).unwrap();
        assert!(!presenter.next());
        assert!(!presenter.previous());
        assert_eq!(presenter.current_text(), "only");
        assert_eq!(presenter.counter(), "1 / 1");
    }
}

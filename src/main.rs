//! CLI tool for inspecting remark slide decks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use remark_deck::render::types::RenderDimensions;
use remark_deck::{load_path, parse_deck_with, resolve_deck, Deck, ParseOptions, ResolveConfig, Slide};

/// Parse a remark slide deck (markdown or HTML page) and report on its slides.
#[derive(Parser, Debug)]
#[command(name = "remark-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Slide source: a markdown file, or an HTML page with a source textarea
    input: PathBuf,

    /// Print only the slide at this zero-based index
    #[arg(short, long)]
    slide: Option<usize>,

    /// Print the deck as JSON
    #[arg(short, long)]
    json: bool,

    /// With --json, print the resolved deck instead of the parsed one
    #[arg(short, long, requires = "json")]
    resolved: bool,

    /// Aspect ratio used for resolution, e.g. 16:9
    #[arg(long, default_value = "4:3")]
    ratio: String,

    /// Include presenter notes in the output
    #[arg(short, long)]
    notes: bool,

    /// Close a trailing unterminated code fence instead of failing
    #[arg(long)]
    lenient: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let source = load_path(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let options = ParseOptions {
        strict_fences: !args.lenient,
        ..ParseOptions::default()
    };
    let deck = parse_deck_with(&source, &options)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    log::debug!("{}: {} slides", args.input.display(), deck.len());

    if args.json {
        let json = if args.resolved {
            let dimensions = RenderDimensions::from_ratio(&args.ratio)
                .ok_or_else(|| anyhow::anyhow!("Invalid ratio: {}", args.ratio))?;
            let config = ResolveConfig {
                dimensions,
                ..ResolveConfig::default()
            };
            serde_json::to_string_pretty(&resolve_deck(&deck, &config))?
        } else {
            serde_json::to_string_pretty(&deck)?
        };
        println!("{}", json);
        return Ok(());
    }

    match args.slide {
        Some(index) => {
            let slide = deck
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("No slide {} (deck has {})", index, deck.len()))?;
            print_slide(slide, args.notes);
        }
        None => print_summary(&deck, args.notes),
    }

    Ok(())
}

/// First non-empty line of a slide's content, for the summary listing.
fn title(slide: &Slide) -> &str {
    slide
        .content()
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
}

fn print_summary(deck: &Deck, notes: bool) {
    println!("{} slides", deck.len());
    for slide in deck {
        let mut flags = Vec::new();
        if slide.is_layout() {
            flags.push("layout");
        }
        if slide.is_excluded() {
            flags.push("excluded");
        }
        if !slide.is_counted() {
            flags.push("uncounted");
        }

        println!(
            "{:>3}  line {:<4} [{}] {}{}",
            slide.index(),
            slide.line(),
            slide.resolved().classes().join(", "),
            title(slide),
            if flags.is_empty() {
                String::new()
            } else {
                format!("  ({})", flags.join(", "))
            }
        );
        if slide.steps().len() > 1 {
            println!("       {} steps", slide.steps().len());
        }
        if notes {
            if let Some(text) = slide.notes() {
                println!("       notes: {}", text.replace('\n', " "));
            }
        }
    }
}

fn print_slide(slide: &Slide, notes: bool) {
    println!("slide {} (line {})", slide.index(), slide.line());
    for (key, value) in slide.resolved().iter() {
        let inherited = if slide.directives().contains(key) { "" } else { " (inherited)" };
        println!("{}: {}{}", key, value, inherited);
    }
    println!();
    println!("{}", slide.content());
    if notes {
        if let Some(text) = slide.notes() {
            println!();
            println!("???");
            println!("{}", text);
        }
    }
}

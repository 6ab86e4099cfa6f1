mod live;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chordshift::layout::{self, FretLayout};
use chordshift::parser::parse_chord_name;
use chordshift::transpose::transpose_all;
use chordshift::{ChordCatalog, PitchClass};

#[derive(Parser)]
#[command(name = "chordshift", about = "Transpose chord progressions by fret")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shift chord names by a number of semitones
    Transpose {
        /// Chord names, e.g. C Am F G7
        #[arg(required = true)]
        chords: Vec<String>,

        /// Semitones to shift by (negative shifts down)
        #[arg(short, long, allow_negative_numbers = true)]
        steps: i32,
    },

    /// Show the notes of a chord
    Notes {
        chord: String,
    },

    /// List every known chord on a root, in picker order
    List {
        /// Root note, e.g. C or F#
        root: String,
    },

    /// Interactive fretboard mode
    Live {
        /// Path to a .frets layout file
        #[arg(long)]
        layout: Option<PathBuf>,
    },
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Transpose { chords, steps } => {
            init_tracing("chordshift=info");
            let shifted = transpose_all(chords.iter().map(String::as_str), steps)?;
            println!("{}", shifted.join(" "));
        }
        Command::Notes { chord } => {
            init_tracing("chordshift=info");
            // Surface a bad root as an error rather than "not found"
            parse_chord_name(&chord)?;
            let catalog = ChordCatalog::standard();
            match catalog.lookup(&chord) {
                Some(notes) => {
                    let names: Vec<&str> = notes.iter().map(|n| n.name()).collect();
                    println!("{}: {}", chord, names.join(" "));
                    println!("{}", keyboard_line(&catalog.highlight_mask(&chord)));
                }
                None => println!("Chord not found: {}", chord),
            }
        }
        Command::List { root } => {
            init_tracing("chordshift=info");
            let root = PitchClass::parse(&root)?;
            let catalog = ChordCatalog::standard();
            for name in catalog.names_with_root(root) {
                let notes: Vec<&str> = catalog
                    .lookup(&name)
                    .unwrap_or(&[])
                    .iter()
                    .map(|n| n.name())
                    .collect();
                println!("{:<8} {}", name, notes.join(" "));
            }
        }
        Command::Live { layout: path } => {
            // Log output would land on top of the live screen
            init_tracing("chordshift=off");
            let layout = match path {
                Some(p) => layout::load(&p).with_context(|| format!("loading {}", p.display()))?,
                None => FretLayout::default(),
            };
            tracing::info!("Starting live mode with {} frets", layout.frets);
            live::run(layout)?;
        }
    }

    Ok(())
}

/// One-line keyboard with the lit keys bracketed
fn keyboard_line(mask: &[bool; 12]) -> String {
    PitchClass::ALL
        .iter()
        .map(|pc| {
            if mask[pc.semitone() as usize] {
                format!("[{}]", pc.name())
            } else {
                format!(" {} ", pc.name())
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_line() {
        let catalog = ChordCatalog::standard();
        assert_eq!(
            keyboard_line(&catalog.highlight_mask("C")),
            "[C] C#  D  D# [E] F  F# [G] G#  A  A#  B "
        );
        assert!(!keyboard_line(&catalog.highlight_mask("Cxyz")).contains('['));
    }

    #[test]
    fn test_cli_parses_negative_steps() {
        let cli = Cli::try_parse_from(["chordshift", "transpose", "C", "Am", "--steps", "-3"])
            .unwrap();
        match cli.command {
            Command::Transpose { chords, steps } => {
                assert_eq!(chords, vec!["C", "Am"]);
                assert_eq!(steps, -3);
            }
            _ => panic!("expected transpose"),
        }
    }
}

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Shared menu plumbing for the Sensa demo binaries.

use std::io::{self, Write};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Outcome of one menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// A valid option between 1 and the option count.
    Selected(usize),
    /// Non-numeric or out-of-range input; the caller re-prompts.
    Invalid,
    /// Standard input closed; treated as exit.
    Eof,
}

impl MenuChoice {
    /// Classifies a scripted selection the same way interactive input is
    /// parsed; out-of-range numbers are invalid.
    #[must_use]
    pub fn from_scripted(choice: usize, option_count: usize) -> Self {
        if (1..=option_count).contains(&choice) {
            Self::Selected(choice)
        } else {
            Self::Invalid
        }
    }

    /// True for end of input or the menu's final entry, the exit option.
    #[must_use]
    pub const fn exits(self, option_count: usize) -> bool {
        match self {
            Self::Eof => true,
            Self::Selected(choice) => choice == option_count,
            Self::Invalid => false,
        }
    }
}

/// Interactive session over standard input.
pub struct MenuSession {
    lines: Lines<BufReader<Stdin>>,
}

impl MenuSession {
    /// Creates a session reading from stdin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints the banner and numbered menu, then prompts for a choice.
    pub fn display(title: &str, options: &[&str]) -> Result<()> {
        println!("\n==========================================");
        println!("    {title}");
        println!("==========================================");
        for (idx, option) in options.iter().enumerate() {
            println!("{}. {option}", idx + 1);
        }
        println!("==========================================");
        print!("Choose an option (1-{}): ", options.len());
        io::stdout().flush()?;
        Ok(())
    }

    /// Reads the next selection, validating it against the option count.
    pub async fn next_choice(&mut self, option_count: usize) -> Result<MenuChoice> {
        let Some(line) = self.lines.next_line().await? else {
            return Ok(MenuChoice::Eof);
        };
        Ok(match line.trim().parse::<usize>() {
            Ok(choice) if (1..=option_count).contains(&choice) => MenuChoice::Selected(choice),
            _ => MenuChoice::Invalid,
        })
    }
}

impl Default for MenuSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_selection_matches_interactive_parsing() {
        assert_eq!(MenuChoice::from_scripted(3, 5), MenuChoice::Selected(3));
        assert_eq!(MenuChoice::from_scripted(0, 5), MenuChoice::Invalid);
        assert_eq!(MenuChoice::from_scripted(6, 5), MenuChoice::Invalid);
    }

    #[test]
    fn exit_entry_stops_scripted_runs() {
        assert!(MenuChoice::from_scripted(5, 5).exits(5));
        assert!(MenuChoice::Eof.exits(5));
        assert!(!MenuChoice::from_scripted(2, 5).exits(5));
        assert!(!MenuChoice::Invalid.exits(5));
    }
}

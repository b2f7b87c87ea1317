use console::style;
use dialoguer::{Confirm, Input};

use crate::error::InstallerError;

/// Interactive questions asked by the workflow.
///
/// Implementations loop until they have a valid answer; the only errors they
/// return are cancellation and terminal I/O failures.
pub trait Prompter {
    fn ask_yes_no(&mut self, question: &str, default: bool) -> Result<bool, InstallerError>;

    /// Returns a zero-based index into `options`.
    fn ask_choice(
        &mut self,
        question: &str,
        options: &[String],
        default: usize,
    ) -> Result<usize, InstallerError>;

    /// Free-form text, trimmed. With `allow_empty == false` blank input re-prompts.
    fn ask_text(&mut self, question: &str, allow_empty: bool) -> Result<String, InstallerError>;
}

/// Parses a 1-based menu entry. Empty input selects `default`.
pub fn parse_choice(input: &str, len: usize, default: usize) -> Result<usize, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        Ok(_) => Err(format!("Please enter a number between 1 and {}", len)),
        Err(_) => Err("Please enter a valid number".to_string()),
    }
}

/// Rejects input that is empty once trimmed.
pub fn require_text(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err("A value is required".to_string())
    } else {
        Ok(())
    }
}

// ── Console implementation ────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn ask_yes_no(&mut self, question: &str, default: bool) -> Result<bool, InstallerError> {
        let answer = Confirm::new()
            .with_prompt(question)
            .default(default)
            .wait_for_newline(true)
            .interact()
            .map_err(|e| InstallerError::from(e).classify())?;
        Ok(answer)
    }

    fn ask_choice(
        &mut self,
        question: &str,
        options: &[String],
        default: usize,
    ) -> Result<usize, InstallerError> {
        println!();
        println!("  {}", style(question).cyan().bold());
        for (i, option) in options.iter().enumerate() {
            let marker = if i == default { "→" } else { " " };
            println!("  {} {}. {}", style(marker).cyan(), i + 1, option);
        }

        let len = options.len();
        let raw: String = Input::new()
            .with_prompt(format!("Enter choice [1-{}] (default: {})", len, default + 1))
            .allow_empty(true)
            .validate_with(move |s: &String| parse_choice(s, len, default).map(|_| ()))
            .interact_text()
            .map_err(|e| InstallerError::from(e).classify())?;

        Ok(parse_choice(&raw, len, default).unwrap_or(default))
    }

    fn ask_text(&mut self, question: &str, allow_empty: bool) -> Result<String, InstallerError> {
        let mut input = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(allow_empty);
        if !allow_empty {
            // allow_empty(false) alone still accepts a line of spaces.
            input = input.validate_with(|s: &String| require_text(s));
        }

        let raw = input
            .interact_text()
            .map_err(|e| InstallerError::from(e).classify())?;
        Ok(raw.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_selects_default() {
        assert_eq!(parse_choice("", 4, 2), Ok(2));
        assert_eq!(parse_choice("   ", 4, 0), Ok(0));
    }

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(parse_choice("1", 4, 3), Ok(0));
        assert_eq!(parse_choice(" 4 ", 4, 0), Ok(3));
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(
            parse_choice("0", 3, 0),
            Err("Please enter a number between 1 and 3".to_string())
        );
        assert!(parse_choice("4", 3, 0).is_err());
    }

    #[test]
    fn required_text_rejects_whitespace() {
        assert!(require_text("").is_err());
        assert!(require_text("   ").is_err());
        assert!(require_text("\t \n").is_err());
        assert_eq!(require_text(" 127.0.0.1:4403 "), Ok(()));
    }

    #[test]
    fn non_numeric_is_rejected() {
        assert_eq!(
            parse_choice("serial", 3, 0),
            Err("Please enter a valid number".to_string())
        );
        assert!(parse_choice("-1", 3, 0).is_err());
    }
}

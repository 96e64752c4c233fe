//! Terminal implementation of the engine's display/prompt collaborator.
//! Plain numbered prompts over stdin; styling via `console`.

use console::style;
use roo_core::error::Result;
use roo_core::ui::Ui;
use std::io::{self, Write};

pub struct TerminalUi;

impl TerminalUi {
    fn read_input(&self) -> Result<String> {
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

impl Ui for TerminalUi {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn success(&self, message: &str) {
        println!("{}", style(message).green());
    }

    fn warning(&self, message: &str) {
        eprintln!("{}", style(format!("warning: {message}")).yellow());
    }

    fn error(&self, message: &str) {
        eprintln!("{}", style(format!("error: {message}")).red());
    }

    fn prompt_list(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        println!();
        println!("{}", style(prompt).bold());
        for (i, item) in items.iter().enumerate() {
            println!("  {}. {item}", i + 1);
        }
        loop {
            print!(
                "{}",
                style(format!("Select 1-{} (blank to cancel): ", items.len())).cyan()
            );
            let input = self.read_input()?;
            if input.is_empty() || input.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => println!(
                    "{}",
                    style(format!("Enter a number between 1 and {}", items.len())).red()
                ),
            }
        }
    }

    fn prompt_checkbox(&self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>> {
        println!();
        println!("{}", style(prompt).bold());
        for (i, item) in items.iter().enumerate() {
            println!("  {}. {item}", i + 1);
        }
        loop {
            print!(
                "{}",
                style(format!(
                    "Select numbers separated by commas, 1-{} (blank to cancel): ",
                    items.len()
                ))
                .cyan()
            );
            let input = self.read_input()?;
            if input.is_empty() || input.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match parse_indices(&input, items.len()) {
                Some(indices) => return Ok(Some(indices)),
                None => println!(
                    "{}",
                    style(format!(
                        "Enter comma-separated numbers between 1 and {}",
                        items.len()
                    ))
                    .red()
                ),
            }
        }
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            print!("{}", style(format!("{prompt} {hint} ")).cyan());
            let input = self.read_input()?;
            match input.to_ascii_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                "q" => return Ok(None),
                _ => println!("{}", style("Please answer y or n").red()),
            }
        }
    }
}

/// Parse "1, 3,2" into zero-based deduplicated indices; None on any
/// out-of-range or non-numeric token.
fn parse_indices(input: &str, len: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => {
                if !indices.contains(&(n - 1)) {
                    indices.push(n - 1);
                }
            }
            _ => return None,
        }
    }
    Some(indices)
}

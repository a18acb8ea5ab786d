use std::io::{self, BufRead, IsTerminal, Write};

use resume_core::paths::ResolvedPath;
use resume_core::scaffold::Prompter;
use resume_core::types::ContentSource;
use resume_core::{ResumeError, Result};

/// Answers come from flags first; anything missing is asked on the terminal.
/// Without a terminal, missing answers fall back to defaults or fail.
pub struct TerminalPrompter {
    pub company: Option<String>,
    pub position: Option<String>,
    pub source: Option<ContentSource>,
    pub force: bool,
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(
        company: Option<String>,
        position: Option<String>,
        source: Option<ContentSource>,
        force: bool,
    ) -> Self {
        Self {
            company,
            position,
            source,
            force,
            interactive: io::stdin().is_terminal(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Print `prompt` and read one line. `None` on end of input (Ctrl-D), which
/// is how a terminal user dismisses a prompt.
pub fn ask(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let answer = read_answer(&mut io::stdin().lock())?;
    if answer.is_none() {
        println!();
    }
    Ok(answer)
}

fn read_answer(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn is_yes(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y"))
}

#[derive(Debug, PartialEq, Eq)]
enum SourceChoice {
    Picked(ContentSource),
    Cancel,
    Invalid,
}

/// Menu answers: a 1-based number or a source name. Blank cancels.
fn parse_source_choice(answer: &str) -> SourceChoice {
    let answer = answer.trim();
    if answer.is_empty() {
        return SourceChoice::Cancel;
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| ContentSource::all().get(i).copied())
        .or_else(|| answer.parse::<ContentSource>().ok())
        .map_or(SourceChoice::Invalid, SourceChoice::Picked)
}

impl Prompter for TerminalPrompter {
    fn company(&mut self) -> Result<Option<String>> {
        if let Some(c) = self.company.take() {
            return Ok(Some(c));
        }
        if !self.interactive {
            return Err(ResumeError::Validation(
                "--company is required when stdin is not a terminal".to_string(),
            ));
        }
        loop {
            match ask("Enter company name (e.g., 'google', 'stripe'): ")? {
                None => return Ok(None),
                Some(c) if c.trim().is_empty() => println!("Company name cannot be empty"),
                Some(c) => return Ok(Some(c)),
            }
        }
    }

    fn position(&mut self) -> Result<Option<String>> {
        if let Some(p) = self.position.take() {
            return Ok(Some(p));
        }
        if !self.interactive {
            return Ok(Some(String::new()));
        }
        Ok(ask("Enter position (e.g., 'senior', 'sdm', 'staff') [optional]: ")?)
    }

    fn confirm_overwrite(&mut self, path: &ResolvedPath) -> Result<bool> {
        if self.force {
            return Ok(true);
        }
        if !self.interactive {
            return Err(ResumeError::FileExists(path.full_path.clone()));
        }
        let answer = ask(&format!(
            "File already exists: {}. Overwrite? [y/N] ",
            path.filename
        ))?;
        Ok(is_yes(answer.as_deref()))
    }

    fn content_source(&mut self) -> Result<Option<ContentSource>> {
        if let Some(s) = self.source {
            return Ok(Some(s));
        }
        if !self.interactive {
            return Ok(Some(ContentSource::Empty));
        }
        println!("How would you like to add content?");
        for (i, source) in ContentSource::all().iter().enumerate() {
            println!("  {}) {:<10} {}", i + 1, source.as_str(), source.description());
        }
        loop {
            let Some(answer) = ask("Choice [1-3]: ")? else {
                return Ok(None);
            };
            match parse_source_choice(&answer) {
                SourceChoice::Picked(source) => return Ok(Some(source)),
                SourceChoice::Cancel => return Ok(None),
                SourceChoice::Invalid => println!("Pick 1, 2 or 3"),
            }
        }
    }
}

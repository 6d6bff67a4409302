//! Operator confirmation read from the terminal.

use std::io::{self, BufRead, Write};

use crate::application::ports::Confirmation;

/// Whether `answer` is an explicit yes. Only `y` (any case) counts; the
/// line terminator is dropped but no other whitespace is.
#[must_use]
pub fn is_confirmed(answer: &str) -> bool {
    answer
        .trim_end_matches(['\r', '\n'])
        .eq_ignore_ascii_case("y")
}

/// Write `prompt` to `out`, read one line from `input`, and decide.
///
/// A read error or end of input counts as no.
pub fn read_confirmation<I: BufRead, W: Write>(prompt: &str, input: &mut I, out: &mut W) -> bool {
    let _ = write!(out, "{prompt}");
    let _ = out.flush();
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_confirmed(&answer),
    }
}

/// Prompts on stderr and reads the answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        read_confirmation(&format!("{prompt} "), &mut io::stdin().lock(), &mut io::stderr())
    }
}

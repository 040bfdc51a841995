use std::io::{stdin, stdout, BufRead, Write};

use cherry_cuts_core::error::Result;

/// Asks whether the generated commands should go to the clipboard.
///
/// An empty answer means yes.
pub fn confirm_copy_to_clipboard() -> Result<bool> {
    confirm("Copy to clipboard? ([Y]es/[n]o): ", &mut stdin().lock())
}

/// Prompts until `reader` yields a yes/no answer. End of input counts as no.
pub fn confirm<R: BufRead>(prompt: &str, reader: &mut R) -> Result<bool> {
    loop {
        print!("{prompt}");
        stdout().flush()?;

        // Read user input
        let mut input = String::new();
        if reader.read_line(&mut input)? == 0 {
            return Ok(false);
        }

        match input.trim().to_lowercase().as_str() {
            "" | "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }
}

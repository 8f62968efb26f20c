use crate::errors::AppResult;
use std::io::{self, BufRead, Write};

/// Ask for the early check-out justification.
/// Returns `None` on end of input (Ctrl-D), which cancels the dialog.
pub fn read_justification() -> AppResult<Option<String>> {
    print!("📝 Reason for the early check-out (Ctrl-D to cancel): ");
    io::stdout().flush()?;

    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        println!();
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

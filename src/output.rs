//! Terminal rendering for query results and user-facing messages
//!
//! Colored output for humans running the one-shot CLI, kept separate from
//! the internal `log` stream: matched lines print green, rewritten
//! previews red, failures yellow on stderr.

use owo_colors::OwoColorize;

use crate::models::QueryResponse;

/// Display an error message to the user in red with padding.
pub fn error(message: &str) {
    eprintln!("\n{}\n", message.red());
}

/// Display a warning message to the user in yellow with padding.
pub fn warn(message: &str) {
    eprintln!("\n{}\n", message.yellow());
}

/// Render a full query response for terminal consumption.
///
/// Line text is printed as stored, terminator included, so no extra
/// newline is added after each line.
pub fn print_response(response: &QueryResponse) {
    if !response.is_success() {
        error(&format!("Query failed: {}", response.error));
        return;
    }

    println!("{} matched file(s)", response.files.len());

    for file in &response.files {
        println!("\n{}", file.path.bold());
        for line in &file.lines {
            print!("{:>6}  {}", line.line_number, line.original_text.green());
            if !line.original_text.ends_with('\n') {
                println!();
            }
            if let Some(rewritten) = &line.rewritten_text {
                print!("{:>6}  {}", "->", rewritten.red());
                if !rewritten.ends_with('\n') {
                    println!();
                }
            }
        }
    }

    if !response.failures.is_empty() {
        warn(&format!("{} path(s) could not be scanned:", response.failures.len()));
        for failure in &response.failures {
            eprintln!("  {}: {}", failure.path, failure.reason);
        }
    }
}

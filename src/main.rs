// src/main.rs
// HTML color table in, JSON array out.
// Usage:
//   colorconv colors.html > colors.json
use colorconv::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

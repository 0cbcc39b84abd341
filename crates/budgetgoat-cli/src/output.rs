use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

/// One aligned check line for doctor-style output, colored only when
/// stdout is a terminal.
pub fn status_line(ok: bool, name: &str, detail: &str) -> String {
    let marker = if ok {
        if use_color() {
            "ok".green().to_string()
        } else {
            "ok".to_string()
        }
    } else if use_color() {
        "FAIL".red().to_string()
    } else {
        "FAIL".to_string()
    };

    format!("  [{}] {}: {}", marker, name, detail)
}

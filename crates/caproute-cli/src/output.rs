//! Output formatting for route and city rendering.
//!
//! Text renderers return `String`s so they can be unit tested; the `print_*`
//! helpers write straight to stdout.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use caproute_lib::{Graph, LogEntry, RouteRenderMode, ValidationError};

use crate::terminal::{colors, supports_color, supports_unicode, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Per-leg listing with a totals footer.
    #[default]
    Text,
    /// Markdown list.
    Rich,
    /// Single arrow-joined line.
    Compact,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    /// Library render mode backing this format, `None` for JSON.
    pub fn render_mode(self) -> Option<RouteRenderMode> {
        match self {
            OutputFormat::Text => Some(RouteRenderMode::PlainText),
            OutputFormat::Rich => Some(RouteRenderMode::RichText),
            OutputFormat::Compact => Some(RouteRenderMode::Compact),
            OutputFormat::Json => None,
        }
    }

    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Print the CLI logo banner.
///
/// Uses box-drawing characters when the locale advertises Unicode and falls
/// back to ASCII otherwise. Respects `NO_COLOR` and `TERM=dumb`.
pub fn print_logo() {
    let (green, yellow, reset) = if supports_color() {
        (colors::GREEN, colors::YELLOW, colors::RESET)
    } else {
        ("", "", "")
    };

    if supports_unicode() {
        println!(
            "{green}╭──────────────────────────────────────╮{reset}
{green}│{yellow}  C A P R O U T E                     {green}│{reset}
{green}│{yellow}  cheapest roads between capitals     {green}│{reset}
{green}╰──────────────────────────────────────╯{reset}"
        );
    } else {
        println!(
            "{yellow}+--------------------------------------+
|  CAPROUTE                            |
|  >> cheapest roads between capitals  |
+--------------------------------------+{reset}"
        );
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: std::time::Duration) {
    let (gray, reset) = if supports_color() {
        (colors::GRAY, colors::RESET)
    } else {
        ("", "")
    };

    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };

    println!("\n{gray}Completed in {}{reset}", time_str);
}

/// Render search trace entries, one per line, tagged with their kind.
pub fn format_trace(entries: &[LogEntry], palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    for entry in entries {
        let _ = writeln!(
            buffer,
            "{}[{:<9}]{} {}",
            palette.for_kind(entry.kind),
            entry.kind.label(),
            palette.reset,
            entry.message
        );
    }
    buffer
}

/// Render validation problems as `field: message` lines.
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    let mut buffer = String::new();
    for error in errors {
        let _ = writeln!(buffer, "Invalid {}", error);
    }
    buffer
}

/// Render the city table: name, toll and the number of road connections.
pub fn format_city_table(graph: &Graph, palette: &ColorPalette) -> String {
    let width = graph
        .nodes()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut buffer = String::new();
    let _ = writeln!(buffer, "Capitals ({}):", graph.len());
    let _ = writeln!(buffer, "{:<width$}  {:>8}  {:>10}", "Name", "Toll", "Neighbours");
    for name in graph.nodes() {
        let toll = graph.toll(name).unwrap_or_default();
        let padding = width.saturating_sub(name.chars().count());
        let _ = writeln!(
            buffer,
            "{}{}{}{}  {:>8.2}  {:>10}",
            palette.white_bold,
            name,
            palette.reset,
            " ".repeat(padding),
            toll,
            graph.neighbours(name).len()
        );
    }
    buffer
}

/// Write any serialisable value to stdout as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

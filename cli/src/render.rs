use std::fmt::Write as _;

use owo_colors::OwoColorize;
use welcome_core::WelcomePresentation;

const RECENT_SECTION: &str = "Recent";
const HELP_SECTION: &str = "Help";

/// Plain-text rendering of the welcome page for terminals.
pub fn render_presentation(presentation: &WelcomePresentation, color: bool) -> String {
    let mut out = String::new();
    let heading = |text: &str| {
        if color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    let _ = writeln!(out, "{} Welcome", heading(&presentation.application_name));
    if !presentation.version_label.is_empty() {
        let _ = writeln!(out, "{}", presentation.version_label);
    }
    out.push('\n');

    let _ = writeln!(out, "{}", heading(RECENT_SECTION));
    match &presentation.recent {
        None => out.push_str("  loading…\n"),
        Some(recent) if recent.is_empty() => {
            out.push_str("  You have no recent folders, open a folder to start.\n");
        }
        Some(recent) => {
            for (index, entry) in recent.entries.iter().enumerate() {
                let name = if color {
                    entry.display_name.cyan().to_string()
                } else {
                    entry.display_name.clone()
                };
                let _ = writeln!(out, "  [{index}] {name}  {}", entry.display_path);
            }
            if recent.show_more {
                out.push_str("  More...\n");
            }
        }
    }
    out.push('\n');

    let _ = writeln!(out, "{}", heading(HELP_SECTION));
    for link in &presentation.help_links {
        let _ = writeln!(out, "  {}: {}", link.label, link.url);
    }

    if let Some(quote) = presentation.quote {
        out.push('\n');
        let _ = writeln!(out, "\"{}\"", quote.text);
        let _ = writeln!(out, "  - {}", quote.author);
    }

    out.push('\n');
    let checkbox = if presentation.startup_page_enabled { "[x]" } else { "[ ]" };
    let _ = writeln!(
        out,
        "{checkbox} Show {} welcome page on startup",
        presentation.application_name
    );
    out
}

//! UI components for the TUI

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Render model markdown as styled lines.
///
/// Handles ATX headings, `-`/`*`/`+` bullets and `**bold**` spans; everything
/// else passes through unchanged.
pub fn markdown_lines(markdown: &str) -> Vec<Line<'static>> {
    markdown.lines().map(markdown_line).collect()
}

fn markdown_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();

    if let Some(heading) = heading_text(trimmed) {
        let style = Style::new()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        return Line::from(Span::styled(heading.replace("**", ""), style));
    }

    let indent = line.len() - trimmed.len();
    if let Some(item) = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
    {
        let mut spans = vec![Span::raw(format!("{}  • ", " ".repeat(indent)))];
        spans.extend(inline_spans(item));
        return Line::from(spans);
    }

    Line::from(inline_spans(line))
}

fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    line[hashes..].strip_prefix(' ').map(str::trim)
}

/// Split `**bold**` runs into bold spans
fn inline_spans(text: &str) -> Vec<Span<'static>> {
    let bold = Style::new().add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    for (i, part) in text.split("**").enumerate() {
        if part.is_empty() {
            continue;
        }
        if i % 2 == 1 {
            spans.push(Span::styled(part.to_string(), bold));
        } else {
            spans.push(Span::raw(part.to_string()));
        }
    }

    spans
}

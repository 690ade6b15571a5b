use crate::desk::tasks::Task;
use crate::desk::theme::Palette;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};
use std::borrow::Cow;

/// Makes user text safe to put on the terminal: control characters (escape
/// sequences included) are shown as their escaped form instead of executed.
pub fn inert_text(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Splits `text` into chunks of at most `width` characters.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Formats one task row with a checkbox and wraps long text under it.
pub fn format_task_with_wrapping(
    task: &Task,
    max_width: u16,
    selected: bool,
    palette: &Palette,
) -> Text<'static> {
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let indent = " ".repeat(checkbox.len());
    let horizontal_padding: usize = 1;
    let effective_width = (max_width as usize)
        .saturating_sub(horizontal_padding * 2 + checkbox.len())
        .max(1);

    let mut text_style = if task.completed {
        Style::default()
            .fg(palette.done)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    if selected {
        text_style = palette.highlight;
    }
    let checkbox_style = if selected {
        palette.highlight
    } else {
        Style::default().fg(palette.accent)
    };

    let safe = inert_text(&task.text);
    let lines: Vec<Line<'static>> = wrap_chars(&safe, effective_width)
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let prefix = if i == 0 {
                Span::styled(checkbox.to_string(), checkbox_style)
            } else {
                Span::styled(indent.clone(), checkbox_style)
            };
            Line::from(vec![
                Span::raw(" ".repeat(horizontal_padding)),
                prefix,
                Span::styled(chunk, text_style),
            ])
        })
        .collect();

    Text::from(lines)
}

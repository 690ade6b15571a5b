use crate::desk::models::{App, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Centers a `width` x `height` box inside `size`.
pub fn centered_rect(size: Rect, width: u16, height: u16) -> Rect {
    Rect::new(
        size.x + (size.width.saturating_sub(width)) / 2,
        size.y + (size.height.saturating_sub(height)) / 2,
        width.min(size.width),
        height.min(size.height),
    )
}

/// Draw a simple input popup with a title, input field and a hint line
pub fn draw_input_popup(f: &mut Frame, app: &App, size: Rect, title: &str, hint: &str) {
    let palette = app.theme.palette();
    let popup_area = centered_rect(size, 60, 4);

    f.render_widget(Clear, popup_area);

    let popup_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(palette.base.bg(palette.popup_bg));

    f.render_widget(&popup_block, popup_area);

    let inner = popup_block.inner(popup_area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    // Show the tail of the input when it is wider than the field
    let field_width = rows[0].width as usize;
    let chars: Vec<char> = app.input_text.chars().collect();
    let visible: String = chars
        .iter()
        .skip(chars.len().saturating_sub(field_width.saturating_sub(1)))
        .collect();

    let input = Paragraph::new(visible.clone()).style(palette.base.bg(palette.popup_bg));
    f.render_widget(input, rows[0]);

    let hint = Paragraph::new(hint.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(hint, rows[1]);

    f.set_cursor_position(Position {
        x: rows[0].x + visible.chars().count() as u16,
        y: rows[0].y,
    });
}

/// Helper function to draw popups based on the input mode.
pub fn draw_popup(f: &mut Frame, app: &App, size: Rect) {
    match app.input_mode {
        InputMode::AddingTask => {
            draw_input_popup(f, app, size, "New Task", "Enter to add | Esc to cancel")
        }
        InputMode::CustomDuration => draw_input_popup(
            f,
            app,
            size,
            "Custom Duration (minutes)",
            "1-999 | Enter to set | Esc to cancel",
        ),
        InputMode::Normal => {}
    }
}

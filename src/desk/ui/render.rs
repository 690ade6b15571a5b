use crate::desk::models::{App, InputMode, Tab};
use crate::desk::stopwatch::format_hh_mm_ss;
use crate::desk::tasks::Filter;
use crate::desk::theme::Palette;
use crate::desk::ui::popups::draw_popup;
use crate::desk::ui::task_formatter::format_task_with_wrapping;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs},
};

/// Draws the overall UI: tab bar, the active feature, help line and popups.
pub fn draw_ui(f: &mut Frame, app: &App) {
    let size = f.area();
    let palette = app.theme.palette();

    // Paint the theme background first.
    f.render_widget(Block::default().style(palette.base), size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    draw_tabs(f, app, &palette, chunks[0]);

    match app.tab {
        Tab::Tasks => draw_tasks(f, app, &palette, chunks[1]),
        Tab::Timer => draw_timer(f, app, &palette, chunks[1]),
        Tab::Stopwatch => draw_stopwatch(f, app, &palette, chunks[1]),
    }

    let help = Paragraph::new(help_text(app))
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    draw_popup(f, app, size);
}

fn draw_tabs(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(format!(" {} ", app.title))
                .title_alignment(Alignment::Center)
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.accent)),
        )
        .select(app.tab.index())
        .style(palette.base)
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, area);
}

fn draw_tasks(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let stats = app.tasks.stats();
    let stats_line = Line::from(vec![
        Span::raw(format!(" Total: {}", stats.total)),
        Span::raw("   "),
        Span::raw(format!("Active: {}", stats.active)),
        Span::raw("   "),
        Span::raw(format!("Completed: {}", stats.completed)),
    ]);
    f.render_widget(Paragraph::new(stats_line), rows[0]);

    let mut filter_spans = vec![Span::raw(" Filter: ")];
    for filter in Filter::ALL {
        let style = if filter == app.tasks.filter() {
            palette.highlight
        } else {
            Style::default().fg(palette.muted)
        };
        filter_spans.push(Span::styled(format!(" {} ", filter.label()), style));
        filter_spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(filter_spans)), rows[1]);

    let visible = app.tasks.visible();
    if visible.is_empty() {
        let placeholder = Paragraph::new(app.tasks.filter().empty_message())
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center);
        f.render_widget(placeholder, rows[3]);
        return;
    }

    let width = rows[3].width;
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let selected = app.selected_task == Some(i);
            ListItem::new(format_task_with_wrapping(task, width, selected, palette))
        })
        .collect();

    let mut state = ListState::default();
    state.select(app.selected_task);
    let list = List::new(items).block(Block::default());
    f.render_stateful_widget(list, rows[3], &mut state);
}

fn timer_state_label(app: &App) -> &'static str {
    if app.timer.is_running() {
        "Running"
    } else if app.timer.is_finished() {
        "Finished"
    } else if app.timer.remaining_secs() == app.timer.total_secs() {
        "Ready"
    } else {
        "Paused"
    }
}

fn draw_timer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let display = Paragraph::new(app.timer.display())
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(display, centered_columns(rows[1], 24));

    f.render_widget(
        Paragraph::new(timer_state_label(app)).alignment(Alignment::Center),
        rows[2],
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Remaining"))
        .gauge_style(Style::default().fg(palette.accent))
        .ratio(app.timer.progress())
        .label(format!("{:.0}%", app.timer.progress() * 100.0));
    f.render_widget(gauge, centered_columns(rows[3], 50));

    let mut preset_spans = vec![Span::raw("Presets: ")];
    for (i, minutes) in app.presets.iter().enumerate() {
        let style = if app.active_preset == Some(*minutes) {
            palette.highlight
        } else {
            Style::default()
        };
        preset_spans.push(Span::styled(format!("[{}] {}m", i + 1, minutes), style));
        preset_spans.push(Span::raw("  "));
    }
    f.render_widget(
        Paragraph::new(Line::from(preset_spans)).alignment(Alignment::Center),
        rows[4],
    );

    if let Some(status) = &app.status {
        let status = Paragraph::new(status.clone())
            .style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )
            .alignment(Alignment::Center);
        f.render_widget(status, rows[5]);
    }
}

fn draw_stopwatch(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let display = Paragraph::new(app.stopwatch.display())
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(display, centered_columns(rows[1], 24));

    let state = if app.stopwatch.is_running() {
        "Running"
    } else {
        "Paused"
    };
    f.render_widget(
        Paragraph::new(state).alignment(Alignment::Center),
        rows[2],
    );

    let laps: Vec<ListItem> = app
        .stopwatch
        .laps()
        .iter()
        .map(|lap| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("Lap {:<4}", lap.index),
                    Style::default().fg(palette.muted),
                ),
                Span::raw(format_hh_mm_ss(lap.elapsed_secs)),
            ]))
        })
        .collect();
    let laps_list = List::new(laps).block(Block::default().borders(Borders::TOP).title("Laps"));
    f.render_widget(laps_list, centered_columns(rows[3], 30));
}

/// Horizontally centers a column of `width` cells inside `area`.
fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y,
        width,
        area.height,
    )
}

/// Context help for the bottom line; only currently available actions are listed.
pub fn help_text(app: &App) -> String {
    match app.input_mode {
        InputMode::AddingTask | InputMode::CustomDuration => {
            return "Enter to confirm | Esc to cancel".to_string();
        }
        InputMode::Normal => {}
    }

    let mut parts: Vec<&str> = Vec::new();
    match app.tab {
        Tab::Tasks => {
            parts.push("a add");
            if app.selected_task_id().is_some() {
                parts.push("space toggle");
                parts.push("x delete");
                parts.push("j/k move");
            }
            parts.push("f filter");
        }
        Tab::Timer => {
            if app.timer.is_running() {
                parts.push("p pause");
            } else if !app.timer.is_finished() {
                parts.push("s start");
            }
            parts.push("r reset");
            if !app.presets.is_empty() {
                parts.push("1-9 preset");
            }
            parts.push("c custom");
        }
        Tab::Stopwatch => {
            if app.stopwatch.is_running() {
                parts.push("p pause");
                parts.push("l lap");
            } else {
                parts.push("s start");
            }
            parts.push("r reset");
        }
    }
    parts.extend(["Tab switch", "T theme", "q quit"]);
    parts.join(" | ")
}

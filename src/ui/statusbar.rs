use crate::app::{App, Mode, View};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the bottom status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mode_text = match app.mode {
        Mode::Normal => ("NORMAL", Color::Green),
        Mode::Search => ("SEARCH", Color::Yellow),
        Mode::Form => ("FORM", Color::Magenta),
        Mode::Confirm => ("CONFIRM", Color::Red),
        Mode::CategorySelect => ("SELECT", Color::Cyan),
        Mode::Help => ("HELP", Color::Blue),
    };

    let stats = app.store.statistics();
    let view_name = match app.view {
        View::Tasks => "tasks",
        View::Dashboard => "dashboard",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode_text.0),
            Style::default()
                .fg(Color::Black)
                .bg(mode_text.1)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {} | {} pending / {} done | ? help | Tab {} ",
            view_name,
            stats.pending,
            stats.completed,
            match app.view {
                View::Tasks => "dashboard",
                View::Dashboard => "tasks",
            }
        )),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));
    f.render_widget(paragraph, area);
}

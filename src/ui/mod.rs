pub mod dashboard;
pub mod dialogs;
pub mod filters;
pub mod form;
pub mod help;
mod statusbar;
mod tasks;

use crate::app::{App, Mode, Notification, NotificationLevel, View};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

/// Main render function
pub fn render(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // filter bar
            Constraint::Min(0),    // body
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    filters::render(f, main_chunks[0], app);

    match app.view {
        View::Tasks => tasks::render(f, main_chunks[1], app),
        View::Dashboard => dashboard::render(f, main_chunks[1], app),
    }

    statusbar::render(f, main_chunks[2], app);

    // Modal overlays
    if app.mode == Mode::Form {
        if let Some(form) = &app.form {
            form::render(f, form);
        }
    }

    if app.mode == Mode::Confirm {
        if let Some(confirm) = &app.confirm {
            dialogs::render_confirm(f, confirm);
        }
    }

    if app.mode == Mode::CategorySelect {
        if let Some(select) = &app.category_select {
            dialogs::render_select(f, select);
        }
    }

    if app.mode == Mode::Help {
        help::render(f, f.area());
    }

    if let Some(notification) = &app.notification {
        render_notification(f, f.area(), notification);
    }
}

/// Render the notification banner across the top
fn render_notification(f: &mut Frame, area: ratatui::layout::Rect, notification: &Notification) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Paragraph};

    let notification_area = ratatui::layout::Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 3,
    };

    let (bg_color, fg_color, prefix) = match notification.level {
        NotificationLevel::Info => (Color::Blue, Color::White, "ℹ"),
        NotificationLevel::Success => (Color::Green, Color::White, "✓"),
        NotificationLevel::Warning => (Color::Yellow, Color::Black, "⚠"),
        NotificationLevel::Error => (Color::Red, Color::White, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(
            format!(" {} ", prefix),
            Style::default().fg(fg_color).bg(bg_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(&notification.message, Style::default().fg(fg_color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(bg_color))
        .style(Style::default().bg(bg_color));

    let paragraph = Paragraph::new(content).block(block);
    f.render_widget(paragraph, notification_area);
}

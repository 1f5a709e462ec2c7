use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::dialogs::{centered_rect, render_backdrop};

fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", key), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

/// Render the keybinding help overlay
pub fn render(f: &mut Frame, area: Rect) {
    render_backdrop(f, area);

    let popup_area = centered_rect(70, 80, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts (press Esc or ? to close) ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Black));

    f.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let navigation_help = vec![
        section("Navigation"),
        Line::from(""),
        key_line("j, ↓", "next task"),
        key_line("k, ↑", "previous task"),
        key_line("g / G", "first / last task"),
        key_line("Tab", "switch tasks / dashboard"),
        key_line("q", "quit"),
        Line::from(""),
        section("Tasks"),
        Line::from(""),
        key_line("a", "add task"),
        key_line("e, Enter", "edit selected task"),
        key_line("x, space", "toggle completion"),
        key_line("d", "delete selected task"),
        key_line("y", "copy task to clipboard"),
    ];

    let filter_help = vec![
        section("Filtering"),
        Line::from(""),
        key_line("/", "live search (Esc clears)"),
        key_line("s", "cycle status filter"),
        key_line("p", "cycle priority filter"),
        key_line("c", "pick category filter"),
        key_line("r", "reset all filters"),
        Line::from(""),
        section("Form"),
        Line::from(""),
        key_line("Tab", "next field"),
        key_line("h, l, ←, →", "change priority"),
        key_line("space", "toggle completed"),
        key_line("Ctrl+S", "save task"),
        key_line("Esc", "cancel"),
    ];

    let nav_widget = Paragraph::new(navigation_help)
        .block(Block::default().borders(Borders::RIGHT))
        .wrap(Wrap { trim: false });
    let filter_widget = Paragraph::new(filter_help).wrap(Wrap { trim: false });

    f.render_widget(nav_widget, columns[0]);
    f.render_widget(filter_widget, columns[1]);
}

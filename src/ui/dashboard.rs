use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the dashboard view: stat cards and a per-category breakdown
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Dashboard ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(inner);

    render_stat_cards(f, rows[0], app);
    render_categories(f, rows[1], app);
}

fn render_stat_cards(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.store.statistics();

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(f, cards[0], "Total", stats.total, Color::Cyan);
    render_card(f, cards[1], "Completed", stats.completed, Color::Green);
    render_card(f, cards[2], "Pending", stats.pending, Color::Yellow);
    render_card(f, cards[3], "High Priority", stats.high_priority, Color::Red);
}

fn render_card(f: &mut Frame, area: Rect, label: &str, value: usize, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, inner);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App) {
    let categories = app.store.distinct_categories();

    let block = Block::default()
        .title(" Categories ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .border_type(ratatui::widgets::BorderType::Rounded);

    if categories.is_empty() {
        let paragraph = Paragraph::new("No categories yet")
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = categories
        .iter()
        .map(|category| {
            let all = app.store.tasks().iter().filter(|t| &t.category == category).count();
            let open = app
                .store
                .tasks()
                .iter()
                .filter(|t| &t.category == category && !t.completed)
                .count();

            ListItem::new(Line::from(vec![
                Span::styled(format!(" #{}", category), Style::default().fg(Color::Magenta)),
                Span::styled(
                    format!("  {} open / {} total", open, all),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

use crate::app::{App, Mode};
use crate::models::{PriorityFilter, StatusFilter};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the filter bar: search, status, priority and category criteria
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let filter = app.store.filter();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let mut spans = vec![Span::raw(" ")];

    // Search clause, with a cursor marker while typing
    let search_label = Span::styled("/ ", Style::default().fg(Color::DarkGray));
    spans.push(search_label);
    if app.mode == Mode::Search {
        spans.push(Span::styled(
            format!("{}▏", filter.search),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    } else if filter.search.is_empty() {
        spans.push(Span::styled("search", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(filter.search.clone(), Style::default().fg(Color::Cyan)));
    }

    spans.push(separator());
    spans.push(clause(
        "status",
        &filter.status.to_string(),
        filter.status != StatusFilter::All,
    ));

    spans.push(separator());
    spans.push(clause(
        "priority",
        &filter.priority.to_string(),
        filter.priority != PriorityFilter::All,
    ));

    spans.push(separator());
    let category_value = if filter.category.is_empty() {
        "all".to_string()
    } else {
        filter.category.clone()
    };
    spans.push(clause("category", &category_value, !filter.category.is_empty()));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(paragraph, area);
}

fn separator() -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(Color::DarkGray))
}

fn clause(label: &str, value: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(format!("{}: {}", label, value), style)
}

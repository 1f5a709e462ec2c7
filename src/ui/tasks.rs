use crate::app::App;
use crate::ui::form::priority_color;
use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the filtered task list
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let tasks = app.store.filtered_tasks();
    let total = app.store.statistics().total;

    let title = format!(" Tasks ({}/{}) ", tasks.len(), total);
    let block = Block::default()
        .title(title)
        .title_alignment(ratatui::layout::Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .border_type(ratatui::widgets::BorderType::Rounded);

    if tasks.is_empty() {
        let message = if app.store.filter().is_default() {
            "No tasks yet - press 'a' to add one"
        } else {
            "No tasks match the current filter - press 'r' to reset"
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = i == app.selected_index;

            let style = if is_selected {
                Style::default()
                    .bg(Color::Rgb(41, 98, 218))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let selection_indicator = if is_selected {
                Span::styled("▶ ", Style::default().fg(Color::White))
            } else {
                Span::raw("  ")
            };

            let priority_indicator =
                Span::styled("● ", Style::default().fg(priority_color(task.priority)));

            let checkbox = if task.completed {
                Span::styled("[x] ", Style::default().fg(Color::Green))
            } else {
                Span::raw("[ ] ")
            };

            let title_style = if task.completed && !is_selected {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::raw(" "),
                selection_indicator,
                priority_indicator,
                checkbox,
                Span::styled(task.title.clone(), title_style),
            ];

            if !task.category.is_empty() {
                spans.push(Span::styled(
                    format!("  #{}", task.category),
                    Style::default().fg(Color::Magenta),
                ));
            }

            let due = task.due_date.with_timezone(&Local).format("%Y-%m-%d %H:%M");
            let due_style = if task.is_overdue() {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("  due {}", due), due_style));
            if task.is_overdue() {
                spans.push(Span::styled(" (overdue)", due_style));
            }

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

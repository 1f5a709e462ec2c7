use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use uuid::Uuid;

/// Confirmation dialog before deleting a task
pub struct ConfirmDialog {
    pub message: String,
    pub yes_selected: bool,
    pub task_id: Uuid,
}

/// Filterable pick list (used for the category filter)
pub struct SelectDialog {
    pub title: String,
    pub items: Vec<String>,
    pub selected: usize,
    pub filter: String,
}

impl SelectDialog {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            items,
            selected: 0,
            filter: String::new(),
        }
    }

    /// Items passing the typed filter, with their original indices
    pub fn filtered_items(&self) -> Vec<(usize, &String)> {
        if self.filter.is_empty() {
            return self.items.iter().enumerate().collect();
        }
        let needle = self.filter.to_lowercase();
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.to_lowercase().contains(&needle))
            .collect()
    }

    /// The currently highlighted item
    pub fn selection(&self) -> Option<&String> {
        self.filtered_items().get(self.selected).map(|(_, item)| *item)
    }

    pub fn move_down(&mut self) {
        let len = self.filtered_items().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

pub fn render_confirm(f: &mut Frame, dialog: &ConfirmDialog) {
    render_backdrop(f, f.area());

    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title("  Delete Task  ")
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(30, 33, 40)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let message = Paragraph::new(dialog.message.as_str())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(message, chunks[0]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);

    let no_style = if !dialog.yes_selected {
        Style::default().bg(Color::Red).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
    };
    let no_button = Paragraph::new("[ n ] No").style(no_style).alignment(Alignment::Center);
    f.render_widget(no_button, buttons[1]);

    let yes_style = if dialog.yes_selected {
        Style::default().bg(Color::Green).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
    };
    let yes_button = Paragraph::new("[ y ] Yes").style(yes_style).alignment(Alignment::Center);
    f.render_widget(yes_button, buttons[2]);
}

pub fn render_select(f: &mut Frame, dialog: &SelectDialog) {
    render_backdrop(f, f.area());

    let area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!("  {}  ", dialog.title))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(30, 33, 40)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // search
            Constraint::Min(0),    // list
            Constraint::Length(1), // help
        ])
        .split(inner);

    let search_text = if dialog.filter.is_empty() {
        " type to filter...".to_string()
    } else {
        format!(" {}", dialog.filter)
    };
    let search_style = if dialog.filter.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    f.render_widget(Paragraph::new(search_text).style(search_style), chunks[0]);

    let filtered = dialog.filtered_items();
    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .map(|(idx, (_, item))| {
            let is_selected = idx == dialog.selected;
            let line = if is_selected {
                Line::from(vec![
                    Span::styled("▶ ", Style::default().fg(Color::White)),
                    Span::styled(item.as_str(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                ])
            } else {
                Line::from(format!("  {}", item))
            };
            let style = if is_selected {
                Style::default().bg(Color::Rgb(41, 98, 218))
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let mut list_state = ratatui::widgets::ListState::default();
    list_state.select(Some(dialog.selected.min(filtered.len().saturating_sub(1))));
    f.render_stateful_widget(List::new(items), chunks[1], &mut list_state);

    let help = Paragraph::new(format!("↑↓ navigate  Enter select  Esc cancel  [{}/{}]", filtered.len(), dialog.items.len()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}

/// Dim the screen behind a modal
pub fn render_backdrop(f: &mut Frame, area: Rect) {
    let block = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    f.render_widget(block, area);
}

/// Centered rectangle taking the given percentages of the frame
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_dialog_filters_case_insensitively() {
        let mut dialog = SelectDialog::new("Pick", vec!["Work".into(), "Personal".into(), "workout".into()]);
        dialog.filter = "WORK".to_string();

        let filtered: Vec<&String> = dialog.filtered_items().into_iter().map(|(_, s)| s).collect();
        assert_eq!(filtered, vec!["Work", "workout"]);
    }

    #[test]
    fn test_select_dialog_navigation_stays_in_bounds() {
        let mut dialog = SelectDialog::new("Pick", vec!["a".into(), "b".into()]);
        dialog.move_up();
        assert_eq!(dialog.selected, 0);
        dialog.move_down();
        dialog.move_down();
        assert_eq!(dialog.selected, 1);
        assert_eq!(dialog.selection().map(String::as_str), Some("b"));
    }
}

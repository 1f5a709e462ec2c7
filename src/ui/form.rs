use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_textarea::TextArea;
use uuid::Uuid;

use crate::models::{Priority, Task, TaskDraft};
use super::dialogs::{centered_rect, render_backdrop};

/// Fields of the task form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Category,
    DueDate,
    Completed,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::Category,
            Self::Category => Self::DueDate,
            Self::DueDate => Self::Completed,
            Self::Completed => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Completed,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
            Self::Category => Self::Priority,
            Self::DueDate => Self::Category,
            Self::Completed => Self::DueDate,
        }
    }
}

/// Add/edit task dialog state
pub struct TaskForm {
    /// Task being edited, None when creating
    pub editing: Option<Uuid>,
    pub field: FormField,
    pub title: TextArea<'static>,
    pub description: TextArea<'static>,
    pub category: TextArea<'static>,
    pub due_date: TextArea<'static>,
    pub priority: Priority,
    pub completed: bool,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn blank() -> Self {
        Self {
            editing: None,
            field: FormField::Title,
            title: text_field(""),
            description: text_field(""),
            category: text_field(""),
            due_date: text_field(&format_due_date(Utc::now())),
            priority: Priority::default(),
            completed: false,
            error: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            field: FormField::Title,
            title: text_field(&task.title),
            description: text_field(&task.description),
            category: text_field(&task.category),
            due_date: text_field(&format_due_date(task.due_date)),
            priority: task.priority,
            completed: task.completed,
            error: None,
        }
    }

    /// The textarea behind the focused field, if it is a text field
    pub fn active_text_field(&mut self) -> Option<&mut TextArea<'static>> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Category => Some(&mut self.category),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Priority | FormField::Completed => None,
        }
    }

    /// Validate the form and build a draft. Title emptiness is checked here,
    /// in the presentation layer; the store accepts whatever it is given.
    pub fn draft(&self) -> Result<TaskDraft, String> {
        let title = self.title.lines().join(" ").trim().to_string();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }

        let due_date = parse_due_date(&self.due_date.lines().join(" "))?;

        Ok(TaskDraft {
            title,
            description: self.description.lines().join("\n").trim_end().to_string(),
            completed: self.completed,
            priority: self.priority,
            category: self.category.lines().join(" ").trim().to_string(),
            due_date,
        })
    }
}

fn text_field(initial: &str) -> TextArea<'static> {
    let mut textarea = if initial.is_empty() {
        TextArea::default()
    } else {
        TextArea::from(initial.lines().map(|s| s.to_string()))
    };
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(Style::default().bg(Color::Cyan).fg(Color::Black));
    textarea
}

/// Format a due date for the form input, in local time
pub fn format_due_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Parse the due date input: "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" in local
/// time; empty means now
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Utc::now());
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .or_else(|_| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight is valid"))
        })
        .map_err(|_| format!("Invalid due date '{}' (expected YYYY-MM-DD or YYYY-MM-DD HH:MM)", input))?;

    Local
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous local time '{}'", input))
}

/// Render the form as a centered modal
pub fn render(f: &mut Frame, form: &TaskForm) {
    render_backdrop(f, f.area());

    let area = centered_rect(60, 80, f.area());
    f.render_widget(Clear, area);

    let title = if form.editing.is_some() {
        "  Edit Task  "
    } else {
        "  New Task  "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(30, 33, 40)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(5),    // description
            Constraint::Length(3), // priority
            Constraint::Length(3), // category
            Constraint::Length(3), // due date
            Constraint::Length(1), // completed
            Constraint::Length(1), // error
            Constraint::Length(1), // hint
        ])
        .split(inner);

    render_text_row(f, rows[0], " Title ", &form.title, form.field == FormField::Title);
    render_text_row(f, rows[1], " Description ", &form.description, form.field == FormField::Description);
    render_choice_row(
        f,
        rows[2],
        " Priority ",
        &format!("‹ {} ›", form.priority),
        priority_color(form.priority),
        form.field == FormField::Priority,
    );
    render_text_row(f, rows[3], " Category ", &form.category, form.field == FormField::Category);
    render_text_row(f, rows[4], " Due date ", &form.due_date, form.field == FormField::DueDate);

    let completed_marker = if form.completed { "[x]" } else { "[ ]" };
    let completed_style = if form.field == FormField::Completed {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let completed = Paragraph::new(format!(" {} Mark as completed (space)", completed_marker)).style(completed_style);
    f.render_widget(completed, rows[5]);

    if let Some(error) = &form.error {
        let error_line = Paragraph::new(Line::from(error.as_str())).style(Style::default().fg(Color::Red));
        f.render_widget(error_line, rows[6]);
    }

    let hint = Paragraph::new(" Tab next field  Ctrl+S save  Esc cancel")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, rows[7]);
}

fn render_text_row(f: &mut Frame, area: Rect, label: &str, textarea: &TextArea<'static>, active: bool) {
    let border_color = if active { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    if active {
        f.render_widget(textarea, inner);
    } else {
        // Inactive fields render as plain text so only one cursor is visible
        let content = textarea.lines().join("\n");
        let paragraph = Paragraph::new(content).style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
    }
}

fn render_choice_row(f: &mut Frame, area: Rect, label: &str, value: &str, value_color: Color, active: bool) {
    let border_color = if active { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let paragraph = Paragraph::new(value).style(Style::default().fg(value_color));
    f.render_widget(paragraph, inner);
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_due_date_with_time() {
        let parsed = parse_due_date("2025-03-10 14:30").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2025-03-10 14:30");
    }

    #[test]
    fn test_parse_due_date_date_only_is_midnight() {
        let parsed = parse_due_date("2025-03-10").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2025-03-10 00:00");
    }

    #[test]
    fn test_parse_due_date_rejects_garbage() {
        assert!(parse_due_date("tomorrow").is_err());
        assert!(parse_due_date("2025-13-40").is_err());
    }

    #[test]
    fn test_due_date_format_parse_round_trip() {
        let formatted = format_due_date(Utc::now());
        assert!(parse_due_date(&formatted).is_ok());
    }

    #[test]
    fn test_blank_form_requires_title() {
        let form = TaskForm::blank();
        assert_eq!(form.draft().unwrap_err(), "Title is required");
    }

    #[test]
    fn test_form_field_tab_order_is_a_cycle() {
        let mut field = FormField::Title;
        for _ in 0..6 {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Completed);
    }
}

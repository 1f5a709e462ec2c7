use crate::app::{App, Mode, NotificationLevel, View};
use crate::models::{FilterPatch, PriorityFilter, StatusFilter, TaskPatch};
use crate::ui::dialogs::{ConfirmDialog, SelectDialog};
use crate::ui::form::{FormField, TaskForm};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Entry shown in the category picker that clears the category filter
const ALL_CATEGORIES: &str = "All categories";

/// Handle a key press
/// Returns false when the application should quit
pub fn handle_key_input(app: &mut App, key: KeyEvent) -> bool {
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key),
        Mode::Form => handle_form_mode(app, key),
        Mode::Confirm => handle_confirm_mode(app, key),
        Mode::CategorySelect => handle_category_select_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
        }
        KeyCode::Tab => {
            app.view = match app.view {
                View::Tasks => View::Dashboard,
                View::Dashboard => View::Tasks,
            };
        }
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') => app.selected_index = 0,
        KeyCode::Char('G') => {
            let len = app.store.filtered_tasks().len();
            app.selected_index = len.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            app.form = Some(TaskForm::blank());
            app.mode = Mode::Form;
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(task) = app.selected_task_id().and_then(|id| app.store.get(id)) {
                app.form = Some(TaskForm::edit(task));
                app.mode = Mode::Form;
            }
        }
        KeyCode::Char('x') | KeyCode::Char(' ') => {
            if let Some(id) = app.selected_task_id() {
                app.store.toggle_completion(id);
                app.clamp_selection();
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_task_id() {
                if app.config.confirm_delete {
                    let title = app.store.get(id).map(|t| t.title.clone()).unwrap_or_default();
                    app.confirm = Some(ConfirmDialog {
                        message: format!("Delete task \"{}\"?\nThis cannot be undone.", title),
                        yes_selected: false,
                        task_id: id,
                    });
                    app.mode = Mode::Confirm;
                } else {
                    app.store.delete_task(id);
                    app.clamp_selection();
                    app.notify(NotificationLevel::Success, "Task deleted");
                }
            }
        }
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
        }
        KeyCode::Char('s') => {
            let next = app.store.filter().status.next();
            app.store.set_filter(FilterPatch {
                status: Some(next),
                ..Default::default()
            });
            app.clamp_selection();
        }
        KeyCode::Char('p') => {
            let next = app.store.filter().priority.next();
            app.store.set_filter(FilterPatch {
                priority: Some(next),
                ..Default::default()
            });
            app.clamp_selection();
        }
        KeyCode::Char('c') => {
            let categories = app.store.distinct_categories();
            if categories.is_empty() {
                app.notify(NotificationLevel::Info, "No categories yet");
            } else {
                let mut items = vec![ALL_CATEGORIES.to_string()];
                items.extend(categories);
                app.category_select = Some(SelectDialog::new("Filter by Category", items));
                app.mode = Mode::CategorySelect;
            }
        }
        KeyCode::Char('r') => {
            app.store.set_filter(FilterPatch {
                search: Some(String::new()),
                status: Some(StatusFilter::All),
                priority: Some(PriorityFilter::All),
                category: Some(String::new()),
            });
            app.clamp_selection();
            app.notify(NotificationLevel::Info, "Filters reset");
        }
        KeyCode::Char('y') => app.yank_selected(),
        _ => {}
    }
    true
}

fn handle_search_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            // Esc abandons the search text
            app.store.set_filter(FilterPatch {
                search: Some(String::new()),
                ..Default::default()
            });
            app.clamp_selection();
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            let mut search = app.store.filter().search.clone();
            search.pop();
            app.store.set_filter(FilterPatch {
                search: Some(search),
                ..Default::default()
            });
            app.clamp_selection();
        }
        KeyCode::Char(c) => {
            let mut search = app.store.filter().search.clone();
            search.push(c);
            app.store.set_filter(FilterPatch {
                search: Some(search),
                ..Default::default()
            });
            app.clamp_selection();
        }
        _ => {}
    }
    true
}

fn handle_form_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(form) = &mut app.form else {
        app.mode = Mode::Normal;
        return true;
    };

    // Ctrl+S saves from any field
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        submit_form(app);
        return true;
    }

    match key.code {
        KeyCode::Esc => {
            app.form = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Tab => form.field = form.field.next(),
        KeyCode::BackTab => form.field = form.field.prev(),
        KeyCode::Up if form.field != FormField::Description => form.field = form.field.prev(),
        KeyCode::Down if form.field != FormField::Description => form.field = form.field.next(),
        _ => match form.field {
            FormField::Priority => match key.code {
                KeyCode::Left | KeyCode::Char('h') => form.priority = form.priority.prev(),
                KeyCode::Right | KeyCode::Char('l') => form.priority = form.priority.next(),
                KeyCode::Enter => submit_form(app),
                _ => {}
            },
            FormField::Completed => match key.code {
                KeyCode::Char(' ') => form.completed = !form.completed,
                KeyCode::Enter => submit_form(app),
                _ => {}
            },
            FormField::Description => {
                if let Some(textarea) = form.active_text_field() {
                    textarea.input(key);
                }
            }
            // Single-line text fields: Enter submits instead of inserting a
            // newline
            _ => {
                if key.code == KeyCode::Enter {
                    submit_form(app);
                } else if let Some(textarea) = form.active_text_field() {
                    textarea.input(key);
                }
            }
        },
    }
    true
}

fn submit_form(app: &mut App) {
    let Some(form) = &mut app.form else {
        return;
    };

    match form.draft() {
        Ok(draft) => {
            let message = if let Some(id) = form.editing {
                app.store.update_task(
                    id,
                    TaskPatch {
                        title: Some(draft.title),
                        description: Some(draft.description),
                        completed: Some(draft.completed),
                        priority: Some(draft.priority),
                        category: Some(draft.category),
                        due_date: Some(draft.due_date),
                    },
                );
                "Task updated"
            } else {
                app.store.add_task(draft);
                "Task added"
            };
            app.form = None;
            app.mode = Mode::Normal;
            app.clamp_selection();
            app.notify(NotificationLevel::Success, message);
        }
        Err(error) => {
            form.error = Some(error);
        }
    }
}

fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(confirm) = &mut app.confirm else {
        app.mode = Mode::Normal;
        return true;
    };

    match key.code {
        KeyCode::Char('y') => {
            let id = confirm.task_id;
            app.confirm = None;
            app.mode = Mode::Normal;
            app.store.delete_task(id);
            app.clamp_selection();
            app.notify(NotificationLevel::Success, "Task deleted");
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.confirm = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            confirm.yes_selected = !confirm.yes_selected;
        }
        KeyCode::Enter => {
            let confirmed = confirm.yes_selected;
            let id = confirm.task_id;
            app.confirm = None;
            app.mode = Mode::Normal;
            if confirmed {
                app.store.delete_task(id);
                app.clamp_selection();
                app.notify(NotificationLevel::Success, "Task deleted");
            }
        }
        _ => {}
    }
    true
}

fn handle_category_select_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(select) = &mut app.category_select else {
        app.mode = Mode::Normal;
        return true;
    };

    match key.code {
        KeyCode::Esc => {
            app.category_select = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Down => select.move_down(),
        KeyCode::Up => select.move_up(),
        KeyCode::Backspace => {
            select.filter.pop();
            select.selected = 0;
        }
        KeyCode::Char(c) => {
            select.filter.push(c);
            select.selected = 0;
        }
        KeyCode::Enter => {
            let choice = select
                .filtered_items()
                .get(select.selected)
                .map(|(idx, item)| (*idx, (*item).clone()));
            app.category_select = None;
            app.mode = Mode::Normal;

            if let Some((idx, category)) = choice {
                let category = if idx == 0 { String::new() } else { category };
                app.store.set_filter(FilterPatch {
                    category: Some(category),
                    ..Default::default()
                });
                app.clamp_selection();
            }
        }
        _ => {}
    }
    true
}

fn handle_help_mode(app: &mut App, key: KeyEvent) -> bool {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
        app.mode = Mode::Normal;
    }
    true
}

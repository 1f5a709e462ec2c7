use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::config::Config;
use crate::store::TaskStore;
use crate::store::storage::JsonFileStorage;
use crate::ui::dialogs::{ConfirmDialog, SelectDialog};
use crate::ui::form::TaskForm;

/// Notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient notification banner
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    /// Notifications disappear after 3 seconds
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= 3
    }
}

/// Which screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Tasks,
    Dashboard,
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation and single-key commands
    Normal,
    /// Typing into the live search filter
    Search,
    /// Add/edit task form
    Form,
    /// Delete confirmation
    Confirm,
    /// Category filter picker
    CategorySelect,
    /// Keybinding help overlay
    Help,
}

/// Application state
pub struct App {
    pub store: TaskStore,
    pub config: Config,
    pub view: View,
    pub mode: Mode,
    /// Selected row in the filtered task list
    pub selected_index: usize,
    pub form: Option<TaskForm>,
    pub confirm: Option<ConfirmDialog>,
    pub category_select: Option<SelectDialog>,
    pub notification: Option<Notification>,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = crate::config::load_config()?;
        let storage = JsonFileStorage::new(crate::config::tasks_file_path(&config));
        let store = TaskStore::open(Box::new(storage));

        let mut app = Self {
            store,
            config,
            view: View::Tasks,
            mode: Mode::Normal,
            selected_index: 0,
            form: None,
            confirm: None,
            category_select: None,
            notification: None,
        };

        if let Ok(state) = crate::state::load_state() {
            crate::state::apply_state(&mut app, state);
        }

        Ok(app)
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        crate::input::handle_key_input(self, key)
    }

    /// Expire the notification banner
    pub fn tick(&mut self) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired()) {
            self.notification = None;
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            created_at: Instant::now(),
        });
    }

    /// Id of the task under the cursor in the filtered list
    pub fn selected_task_id(&self) -> Option<Uuid> {
        self.store.filtered_tasks().get(self.selected_index).map(|t| t.id)
    }

    /// Keep the cursor inside the filtered list after mutations or filter
    /// changes
    pub fn clamp_selection(&mut self) {
        let len = self.store.filtered_tasks().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.store.filtered_tasks().len();
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Copy the selected task's title and description to the system
    /// clipboard
    #[cfg(feature = "clipboard")]
    pub fn yank_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let Some(task) = self.store.get(id) else {
            return;
        };

        let text = if task.description.is_empty() {
            task.title.clone()
        } else {
            format!("{}\n{}", task.title, task.description)
        };

        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.notify(NotificationLevel::Success, "Task copied to clipboard"),
            Err(e) => self.notify(NotificationLevel::Error, format!("Clipboard error: {}", e)),
        }
    }

    #[cfg(not(feature = "clipboard"))]
    pub fn yank_selected(&mut self) {
        self.notify(NotificationLevel::Warning, "Built without clipboard support");
    }
}

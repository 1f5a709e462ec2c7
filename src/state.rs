//! Session state persistence
//!
//! Remembers the last view and selected row between runs. The active filter
//! is intentionally not part of this file; filter state lives only for the
//! session.

use crate::app::View;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub view: View,
    pub selected_index: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Tasks,
            selected_index: 0,
        }
    }
}

fn get_state_file_path() -> PathBuf {
    crate::config::data_dir().join("state.json")
}

pub fn extract_state(app: &crate::app::App) -> AppState {
    AppState {
        view: app.view,
        selected_index: app.selected_index,
    }
}

pub fn save_state(state: &AppState) -> Result<()> {
    let state_path = get_state_file_path();

    if let Some(parent) = state_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(state_path, json)?;

    Ok(())
}

pub fn load_state() -> Result<AppState> {
    let state_path = get_state_file_path();

    if !state_path.exists() {
        return Ok(AppState::default());
    }

    let content = std::fs::read_to_string(state_path)?;
    let state: AppState = serde_json::from_str(&content)?;

    Ok(state)
}

pub fn apply_state(app: &mut crate::app::App, state: AppState) {
    app.view = state.view;
    app.selected_index = state.selected_index;
    app.clamp_selection();
}

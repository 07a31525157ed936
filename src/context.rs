//! Application Context
//!
//! Configuration, API client and theme provided via Leptos Context API.

use leptos::prelude::*;
use log::warn;

use crate::api::StoreApi;
use crate::config::AppConfig;
use crate::storage::{BrowserStorage, KeyValueStore};

pub const DARK_MODE_KEY: &str = "darkMode";

/// App-wide values provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<AppConfig>,
    /// Shared HTTP client for the REST collaborator
    pub api: StoredValue<StoreApi, LocalStorage>,
    /// Dark mode flag - read
    pub dark_mode: ReadSignal<bool>,
    /// Dark mode flag - write
    set_dark_mode: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let api = StoredValue::new_local(StoreApi::new(&config));
        let (dark_mode, set_dark_mode) = signal(load_dark_mode(&BrowserStorage));
        Self {
            config: StoredValue::new(config),
            api,
            dark_mode,
            set_dark_mode,
        }
    }

    /// Flip dark mode and remember the choice
    pub fn toggle_dark_mode(&self) {
        let enabled = !self.dark_mode.get_untracked();
        self.set_dark_mode.set(enabled);
        if let Err(e) = BrowserStorage.set(DARK_MODE_KEY, if enabled { "true" } else { "false" }) {
            warn!("could not persist theme: {}", e);
        }
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

fn load_dark_mode(storage: &impl KeyValueStore) -> bool {
    storage.get(DARK_MODE_KEY).as_deref() == Some("true")
}

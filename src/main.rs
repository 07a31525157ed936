//! Storefront Frontend Entry Point

mod api;
mod app;
mod bookmarks;
mod catalog;
mod components;
mod config;
mod context;
mod error;
mod models;
mod route;
mod storage;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use log::info;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_document();
    if let Err(e) = console_logger::init_logger(config.log_level, console_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
    }
    info!("storefront starting, api at {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}

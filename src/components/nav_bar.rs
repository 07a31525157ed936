//! Navigation Bar Component
//!
//! Title link back to the catalog and the dark mode toggle.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::route::Route;

/// Top navigation bar
#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();

    let toggle_theme = move |_| ctx.toggle_dark_mode();

    view! {
        <nav class="navbar">
            <a class="navbar-title" href=Route::Catalog.href()>"🏬 Stores Gallery"</a>
            <button
                class="navbar-btn theme"
                title=move || if ctx.dark_mode.get() { "Switch to light mode" } else { "Switch to dark mode" }
                on:click=toggle_theme
            >
                {move || if ctx.dark_mode.get() { "☀️" } else { "🌙" }}
            </button>
        </nav>
    }
}

//! Category Sidebar Component
//!
//! Paged category list. Picking a category applies it to the catalog and
//! scrolls back to the top.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error};

use crate::api::CatalogSource;
use crate::context::use_app_context;
use crate::models::{Category, CategoryId};

#[component]
pub fn CategorySidebar(
    #[prop(into)] selected: Signal<Option<CategoryId>>,
    #[prop(into)] on_select: Callback<CategoryId>,
) -> impl IntoView {
    let ctx = use_app_context();
    let page_size = ctx.config.with_value(|c| c.category_page_size);

    let (page, set_page) = signal(1u32);
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (failed, set_failed) = signal(false);

    // Load categories whenever the page changes
    Effect::new(move |_| {
        let page = page.get();
        let api = ctx.api.get_value();
        spawn_local(async move {
            match api.list_categories(Some(page)).await {
                Ok(loaded) => {
                    debug!("category page {}: {} entries", page, loaded.len());
                    set_failed.set(false);
                    set_categories.set(loaded);
                }
                Err(e) => {
                    error!("failed to load categories: {}", e);
                    set_failed.set(true);
                }
            }
        });
    });

    // A short page means there is no next one
    let has_next = move || categories.with(|list| list.len() == page_size);

    let pick = move |id: CategoryId| {
        on_select.run(id);
        if let Some(win) = web_sys::window() {
            win.scroll_to_with_x_and_y(0.0, 0.0);
        }
    };

    view! {
        <aside class="category-sidebar">
            <h3 class="sidebar-title">"Categories"</h3>
            <Show when=move || failed.get()>
                <p class="sidebar-error">"Categories unavailable"</p>
            </Show>
            <ul class="category-list">
                <For
                    each=move || categories.get()
                    key=|category| category.id
                    children=move |category| {
                        let id = category.id;
                        view! {
                            <li
                                class=move || if selected.get() == Some(id) { "category-item selected" } else { "category-item" }
                                title=category.description
                                on:click=move |_| pick(id)
                            >
                                {category.name}
                            </li>
                        }
                    }
                />
            </ul>
            <div class="sidebar-pager">
                <button
                    disabled=move || page.get() <= 1
                    on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Prev"
                </button>
                <span class="sidebar-page">{move || page.get()}</span>
                <button
                    disabled=move || !has_next()
                    on:click=move |_| set_page.update(|p| *p += 1)
                >
                    "Next"
                </button>
            </div>
        </aside>
    }
}

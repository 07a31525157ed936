//! Store Catalog Component
//!
//! Owns the catalog controller and connects it to the controls, the grid, the
//! infinite-scroll sensor, bookmarks and the address bar.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn, Level};
use reactive_stores::Store;
use web_sys::Element;

use crate::api::CatalogSource;
use crate::bookmarks::BookmarkSet;
use crate::catalog::{execute, CatalogController, FetchOutcome, FetchRequest, FilterUpdate};
use crate::components::{CategorySidebar, FilterBar, StoreCard};
use crate::context::use_app_context;
use crate::models::{CategoryId, StoreId};
use crate::route::{current_query_string, replace_query_string};
use crate::storage::BrowserStorage;
use crate::store::{
    store_is_bookmarked, store_set_bookmarks, store_sync_controller, CatalogState,
    CatalogStateStoreFields, CatalogStore,
};

/// Log lines shown under the error banner
const RECENT_ERROR_LINES: usize = 5;

/// Run one controller operation, returning the request it issued (if any)
fn drive(
    controller: StoredValue<CatalogController>,
    op: impl FnOnce(&mut CatalogController) -> Option<FetchRequest>,
) -> Option<FetchRequest> {
    let mut request = None;
    controller.update_value(|c| request = op(c));
    request
}

/// Catalog page: sidebar, filter bar and infinitely scrolling grid
#[component]
pub fn StoreCatalog() -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config.get_value();

    let state: CatalogStore = Store::new(CatalogState::default());

    let controller = StoredValue::new(CatalogController::new(config.page_size));
    let bookmarks = StoredValue::new(BookmarkSet::load(BrowserStorage));
    bookmarks.with_value(|b| store_set_bookmarks(&state, b.ids()));

    // Mirror the controller into the view store and the address bar
    let sync = move || {
        controller.with_value(|c| {
            store_sync_controller(&state, c);
            replace_query_string(c.query_string());
        });
    };

    // Send a page request and fold the response back in
    let run = move |request: FetchRequest| {
        sync();
        let api = ctx.api.get_value();
        spawn_local(async move {
            let result = execute(&api, &request).await;
            let mut outcome = FetchOutcome::Stale;
            controller.update_value(|c| {
                outcome = bookmarks.with_value(|b| c.complete(&request, result, b));
            });

            match outcome {
                FetchOutcome::Applied { received, shown } => {
                    debug!("page {} applied: {} received, {} shown", request.page, received, shown);
                    state.last_error().set(None);
                }
                FetchOutcome::Stale => return,
                FetchOutcome::Failed(e) => {
                    state.last_error().set(Some(e.to_string()));
                }
            }
            sync();
        });
    };

    // Restore filters from the URL and load the first page on mount
    Effect::new(move |_| {
        let qs = current_query_string();
        if let Some(request) = drive(controller, |c| Some(c.load_from_query_string(&qs))) {
            info!("catalog loaded with filters {:?}", qs);
            run(request);
        }
    });

    // Full category list for the dropdown
    Effect::new(move |_| {
        let api = ctx.api.get_value();
        spawn_local(async move {
            match api.list_categories(None).await {
                Ok(categories) => state.categories().set(categories),
                Err(e) => error!("failed to load categories: {}", e),
            }
        });
    });

    let on_update = Callback::new(move |update: FilterUpdate| {
        if let Some(request) = drive(controller, |c| Some(c.set_filter(update))) {
            run(request);
        }
    });

    let on_clear = Callback::new(move |_: ()| {
        if let Some(request) = drive(controller, |c| Some(c.clear_all())) {
            run(request);
        }
    });

    let on_select_category = Callback::new(move |id: CategoryId| {
        on_update.run(FilterUpdate::Category(Some(id)));
    });

    let on_toggle_bookmark = Callback::new(move |id: StoreId| {
        let mut bookmarked = false;
        bookmarks.update_value(|b| bookmarked = b.toggle(id));
        bookmarks.with_value(|b| store_set_bookmarks(&state, b.ids()));
        info!("store {} {}", id, if bookmarked { "bookmarked" } else { "unbookmarked" });
    });

    let load_more = move |_: web_sys::MouseEvent| {
        if let Some(request) = drive(controller, |c| c.load_more()) {
            run(request);
        }
    };

    // Infinite scroll: watch the last card in the grid
    let grid_ref = NodeRef::<html::Div>::new();
    let sensor = leptos_viewport::watch_last_child(
        grid_ref,
        move || state.items().read().last().map(|s| s.id),
        move |el: Element, visible: bool| {
            let id = el.get_attribute("data-store-id").and_then(|v| v.parse::<StoreId>().ok());
            let Some(id) = id else { return };
            if !visible {
                controller.update_value(|c| c.on_last_item_hidden(id));
                return;
            }
            if let Some(request) = drive(controller, |c| c.on_last_item_visible(id)) {
                run(request);
            }
        },
    );
    if let Err(e) = sensor {
        warn!("infinite scroll unavailable, falling back to the load more button: {:?}", e);
    }

    let is_empty = move || state.items().read().is_empty();
    let loading = move || state.loading().get();

    view! {
        <div class="catalog-layout">
            <CategorySidebar
                selected=Signal::derive(move || state.filter().read().category)
                on_select=on_select_category
            />

            <main class="catalog-main">
                <FilterBar
                    filter=Signal::derive(move || state.filter().get())
                    categories=Signal::derive(move || state.categories().get())
                    debounce_ms=config.search_debounce_ms
                    on_update=on_update
                    on_clear=on_clear
                />

                {move || state.last_error().get().map(|message| {
                    let lines: Vec<String> = console_logger::recent(Some(Level::Error))
                        .iter()
                        .rev()
                        .take(RECENT_ERROR_LINES)
                        .map(|entry| entry.line())
                        .collect();
                    view! {
                        <div class="catalog-error">
                            <p>{format!("Could not load stores: {}", message)}</p>
                            <details class="catalog-error-log">
                                <summary>"Recent errors"</summary>
                                <ul>
                                    {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                                </ul>
                            </details>
                        </div>
                    }
                })}

                <div class="store-grid" node_ref=grid_ref>
                    <For
                        each=move || state.items().get()
                        key=|store| store.id
                        children=move |store| {
                            let id = store.id;
                            view! {
                                <StoreCard
                                    store=store
                                    bookmarked=Signal::derive(move || store_is_bookmarked(&state, id))
                                    on_toggle_bookmark=on_toggle_bookmark
                                />
                            }
                        }
                    />
                </div>

                <Show when=move || is_empty() && !loading()>
                    <p class="catalog-empty">"No stores found"</p>
                </Show>
                <Show when=loading>
                    <p class="catalog-loading">"Loading..."</p>
                </Show>
                // Also the way forward when a bookmark-filtered page comes back empty
                <Show when=move || !loading() && state.has_more().get()>
                    <button class="load-more-btn" on:click=load_more>"Load more"</button>
                </Show>
            </main>
        </div>
    }
}

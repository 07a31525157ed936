//! Store Card Component
//!
//! One tile in the catalog grid: logo, name, cashback line, badges and the
//! bookmark toggle.

use leptos::prelude::*;

use crate::models::{Store, StoreId};
use crate::route::Route;

/// Catalog tile
///
/// The root element carries `data-store-id`; the infinite-scroll sensor reads
/// it back to tell which item became visible.
#[component]
pub fn StoreCard(
    store: Store,
    #[prop(into)] bookmarked: Signal<bool>,
    #[prop(into)] on_toggle_bookmark: Callback<StoreId>,
) -> impl IntoView {
    let id = store.id;
    let href = Route::StoreDetail(id).href();
    let cashback = store.cashback_label();
    let has_cashback = store.cashback_enabled;
    let logo_alt = format!("{} logo", store.name);
    let promoted = store.is_promoted;
    let shareable = store.is_shareable;
    let status = store.status.label();
    let visits = format!("{} visits", store.visits);

    view! {
        <div class="store-card" data-store-id=id.to_string()>
            <button
                class=move || if bookmarked.get() { "bookmark-btn active" } else { "bookmark-btn" }
                title=move || if bookmarked.get() { "Remove bookmark" } else { "Bookmark" }
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_toggle_bookmark.run(id);
                }
            >
                {move || if bookmarked.get() { "★" } else { "☆" }}
            </button>

            <a class="store-card-link" href=href>
                <img class="store-logo" src=store.logo alt=logo_alt loading="lazy" />
                <h3 class="store-name">{store.name}</h3>
            </a>

            <p class=if has_cashback { "store-cashback" } else { "store-cashback none" }>{cashback}</p>

            <div class="store-badges">
                <Show when=move || promoted>
                    <span class="badge promoted">"Promoted"</span>
                </Show>
                <Show when=move || shareable>
                    <span class="badge shareable">"Shareable"</span>
                </Show>
                <span class="badge status">{status}</span>
            </div>

            <span class="store-visits">{visits}</span>
        </div>
    }
}

//! Store Details Component
//!
//! Single store page at `/store/<id>`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::api::CatalogSource;
use crate::context::use_app_context;
use crate::models::{Store, StoreId};
use crate::route::Route;

#[derive(Debug, Clone, PartialEq)]
enum DetailState {
    Loading,
    Loaded(Store),
    NotFound,
    Failed(String),
}

#[component]
pub fn StoreDetails(id: StoreId) -> impl IntoView {
    let ctx = use_app_context();
    let (detail, set_detail) = signal(DetailState::Loading);

    Effect::new(move |_| {
        let api = ctx.api.get_value();
        spawn_local(async move {
            let next = match api.get_store(id).await {
                Ok(Some(store)) => DetailState::Loaded(store),
                Ok(None) => DetailState::NotFound,
                Err(e) => {
                    error!("failed to load store {}: {}", id, e);
                    DetailState::Failed(e.to_string())
                }
            };
            set_detail.set(next);
        });
    });

    let back = Route::Catalog.href();

    view! {
        <div class="store-details">
            <a class="back-link" href=back>"← All stores"</a>
            {move || match detail.get() {
                DetailState::Loading => view! { <p class="details-loading">"Loading..."</p> }.into_any(),
                DetailState::NotFound => view! { <p class="details-missing">"Store not found"</p> }.into_any(),
                DetailState::Failed(message) => view! {
                    <p class="details-error">{format!("Could not load store: {}", message)}</p>
                }.into_any(),
                DetailState::Loaded(store) => {
                    let cashback = store.cashback_label();
                    let visits = format!("Visits: {}", store.visits);
                    let status = format!("Status: {}", store.status.label());
                    let logo_alt = format!("{} logo", store.name);
                    let homepage = store.homepage.clone();
                    let has_homepage = !homepage.is_empty();
                    view! {
                        <div class="details-card">
                            <img class="details-logo" src=store.logo alt=logo_alt />
                            <h2 class="details-name">{store.name}</h2>
                            <p class="details-status">{status}</p>
                            <p class="details-visits">{visits}</p>
                            <p class="details-cashback">{cashback}</p>
                            <Show when=move || has_homepage>
                                <a
                                    class="visit-btn"
                                    href=homepage.clone()
                                    target="_blank"
                                    rel="noopener noreferrer"
                                >
                                    "Visit Store"
                                </a>
                            </Show>
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

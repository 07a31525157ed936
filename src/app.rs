//! Storefront App
//!
//! Root component: context, theme and route selection.

use leptos::prelude::*;

use crate::components::{NavBar, StoreCatalog, StoreDetails};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::route::Route;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config);
    provide_context(ctx);

    // Every navigation is a full page load, so the route is fixed per mount
    let route = Route::current();

    let layout_class = move || if ctx.dark_mode.get() { "app-layout dark" } else { "app-layout" };

    view! {
        <div class=layout_class>
            <NavBar />
            {match route {
                Route::Catalog => view! { <StoreCatalog /> }.into_any(),
                Route::StoreDetail(id) => view! { <StoreDetails id=id /> }.into_any(),
                Route::NotFound => view! {
                    <div class="not-found">
                        <h2>"Page not found"</h2>
                        <a href=Route::Catalog.href()>"Back to all stores"</a>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

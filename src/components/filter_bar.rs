//! Filter Bar Component
//!
//! Sort, category, status and flag controls, debounced search, and the
//! alphabet strip. Every control reports a `FilterUpdate`; the owner decides
//! what to fetch.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::catalog::{AlphaFilter, FilterField, FilterState, FilterUpdate, SortOption};
use crate::models::{Category, StoreStatus};

/// Build an update from a control's raw value and hand it on
fn dispatch(on_update: Callback<FilterUpdate>, field: FilterField, value: &str) {
    match FilterUpdate::parse(field.key(), value) {
        Ok(update) => on_update.run(update),
        Err(e) => warn!("ignoring control input: {}", e),
    }
}

/// Checkbox bound to one boolean filter
#[component]
fn FlagToggle(
    field: FilterField,
    label: &'static str,
    #[prop(into)] checked: Signal<bool>,
    on_update: Callback<FilterUpdate>,
) -> impl IntoView {
    view! {
        <label class="filter-flag">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| {
                    let value = if event_target_checked(&ev) { "1" } else { "0" };
                    dispatch(on_update, field, value);
                }
            />
            {label}
        </label>
    }
}

/// Search input, applied after the keyboard has been quiet for `debounce_ms`
#[component]
fn SearchInput(
    #[prop(into)] committed: Signal<String>,
    debounce_ms: u32,
    on_update: Callback<FilterUpdate>,
) -> impl IntoView {
    let (text, set_text) = signal(committed.get_untracked());
    // Bumped on every keystroke; a timer only fires if it is still the latest
    let keystrokes = StoredValue::new(0u64);

    // Follow external changes (clear all, URL restore)
    Effect::new(move |_| set_text.set(committed.get()));

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        set_text.set(value.clone());
        keystrokes.update_value(|n| *n += 1);
        let ticket = keystrokes.get_value();
        spawn_local(async move {
            TimeoutFuture::new(debounce_ms).await;
            if keystrokes.get_value() == ticket && committed.get_untracked() != value {
                on_update.run(FilterUpdate::Search(value));
            }
        });
    };

    view! {
        <input
            class="filter-search"
            type="search"
            placeholder="Search stores..."
            prop:value=move || text.get()
            on:input=on_input
        />
    }
}

/// Catalog controls
#[component]
pub fn FilterBar(
    #[prop(into)] filter: Signal<FilterState>,
    #[prop(into)] categories: Signal<Vec<Category>>,
    debounce_ms: u32,
    #[prop(into)] on_update: Callback<FilterUpdate>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    let committed_search = Memo::new(move |_| filter.with(|f| f.search.clone()));
    let selected_category = move || filter.with(|f| f.category.map(|id| id.to_string()).unwrap_or_default());
    let selected_status = move || filter.with(|f| f.status.map(|s| s.as_str()).unwrap_or_default());

    view! {
        <div class="filter-bar">
            <div class="filter-row">
                <SearchInput
                    committed=committed_search
                    debounce_ms=debounce_ms
                    on_update=on_update
                />

                <select
                    class="filter-select"
                    prop:value=move || filter.with(|f| f.sort.as_str())
                    on:change=move |ev| dispatch(on_update, FilterField::Sort, &event_target_value(&ev))
                >
                    {SortOption::ALL.into_iter().map(|option| view! {
                        <option value=option.as_str()>{option.label()}</option>
                    }).collect_view()}
                </select>

                <select
                    class="filter-select"
                    prop:value=selected_category
                    on:change=move |ev| dispatch(on_update, FilterField::Category, &event_target_value(&ev))
                >
                    <option value="">"All categories"</option>
                    <For
                        each=move || categories.get()
                        key=|category| category.id
                        children=move |category| view! {
                            <option value=category.id.to_string()>{category.name}</option>
                        }
                    />
                </select>

                <select
                    class="filter-select"
                    prop:value=selected_status
                    on:change=move |ev| dispatch(on_update, FilterField::Status, &event_target_value(&ev))
                >
                    <option value="">"Any status"</option>
                    {StoreStatus::ALL.into_iter().map(|status| view! {
                        <option value=status.as_str()>{status.label()}</option>
                    }).collect_view()}
                </select>
            </div>

            <div class="filter-row">
                <FlagToggle
                    field=FilterField::Cashback
                    label="Cashback"
                    checked=Signal::derive(move || filter.with(|f| f.cashback_only))
                    on_update=on_update
                />
                <FlagToggle
                    field=FilterField::Promoted
                    label="Promoted"
                    checked=Signal::derive(move || filter.with(|f| f.promoted_only))
                    on_update=on_update
                />
                <FlagToggle
                    field=FilterField::Shareable
                    label="Shareable"
                    checked=Signal::derive(move || filter.with(|f| f.shareable_only))
                    on_update=on_update
                />
                <FlagToggle
                    field=FilterField::Bookmarked
                    label="Bookmarked"
                    checked=Signal::derive(move || filter.with(|f| f.bookmarked_only))
                    on_update=on_update
                />
                <button
                    class="clear-btn"
                    disabled=move || filter.with(|f| f.is_default())
                    on:click=move |_| on_clear.run(())
                >
                    "Clear all"
                </button>
            </div>

            <div class="alpha-strip">
                <button
                    class=move || if filter.with(|f| f.alpha.is_none()) { "alpha-btn selected" } else { "alpha-btn" }
                    on:click=move |_| on_update.run(FilterUpdate::Alpha(None))
                >
                    "All"
                </button>
                {AlphaFilter::all().into_iter().map(|alpha| {
                    let value = alpha.as_value();
                    let is_selected = move || filter.with(|f| f.alpha == Some(alpha));
                    view! {
                        <button
                            class=move || if is_selected() { "alpha-btn selected" } else { "alpha-btn" }
                            on:click=move |_| {
                                // Clicking the active letter clears it
                                let next = if is_selected() { None } else { Some(alpha) };
                                on_update.run(FilterUpdate::Alpha(next));
                            }
                        >
                            {value}
                        </button>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}

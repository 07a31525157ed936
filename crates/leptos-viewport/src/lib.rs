//! Leptos Viewport Utilities
//!
//! Visibility watching for Leptos using IntersectionObserver.
//! A watcher tracks one element at a time; watching a new element drops the
//! previous watch.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Extra space below the viewport that already counts as visible,
/// so the next page starts loading slightly before the user hits the bottom.
pub const DEFAULT_ROOT_MARGIN: &str = "0px 0px 200px 0px";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Single-element visibility watcher
pub struct VisibilityWatcher {
    observer: IntersectionObserver,
    watched: Option<Element>,
    _callback: ObserverCallback,
}

impl VisibilityWatcher {
    /// Create a watcher that calls `on_change(element, visible)` each time the
    /// watched element enters or leaves the viewport. `observe` always delivers
    /// one initial report.
    pub fn new<F>(root_margin: &str, mut on_change: F) -> Result<Self, JsValue>
    where
        F: FnMut(Element, bool) + 'static,
    {
        let callback = ObserverCallback::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    on_change(entry.target(), entry.is_intersecting());
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            watched: None,
            _callback: callback,
        })
    }

    /// Watch `element`, discarding any previous watch
    pub fn watch(&mut self, element: &Element) {
        self.unwatch();
        self.observer.observe(element);
        self.watched = Some(element.clone());
    }

    /// Stop watching the current element, if any
    pub fn unwatch(&mut self) {
        if let Some(previous) = self.watched.take() {
            self.observer.unobserve(&previous);
        }
    }
}

impl Drop for VisibilityWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Watch the last child element of `container`.
///
/// The element is (re-)observed after the next animation frame whenever the
/// key returned by `last_key` changes; re-renders with the same key keep the
/// current observation, so no synthetic initial report is produced. A `None`
/// key leaves nothing watched. The watcher is disconnected when the owning
/// reactive scope is cleaned up.
pub fn watch_last_child<K, F>(
    container: NodeRef<html::Div>,
    last_key: impl Fn() -> Option<K> + 'static,
    on_change: F,
) -> Result<(), JsValue>
where
    K: PartialEq + 'static,
    F: FnMut(Element, bool) + 'static,
{
    let watcher = VisibilityWatcher::new(DEFAULT_ROOT_MARGIN, on_change)?;
    let watcher = StoredValue::new_local(Some(watcher));
    let watched_key = StoredValue::new_local(None::<K>);

    Effect::new(move |_| {
        let key = last_key();
        if watched_key.with_value(|previous| *previous == key) {
            return;
        }
        let has_items = key.is_some();
        watched_key.update_value(|previous| *previous = key);

        request_animation_frame(move || {
            watcher.update_value(|slot| {
                let Some(watcher) = slot.as_mut() else { return };
                let last = if has_items {
                    container.get_untracked().and_then(|el| el.last_element_child())
                } else {
                    None
                };
                match last {
                    Some(el) => watcher.watch(&el),
                    None => watcher.unwatch(),
                }
            });
        });
    });

    on_cleanup(move || {
        watcher.update_value(|slot| {
            slot.take();
        });
    });

    Ok(())
}

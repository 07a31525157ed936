//! UI Components
//!
//! Leptos components for the catalog and store pages.

mod category_sidebar;
mod filter_bar;
mod nav_bar;
mod store_card;
mod store_catalog;
mod store_details;

pub use category_sidebar::CategorySidebar;
pub use filter_bar::FilterBar;
pub use nav_bar::NavBar;
pub use store_card::StoreCard;
pub use store_catalog::StoreCatalog;
pub use store_details::StoreDetails;

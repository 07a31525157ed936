//! Catalog State Machine
//!
//! Filter state, query building, page accumulation and infinite scroll,
//! independent of the rendering layer.

mod accumulator;
mod controller;
mod filter;
mod gateway;
mod query;
mod scroll;

#[cfg(test)]
mod tests;

pub use controller::CatalogController;
pub use filter::{AlphaFilter, FilterField, FilterState, FilterUpdate, SortOption};
pub use gateway::{execute, FetchOutcome, FetchRequest};
pub use query::ListQuery;

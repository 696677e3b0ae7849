//! Client-side business logic: the catalog engine, pagination, selection
//! upkeep, and swap dashboard rules.

pub mod catalog;
pub mod pager;
pub mod selection;
pub mod swaps;

pub use catalog::filter_and_sort;
pub use selection::{apply_filters_preserve_selection, move_selection};

pub mod base;
pub mod fs_store;

// Re-export the primary Store items so code outside can do
// "use crate::store::{PageStore, create_store};"
pub use base::{create_store, PageStore, StoreError};
pub use fs_store::{FsPageStore, PAGE_EXTENSION};

pub mod page;

pub use page::{PageSummary, Slug, MAX_SLUG_LEN};

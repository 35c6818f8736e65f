//! Persistence for scrape results
//!
//! Results are exported as `{results, summary}` JSON documents through the
//! [`ResultStore`] trait; [`JsonStorage`] is the file-backed implementation.

mod json;
mod traits;

pub use json::JsonStorage;
pub use traits::ResultStore;

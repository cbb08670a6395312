//! Typed access to the key-value store
//!
//! Repositories translate between storage blobs and domain values. A blob
//! that is missing or cannot be parsed never fails a load: the caller gets
//! the empty or default value and a warning is logged.

pub mod documents;
pub mod history;

pub use documents::DocumentRepository;
pub use history::HistoryRepository;

//! Storage seam between the export pipeline and the backing store

pub mod traits;

pub use traits::{RowCursor, StorageClient};

//! Storage abstraction traits
//!
//! The export pipeline only ever sees these traits. Adapters implement them
//! for a concrete backend; tests implement them in memory.

use crate::domain::{RawRow, Result, TimeRange};
use async_trait::async_trait;

/// Client for a wide-column store that can scan a table
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Check that the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`](crate::domain::StorageError::ConnectionFailed)
    /// when the backend cannot be reached.
    async fn test_connection(&self) -> Result<()>;

    /// Open a scan over `table`
    ///
    /// Rows come back in ascending row-key order. Every row holding at
    /// least one cell of `family` with a timestamp in `range` is returned,
    /// whichever qualifiers it stores. Column selection is left to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the table does not exist or the scan
    /// cannot be opened.
    async fn open_cursor(
        &self,
        table: &str,
        family: &str,
        range: TimeRange,
    ) -> Result<Box<dyn RowCursor>>;
}

/// Forward-only iterator over the rows of one scan
#[async_trait]
pub trait RowCursor: Send {
    /// Next row, or `None` once the scan is exhausted
    async fn next_row(&mut self) -> Result<Option<RawRow>>;

    /// Release server-side resources
    ///
    /// Calling `close` more than once is a no-op.
    async fn close(&mut self) -> Result<()>;
}

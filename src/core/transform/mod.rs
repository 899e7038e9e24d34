//! Row transformation
//!
//! - [`codec`] - decodes raw cell bytes into display text by declared type
//! - [`projector`] - builds one [`Record`](crate::domain::Record) per scanned row

pub mod codec;
pub mod projector;

pub use codec::{format_local_timestamp, ColumnCodec, LongRenderer, LOGGED_AT_COLUMN};
pub use projector::RowProjector;

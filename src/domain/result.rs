//! Result type alias for hbackup

use super::errors::BackupError;

/// Result type alias for hbackup operations
///
/// # Examples
///
/// ```
/// use hbackup::domain::result::Result;
/// use hbackup::domain::errors::BackupError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(BackupError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BackupError>;

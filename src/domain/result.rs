//! Result type alias for logtrack

use super::errors::LogbookError;

/// Result type alias for logtrack operations
///
/// # Examples
///
/// ```
/// use logtrack::domain::result::Result;
/// use logtrack::domain::errors::LogbookError;
///
/// fn failing_function() -> Result<()> {
///     Err(LogbookError::Validation("Invalid input".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, LogbookError>;

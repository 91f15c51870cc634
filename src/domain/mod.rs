//! Domain models and types for logtrack.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecordId`], [`OwnerId`])
//! - **Domain models** ([`LogRecord`], [`DateRange`], [`LeaveType`], [`TemplateSpec`])
//! - **Error types** ([`LogbookError`], [`ExportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, LogbookError>`]:
//!
//! ```rust
//! use logtrack::domain::{LogbookError, Result, TemplateSpec};
//!
//! fn example() -> Result<()> {
//!     let template = TemplateSpec::lookup("basic")?;
//!     assert_eq!(template.label, "Basic");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod ids;
pub mod leave;
pub mod range;
pub mod record;
pub mod result;
pub mod template;

// Re-export commonly used types for convenience
pub use errors::{ExportError, LogbookError};
pub use ids::{OwnerId, RecordId};
pub use leave::{LeaveType, WeekendSystem};
pub use range::{parse_calendar_date, DateRange, DATE_FORMAT};
pub use record::LogRecord;
pub use result::Result;
pub use template::{RequiredField, TemplateSpec};

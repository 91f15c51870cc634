//! Document rendering
//!
//! Fills `.docx` templates with the data map of a weekly payload. Supports
//! the subset of placeholder syntax the logbook templates use: scalar tags,
//! row loops and paragraph loops, with line breaks kept.

pub mod docx;
pub mod tags;

pub use docx::{is_templated_part, DocxTemplate, DOCUMENT_PART, DOCX_EXTENSION};
pub use tags::to_wordml_text;

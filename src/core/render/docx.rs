//! `.docx` template handling
//!
//! A `.docx` file is a zip archive. The main document, headers and footers are
//! compiled once when the template is parsed; rendering replays every entry
//! into a fresh archive with the templated parts filled in.

use super::tags::{compile, render_nodes, Node};
use crate::domain::ExportError;
use serde_json::{Map, Value};
use std::io::{Cursor, Read, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// File extension of rendered documents
pub const DOCX_EXTENSION: &str = "docx";

/// Main document part, required in every template
pub const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Clone)]
enum EntryContent {
    Directory,
    Binary(Vec<u8>),
    Template(Vec<Node>),
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    content: EntryContent,
}

/// A parsed `.docx` template, ready to render any number of documents
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    entries: Vec<Entry>,
}

/// Returns true for the parts placeholders are substituted in
pub fn is_templated_part(name: &str) -> bool {
    if name == DOCUMENT_PART {
        return true;
    }
    name.strip_prefix("word/")
        .filter(|rest| !rest.contains('/'))
        .is_some_and(|rest| {
            (rest.starts_with("header") || rest.starts_with("footer")) && rest.ends_with(".xml")
        })
}

impl DocxTemplate {
    /// Parses and compiles a template archive
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Render`] if the bytes are not a zip archive, the
    /// archive has no main document, or a templated part has malformed tags.
    pub fn parse(bytes: &[u8]) -> Result<Self, ExportError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ExportError::Render(format!("template is not a valid .docx archive: {e}"))
        })?;

        let mut entries = Vec::with_capacity(archive.len());
        let mut has_document = false;

        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| ExportError::Render(format!("unreadable template entry: {e}")))?;
            let name = file.name().to_string();

            if file.is_dir() {
                entries.push(Entry {
                    name,
                    content: EntryContent::Directory,
                });
                continue;
            }

            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .map_err(|e| ExportError::Render(format!("failed to read {name}: {e}")))?;

            let content = if is_templated_part(&name) {
                has_document |= name == DOCUMENT_PART;
                let xml = String::from_utf8(buf)
                    .map_err(|_| ExportError::Render(format!("{name} is not valid UTF-8")))?;
                let nodes =
                    compile(&xml).map_err(|msg| ExportError::Render(format!("{name}: {msg}")))?;
                EntryContent::Template(nodes)
            } else {
                EntryContent::Binary(buf)
            };
            entries.push(Entry { name, content });
        }

        if !has_document {
            return Err(ExportError::Render(format!(
                "template has no {DOCUMENT_PART}"
            )));
        }

        tracing::debug!(entries = entries.len(), "Parsed docx template");
        Ok(Self { entries })
    }

    /// Renders one document from `data`
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Render`] if a tag cannot be resolved or the
    /// output archive cannot be written.
    pub fn render(&self, data: &Map<String, Value>) -> Result<Vec<u8>, ExportError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            match &entry.content {
                EntryContent::Directory => writer
                    .add_directory(entry.name.as_str(), options)
                    .map_err(write_error)?,
                EntryContent::Binary(bytes) => {
                    writer
                        .start_file(entry.name.as_str(), options)
                        .map_err(write_error)?;
                    writer.write_all(bytes).map_err(write_error)?;
                }
                EntryContent::Template(nodes) => {
                    let mut out = String::new();
                    render_nodes(nodes, &mut vec![data], &mut out)
                        .map_err(|msg| ExportError::Render(format!("{}: {msg}", entry.name)))?;
                    writer
                        .start_file(entry.name.as_str(), options)
                        .map_err(write_error)?;
                    writer.write_all(out.as_bytes()).map_err(write_error)?;
                }
            }
        }

        let cursor = writer.finish().map_err(write_error)?;
        Ok(cursor.into_inner())
    }
}

fn write_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Render(format!("failed to write document: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build_docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        for (name, body) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn read_part(docx: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_templated_parts() {
        assert!(is_templated_part("word/document.xml"));
        assert!(is_templated_part("word/header1.xml"));
        assert!(is_templated_part("word/footer2.xml"));
        assert!(!is_templated_part("word/styles.xml"));
        assert!(!is_templated_part("word/_rels/header1.xml.rels"));
        assert!(!is_templated_part("[Content_Types].xml"));
    }

    #[test]
    fn test_render_fills_document_and_header() {
        let template = build_docx(&[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", "<w:t>Week {week}</w:t>"),
            ("word/header1.xml", "<w:t>{student_name}</w:t>"),
            ("word/styles.xml", "<w:t>{untouched}</w:t>"),
        ]);
        let parsed = DocxTemplate::parse(&template).unwrap();
        let data = json!({"week": "2", "student_name": "Aina"});
        let out = parsed.render(data.as_object().unwrap()).unwrap();

        assert_eq!(read_part(&out, "word/document.xml"), "<w:t>Week 2</w:t>");
        assert_eq!(read_part(&out, "word/header1.xml"), "<w:t>Aina</w:t>");
        assert_eq!(read_part(&out, "word/styles.xml"), "<w:t>{untouched}</w:t>");
        assert_eq!(read_part(&out, "[Content_Types].xml"), "<Types/>");
    }

    #[test]
    fn test_not_a_zip() {
        let err = DocxTemplate::parse(b"plain text").unwrap_err();
        assert!(matches!(err, ExportError::Render(_)));
    }

    #[test]
    fn test_missing_document_part() {
        let template = build_docx(&[("word/styles.xml", "<x/>")]);
        let err = DocxTemplate::parse(&template).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }

    #[test]
    fn test_unresolved_tag_names_part() {
        let template = build_docx(&[("word/document.xml", "<w:t>{nope}</w:t>")]);
        let parsed = DocxTemplate::parse(&template).unwrap();
        let err = parsed.render(&Map::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("word/document.xml"));
        assert!(msg.contains("{nope}"));
    }
}

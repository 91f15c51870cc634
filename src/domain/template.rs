//! Document template registry
//!
//! Templates are addressed by a short key. Each declares the identifying
//! fields the document needs and the URL its `.docx` source is fetched from.

use super::errors::LogbookError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A field the user must fill in before exporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredField {
    /// Placeholder name used inside the template
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Prompt shown when asking for the value
    pub placeholder: &'static str,
}

/// A named document template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSpec {
    /// Registry key
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// Short description
    pub description: &'static str,
    /// Fields that must be non-empty at export time
    pub required_fields: Vec<RequiredField>,
    /// Location of the `.docx` source
    pub url: String,
}

const STUDENT_ID: RequiredField = RequiredField {
    key: "student_id",
    label: "Student ID",
    placeholder: "Enter student ID",
};
const STUDENT_NAME: RequiredField = RequiredField {
    key: "student_name",
    label: "Student Name",
    placeholder: "Enter student name",
};
const INDUSTRY_NAME: RequiredField = RequiredField {
    key: "industry_name",
    label: "Industry Name",
    placeholder: "Enter industry name",
};

impl TemplateSpec {
    /// The general-purpose template
    pub fn basic() -> Self {
        Self {
            key: "basic",
            label: "Basic",
            description: "Basic template for general use",
            required_fields: vec![STUDENT_ID, STUDENT_NAME, INDUSTRY_NAME],
            url: "https://raw.githubusercontent.com/HachiroSan/log_track_template/refs/heads/main/TEMPLATE_BASIC.docx"
                .to_string(),
        }
    }

    /// The UMPSA PSM 2023 logbook template
    pub fn umpsa_psm_2023() -> Self {
        Self {
            key: "umpsa-psm-2023",
            label: "UMPSA-PSM-2023",
            description: "Template for UMPSA PSM 2023",
            required_fields: vec![
                STUDENT_ID,
                STUDENT_NAME,
                INDUSTRY_NAME,
                RequiredField {
                    key: "industry_coach_name",
                    label: "Industry Coach Name",
                    placeholder: "Enter coach name",
                },
                RequiredField {
                    key: "academic_tutor_name",
                    label: "Academic Tutor Name",
                    placeholder: "Enter tutor name",
                },
            ],
            url: "https://raw.githubusercontent.com/HachiroSan/log_track_template/refs/heads/main/TEMPLATE_PSM_2024.docx"
                .to_string(),
        }
    }

    /// Every built-in template
    pub fn all() -> Vec<Self> {
        vec![Self::basic(), Self::umpsa_psm_2023()]
    }

    /// Looks up a template by key
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the known keys when `key` is unknown.
    pub fn lookup(key: &str) -> Result<Self, LogbookError> {
        Self::all()
            .into_iter()
            .find(|t| t.key == key)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::all().iter().map(|t| t.key).collect();
                LogbookError::Configuration(format!(
                    "Unknown template '{key}'. Available templates: {}",
                    known.join(", ")
                ))
            })
    }

    /// Replaces the template URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Returns the keys of required fields that are missing or blank
    pub fn missing_fields(&self, values: &BTreeMap<String, String>) -> Vec<&'static str> {
        self.required_fields
            .iter()
            .filter(|f| values.get(f.key).map_or(true, |v| v.trim().is_empty()))
            .map(|f| f.key)
            .collect()
    }

    /// Checks that every required field has a value
    pub fn validate_fields(&self, values: &BTreeMap<String, String>) -> Result<(), LogbookError> {
        let missing = self.missing_fields(values);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LogbookError::Validation(format!(
                "Required fields missing for template '{}': {}",
                self.key,
                missing.join(", ")
            )))
        }
    }
}

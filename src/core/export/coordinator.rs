//! Export coordinator - main orchestrator for the weekly export
//!
//! Loads the owner's records, partitions them into weeks, renders one
//! document per week from the selected template and writes the archive.
//! The export is all-or-nothing: any failure leaves the output directory
//! untouched.

use crate::adapters::store::{create_log_store, LogStore};
use crate::adapters::template::{create_template_source, TemplateSource};
use crate::config::LogtrackConfig;
use crate::core::export::archive::{write_archive, ArchiveBuilder};
use crate::core::export::summary::ExportSummary;
use crate::core::partition::{partition, ExclusionOptions, WeekPayload};
use crate::core::render::{DocxTemplate, DOCX_EXTENSION};
use crate::domain::{DateRange, ExportError, OwnerId, Result, TemplateSpec};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Everything one export run needs
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Owner whose records are exported
    pub owner: OwnerId,
    /// Internship period the week numbers are counted from
    pub range: DateRange,
    /// Template to render
    pub template: TemplateSpec,
    /// Identifying fields placed in every document
    pub fields: BTreeMap<String, String>,
    /// Categories to leave out
    pub exclusions: ExclusionOptions,
    /// Directory receiving `documents.zip`
    pub output_dir: PathBuf,
    /// Stop after partitioning
    pub dry_run: bool,
}

impl ExportRequest {
    /// Builds a request from the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown template or an empty owner id.
    pub fn from_config(config: &LogtrackConfig) -> Result<Self> {
        Ok(Self {
            owner: config.user.owner_id()?,
            range: config.user.date_range(),
            template: config.export.template_spec()?,
            fields: config.export.fields.clone(),
            exclusions: config.export.exclusions,
            output_dir: config.export.output_path(),
            dry_run: config.application.dry_run,
        })
    }
}

/// Renders every weekly payload and packages the documents into a zip
///
/// Returns the archive bytes and the entry names in week order.
///
/// # Errors
///
/// Returns [`ExportError::Render`] or [`ExportError::Archive`] on the first
/// failing week; no partial archive is returned.
pub fn build_archive(
    template: &DocxTemplate,
    weeks: &[WeekPayload],
) -> std::result::Result<(Vec<u8>, Vec<String>), ExportError> {
    let mut builder = ArchiveBuilder::new();
    let mut names = Vec::with_capacity(weeks.len());

    for payload in weeks {
        let name = payload.document_name(DOCX_EXTENSION);
        let document = template.render(&payload.to_data_map()).map_err(|e| match e {
            ExportError::Render(msg) => ExportError::Render(format!("week {}: {msg}", payload.week)),
            other => other,
        })?;
        tracing::debug!(week = payload.week, document = %name, rows = payload.rows.len(), "Rendered document");
        builder.add(&name, &document)?;
        names.push(name);
    }

    Ok((builder.finish()?, names))
}

/// Export coordinator
pub struct ExportCoordinator {
    store: Arc<dyn LogStore>,
    source: Arc<dyn TemplateSource>,
}

impl ExportCoordinator {
    /// Create a coordinator from explicit collaborators
    pub fn new(store: Arc<dyn LogStore>, source: Arc<dyn TemplateSource>) -> Self {
        Self { store, source }
    }

    /// Create a coordinator backed by the configured store and template source
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &LogtrackConfig) -> Result<Self> {
        Ok(Self::new(
            create_log_store(&config.store),
            create_template_source(config.export.timeout_seconds)?,
        ))
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Checks the template's required fields
    /// 2. Loads the owner's records (date descending)
    /// 3. Partitions them into weekly payloads
    /// 4. Stops here for a dry run
    /// 5. Fetches the template once
    /// 6. Renders every week and packages the documents
    /// 7. Writes `documents.zip`
    ///
    /// # Errors
    ///
    /// - validation error when a required field is missing
    /// - [`ExportError::EmptyResult`] when nothing is left after exclusions
    /// - [`ExportError::InvalidDate`] for a missing range bound or a malformed record date
    /// - [`ExportError::TemplateFetch`] or [`ExportError::Render`] from the template stage
    pub async fn execute_export(&self, request: &ExportRequest) -> Result<ExportSummary> {
        let start_time = Instant::now();
        crate::log_export_start!(request.owner, request.template.key);

        request.template.validate_fields(&request.fields)?;

        let records = self.store.list_for_owner(&request.owner).await?;
        tracing::debug!(records = records.len(), "Loaded records");

        let partition = partition(
            &records,
            &request.exclusions,
            &request.range,
            &request.fields,
        )?;

        let mut summary = ExportSummary::new(request.template.key);
        summary.records_considered = partition.considered;
        summary.records_excluded = partition.excluded;
        summary.weeks = partition.weeks.iter().map(|w| w.week).collect();

        if request.dry_run {
            summary.dry_run = true;
            summary.documents = partition
                .weeks
                .iter()
                .map(|w| w.document_name(DOCX_EXTENSION))
                .collect();
            tracing::info!(
                documents = summary.document_count(),
                "Dry run: skipping template fetch and archive write"
            );
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        let template_bytes = self.source.fetch(&request.template.url).await?;
        let template = DocxTemplate::parse(&template_bytes)?;

        let (archive, documents) = build_archive(&template, &partition.weeks)?;
        let path = write_archive(&request.output_dir, &archive).await?;

        summary.documents = documents;
        summary.archive_path = Some(path);
        summary.archive_bytes = archive.len();

        let summary = summary.with_duration(start_time.elapsed());
        crate::log_export_complete!(summary.document_count(), summary.duration);
        summary.log_summary();
        Ok(summary)
    }
}

use crate::adapters::spreadsheet::SpreadsheetFormat;
use crate::core::pacing::{compute_for_period, parse_period};
use crate::core::report::ReportBuilder;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::domain::model::QuotaRecord;
use crate::utils::error::{CoachError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const REPORT_FILE: &str = "coaching_report.txt";
pub const METRICS_FILE: &str = "pacing_metrics.json";
pub const ARCHIVE_FILE: &str = "coaching_report.zip";

/// attachments 讀取附件，reports 寫出報表
pub struct CoachPipeline<S: Storage, C: ConfigProvider> {
    attachments: S,
    reports: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CoachPipeline<S, C> {
    pub fn new(attachments: S, reports: S, config: C) -> Self {
        Self {
            attachments,
            reports,
            config,
        }
    }

    fn metrics_json(&self, result: &TransformResult) -> Result<String> {
        let metrics = serde_json::json!({
            "generated_at": chrono::Local::now().to_rfc3339(),
            "subject": result.report.subject,
            "results": result.pacing,
        });
        Ok(serde_json::to_string_pretty(&metrics)?)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CoachPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input = self.config.input_file();
        let format = SpreadsheetFormat::from_path(input)?;

        tracing::debug!("Reading {:?} attachment: {}", format, input);
        let data = self.attachments.read_file(input).await?;
        tracing::debug!("Attachment size: {} bytes", data.len());

        format.parse(&data, self.config.subject_info())
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        if data.len() > 1 {
            tracing::warn!(
                "Spreadsheet has {} rows, only the first row is used",
                data.len()
            );
        }
        let record = data.first().ok_or(CoachError::NoRecords)?;
        let quota = QuotaRecord::try_from(record)?;

        let parsed = parse_period(record.subject_info());
        if parsed.is_defaulted() {
            tracing::debug!(
                "No 'Day X/Y' found in {:?}, assuming Day 1 of 30",
                record.subject_info()
            );
        }

        let period = parsed.period();
        if period.is_elapsed() {
            tracing::warn!(
                "Period already elapsed (Day {}/{}), daily paces reported as 0",
                period.current_day,
                period.total_days
            );
        }

        let pacing = compute_for_period(&quota, period);
        tracing::debug!("Pacing results: {:?}", pacing);

        let mut builder = ReportBuilder::new(&pacing);
        if let Some(signature) = self.config.report_signature() {
            builder = builder.with_signature(signature);
        }
        let report = builder.build();

        Ok(TransformResult { pacing, report })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let metrics = self.metrics_json(&result)?;
        let report_text = format!("Subject: {}\n\n{}", result.report.subject, result.report.body);

        if self.config.archive() {
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                zip.start_file::<_, ()>(REPORT_FILE, FileOptions::default())?;
                zip.write_all(report_text.as_bytes())?;

                zip.start_file::<_, ()>(METRICS_FILE, FileOptions::default())?;
                zip.write_all(metrics.as_bytes())?;

                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.reports.write_file(ARCHIVE_FILE, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), ARCHIVE_FILE));
        }

        self.reports
            .write_file(REPORT_FILE, report_text.as_bytes())
            .await?;
        self.reports
            .write_file(METRICS_FILE, metrics.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.config.output_path(), REPORT_FILE))
    }
}

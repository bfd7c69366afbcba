pub mod cli;
pub mod toml_config;

use crate::adapters::spreadsheet::SUPPORTED_EXTENSIONS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
use serde::{Deserialize, Serialize};
use toml_config::{default_download_dir, default_output_path, CoachConfig, MailConfig};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "quota-coach")]
#[command(about = "Compute sales quota pacing from a spreadsheet and render a coaching report")]
pub struct CliConfig {
    /// Spreadsheet attachment (.xlsx or .csv), relative to the download directory
    #[arg(short, long)]
    pub input: String,

    /// Period descriptor, usually the e-mail subject (e.g. "Day 4/22")
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output directory, overrides paths.output_path
    #[arg(long)]
    pub output_path: Option<String>,

    /// Bundle report and metrics into a single ZIP
    #[arg(long)]
    pub archive: bool,

    /// Dry run - show the report on stdout without writing files
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON formatted logs")]
    pub json_logs: bool,
}

/// 執行時使用的設定，由命令列與設定檔合併而成
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub input_file: String,
    pub subject_info: Option<String>,
    pub download_dir: String,
    pub output_path: String,
    pub archive: bool,
    pub signature: Option<String>,
    pub mail: Option<MailConfig>,
}

impl RunConfig {
    pub fn new(input_file: impl Into<String>) -> Self {
        Self {
            input_file: input_file.into(),
            subject_info: None,
            download_dir: default_download_dir(),
            output_path: default_output_path(),
            archive: false,
            signature: None,
            mail: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject_info = Some(subject.into());
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<String>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn with_archive(mut self, archive: bool) -> Self {
        self.archive = archive;
        self
    }

    /// 套用設定檔內容，命令列參數優先
    pub fn merge_file_config(mut self, file: CoachConfig) -> Self {
        self.download_dir = file.paths.download_dir;
        self.output_path = file.paths.output_path;
        self.archive = self.archive || file.report.archive;
        self.signature = self.signature.or(file.report.signature);
        self.mail = file.mail;
        self
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut config = Self::new(cli.input.clone()).with_archive(cli.archive);
        config.subject_info = cli.subject.clone();

        if let Some(path) = &cli.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            config = config.merge_file_config(CoachConfig::from_file(path)?);
        }

        if let Some(output_path) = &cli.output_path {
            config.output_path = output_path.clone();
        }

        Ok(config)
    }
}

impl ConfigProvider for RunConfig {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn subject_info(&self) -> Option<&str> {
        self.subject_info.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn archive(&self) -> bool {
        self.archive
    }

    fn report_signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_file)?;
        validate_file_extensions(
            "input",
            std::slice::from_ref(&self.input_file),
            SUPPORTED_EXTENSIONS,
        )?;
        validate_path("paths.download_dir", &self.download_dir)?;
        validate_path("paths.output_path", &self.output_path)?;
        if let Some(mail) = &self.mail {
            mail.validate()?;
        }
        Ok(())
    }
}

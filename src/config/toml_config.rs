use crate::utils::error::{CoachError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

/// 設定檔，取代原本寫死在程式裡的帳號與目錄設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoachConfig {
    pub mail: Option<MailConfig>,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// 收發信設定。收信/寄信由外部元件處理，這裡只負責載入與驗證。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub account: String,
    pub app_password: Option<String>,
    #[serde(default = "default_imap_server")]
    pub imap_server: String,
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            output_path: default_output_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub archive: bool,
    pub signature: Option<String>,
}

fn default_imap_server() -> String {
    "imap.gmail.com".to_string()
}

fn default_smtp_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

pub fn default_download_dir() -> String {
    ".".to_string()
}

pub fn default_output_path() -> String {
    "./output".to_string()
}

impl CoachConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CoachError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CoachError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${APP_PASSWORD})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for MailConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("mail.account", &self.account)?;
        let password = validate_required_field("mail.app_password", &self.app_password)?;
        if password.starts_with("${") {
            return Err(CoachError::ConfigValidationError {
                field: "mail.app_password".to_string(),
                message: format!("environment variable {} is not set", password),
            });
        }
        validate_non_empty_string("mail.imap_server", &self.imap_server)?;
        validate_non_empty_string("mail.smtp_server", &self.smtp_server)?;
        validate_range("mail.smtp_port", self.smtp_port, 1, u16::MAX)?;
        Ok(())
    }
}

impl Validate for CoachConfig {
    fn validate(&self) -> Result<()> {
        validate_path("paths.download_dir", &self.paths.download_dir)?;
        validate_path("paths.output_path", &self.paths.output_path)?;
        if let Some(mail) = &self.mail {
            mail.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[mail]
account = "coach@example.com"
app_password = "abcd efgh"
smtp_port = 587
reply_to = "manager@example.com"

[paths]
download_dir = "./attachments"
output_path = "./reports"

[report]
archive = true
signature = "West Region Coach"
"#;

        let config = CoachConfig::from_toml_str(toml_content).unwrap();
        let mail = config.mail.as_ref().unwrap();

        assert_eq!(mail.account, "coach@example.com");
        assert_eq!(mail.imap_server, "imap.gmail.com");
        assert_eq!(mail.smtp_port, 587);
        assert_eq!(config.paths.download_dir, "./attachments");
        assert!(config.report.archive);
        assert_eq!(config.report.signature.as_deref(), Some("West Region Coach"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CoachConfig::from_toml_str("").unwrap();
        assert!(config.mail.is_none());
        assert_eq!(config.paths.output_path, "./output");
        assert_eq!(config.paths.download_dir, ".");
        assert!(!config.report.archive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUOTA_COACH_TEST_PASSWORD", "secret-app-password");

        let toml_content = r#"
[mail]
account = "coach@example.com"
app_password = "${QUOTA_COACH_TEST_PASSWORD}"
"#;

        let config = CoachConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.mail.unwrap().app_password.as_deref(),
            Some("secret-app-password")
        );

        std::env::remove_var("QUOTA_COACH_TEST_PASSWORD");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[mail]
account = "coach@example.com"
app_password = "${QUOTA_COACH_SURELY_UNSET_VAR}"
"#;

        let config = CoachConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_password_fails_validation() {
        let config = CoachConfig::from_toml_str("[mail]\naccount = \"coach@example.com\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(CoachError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            CoachConfig::from_toml_str("[paths\noutput_path = 1"),
            Err(CoachError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[paths]\noutput_path = \"./file-output\"\n")
            .unwrap();

        let config = CoachConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.paths.output_path, "./file-output");
    }
}

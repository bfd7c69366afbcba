use anyhow::Result;
use quota_coach::{CoachConfig, CoachEngine, CoachError, CoachPipeline, LocalStorage, RunConfig};
use tempfile::TempDir;

const SHEET: &str = "\
PhoneActivationsTarget,PhoneActivationsAchievement,FwaTarget,FwaAchivement,SalesDollarQuota,SalesDollarAttainment,Region
5000,2000,2000,500,10000,4000,West
";

fn dirs() -> Result<(TempDir, String, String)> {
    let temp_dir = TempDir::new()?;
    let attachments = temp_dir.path().join("attachments");
    let reports = temp_dir.path().join("reports");
    std::fs::create_dir_all(&attachments)?;
    Ok((
        temp_dir,
        attachments.to_str().unwrap().to_string(),
        reports.to_str().unwrap().to_string(),
    ))
}

#[tokio::test]
async fn test_end_to_end_report() -> Result<()> {
    let (_temp_dir, attachments, reports) = dirs()?;
    tokio::fs::write(format!("{}/quota.csv", attachments), SHEET).await?;

    let config = RunConfig::new("quota.csv")
        .with_subject("Re: Quota Day 4/22")
        .with_output_path(reports.clone());

    let pipeline = CoachPipeline::new(
        LocalStorage::new(attachments),
        LocalStorage::new(reports.clone()),
        config,
    );
    let output_path = CoachEngine::new(pipeline).run().await?;
    assert_eq!(output_path, format!("{}/coaching_report.txt", reports));

    let report = tokio::fs::read_to_string(&output_path).await?;
    assert!(report.contains("Day 4 out of 22 (with 18 days remaining)"));
    assert!(report.contains("- Daily Revenue Required (Stretch 1.3 Bucket): $500.00 per day"));

    let metrics: serde_json::Value = serde_json::from_str(
        &tokio::fs::read_to_string(format!("{}/pacing_metrics.json", reports)).await?,
    )?;
    let results = &metrics["results"];
    assert_eq!(results["time"]["current_day"], 4);
    assert_eq!(results["phone"]["remaining_phone"], 30.0);
    assert_eq!(results["internet"]["internet_target_count"], 20.0);
    assert_eq!(results["revenue"]["revenue_quota"], 10000.0);
    assert_eq!(results["averages"]["current_revenue_avg"], 1000.0);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_file_config() -> Result<()> {
    let (temp_dir, attachments, reports) = dirs()?;
    tokio::fs::write(format!("{}/quota.csv", attachments), SHEET).await?;

    let toml_content = format!(
        r#"
[paths]
download_dir = "{}"
output_path = "{}"

[report]
archive = true
signature = "West Region Coach"
"#,
        attachments.replace('\\', "/"),
        reports.replace('\\', "/")
    );
    let config_path = temp_dir.path().join("coach.toml");
    tokio::fs::write(&config_path, toml_content).await?;

    let config = RunConfig::new("quota.csv").merge_file_config(CoachConfig::from_file(&config_path)?);
    let pipeline = CoachPipeline::new(
        LocalStorage::new(config.download_dir.clone()),
        LocalStorage::new(config.output_path.clone()),
        config,
    );

    let output_path = CoachEngine::new(pipeline).run().await?;
    assert!(output_path.ends_with("coaching_report.zip"));

    let zip_data = std::fs::read(temp_dir.path().join("reports").join("coaching_report.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    let mut body = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("coaching_report.txt")?, &mut body)?;

    // 沒有主旨時使用預設的 Day 1/30
    assert!(body.starts_with("Subject: Daily Sales Coaching Report – Day 1/30"));
    assert!(body.contains("Day 1 out of 30 (with 29 days remaining)"));
    assert!(body.ends_with("West Region Coach\n"));
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_xlsx_attachment() -> Result<()> {
    let (_temp_dir, attachments, reports) = dirs()?;
    tokio::fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/quota.xlsx"),
        format!("{}/quota.xlsx", attachments),
    )
    .await?;

    let pipeline = CoachPipeline::new(
        LocalStorage::new(attachments),
        LocalStorage::new(reports.clone()),
        RunConfig::new("quota.xlsx").with_output_path(reports.clone()),
    );
    let output_path = CoachEngine::new(pipeline).run().await?;

    let report = tokio::fs::read_to_string(&output_path).await?;
    assert!(report.starts_with("Subject: Daily Sales Coaching Report – Day 4/22"));
    assert!(report.contains("- Base Phone Adds Target: 50.0 counts"));
    assert!(report.contains("- Combined Target (1.0): 70.0 counts"));
    Ok(())
}

#[tokio::test]
async fn test_missing_column_fails_before_writing() -> Result<()> {
    let (_temp_dir, attachments, reports) = dirs()?;
    tokio::fs::write(
        format!("{}/quota.csv", attachments),
        "PhoneActivationsTarget,PhoneActivationsAchievement,FwaTarget,FwaAchivement,SalesDollarQuota\n1,2,3,4,5\n",
    )
    .await?;

    let pipeline = CoachPipeline::new(
        LocalStorage::new(attachments),
        LocalStorage::new(reports.clone()),
        RunConfig::new("quota.csv"),
    );

    match CoachEngine::new(pipeline).run().await {
        Err(CoachError::MissingField { field }) => assert_eq!(field, "SalesDollarAttainment"),
        other => panic!("expected MissingField, got {:?}", other),
    }
    assert!(!std::path::Path::new(&reports).exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_attachment_is_io_error() -> Result<()> {
    let (_temp_dir, attachments, reports) = dirs()?;

    let pipeline = CoachPipeline::new(
        LocalStorage::new(attachments),
        LocalStorage::new(reports),
        RunConfig::new("absent.csv"),
    );

    let err = CoachEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, CoachError::IoError(_)));
    Ok(())
}

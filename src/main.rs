use clap::Parser;
use quota_coach::core::{Pipeline, TransformResult};
use quota_coach::utils::error::ErrorSeverity;
use quota_coach::utils::{logger, validation::Validate};
use quota_coach::{CliConfig, CoachEngine, CoachPipeline, LocalStorage, RunConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting quota-coach");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match RunConfig::from_cli(&cli).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    display_config_summary(&config, cli.dry_run);

    let attachments = LocalStorage::new(config.download_dir.clone());
    let reports = LocalStorage::new(config.output_path.clone());
    let pipeline = CoachPipeline::new(attachments, reports, config);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - report is printed, nothing is written");
        match preview(&pipeline).await {
            Ok(result) => {
                println!("Subject: {}\n{}", result.report.subject, result.report.body);
                return Ok(());
            }
            Err(e) => exit_with(e),
        }
    }

    let engine = CoachEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Coaching report completed successfully!");
            println!("✅ Coaching report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

async fn preview<P: Pipeline>(pipeline: &P) -> quota_coach::Result<TransformResult> {
    let records = pipeline.extract().await?;
    pipeline.transform(records).await
}

fn exit_with(e: quota_coach::CoachError) -> ! {
    tracing::error!(
        "❌ Coaching run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &RunConfig, dry_run: bool) {
    println!("📋 Configuration Summary:");
    println!("  Input: {}/{}", config.download_dir, config.input_file);
    println!(
        "  Period: {}",
        config.subject_info.as_deref().unwrap_or("(from spreadsheet)")
    );
    println!("  Output: {}", config.output_path);
    println!("  Archive: {}", config.archive);

    if let Some(mail) = &config.mail {
        println!(
            "  Mail: {} (IMAP {}, SMTP {}:{})",
            mail.account, mail.imap_server, mail.smtp_server, mail.smtp_port
        );
        if let Some(reply_to) = &mail.reply_to {
            println!("  Reply-To: {}", reply_to);
        }
    }

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

use clap::Parser;
use course_catalog::adapters::source_from_spec;
use course_catalog::utils::error::{CatalogError, ErrorSeverity};
use course_catalog::utils::logger;
use course_catalog::{Catalog, CliConfig, Command, Server, TomlConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入並驗證配置；日誌層級來自配置，所以配置錯誤使用預設日誌
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger("info", cli.verbose);
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(&config.logging.level, cli.verbose);
    } else {
        logger::init_cli_logger(&config.logging.level, cli.verbose);
    }

    tracing::info!("Starting course-catalog");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(&cli.command, &config).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ course-catalog failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        // 輸出用戶友好的錯誤信息
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        std::process::exit(exit_code(&e));
    }
}

async fn run(command: &Command, config: &TomlConfig) -> Result<(), CatalogError> {
    // 啟動時載入一次課程目錄
    let source = source_from_spec(config.catalog_source());
    let catalog = Catalog::load(source.as_ref()).await?;

    match command {
        Command::Serve { .. } => {
            let server = Server::bind(config.bind_addr()?, catalog)
                .await?
                .with_read_timeout(config.read_timeout())
                .with_drain_timeout(config.shutdown_timeout());
            server.serve().await?;
            tracing::info!("✅ Server stopped");
        }
        Command::Search { query } => {
            let courses = catalog.search(query.as_deref())?;
            tracing::info!("🔍 {} courses matched", courses.len());
            println!("{}", serde_json::to_string_pretty(&courses)?);
        }
        Command::List => {
            println!("{}", serde_json::to_string_pretty(catalog.records())?);
        }
    }

    Ok(())
}

fn exit_code(e: &CatalogError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1, // 查詢、目錄或配置錯誤
        ErrorSeverity::Medium => 2,                    // 可重試的網路錯誤
        ErrorSeverity::Critical => 3,                  // 系統錯誤
    }
}

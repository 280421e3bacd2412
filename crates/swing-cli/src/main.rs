//! 스윙 분석 리포트 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 개별 분석 (삼위일체/밴드워크/익스팬션)
//! swing individual 7203
//!
//! # 종목 상세와 종합 스코어 (JSON 출력)
//! swing company 285A --json
//!
//! # 일별 결과 (검출되지 않은 행 포함)
//! swing results --date 2024-05-08 --all
//!
//! # 분석 일자 인덱스
//! swing dates
//! ```

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

mod commands;

use commands::report::{run_company, run_individual};
use commands::results::{run_dates, run_results};
use swing_analytics::ReportService;
use swing_core::{init_logging, AppConfig, LogConfig, LogFormat};
use swing_data::ProcessEngine;

#[derive(Parser)]
#[command(name = "swing")]
#[command(about = "Swing report CLI - 株式テクニカル分析レポート", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    /// JSON으로 출력
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    /// 디버그 로그 출력
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 개별 분석 (엔진 텍스트 리포트)
    Individual {
        /// 종목 코드 (예: 7203, 285A, 7203.T)
        code: String,
    },

    /// 종목 상세 (엔진 JSON 리포트 + 종합 스코어)
    Company {
        /// 종목 코드
        code: String,
    },

    /// 하루치 분석 결과
    Results {
        /// 조회 일자 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short, long)]
        date: Option<String>,

        /// 검출되지 않은 밴드워크/익스팬션 행도 표시
        #[arg(long, default_value = "false")]
        all: bool,
    },

    /// 분석 일자 인덱스
    Dates,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?;
    let level = if cli.verbose { "debug" } else { "warn" };
    init_logging(LogConfig::new(level).with_format(LogFormat::Compact))?;
    debug!(config = %cli.config, "Configuration loaded");

    match cli.command {
        Commands::Individual { code } => {
            let service = ReportService::new(Arc::new(ProcessEngine::new(config.engine)));
            run_individual(&service, &code, cli.json).await?;
        }
        Commands::Company { code } => {
            let service = ReportService::new(Arc::new(ProcessEngine::new(config.engine)));
            run_company(&service, &code, cli.json).await?;
        }
        Commands::Results { date, all } => {
            run_results(&config.database, date.as_deref(), !all, cli.json).await?;
        }
        Commands::Dates => {
            run_dates(&config.database, cli.json).await?;
        }
    }

    Ok(())
}

//! 설정 관리.
//!
//! `config/default.toml`(선택)과 `SWING__` 접두사 환경 변수에서 설정을 로드합니다.
//! 예: `SWING__SERVER__PORT=8080`, `SWING__ENGINE__TIMEOUT_SECS=120`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 분석 결과 DB 설정
    pub database: DatabaseConfig,
    /// 외부 분석 엔진 설정
    pub engine: EngineConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 90,
        }
    }
}

/// 분석 결과 DB(SQLite) 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// DB 파일 경로
    pub path: String,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "stock_analysis.db".to_string(),
            max_connections: 5,
            connection_timeout_secs: 10,
        }
    }
}

/// 외부 분석 엔진 설정.
///
/// 정규화된 종목 코드가 인자 목록 마지막에 추가됩니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 실행 파일
    pub program: String,
    /// 텍스트 리포트 모드 인자
    pub individual_args: Vec<String>,
    /// JSON 리포트 모드 인자
    pub company_args: Vec<String>,
    /// 작업 디렉토리 (None이면 현재 디렉토리)
    pub working_dir: Option<String>,
    /// 실행 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            individual_args: vec!["swing_analysis.py".to_string(), "--individual".to_string()],
            company_args: vec!["company.py".to_string()],
            working_dir: None,
            timeout_secs: 60,
        }
    }
}

impl EngineConfig {
    /// 타임아웃을 `Duration`으로 반환합니다.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("SWING")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

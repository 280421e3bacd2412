//! tracing 기반 로깅 초기화.
//!
//! 서버는 설정 파일의 `[logging]` 섹션을, CLI는 `--verbose` 플래그에서 만든 레벨을 사용합니다.
//! 로그는 stderr로 출력되어 CLI의 표/JSON 출력과 섞이지 않습니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄, 색상 포함 (개발용)
    #[default]
    Pretty,
    /// 로그 수집기용 JSON
    Json,
    /// 한 줄 요약
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 기본 필터 (예: "info", "swing_analytics=debug"). `RUST_LOG`가 있으면 무시됩니다.
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// `[logging]` 섹션에서 생성합니다. 알 수 없는 형식은 pretty로 대체합니다.
    pub fn from_settings(settings: &LoggingConfig) -> Self {
        Self::new(settings.level.clone()).with_format(settings.format.parse().unwrap_or_default())
    }
}

/// 전역 subscriber를 설치합니다. 두 번째 호출은 에러를 반환합니다.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let base = fmt::layer().with_writer(std::io::stderr).with_target(true);
    let layer = match config.format {
        LogFormat::Pretty => base.pretty().with_file(true).with_line_number(true).boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 종목 코드 필드를 가진 리포트 요청 span.
#[macro_export]
macro_rules! report_span {
    ($name:expr, $code:expr) => {
        tracing::info_span!($name, code = %$code)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_from_settings() {
        let config = LogConfig::from_settings(&LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        });
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);

        let fallback = LogConfig::from_settings(&LoggingConfig {
            level: "info".to_string(),
            format: "fancy".to_string(),
        });
        assert_eq!(fallback.format, LogFormat::Pretty);
    }

    #[test]
    fn test_cli_style_config() {
        let config = LogConfig::new("warn").with_format(LogFormat::Compact);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
    }
}

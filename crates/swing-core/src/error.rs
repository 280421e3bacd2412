//! 리포트 시스템의 에러 타입.
//!
//! 두 계층으로 나뉩니다:
//! - [`ReportError`]: 요청 단위로 복구되어 사용자에게 한 줄 메시지로 표시되는 에러
//! - [`SwingError`]: 저장소/설정 등 인프라 계층 에러

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 리포트 요청 처리 중 발생하는 에러.
///
/// 모든 variant는 요청 안에서 복구되며, `Display` 출력이 그대로
/// 사용자에게 보여지는 메시지입니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// 종목 코드 형식 오류 (엔진 호출 전 차단)
    #[error("❌ 無効なコード形式です（例: 7203, 285A, 2768T など）: {0}")]
    InvalidFormat(String),

    /// 엔진 출력이 비어 있음
    #[error("分析スクリプトの実行に失敗しました")]
    EmptyOutput,

    /// 엔진 실행 실패 (비정상 종료, 실행 불가, 타임아웃)
    #[error("❌ 分析エンジンの実行に失敗しました。")]
    CollaboratorFailed {
        /// 종료 코드 (시그널로 종료되었거나 실행 자체가 실패한 경우 None)
        exit_code: Option<i32>,
        /// 진단용 상세 (엔진 출력 또는 OS 에러)
        detail: String,
    },

    /// JSON 파싱 실패
    #[error("❌ JSONの解析に失敗しました。")]
    MalformedJson(String),

    /// 엔진 출력에 에러 표식이 포함됨
    #[error("銘柄データの取得に失敗しました。正しい証券コードか確認してください。")]
    FetchFailed,
}

impl ReportError {
    /// API 응답에 사용하는 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::InvalidFormat(_) => "INVALID_FORMAT",
            ReportError::EmptyOutput => "EMPTY_OUTPUT",
            ReportError::CollaboratorFailed { .. } => "COLLABORATOR_FAILED",
            ReportError::MalformedJson(_) => "MALFORMED_JSON",
            ReportError::FetchFailed => "FETCH_FAILED",
        }
    }

    /// 사용자에게 표시할 메시지.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// 진단용 상세 정보 (로그/디버그 출력용).
    pub fn detail(&self) -> Option<&str> {
        match self {
            ReportError::CollaboratorFailed { detail, .. } => Some(detail),
            ReportError::MalformedJson(detail) => Some(detail),
            _ => None,
        }
    }

    /// 재시도 가능한 에러인지 확인합니다.
    ///
    /// 이 계층은 재시도하지 않습니다. 사용자가 다시 요청합니다.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// 직렬화 가능한 에러 요약.
///
/// 뷰 모델에 포함되어 응답 본문으로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportErrorSummary {
    /// 에러 코드 (예: "FETCH_FAILED")
    pub code: String,
    /// 사용자 메시지
    pub message: String,
}

impl From<&ReportError> for ReportErrorSummary {
    fn from(err: &ReportError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.user_message(),
        }
    }
}

/// 인프라 계층 에러.
#[derive(Debug, Error)]
pub enum SwingError {
    /// 설정 에러
    #[error("設定エラー: {0}")]
    Config(String),

    /// 데이터베이스 에러
    #[error("データベースエラー: {0}")]
    Database(String),

    /// 잘못된 입력
    #[error("不正な入力: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("シリアライズエラー: {0}")]
    Serialization(String),

    /// 리포트 에러
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// 인프라 작업을 위한 Result 타입.
pub type SwingResult<T> = Result<T, SwingError>;

impl SwingError {
    /// 사용자의 입력에 기인한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SwingError::InvalidInput(_) | SwingError::Report(_))
    }
}

impl From<serde_json::Error> for SwingError {
    fn from(err: serde_json::Error) -> Self {
        SwingError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for SwingError {
    fn from(err: config::ConfigError) -> Self {
        SwingError::Config(err.to_string())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for SwingError {
    fn from(err: sqlx::Error) -> Self {
        SwingError::Database(err.to_string())
    }
}

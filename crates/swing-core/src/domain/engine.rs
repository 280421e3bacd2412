//! 외부 분석 엔진 추상화.
//!
//! 엔진은 정규화된 종목 코드 하나를 받아 텍스트 또는 JSON을 출력하는
//! 불투명한 협력자입니다. 실제 프로세스 실행은 `swing-data`가 구현합니다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ReportError;
use crate::types::InstrumentCode;

/// 엔진 호출 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// 섹션 헤더가 있는 텍스트 리포트
    Individual,
    /// 단일 JSON 문서
    Company,
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineMode::Individual => write!(f, "individual"),
            EngineMode::Company => write!(f, "company"),
        }
    }
}

/// 엔진 원시 출력 (stdout + stderr, 종료 코드).
///
/// 요청마다 생성되고 파싱 후 버려집니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEngineOutput {
    pub text: String,
    /// 시그널로 종료된 경우 None
    pub exit_code: Option<i32>,
}

impl RawEngineOutput {
    /// 새 출력을 생성합니다.
    pub fn new(text: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            text: text.into(),
            exit_code,
        }
    }

    /// 정상 종료(0) 여부.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// 공백만 있는 출력인지.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// 분석 엔진 trait.
///
/// 실행 자체가 실패하면(실행 파일 없음, 타임아웃) `CollaboratorFailed`를 반환합니다.
/// 비정상 종료 코드의 해석은 호출 측 책임입니다.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// 엔진을 한 번 실행합니다. 재시도하지 않습니다.
    async fn run(
        &self,
        mode: EngineMode,
        code: &InstrumentCode,
    ) -> Result<RawEngineOutput, ReportError>;
}

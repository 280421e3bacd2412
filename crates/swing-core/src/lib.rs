//! # Swing Core
//!
//! 스윙 분석 리포트 시스템의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 종목 코드 정규화 ([`InstrumentCode`])
//! - 텍스트/JSON 리포트 모델
//! - 서브 스코어 및 종합 스코어 모델
//! - 일별 분석 결과 행 타입
//! - 표시용 포맷터
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;

//! 외부 협력자 접근 계층.
//!
//! 이 crate는 다음을 제공합니다:
//! - 분석 엔진 서브프로세스 실행 ([`ProcessEngine`])
//! - 일별 분석 결과 SQLite 저장소 ([`ResultsStore`], 읽기 전용)

pub mod engine;
pub mod storage;

pub use engine::{EngineError, ProcessEngine};
pub use storage::ResultsStore;

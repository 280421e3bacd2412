//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 `Arc`로 래핑되어 요청 간에 공유됩니다.

use std::sync::Arc;

use swing_analytics::ReportService;
use swing_core::{AnalysisEngine, AppConfig};
use swing_data::ResultsStore;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 개별 분석 / 종목 상세 흐름
    pub reports: ReportService,

    /// 일별 분석 결과 저장소 (DB 파일이 없으면 None)
    pub store: Option<ResultsStore>,

    /// 로드된 설정
    pub config: Arc<AppConfig>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(config: AppConfig, engine: Arc<dyn AnalysisEngine>) -> Self {
        Self {
            reports: ReportService::new(engine),
            store: None,
            config: Arc::new(config),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 결과 저장소 설정.
    pub fn with_store(mut self, store: ResultsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// 저장소 설정 여부 확인.
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        match &self.store {
            Some(store) => store.health_check().await.is_ok(),
            None => false,
        }
    }
}

/// 고정 출력을 반환하는 테스트용 엔진.
#[cfg(any(test, feature = "test-utils"))]
pub struct FixedEngine {
    individual: swing_core::RawEngineOutput,
    company: swing_core::RawEngineOutput,
}

#[cfg(any(test, feature = "test-utils"))]
impl FixedEngine {
    /// 모드별 출력을 지정합니다. 종료 코드는 0입니다.
    pub fn new(individual: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            individual: swing_core::RawEngineOutput::new(individual, Some(0)),
            company: swing_core::RawEngineOutput::new(company, Some(0)),
        }
    }

    /// 두 모드의 종료 코드를 바꿉니다.
    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.individual.exit_code = Some(exit_code);
        self.company.exit_code = Some(exit_code);
        self
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait::async_trait]
impl AnalysisEngine for FixedEngine {
    async fn run(
        &self,
        mode: swing_core::EngineMode,
        _code: &swing_core::InstrumentCode,
    ) -> Result<swing_core::RawEngineOutput, swing_core::ReportError> {
        Ok(match mode {
            swing_core::EngineMode::Individual => self.individual.clone(),
            swing_core::EngineMode::Company => self.company.clone(),
        })
    }
}

/// 테스트용 AppState 생성.
///
/// 저장소는 설정되지 않으며 엔진은 빈 출력을 반환합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    create_test_state_with_engine(FixedEngine::new("", "{}"))
}

/// 지정한 엔진으로 테스트용 AppState 생성.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state_with_engine(engine: impl AnalysisEngine + 'static) -> AppState {
    AppState::new(AppConfig::default(), Arc::new(engine))
}

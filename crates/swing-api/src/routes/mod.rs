//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/v1/results` - 일별 분석 결과 및 일자 인덱스
//! - `/api/v1/individual` - 개별 분석 (텍스트 리포트)
//! - `/api/v1/company` - 종목 상세 (JSON 리포트 + 종합 스코어)

pub mod company;
pub mod health;
pub mod individual;
pub mod results;

pub use company::{company_report, company_router};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use individual::{individual_report, individual_router, CodeQuery};
pub use results::{daily_results, list_dates, results_router, DatesResponse, ResultsQuery};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API v1 엔드포인트
        .nest("/api/v1/results", results_router())
        .nest("/api/v1/individual", individual_router())
        .nest("/api/v1/company", company_router())
}

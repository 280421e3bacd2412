//! 개별 분석 endpoint.
//!
//! 엔진 텍스트 출력을 파싱한 화면 모델을 반환합니다. 리포트 흐름의 실패는
//! 화면 모델의 `error`로 전달되며 상태 코드는 200입니다.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use swing_analytics::IndividualView;

use crate::state::AppState;

/// 종목 코드 쿼리.
#[derive(Debug, Deserialize)]
pub struct CodeQuery {
    #[serde(default)]
    pub code: Option<String>,
}

/// 개별 분석.
///
/// GET /api/v1/individual?code=7203
pub async fn individual_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CodeQuery>,
) -> Json<IndividualView> {
    let outcome = state
        .reports
        .individual(query.code.as_deref().unwrap_or_default())
        .await;
    Json(IndividualView::from(&outcome))
}

/// 개별 분석 라우터 생성.
pub fn individual_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(individual_report))
}

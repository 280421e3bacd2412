//! 종목 상세 endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use swing_analytics::CompanyView;

use crate::routes::individual::CodeQuery;
use crate::state::AppState;

/// 종목 상세 (스냅샷 + 종합 스코어 + 뉴스).
///
/// GET /api/v1/company?code=7203
pub async fn company_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CodeQuery>,
) -> Json<CompanyView> {
    let outcome = state
        .reports
        .company(query.code.as_deref().unwrap_or_default())
        .await;
    Json(CompanyView::from(&outcome))
}

/// 종목 상세 라우터 생성.
pub fn company_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(company_report))
}

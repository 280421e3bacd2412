//! 일별 분석 결과 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/results/dates` - 분석 일자 인덱스 (연/월/일 그룹)
//! - `GET /api/v1/results?date=YYYY-MM-DD&active_only=true` - 하루치 결과

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use swing_analytics::{default_results_date, group_dates, DailyResultsView, YearGroup};
use swing_core::AnalysisDate;

use crate::error::{store_unavailable, swing_error_response, ApiResult};
use crate::state::AppState;

/// 하루치 결과 조회 쿼리.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// 조회 일자 (기본: 오늘)
    #[serde(default)]
    pub date: Option<String>,
    /// 발생 중인 밴드워크/익스팬션만 (기본: true)
    #[serde(default)]
    pub active_only: Option<bool>,
}

/// 분석 일자 인덱스 응답.
#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub years: Vec<YearGroup>,
    pub total: usize,
}

/// 분석 일자 인덱스.
///
/// GET /api/v1/results/dates
pub async fn list_dates(State(state): State<Arc<AppState>>) -> ApiResult<Json<DatesResponse>> {
    let store = state.store.as_ref().ok_or_else(store_unavailable)?;

    let dates = store.list_analysis_dates().await.map_err(|e| {
        error!(error = %e, "Failed to list analysis dates");
        swing_error_response(&e)
    })?;

    Ok(Json(DatesResponse {
        total: dates.len(),
        years: group_dates(&dates),
    }))
}

/// 하루치 결과.
///
/// GET /api/v1/results
pub async fn daily_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResultsQuery>,
) -> ApiResult<Json<DailyResultsView>> {
    let date = match query.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            AnalysisDate::parse(raw).map_err(|e| swing_error_response(&e))?
        }
        _ => default_results_date(),
    };
    let active_only = query.active_only.unwrap_or(true);

    let store = state.store.as_ref().ok_or_else(store_unavailable)?;

    let load = async {
        let trinity = store.trinity_results(&date).await?;
        let bandwalk = store.bandwalk_results(&date).await?;
        let expansion = store.expansion_results(&date).await?;
        Ok::<_, swing_core::SwingError>((trinity, bandwalk, expansion))
    };

    let (trinity, bandwalk, expansion) = load.await.map_err(|e| {
        error!(date = %date, error = %e, "Failed to load daily results");
        swing_error_response(&e)
    })?;

    Ok(Json(DailyResultsView::build(
        &date,
        &trinity,
        &bandwalk,
        &expansion,
        active_only,
    )))
}

/// 결과 라우터 생성.
pub fn results_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(daily_results))
        .route("/dates", get(list_dates))
}

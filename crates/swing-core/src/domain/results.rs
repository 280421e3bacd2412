//! 일별 분석 결과 행 타입.
//!
//! 분석 배치가 기록한 테이블을 읽기 전용으로 조회한 결과입니다.
//! `company_name`은 `companies` 테이블 LEFT JOIN 결과라 없을 수 있습니다.

use serde::{Deserialize, Serialize};

/// 삼위일체 모델 결과 행 (`analysis_results`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct TrinityResultRow {
    pub analysis_date: String,
    pub code: String,
    pub company_name: Option<String>,
    pub price: f64,
    pub score: i64,
    pub rsi_9: f64,
    pub vwap: f64,
    pub bb_width: f64,
    pub profit_target: Option<f64>,
    pub stop_loss: Option<f64>,
}

/// 밴드워크 검출 결과 행 (`bandwalk_results`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct BandwalkResultRow {
    pub analysis_date: String,
    pub code: String,
    pub company_name: Option<String>,
    pub is_bandwalk: bool,
    pub price: f64,
    pub bb_width: f64,
    pub profit_target: Option<f64>,
    pub stop_loss: Option<f64>,
}

/// 익스팬션 검출 결과 행 (`expansion_results`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct ExpansionResultRow {
    pub analysis_date: String,
    pub code: String,
    pub company_name: Option<String>,
    pub is_expansion: bool,
    pub price: f64,
    pub bb_width: f64,
    pub expansion_rate: f64,
    pub profit_target: Option<f64>,
    pub stop_loss: Option<f64>,
}

//! 텍스트 리포트의 섹션별 지표 모델.
//!
//! 외부 엔진의 텍스트 출력은 세 개의 섹션(삼위일체 평가, 밴드워크, 익스팬션)으로
//! 구성됩니다. 모든 필드는 선택적이며, 엔진이 보고하지 않은 지표는 `None`입니다.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::types::InstrumentCode;

/// 점수 등급 상한 기준 (이상이면 high).
pub const SCORE_HIGH_THRESHOLD: i64 = 70;
/// 점수 등급 중간 기준 (이상이면 medium).
pub const SCORE_MEDIUM_THRESHOLD: i64 = 50;

/// 삼위일체 점수 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    /// 70점 이상
    High,
    /// 50~69점
    Medium,
    /// 50점 미만
    Low,
}

impl ScoreStatus {
    /// 점수에서 등급을 결정합니다.
    pub fn from_score(score: i64) -> Self {
        if score >= SCORE_HIGH_THRESHOLD {
            Self::High
        } else if score >= SCORE_MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// 표시 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "高評価",
            Self::Medium => "中評価",
            Self::Low => "低評価",
        }
    }

    /// 스타일 클래스.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::High => "score-high",
            Self::Medium => "score-medium",
            Self::Low => "score-low",
        }
    }
}

/// 밴드워크/익스팬션 검출 상태.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// 발생 여부
    pub detected: bool,
    /// 엔진이 출력한 상태 라벨 ("発生中" / "なし")
    pub label: String,
}

impl Detection {
    /// 엔진 출력의 선택지 문자열(`⭕ 発生中` / `❌ なし`)에서 생성합니다.
    pub fn from_marker(marker: &str) -> Self {
        let detected = marker.contains("発生中");
        Self {
            detected,
            label: if detected { "発生中" } else { "なし" }.to_string(),
        }
    }

    /// 불리언 플래그에서 생성합니다.
    pub fn from_flag(detected: bool) -> Self {
        Self {
            detected,
            label: if detected { "発生中" } else { "なし" }.to_string(),
        }
    }

    /// 아이콘 포함 배지 문자열.
    pub fn badge(&self) -> &'static str {
        if self.detected {
            "⭕ 発生中"
        } else {
            "❌ なし"
        }
    }
}

/// 삼위일체 모델 평가 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrinityMetrics {
    pub price: Option<f64>,
    pub score: Option<i64>,
    pub status: Option<ScoreStatus>,
    pub rsi_9: Option<f64>,
    pub vwap: Option<f64>,
    pub bb_width: Option<f64>,
    pub profit_target: Option<f64>,
    pub stop_loss: Option<f64>,
}

impl TrinityMetrics {
    /// 매칭된 필드가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.score.is_none()
            && self.rsi_9.is_none()
            && self.vwap.is_none()
            && self.bb_width.is_none()
            && self.profit_target.is_none()
            && self.stop_loss.is_none()
    }
}

/// 밴드워크 검출 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandwalkMetrics {
    pub price: Option<f64>,
    pub bandwalk: Option<Detection>,
    pub bb_width: Option<f64>,
    pub profit_target: Option<f64>,
    pub stop_loss: Option<f64>,
}

impl BandwalkMetrics {
    /// 매칭된 필드가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.bandwalk.is_none()
            && self.bb_width.is_none()
            && self.profit_target.is_none()
            && self.stop_loss.is_none()
    }
}

/// 익스팬션 검출 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpansionMetrics {
    pub price: Option<f64>,
    pub expansion: Option<Detection>,
    pub bb_width: Option<f64>,
    pub expansion_rate: Option<f64>,
    pub profit_target: Option<f64>,
    pub stop_loss: Option<f64>,
}

impl ExpansionMetrics {
    /// 매칭된 필드가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.expansion.is_none()
            && self.bb_width.is_none()
            && self.expansion_rate.is_none()
            && self.profit_target.is_none()
            && self.stop_loss.is_none()
    }
}

/// 텍스트 리포트 파싱 결과.
///
/// 섹션 데이터와 에러 플래그가 동시에 존재할 수 있습니다.
/// 표시할 때는 [`ParsedBundle::primary_error`]를 먼저 확인합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBundle {
    pub code: InstrumentCode,
    pub trinity: Option<TrinityMetrics>,
    pub bandwalk: Option<BandwalkMetrics>,
    pub expansion: Option<ExpansionMetrics>,
    #[serde(skip)]
    pub error: Option<ReportError>,
}

impl ParsedBundle {
    /// 빈 번들을 생성합니다.
    pub fn empty(code: InstrumentCode) -> Self {
        Self {
            code,
            trinity: None,
            bandwalk: None,
            expansion: None,
            error: None,
        }
    }

    /// 사용자에게 우선 표시할 에러.
    pub fn primary_error(&self) -> Option<&ReportError> {
        self.error.as_ref()
    }

    /// 섹션이 하나라도 채워졌는지 확인합니다.
    pub fn has_any_section(&self) -> bool {
        self.trinity.is_some() || self.bandwalk.is_some() || self.expansion.is_some()
    }
}

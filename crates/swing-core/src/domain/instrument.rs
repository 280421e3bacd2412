//! 단일 종목 스냅샷 모델.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 이동평균 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Flat,
    Down,
}

impl Trend {
    /// 엔진 라벨을 해석합니다. 알 수 없는 라벨은 `None`.
    ///
    /// ```
    /// use swing_core::domain::Trend;
    ///
    /// assert_eq!(Trend::parse_label("上昇"), Some(Trend::Up));
    /// assert_eq!(Trend::parse_label(" Flat "), Some(Trend::Flat));
    /// assert_eq!(Trend::parse_label("不明"), None);
    /// ```
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "up" | "上昇" | "↑" => Some(Self::Up),
            "flat" | "横ばい" | "→" => Some(Self::Flat),
            "down" | "下降" | "↓" => Some(Self::Down),
            _ => None,
        }
    }
}

/// 크로스 상태 (골든/데드/없음).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossState {
    Golden,
    Dead,
    NoCross,
}

impl CrossState {
    /// 엔진 라벨을 해석합니다.
    ///
    /// 현재 세대 엔진은 `⭕️` / `❌` / `N/A`를 출력하며 `N/A`는 `None`이 됩니다.
    pub fn parse_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let lower = trimmed.to_lowercase();

        if lower.contains("dead") || trimmed.contains("デッド") || lower == "dc" {
            Some(Self::Dead)
        } else if lower.contains("golden")
            || trimmed.contains("ゴールデン")
            || lower == "gc"
            || trimmed.contains('⭕')
        {
            Some(Self::Golden)
        } else if lower == "none" || trimmed.contains("なし") || trimmed.contains('❌') {
            Some(Self::NoCross)
        } else {
            None
        }
    }

    /// 표시 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Golden => "ゴールデンクロス",
            Self::Dead => "デッドクロス",
            Self::NoCross => "なし",
        }
    }
}

/// 뉴스 항목. 모든 필드가 선택적입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
}

/// 정규화된 단일 종목 리포트.
///
/// 수치 필드는 모두 `Option`입니다. 값이 없는 것과 0은 구분됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentReport {
    pub symbol: String,
    pub company_name: Option<String>,
    /// 기준일 (엔진이 보고한 문자열 그대로)
    pub as_of: Option<String>,
    pub close: Option<f64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<f64>,

    pub rsi: Option<f64>,
    pub rsi_comment: Option<String>,

    pub macd_cross: Option<CrossState>,
    pub macd_direction: Option<String>,
    pub macd_confidence: Option<f64>,

    /// 5/25 이동평균 스프레드 추세 ("拡大" / "縮小" / "不明" 등)
    pub ma_spread_trend: Option<String>,
    pub ma5_trend: Option<Trend>,
    pub ma25_trend: Option<Trend>,
    pub ma75_trend: Option<Trend>,
    pub ma_cross: Option<CrossState>,
    pub dev5_percent: Option<f64>,
    pub dev25_percent: Option<f64>,

    pub volume_change_percent: Option<f64>,
    pub volatility_yen: Option<f64>,
    pub volatility_percent: Option<f64>,
    pub beta: Option<f64>,

    pub earnings_date: Option<NaiveDate>,
    /// 날짜로 해석하지 못한 경우에도 원문은 보존
    pub earnings_date_raw: Option<String>,
    /// 결산 발표일이 오늘~3일 후 범위인지
    pub earnings_highlight: bool,

    pub credit_ratio: Option<f64>,

    pub cci: Option<f64>,
    pub cci_prev: Option<f64>,
    pub cci_score: Option<f64>,
    pub cci_expectation: Option<String>,

    pub final_judgement: Option<String>,
    pub signals: Vec<String>,
    pub news: Vec<NewsItem>,
    pub news_error: Option<String>,
}

impl InstrumentReport {
    /// 심볼만 채워진 빈 리포트.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_labels() {
        assert_eq!(Trend::parse_label("UP"), Some(Trend::Up));
        assert_eq!(Trend::parse_label("横ばい"), Some(Trend::Flat));
        assert_eq!(Trend::parse_label("↓"), Some(Trend::Down));
        assert_eq!(Trend::parse_label(""), None);
    }

    #[test]
    fn test_cross_labels() {
        assert_eq!(CrossState::parse_label("⭕️"), Some(CrossState::Golden));
        assert_eq!(CrossState::parse_label("ゴールデンクロス"), Some(CrossState::Golden));
        assert_eq!(CrossState::parse_label("dead_cross"), Some(CrossState::Dead));
        assert_eq!(CrossState::parse_label("デッドクロス"), Some(CrossState::Dead));
        assert_eq!(CrossState::parse_label("❌"), Some(CrossState::NoCross));
        assert_eq!(CrossState::parse_label("N/A"), None);
    }
}

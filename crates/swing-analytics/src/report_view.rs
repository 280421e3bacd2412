//! 개별 분석 / 종목 상세 화면 모델.
//!
//! 수치는 모두 표시 문자열로 바꿔 둡니다. 값이 없으면 `—`이며 0으로 채우지 않습니다.

use serde::Serialize;

use swing_core::format::{
    format_metric, format_metric_percent, format_percent_relative, format_price_opt, UNKNOWN,
};
use swing_core::{
    BandwalkMetrics, ExpansionMetrics, NewsItem, ParsedBundle, ReportErrorSummary, ScoreCard,
    TrinityMetrics,
};

use crate::json_report::NEWS_DISPLAY_LIMIT;
use crate::labels::{bb_width_status, expansion_rate_status, rsi_status, vwap_trend};
use crate::report_service::{CompanyOutcome, CompanyReport, IndividualOutcome};
use crate::results_view::CHART_URL_PREFIX;

/// 코드 미입력 시 안내 문구.
pub const IDLE_MESSAGE: &str = "銘柄コードを入力してください。";

/// 파싱된 섹션이 하나도 없을 때의 문구.
pub const NO_RESULTS_MESSAGE: &str =
    "分析結果が見つかりませんでした。正しい証券コードか確認してください。";

/// 뉴스 섹션 제목.
pub const NEWS_HEADING: &str = "ニュース（最大10件）";

/// 뉴스가 없을 때의 문구.
pub const NEWS_EMPTY_MESSAGE: &str = "ニュースが取得できませんでした。";

/// 시그널 구분자.
pub const SIGNAL_SEPARATOR: &str = "・";

/// 화면 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    Idle,
    Error,
    Ok,
}

fn text_or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

/// 목표가/손절가 표시. 현재가가 없으면 퍼센트를 생략합니다.
fn target_display(price: Option<f64>, target: Option<f64>) -> String {
    format_percent_relative(price.unwrap_or(f64::NAN), target)
}

// =============================================================================
// 개별 분석
// =============================================================================

/// 삼위일체 섹션 표시.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrinitySectionView {
    pub price: String,
    /// `75点 (高評価)`
    pub score: String,
    pub score_class: Option<&'static str>,
    pub rsi_9: String,
    pub rsi_status: Option<&'static str>,
    pub vwap: String,
    pub vwap_trend: Option<&'static str>,
    pub bb_width: String,
    pub bb_status: Option<&'static str>,
    pub profit_target: String,
    pub stop_loss: String,
}

impl From<&TrinityMetrics> for TrinitySectionView {
    fn from(m: &TrinityMetrics) -> Self {
        let score = match (m.score, m.status) {
            (Some(score), Some(status)) => format!("{}点 ({})", score, status.label()),
            (Some(score), None) => format!("{}点", score),
            _ => UNKNOWN.to_string(),
        };
        Self {
            price: format_price_opt(m.price),
            score,
            score_class: m.status.map(|s| s.css_class()),
            rsi_9: format_metric(m.rsi_9, 2),
            rsi_status: m.rsi_9.map(rsi_status),
            vwap: format_price_opt(m.vwap),
            vwap_trend: m.price.zip(m.vwap).map(|(p, v)| vwap_trend(p, v)),
            bb_width: format_metric(m.bb_width, 2),
            bb_status: m.bb_width.map(bb_width_status),
            profit_target: target_display(m.price, m.profit_target),
            stop_loss: target_display(m.price, m.stop_loss),
        }
    }
}

/// 밴드워크 섹션 표시.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandwalkSectionView {
    pub price: String,
    pub detected: bool,
    pub status: String,
    pub bb_width: String,
    pub bb_status: Option<&'static str>,
    pub profit_target: String,
    pub stop_loss: String,
}

impl From<&BandwalkMetrics> for BandwalkSectionView {
    fn from(m: &BandwalkMetrics) -> Self {
        Self {
            price: format_price_opt(m.price),
            detected: m.bandwalk.as_ref().is_some_and(|d| d.detected),
            status: m
                .bandwalk
                .as_ref()
                .map_or_else(|| UNKNOWN.to_string(), |d| d.badge().to_string()),
            bb_width: format_metric(m.bb_width, 2),
            bb_status: m.bb_width.map(bb_width_status),
            profit_target: target_display(m.price, m.profit_target),
            stop_loss: target_display(m.price, m.stop_loss),
        }
    }
}

/// 익스팬션 섹션 표시.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionSectionView {
    pub price: String,
    pub detected: bool,
    pub status: String,
    pub bb_width: String,
    pub bb_status: Option<&'static str>,
    pub expansion_rate: String,
    pub rate_status: Option<&'static str>,
    pub profit_target: String,
    pub stop_loss: String,
}

impl From<&ExpansionMetrics> for ExpansionSectionView {
    fn from(m: &ExpansionMetrics) -> Self {
        Self {
            price: format_price_opt(m.price),
            detected: m.expansion.as_ref().is_some_and(|d| d.detected),
            status: m
                .expansion
                .as_ref()
                .map_or_else(|| UNKNOWN.to_string(), |d| d.badge().to_string()),
            bb_width: format_metric(m.bb_width, 2),
            bb_status: m.bb_width.map(bb_width_status),
            expansion_rate: format_metric_percent(m.expansion_rate, 2),
            rate_status: m.expansion_rate.map(expansion_rate_status),
            profit_target: target_display(m.price, m.profit_target),
            stop_loss: target_display(m.price, m.stop_loss),
        }
    }
}

/// 개별 분석 화면.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndividualView {
    pub status: ViewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportErrorSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_url: Option<String>,
    pub trinity: Option<TrinitySectionView>,
    pub bandwalk: Option<BandwalkSectionView>,
    pub expansion: Option<ExpansionSectionView>,
}

impl IndividualView {
    fn idle() -> Self {
        Self {
            status: ViewStatus::Idle,
            code: None,
            message: Some(IDLE_MESSAGE.to_string()),
            error: None,
            chart_url: None,
            trinity: None,
            bandwalk: None,
            expansion: None,
        }
    }

    fn from_bundle(bundle: &ParsedBundle) -> Self {
        let error = bundle.primary_error().map(ReportErrorSummary::from);
        Self {
            status: if error.is_some() {
                ViewStatus::Error
            } else {
                ViewStatus::Ok
            },
            code: Some(bundle.code.to_string()),
            message: match &error {
                Some(e) => Some(e.message.clone()),
                None if !bundle.has_any_section() => Some(NO_RESULTS_MESSAGE.to_string()),
                None => None,
            },
            error,
            chart_url: Some(format!("{}{}", CHART_URL_PREFIX, bundle.code)),
            trinity: bundle.trinity.as_ref().map(TrinitySectionView::from),
            bandwalk: bundle.bandwalk.as_ref().map(BandwalkSectionView::from),
            expansion: bundle.expansion.as_ref().map(ExpansionSectionView::from),
        }
    }
}

impl From<&IndividualOutcome> for IndividualView {
    fn from(outcome: &IndividualOutcome) -> Self {
        match outcome {
            IndividualOutcome::Idle => Self::idle(),
            IndividualOutcome::Failed(e) => {
                let summary = ReportErrorSummary::from(e);
                Self {
                    status: ViewStatus::Error,
                    message: Some(summary.message.clone()),
                    error: Some(summary),
                    ..Self::idle()
                }
            }
            IndividualOutcome::Parsed(bundle) => Self::from_bundle(bundle),
        }
    }
}

// =============================================================================
// 종목 상세
// =============================================================================

/// 서브 스코어 표시.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubScoreView {
    pub factor: &'static str,
    pub value: u8,
    pub comment: String,
    pub penalty: bool,
}

/// 종합 스코어 표시.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreView {
    pub subscores: Vec<SubScoreView>,
    pub composite: u8,
    pub band: &'static str,
}

impl From<&ScoreCard> for ScoreView {
    fn from(card: &ScoreCard) -> Self {
        Self {
            subscores: card
                .subscores
                .iter()
                .map(|s| SubScoreView {
                    factor: s.factor.label(),
                    value: s.value,
                    comment: s.comment.clone(),
                    penalty: s.factor.is_penalty(),
                })
                .collect(),
            composite: card.composite,
            band: card.band.label(),
        }
    }
}

/// 종목 상세 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyDetailView {
    pub symbol: String,
    pub company_name: String,
    pub as_of: String,
    pub close: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub volume: String,
    pub rsi: String,
    pub rsi_comment: String,
    pub macd_cross: String,
    pub macd_direction: String,
    pub macd_confidence: String,
    pub dev5: String,
    pub dev25: String,
    pub ma_spread_trend: String,
    pub volume_change: String,
    /// `41.20円（1.63%）`
    pub volatility: String,
    pub beta: String,
    pub earnings_date: String,
    pub earnings_highlight: bool,
    pub credit_ratio: String,
    pub cci: String,
    pub cci_score: String,
    pub cci_expectation: String,
    pub final_judgement: String,
    pub signals: String,
    pub news_heading: &'static str,
    pub news: Vec<NewsItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_message: Option<String>,
    pub score: ScoreView,
}

impl From<&CompanyReport> for CompanyDetailView {
    fn from(ready: &CompanyReport) -> Self {
        let r = &ready.report;

        let news: Vec<NewsItem> = r.news.iter().take(NEWS_DISPLAY_LIMIT).cloned().collect();
        let news_message = if news.is_empty() {
            Some(NEWS_EMPTY_MESSAGE.to_string())
        } else {
            None
        };

        let cci = match (r.cci, r.cci_prev) {
            (Some(now), Some(prev)) => format!("{:.2} (前日 {:.2})", now, prev),
            (Some(now), None) => format!("{:.2}", now),
            _ => UNKNOWN.to_string(),
        };

        Self {
            symbol: r.symbol.clone(),
            company_name: text_or_unknown(r.company_name.as_deref()),
            as_of: text_or_unknown(r.as_of.as_deref()),
            close: format_price_opt(r.close),
            open: format_price_opt(r.open),
            high: format_price_opt(r.high),
            low: format_price_opt(r.low),
            volume: format_metric(r.volume, 0),
            rsi: format_metric(r.rsi, 2),
            rsi_comment: text_or_unknown(r.rsi_comment.as_deref()),
            macd_cross: r
                .macd_cross
                .map_or_else(|| UNKNOWN.to_string(), |c| c.label().to_string()),
            macd_direction: text_or_unknown(r.macd_direction.as_deref()),
            macd_confidence: format_metric_percent(r.macd_confidence, 0),
            dev5: format_metric_percent(r.dev5_percent, 2),
            dev25: format_metric_percent(r.dev25_percent, 2),
            ma_spread_trend: text_or_unknown(r.ma_spread_trend.as_deref()),
            volume_change: format_metric_percent(r.volume_change_percent, 2),
            volatility: match (r.volatility_yen, r.volatility_percent) {
                (None, None) => UNKNOWN.to_string(),
                (yen, percent) => format!(
                    "{}円（{}）",
                    format_metric(yen, 2),
                    format_metric_percent(percent, 2)
                ),
            },
            beta: format_metric(r.beta, 3),
            earnings_date: r
                .earnings_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .or_else(|| r.earnings_date_raw.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            earnings_highlight: r.earnings_highlight,
            credit_ratio: format_metric(r.credit_ratio, 2),
            cci,
            cci_score: format_metric(r.cci_score, 2),
            cci_expectation: text_or_unknown(r.cci_expectation.as_deref()),
            final_judgement: text_or_unknown(r.final_judgement.as_deref()),
            signals: if r.signals.is_empty() {
                UNKNOWN.to_string()
            } else {
                r.signals.join(SIGNAL_SEPARATOR)
            },
            news_heading: NEWS_HEADING,
            news,
            news_message,
            score: ScoreView::from(&ready.score),
        }
    }
}

/// 종목 상세 화면.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyView {
    pub status: ViewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportErrorSummary>,
    pub detail: Option<CompanyDetailView>,
}

impl From<&CompanyOutcome> for CompanyView {
    fn from(outcome: &CompanyOutcome) -> Self {
        match outcome {
            CompanyOutcome::Idle => Self {
                status: ViewStatus::Idle,
                message: Some(IDLE_MESSAGE.to_string()),
                error: None,
                detail: None,
            },
            CompanyOutcome::Failed(e) => {
                let summary = ReportErrorSummary::from(e);
                Self {
                    status: ViewStatus::Error,
                    message: Some(summary.message.clone()),
                    error: Some(summary),
                    detail: None,
                }
            }
            CompanyOutcome::Ready(ready) => Self {
                status: ViewStatus::Ok,
                message: None,
                error: None,
                detail: Some(CompanyDetailView::from(ready.as_ref())),
            },
        }
    }
}

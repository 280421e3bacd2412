//! 일별 결과 화면 모델.
//!
//! 저장소 행을 표시용 문자열로 바꾸고, 분석 일자 목록을 연/월/일로 묶습니다.

use chrono::{Datelike, Local};
use serde::Serialize;

use swing_core::format::{
    format_day_label, format_japanese_date, format_month_heading, format_percent_relative,
    format_price, format_rate, format_truncated, UNKNOWN,
};
use swing_core::{
    AnalysisDate, BandwalkResultRow, Detection, ExpansionResultRow, ScoreStatus, TrinityResultRow,
};

use crate::labels::{bb_width_status, expansion_rate_status, rsi_status, vwap_trend};

/// 차트 링크 접두사.
pub const CHART_URL_PREFIX: &str = "https://kabutan.jp/stock/chart?code=";

// =============================================================================
// 날짜 인덱스
// =============================================================================

/// 하루 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `5日`
    pub label: String,
}

/// 월 묶음.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    /// `2024年3月`
    pub heading: String,
    pub days: Vec<DayEntry>,
}

/// 연 묶음.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGroup {
    pub year: i32,
    pub months: Vec<MonthGroup>,
}

/// 분석 일자를 연 → 월 → 일로 묶습니다. 모두 최신순입니다.
pub fn group_dates(dates: &[AnalysisDate]) -> Vec<YearGroup> {
    let mut sorted: Vec<_> = dates.iter().map(AnalysisDate::date).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    let mut years: Vec<YearGroup> = Vec::new();
    for date in sorted {
        if years.last().map(|y| y.year) != Some(date.year()) {
            years.push(YearGroup {
                year: date.year(),
                months: Vec::new(),
            });
        }
        let Some(year) = years.last_mut() else {
            continue;
        };

        let heading = format_month_heading(date);
        if year.months.last().map(|m| m.heading.as_str()) != Some(heading.as_str()) {
            year.months.push(MonthGroup {
                heading,
                days: Vec::new(),
            });
        }
        if let Some(month) = year.months.last_mut() {
            month.days.push(DayEntry {
                date: date.format("%Y-%m-%d").to_string(),
                label: format_day_label(date),
            });
        }
    }
    years
}

// =============================================================================
// 일별 결과
// =============================================================================

/// 삼위일체 결과 표시 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrinityRowView {
    pub code: String,
    pub company_name: String,
    pub chart_url: String,
    pub price: String,
    pub score: i64,
    pub score_class: &'static str,
    pub status: &'static str,
    pub rsi_9: String,
    pub rsi_status: &'static str,
    pub vwap: String,
    pub vwap_trend: &'static str,
    pub bb_width: String,
    pub bb_status: &'static str,
    pub profit_target: String,
    pub stop_loss: String,
}

impl From<&TrinityResultRow> for TrinityRowView {
    fn from(row: &TrinityResultRow) -> Self {
        let status = ScoreStatus::from_score(row.score);
        Self {
            code: row.code.clone(),
            company_name: display_name(row.company_name.as_deref()),
            chart_url: chart_url(&row.code),
            price: format_price(row.price),
            score: row.score,
            score_class: status.css_class(),
            status: status.label(),
            rsi_9: format_truncated(row.rsi_9),
            rsi_status: rsi_status(row.rsi_9),
            vwap: format_truncated(row.vwap),
            vwap_trend: vwap_trend(row.price, row.vwap),
            bb_width: format_truncated(row.bb_width),
            bb_status: bb_width_status(row.bb_width),
            profit_target: format_percent_relative(row.price, row.profit_target),
            stop_loss: format_percent_relative(row.price, row.stop_loss),
        }
    }
}

/// 밴드워크 결과 표시 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandwalkRowView {
    pub code: String,
    pub company_name: String,
    pub chart_url: String,
    pub price: String,
    pub detected: bool,
    pub badge: &'static str,
    pub bb_width: String,
    pub profit_target: String,
    pub stop_loss: String,
}

impl From<&BandwalkResultRow> for BandwalkRowView {
    fn from(row: &BandwalkResultRow) -> Self {
        let detection = Detection::from_flag(row.is_bandwalk);
        Self {
            code: row.code.clone(),
            company_name: display_name(row.company_name.as_deref()),
            chart_url: chart_url(&row.code),
            price: format_price(row.price),
            detected: detection.detected,
            badge: detection.badge(),
            bb_width: format_truncated(row.bb_width),
            profit_target: format_percent_relative(row.price, row.profit_target),
            stop_loss: format_percent_relative(row.price, row.stop_loss),
        }
    }
}

/// 익스팬션 결과 표시 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionRowView {
    pub code: String,
    pub company_name: String,
    pub chart_url: String,
    pub price: String,
    pub detected: bool,
    pub badge: &'static str,
    pub bb_width: String,
    pub expansion_rate: String,
    pub rate_status: &'static str,
    pub profit_target: String,
    pub stop_loss: String,
}

impl From<&ExpansionResultRow> for ExpansionRowView {
    fn from(row: &ExpansionResultRow) -> Self {
        let detection = Detection::from_flag(row.is_expansion);
        Self {
            code: row.code.clone(),
            company_name: display_name(row.company_name.as_deref()),
            chart_url: chart_url(&row.code),
            price: format_price(row.price),
            detected: detection.detected,
            badge: detection.badge(),
            bb_width: format_truncated(row.bb_width),
            expansion_rate: format_rate(row.expansion_rate),
            rate_status: expansion_rate_status(row.expansion_rate),
            profit_target: format_percent_relative(row.price, row.profit_target),
            stop_loss: format_percent_relative(row.price, row.stop_loss),
        }
    }
}

/// 하루치 결과 화면.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyResultsView {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `YYYY年MM月DD日`
    pub heading: String,
    /// 발생 중인 밴드워크/익스팬션만 표시하는지
    pub active_only: bool,
    pub trinity: Vec<TrinityRowView>,
    pub bandwalk: Vec<BandwalkRowView>,
    pub expansion: Vec<ExpansionRowView>,
}

impl DailyResultsView {
    /// 저장소 행에서 화면 모델을 만듭니다.
    ///
    /// `active_only`이면 검출되지 않은 밴드워크/익스팬션 행을 제외합니다.
    /// 삼위일체 행은 항상 모두 포함합니다.
    pub fn build(
        date: &AnalysisDate,
        trinity: &[TrinityResultRow],
        bandwalk: &[BandwalkResultRow],
        expansion: &[ExpansionResultRow],
        active_only: bool,
    ) -> Self {
        Self {
            date: date.to_iso(),
            heading: format_japanese_date(date.date()),
            active_only,
            trinity: trinity.iter().map(TrinityRowView::from).collect(),
            bandwalk: bandwalk
                .iter()
                .filter(|row| !active_only || row.is_bandwalk)
                .map(BandwalkRowView::from)
                .collect(),
            expansion: expansion
                .iter()
                .filter(|row| !active_only || row.is_expansion)
                .map(ExpansionRowView::from)
                .collect(),
        }
    }

    /// 표시할 행이 하나도 없는지.
    pub fn is_empty(&self) -> bool {
        self.trinity.is_empty() && self.bandwalk.is_empty() && self.expansion.is_empty()
    }
}

/// 날짜가 지정되지 않았을 때의 기준일 (오늘).
pub fn default_results_date() -> AnalysisDate {
    AnalysisDate::from(Local::now().date_naive())
}

fn display_name(name: Option<&str>) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn chart_url(code: &str) -> String {
    format!("{CHART_URL_PREFIX}{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> AnalysisDate {
        AnalysisDate::parse(s).unwrap()
    }

    fn trinity_row(code: &str, score: i64, profit_target: Option<f64>) -> TrinityResultRow {
        TrinityResultRow {
            analysis_date: "2024-05-08".to_string(),
            code: code.to_string(),
            company_name: Some("トヨタ自動車".to_string()),
            price: 1000.0,
            score,
            rsi_9: 72.9,
            vwap: 990.4,
            bb_width: 12.97,
            profit_target,
            stop_loss: Some(950.0),
        }
    }

    fn bandwalk_row(code: &str, is_bandwalk: bool) -> BandwalkResultRow {
        BandwalkResultRow {
            analysis_date: "2024-05-08".to_string(),
            code: code.to_string(),
            company_name: None,
            is_bandwalk,
            price: 2000.0,
            bb_width: 8.5,
            profit_target: Some(2200.0),
            stop_loss: None,
        }
    }

    #[test]
    fn test_group_dates_newest_first() {
        let dates = [
            date("2023-12-28"),
            date("2024-03-05"),
            date("2024-03-12"),
            date("2024-01-09"),
            date("2024-03-12"),
        ];
        let groups = group_dates(&dates);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].year, 2024);
        assert_eq!(groups[0].months[0].heading, "2024年3月");
        assert_eq!(groups[0].months[0].days.len(), 2);
        assert_eq!(groups[0].months[0].days[0].label, "12日");
        assert_eq!(groups[0].months[0].days[1].date, "2024-03-05");
        assert_eq!(groups[0].months[1].heading, "2024年1月");
        assert_eq!(groups[1].year, 2023);
        assert_eq!(groups[1].months[0].days[0].label, "28日");
    }

    #[test]
    fn test_group_dates_empty() {
        assert!(group_dates(&[]).is_empty());
    }

    #[test]
    fn test_trinity_row_view() {
        let view = TrinityRowView::from(&trinity_row("7203", 75, Some(1200.0)));
        assert_eq!(view.price, "1000円");
        assert_eq!(view.score_class, "score-high");
        assert_eq!(view.rsi_9, "72");
        assert_eq!(view.rsi_status, "買われすぎ");
        assert_eq!(view.vwap, "990");
        assert_eq!(view.vwap_trend, "上昇傾向");
        assert_eq!(view.bb_width, "12");
        assert_eq!(view.profit_target, "1200円 (+20%)");
        assert_eq!(view.stop_loss, "950円 (-5%)");
        assert_eq!(view.chart_url, "https://kabutan.jp/stock/chart?code=7203");
    }

    #[test]
    fn test_zero_target_renders_dash() {
        let view = TrinityRowView::from(&trinity_row("7203", 40, Some(0.0)));
        assert_eq!(view.profit_target, "-");
        assert_eq!(view.score_class, "score-low");
    }

    #[test]
    fn test_daily_view_active_only_filter() {
        let day = date("2024-05-08");
        let trinity = vec![trinity_row("7203", 60, None)];
        let bandwalk = vec![bandwalk_row("6758", true), bandwalk_row("7203", false)];

        let active = DailyResultsView::build(&day, &trinity, &bandwalk, &[], true);
        assert_eq!(active.heading, "2024年05月08日");
        assert_eq!(active.trinity.len(), 1);
        assert_eq!(active.bandwalk.len(), 1);
        assert_eq!(active.bandwalk[0].badge, "⭕ 発生中");
        assert_eq!(active.bandwalk[0].company_name, "—");
        assert_eq!(active.bandwalk[0].stop_loss, "-");

        let all = DailyResultsView::build(&day, &trinity, &bandwalk, &[], false);
        assert_eq!(all.bandwalk.len(), 2);
        assert_eq!(all.bandwalk[1].badge, "❌ なし");
        assert!(!all.is_empty());
    }

    #[test]
    fn test_expansion_row_view() {
        let row = ExpansionResultRow {
            analysis_date: "2024-05-08".to_string(),
            code: "285A".to_string(),
            company_name: Some("キオクシア".to_string()),
            is_expansion: true,
            price: 1500.0,
            bb_width: 18.2,
            expansion_rate: 23.9,
            profit_target: Some(1650.0),
            stop_loss: Some(1420.0),
        };
        let view = ExpansionRowView::from(&row);
        assert_eq!(view.expansion_rate, "23%");
        assert_eq!(view.rate_status, "急拡大");
        assert_eq!(view.profit_target, "1650円 (+10%)");
        assert_eq!(view.stop_loss, "1420円 (-5%)");
    }
}

//! 종목 상세 JSON 정규화.
//!
//! 분석 엔진의 JSON 출력은 두 세대의 필드 이름이 섞여 있습니다.
//! 현행 평탄 키(`RSI`, `MACD_cross`, `credit_ratio` ...)를 먼저 보고,
//! 없으면 구 중첩 키(`rsi.value`, `macd.cross` ...)를 봅니다.
//! 어떤 키가 없어도 실패하지 않으며, 없는 값은 `None`으로 남습니다.

use chrono::{Duration, Local, NaiveDate};
use serde_json::Value;
use tracing::debug;

use swing_core::{CrossState, InstrumentCode, InstrumentReport, NewsItem, Trend};

use crate::json_path::{first_present, lookup};

/// 화면에 표시하는 뉴스 최대 건수.
pub const NEWS_DISPLAY_LIMIT: usize = 10;

/// 결산 발표일 강조 기간 (오늘 포함, 일 단위).
pub const EARNINGS_HIGHLIGHT_DAYS: i64 = 3;

/// 논리 필드별 후보 경로.
mod paths {
    pub const SYMBOL: &[&str] = &["symbol"];
    pub const COMPANY_NAME: &[&str] = &["company_name", "name"];
    pub const AS_OF: &[&str] = &["latest.date", "updated"];
    pub const CLOSE: &[&str] = &["close", "latest.close"];
    pub const OPEN: &[&str] = &["open", "latest.open"];
    pub const HIGH: &[&str] = &["high", "latest.high"];
    pub const LOW: &[&str] = &["low", "latest.low"];
    pub const VOLUME: &[&str] = &["volume", "latest.volume"];
    pub const RSI: &[&str] = &["RSI", "rsi.value"];
    pub const RSI_COMMENT: &[&str] = &["RSI_comment", "rsi.comment"];
    pub const MACD_CROSS: &[&str] = &["MACD_cross", "macd.cross"];
    pub const MACD_DIRECTION: &[&str] = &["MACD_direction", "macd.direction"];
    pub const MACD_CONFIDENCE: &[&str] = &["MACD_confidence", "macd.confidence_percent"];
    pub const MA_SPREAD: &[&str] = &["MA5_25_spread", "moving_averages.spread_trend"];
    pub const MA5_TREND: &[&str] = &["MA5_trend", "moving_averages.ma5_trend"];
    pub const MA25_TREND: &[&str] = &["MA25_trend", "moving_averages.ma25_trend"];
    pub const MA75_TREND: &[&str] = &["MA75_trend", "moving_averages.ma75_trend"];
    pub const MA_CROSS: &[&str] = &["MA5_25_cross", "moving_averages.cross"];
    pub const DEV5: &[&str] = &["MA5_dev", "moving_averages.dev5_percent"];
    pub const DEV25: &[&str] = &["MA25_dev", "moving_averages.dev25_percent"];
    pub const VOLUME_CHANGE: &[&str] = &[
        "volume_change_percent",
        "moving_averages.volume_change_percent",
    ];
    pub const VOLATILITY_YEN: &[&str] = &["volatility_5d.range_yen", "volatility_5d.avg_range_yen"];
    pub const VOLATILITY_PERCENT: &[&str] = &[
        "volatility_5d.range_percent",
        "volatility_5d.avg_range_percent",
    ];
    pub const BETA: &[&str] = &["beta"];
    pub const EARNINGS_DATE: &[&str] = &["earnings_date", "earnings_next.date"];
    pub const CREDIT_RATIO: &[&str] = &["credit_ratio", "credit_ratio.value"];
    pub const CCI: &[&str] = &["CCI", "cci.value"];
    pub const CCI_PREV: &[&str] = &["CCI_prev", "cci.previous"];
    pub const CCI_SCORE: &[&str] = &["CCI_score", "cci.score"];
    pub const CCI_EXPECTATION: &[&str] = &["CCI_expectation", "cci.expectation"];
    pub const FINAL_JUDGEMENT: &[&str] = &["final_judgement"];
    pub const SIGNALS: &[&str] = &["signals"];
    pub const NEWS_LIST: &[&str] = &["news.news", "news.items"];
    pub const NEWS_ERROR: &[&str] = &["news.error"];
}

/// 오늘 날짜 기준으로 JSON 문서를 정규화합니다.
pub fn normalize_report(doc: &Value, code_fallback: &InstrumentCode) -> InstrumentReport {
    normalize_report_with_today(doc, code_fallback, Local::now().date_naive())
}

/// 기준일을 지정하여 JSON 문서를 정규화합니다.
///
/// ```
/// use chrono::NaiveDate;
/// use serde_json::json;
/// use swing_analytics::json_report::normalize_report_with_today;
/// use swing_core::InstrumentCode;
///
/// let code: InstrumentCode = "7203".parse().unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
/// let report = normalize_report_with_today(
///     &json!({"RSI": 73.77, "credit_ratio": 15.3}),
///     &code,
///     today,
/// );
/// assert_eq!(report.rsi, Some(73.77));
/// assert_eq!(report.credit_ratio, Some(15.3));
/// assert_eq!(report.beta, None);
/// ```
pub fn normalize_report_with_today(
    doc: &Value,
    code_fallback: &InstrumentCode,
    today: NaiveDate,
) -> InstrumentReport {
    let symbol = text_at(doc, paths::SYMBOL).unwrap_or_else(|| code_fallback.to_string());
    let mut report = InstrumentReport::empty(symbol);

    report.company_name = text_at(doc, paths::COMPANY_NAME);
    report.as_of = text_at(doc, paths::AS_OF).map(|s| date_part(&s).to_string());

    report.close = number_at(doc, paths::CLOSE);
    report.open = number_at(doc, paths::OPEN);
    report.high = number_at(doc, paths::HIGH);
    report.low = number_at(doc, paths::LOW);
    report.volume = number_at(doc, paths::VOLUME);

    report.rsi = number_at(doc, paths::RSI);
    report.rsi_comment = text_at(doc, paths::RSI_COMMENT);

    report.macd_cross = cross_at(doc, paths::MACD_CROSS);
    report.macd_direction = text_at(doc, paths::MACD_DIRECTION);
    report.macd_confidence = number_at(doc, paths::MACD_CONFIDENCE);

    report.ma_spread_trend = text_at(doc, paths::MA_SPREAD);
    report.ma5_trend = trend_at(doc, paths::MA5_TREND);
    report.ma25_trend = trend_at(doc, paths::MA25_TREND);
    report.ma75_trend = trend_at(doc, paths::MA75_TREND);
    report.ma_cross = cross_at(doc, paths::MA_CROSS);
    report.dev5_percent = number_at(doc, paths::DEV5);
    report.dev25_percent = number_at(doc, paths::DEV25);

    report.volume_change_percent = number_at(doc, paths::VOLUME_CHANGE);
    report.volatility_yen = number_at(doc, paths::VOLATILITY_YEN);
    report.volatility_percent = number_at(doc, paths::VOLATILITY_PERCENT);
    report.beta = number_at(doc, paths::BETA);

    report.earnings_date_raw = text_at(doc, paths::EARNINGS_DATE);
    report.earnings_date = report.earnings_date_raw.as_deref().and_then(parse_report_date);
    report.earnings_highlight = report
        .earnings_date
        .is_some_and(|date| is_earnings_imminent(date, today));

    report.credit_ratio = number_at(doc, paths::CREDIT_RATIO);

    report.cci = number_at(doc, paths::CCI);
    report.cci_prev = number_at(doc, paths::CCI_PREV);
    report.cci_score = number_at(doc, paths::CCI_SCORE);
    report.cci_expectation = text_at(doc, paths::CCI_EXPECTATION);

    report.final_judgement = text_at(doc, paths::FINAL_JUDGEMENT);
    report.signals = first_present(doc, paths::SIGNALS, string_list)
        .into_option()
        .unwrap_or_default();
    report.news = first_present(doc, paths::NEWS_LIST, news_list)
        .into_option()
        .unwrap_or_default();
    report.news_error = text_at(doc, paths::NEWS_ERROR);

    debug!(
        symbol = %report.symbol,
        news = report.news.len(),
        earnings_highlight = report.earnings_highlight,
        "JSON report normalized"
    );

    report
}

/// 보고서에 나타나는 날짜 문자열을 해석합니다.
///
/// `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM-DD HH:MM:SS`(앞의 날짜 부분)를 받습니다.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let head = date_part(raw.trim());
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(head, fmt).ok())
}

/// 결산 발표일이 [today, today + 3일] 안에 있는지.
pub fn is_earnings_imminent(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && date <= today + Duration::days(EARNINGS_HIGHLIGHT_DAYS)
}

/// 일시 문자열의 날짜 부분 (첫 공백 또는 `T` 앞).
fn date_part(raw: &str) -> &str {
    raw.split([' ', 'T']).next().unwrap_or(raw)
}

fn number_at(doc: &Value, candidates: &[&str]) -> Option<f64> {
    first_present(doc, candidates, as_number).into_option()
}

fn text_at(doc: &Value, candidates: &[&str]) -> Option<String> {
    first_present(doc, candidates, as_text).into_option()
}

fn trend_at(doc: &Value, candidates: &[&str]) -> Option<Trend> {
    first_present(doc, candidates, |v| v.as_str().and_then(Trend::parse_label)).into_option()
}

fn cross_at(doc: &Value, candidates: &[&str]) -> Option<CrossState> {
    first_present(doc, candidates, |v| {
        v.as_str().and_then(CrossState::parse_label)
    })
    .into_option()
}

/// JSON 숫자 또는 숫자 문자열.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// 비어 있지 않은 문자열.
fn as_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(items.iter().filter_map(as_text).collect())
}

fn news_list(value: &Value) -> Option<Vec<NewsItem>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| NewsItem {
                title: lookup(item, "title").and_then(as_text).into_option(),
                url: lookup(item, "url").and_then(as_text).into_option(),
                published_at: lookup(item, "published_at").and_then(as_text).into_option(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code() -> InstrumentCode {
        "7203".parse().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()
    }

    #[test]
    fn test_minimal_document_leaves_rest_unknown() {
        let doc = json!({"RSI": 73.77, "credit_ratio": 15.3});
        let report = normalize_report_with_today(&doc, &code(), today());

        assert_eq!(report.symbol, "7203");
        assert_eq!(report.rsi, Some(73.77));
        assert_eq!(report.credit_ratio, Some(15.3));
        assert_eq!(report.close, None);
        assert_eq!(report.macd_cross, None);
        assert_eq!(report.volume_change_percent, None);
        assert_eq!(report.volatility_percent, None);
        assert_eq!(report.beta, None);
        assert_eq!(report.earnings_date, None);
        assert!(!report.earnings_highlight);
        assert!(report.news.is_empty());
        assert!(report.signals.is_empty());
    }

    #[test]
    fn test_current_generation_document() {
        let doc = json!({
            "symbol": "7203",
            "RSI": 55.1,
            "MACD_cross": "⭕️",
            "MA5_25_spread": "拡大",
            "volume_change_percent": 23.4,
            "volatility_5d": {"range_yen": 41.2, "range_percent": 1.63},
            "beta": 0.912,
            "earnings_date": "2024-05-10",
            "credit_ratio": 3.2,
            "news": {"news": [
                {"title": "決算発表", "url": "https://example.com/1", "published_at": "05/08 15:00"},
                {"title": "株価上昇"}
            ]},
            "updated": "2024-05-08 16:30:00"
        });
        let report = normalize_report_with_today(&doc, &code(), today());

        assert_eq!(report.macd_cross, Some(CrossState::Golden));
        assert_eq!(report.ma_spread_trend.as_deref(), Some("拡大"));
        assert_eq!(report.volume_change_percent, Some(23.4));
        assert_eq!(report.volatility_yen, Some(41.2));
        assert_eq!(report.volatility_percent, Some(1.63));
        assert_eq!(report.as_of.as_deref(), Some("2024-05-08"));
        assert_eq!(report.earnings_date, NaiveDate::from_ymd_opt(2024, 5, 10));
        assert!(report.earnings_highlight);
        assert_eq!(report.news.len(), 2);
        assert_eq!(report.news[0].title.as_deref(), Some("決算発表"));
        assert_eq!(report.news[1].url, None);
    }

    #[test]
    fn test_legacy_generation_document() {
        let doc = json!({
            "name": "トヨタ自動車",
            "latest": {"date": "2024-05-07", "close": 3412.0, "volume": 1200000},
            "rsi": {"value": 28.4, "comment": "売られすぎ"},
            "macd": {"cross": "dead", "direction": "下向き", "confidence_percent": "62"},
            "moving_averages": {
                "spread_trend": "縮小",
                "ma5_trend": "下降",
                "ma25_trend": "down",
                "ma75_trend": "横ばい",
                "cross": "DC",
                "volume_change_percent": -12.5
            },
            "volatility_5d": {"avg_range_yen": 50.0, "avg_range_percent": 1.5},
            "credit_ratio": {"value": 2.4},
            "cci": {"value": -120.0, "previous": -90.0, "score": 2, "expectation": "反発期待"},
            "news": {"items": [{"title": "a"}, "not an object"], "error": "timeout"}
        });
        let report = normalize_report_with_today(&doc, &code(), today());

        assert_eq!(report.company_name.as_deref(), Some("トヨタ自動車"));
        assert_eq!(report.as_of.as_deref(), Some("2024-05-07"));
        assert_eq!(report.close, Some(3412.0));
        assert_eq!(report.volume, Some(1_200_000.0));
        assert_eq!(report.rsi, Some(28.4));
        assert_eq!(report.rsi_comment.as_deref(), Some("売られすぎ"));
        assert_eq!(report.macd_cross, Some(CrossState::Dead));
        assert_eq!(report.macd_confidence, Some(62.0));
        assert_eq!(report.ma5_trend, Some(Trend::Down));
        assert_eq!(report.ma25_trend, Some(Trend::Down));
        assert_eq!(report.ma75_trend, Some(Trend::Flat));
        assert_eq!(report.ma_cross, Some(CrossState::Dead));
        assert_eq!(report.volume_change_percent, Some(-12.5));
        assert_eq!(report.volatility_percent, Some(1.5));
        assert_eq!(report.credit_ratio, Some(2.4));
        assert_eq!(report.cci_prev, Some(-90.0));
        assert_eq!(report.cci_expectation.as_deref(), Some("反発期待"));
        assert_eq!(report.news.len(), 1);
        assert_eq!(report.news_error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_current_name_wins_over_legacy() {
        let doc = json!({
            "RSI": 61.0,
            "rsi": {"value": 20.0},
            "credit_ratio": 8.0,
            "close": 1000,
            "latest": {"close": 900}
        });
        let report = normalize_report_with_today(&doc, &code(), today());
        assert_eq!(report.rsi, Some(61.0));
        assert_eq!(report.credit_ratio, Some(8.0));
        assert_eq!(report.close, Some(1000.0));
    }

    #[test]
    fn test_null_and_garbage_values_are_unknown() {
        let doc = json!({
            "RSI": null,
            "beta": "n/a",
            "MACD_cross": "N/A",
            "volume_change_percent": [1, 2],
            "signals": ["GC接近", 3, ""]
        });
        let report = normalize_report_with_today(&doc, &code(), today());
        assert_eq!(report.rsi, None);
        assert_eq!(report.beta, None);
        assert_eq!(report.macd_cross, None);
        assert_eq!(report.volume_change_percent, None);
        assert_eq!(report.signals, vec!["GC接近".to_string()]);
    }

    #[test]
    fn test_earnings_highlight_window() {
        let doc = |date: &str| json!({ "earnings_date": date });

        let same_day = normalize_report_with_today(&doc("2024-05-08"), &code(), today());
        assert!(same_day.earnings_highlight);

        let edge = normalize_report_with_today(&doc("2024/05/11"), &code(), today());
        assert!(edge.earnings_highlight);

        let too_far = normalize_report_with_today(&doc("2024-05-12"), &code(), today());
        assert!(!too_far.earnings_highlight);
        assert!(too_far.earnings_date.is_some());

        let past = normalize_report_with_today(&doc("2024-05-07"), &code(), today());
        assert!(!past.earnings_highlight);

        let garbage = normalize_report_with_today(&doc("未定"), &code(), today());
        assert!(!garbage.earnings_highlight);
        assert_eq!(garbage.earnings_date, None);
        assert_eq!(garbage.earnings_date_raw.as_deref(), Some("未定"));
    }

    #[test]
    fn test_parse_report_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(parse_report_date("2024-02-29"), expected);
        assert_eq!(parse_report_date("2024/02/29"), expected);
        assert_eq!(parse_report_date("2024-02-29 09:00:00"), expected);
        assert_eq!(parse_report_date("2024-02-29T09:00:00"), expected);
        assert_eq!(parse_report_date("2023-02-29"), None);
        assert_eq!(parse_report_date(""), None);
    }

    #[test]
    fn test_non_object_document_yields_empty_report() {
        let report = normalize_report_with_today(&json!([1, 2, 3]), &code(), today());
        assert_eq!(report, InstrumentReport::empty("7203"));
    }
}

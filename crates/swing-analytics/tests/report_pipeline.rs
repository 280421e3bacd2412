//! 텍스트/JSON 리포트에서 화면 문자열까지의 통합 테스트.

use chrono::NaiveDate;
use serde_json::json;
use swing_analytics::{normalize_report_with_today, parse_text_report, score_report};
use swing_core::format::{format_percent_relative, format_price};
use swing_core::{CompositeBand, Factor, InstrumentCode, ReportError, ScoreStatus};

const ENGINE_OUTPUT: &str = "\
分析開始: 6758
=== 三位一体モデル評価結果 ===
現在価格: 3120円
スコア: 64点
RSI_9: 58.20
VWAP: 3098円
BBバンド幅: 7.4
利食い目標: 3300円
損切りライン: 3010円

=== バンドウォーク検出銘柄 ===
現在価格: 3120円
バンドウォーク: ❌ なし
BBバンド幅: 7.4
";

#[test]
fn text_report_to_display_strings() {
    let code: InstrumentCode = "6758".parse().unwrap();
    let bundle = parse_text_report(ENGINE_OUTPUT, &code);

    assert!(bundle.error.is_none());
    let trinity = bundle.trinity.expect("trinity section");
    assert_eq!(trinity.status, Some(ScoreStatus::Medium));

    let price = trinity.price.unwrap();
    assert_eq!(format_price(price), "3120円");
    assert_eq!(format_percent_relative(price, trinity.profit_target), "3300円 (+6%)");
    assert_eq!(format_percent_relative(price, trinity.stop_loss), "3010円 (-4%)");

    let bandwalk = bundle.bandwalk.expect("bandwalk section");
    assert!(!bandwalk.bandwalk.unwrap().detected);
    assert!(bundle.expansion.is_none());
}

#[test]
fn error_marker_coexists_with_partial_data() {
    let code: InstrumentCode = "6758".parse().unwrap();
    let raw = format!("{}\nError: failed to download 6758.T\n", ENGINE_OUTPUT);
    let bundle = parse_text_report(&raw, &code);

    assert!(bundle.trinity.is_some());
    assert_eq!(bundle.primary_error(), Some(&ReportError::FetchFailed));
}

#[test]
fn json_report_to_score_card() {
    let code: InstrumentCode = "6758".parse().unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
    let doc = json!({
        "symbol": "6758",
        "RSI": 45.0,
        "MACD_cross": "⭕️",
        "volume_change_percent": 60.0,
        "volatility_5d": {"range_yen": 160.0, "range_percent": 5.2},
        "credit_ratio": 1.4,
        "earnings_date": "2024-05-09",
        "moving_averages": {"ma5_trend": "up", "ma25_trend": "up", "ma75_trend": "up"}
    });

    let report = normalize_report_with_today(&doc, &code, today);
    assert!(report.earnings_highlight);

    let card = score_report(&report);
    assert_eq!(card.get(Factor::RisingPower).unwrap().value, 5);
    assert_eq!(card.get(Factor::BuyingPressure).unwrap().value, 5);
    assert_eq!(card.get(Factor::Opportunity).unwrap().value, 4);
    // 5*6 + 4*6 + 5*3 - 3*3 - 2*2 = 56
    assert_eq!(card.composite, 56);
    assert_eq!(card.band, CompositeBand::Neutral);
}

//! 가격, 퍼센트, 날짜 표시 포맷.
//!
//! 리포트 값과 결과 행을 표시 문자열로 바꾸는 함수는 모두 여기에 있습니다.
//! 값이 없으면 `0`이 아니라 자리표시 문자를 출력합니다.

use chrono::{Datelike, NaiveDate};

/// 목표가가 없거나 0일 때의 표시.
pub const DASH: &str = "-";

/// 알 수 없는 지표 값의 표시.
pub const UNKNOWN: &str = "—";

/// 통화 접미사.
pub const YEN: &str = "円";

/// 가격을 반올림한 정수 + 엔 접미사로 표시합니다.
///
/// 0.5는 0에서 먼 쪽으로 반올림합니다. 유한하지 않은 값은 [`DASH`].
///
/// # 예제
///
/// ```
/// use swing_core::format::format_price;
///
/// assert_eq!(format_price(1500.0), "1500円");
/// assert_eq!(format_price(1234.5), "1235円");
/// assert_eq!(format_price(99.49), "99円");
/// ```
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return DASH.to_string();
    }
    format!("{}{}", price.round() as i64, YEN)
}

/// 값이 없으면 [`DASH`].
#[inline]
pub fn format_price_opt(price: Option<f64>) -> String {
    price.map_or_else(|| DASH.to_string(), format_price)
}

/// 목표가와 현재가 대비 등락률을 함께 표시합니다.
///
/// 퍼센트는 `(target - current) / current * 100`을 정수로 반올림하며 항상 부호를 붙입니다.
/// 목표가가 없거나 정확히 0이면 [`DASH`]이고 두 경우는 구별하지 않습니다.
/// `current`가 0이거나 유한하지 않으면 퍼센트를 생략합니다.
///
/// # 예제
///
/// ```
/// use swing_core::format::format_percent_relative;
///
/// assert_eq!(format_percent_relative(1000.0, Some(1200.0)), "1200円 (+20%)");
/// assert_eq!(format_percent_relative(1000.0, Some(950.0)), "950円 (-5%)");
/// assert_eq!(format_percent_relative(1000.0, Some(0.0)), "-");
/// assert_eq!(format_percent_relative(1000.0, None), "-");
/// ```
pub fn format_percent_relative(current: f64, target: Option<f64>) -> String {
    let target = match target {
        Some(t) if t != 0.0 && t.is_finite() => t,
        _ => return DASH.to_string(),
    };

    if current == 0.0 || !current.is_finite() {
        return format_price(target);
    }

    let percent = (target - current) / current * 100.0;
    format!("{} ({:+}%)", format_price(target), percent.round() as i64)
}

/// 0 방향으로 버림한 정수 (밴드폭 표시용).
///
/// ```
/// use swing_core::format::format_truncated;
///
/// assert_eq!(format_truncated(12.97), "12");
/// assert_eq!(format_truncated(-3.5), "-3");
/// ```
pub fn format_truncated(value: f64) -> String {
    if !value.is_finite() {
        return DASH.to_string();
    }
    format!("{}", value.trunc() as i64)
}

/// 비율을 버림한 정수 퍼센트로 표시합니다 (`"23%"`).
pub fn format_rate(rate: f64) -> String {
    if !rate.is_finite() {
        return DASH.to_string();
    }
    format!("{}%", rate.trunc() as i64)
}

/// 지표 값을 소수점 `decimals` 자리로 반올림합니다.
///
/// 끝의 0은 유지합니다. 값이 없으면 [`UNKNOWN`].
///
/// ```
/// use swing_core::format::format_metric;
///
/// assert_eq!(format_metric(Some(73.7712), 2), "73.77");
/// assert_eq!(format_metric(Some(1.5), 0), "2");
/// assert_eq!(format_metric(None, 2), "—");
/// ```
pub fn format_metric(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => UNKNOWN.to_string(),
    }
}

/// 퍼센트 지표 (`"12.5%"`). 값이 없으면 [`UNKNOWN`].
pub fn format_metric_percent(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}%", decimals, v),
        _ => UNKNOWN.to_string(),
    }
}

/// 일자 제목 (`"2024年03月05日"`).
pub fn format_japanese_date(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

/// 월 그룹 제목, 0 채움 없음 (`"2024年3月"`).
pub fn format_month_heading(date: NaiveDate) -> String {
    format!("{}年{}月", date.year(), date.month())
}

/// 일 라벨, 0 채움 없음 (`"5日"`).
pub fn format_day_label(date: NaiveDate) -> String {
    format!("{}日", date.day())
}

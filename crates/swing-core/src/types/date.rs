//! 분석 날짜.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SwingError;

/// 저장소 조회에 사용하는 분석 날짜 (`YYYY-MM-DD`).
///
/// 형식과 실제 달력 날짜를 모두 검증한 뒤에만 생성됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisDate(NaiveDate);

impl AnalysisDate {
    /// `YYYY-MM-DD` 문자열을 파싱합니다.
    ///
    /// 자릿수가 맞지 않거나(`2024-1-5`) 존재하지 않는 날짜(`2024-02-30`)는 거부합니다.
    pub fn parse(input: &str) -> Result<Self, SwingError> {
        if !has_iso_shape(input) {
            return Err(SwingError::InvalidInput(format!(
                "日付の形式が正しくありません: {}",
                input
            )));
        }
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| SwingError::InvalidInput(format!("存在しない日付です: {}", input)))
    }

    /// 날짜 값.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// 쿼리 파라미터용 ISO 문자열.
    pub fn to_iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<NaiveDate> for AnalysisDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for AnalysisDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

fn has_iso_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = AnalysisDate::parse("2024-03-15").unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(date.to_iso(), "2024-03-15");
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(AnalysisDate::parse("2024-3-15").is_err());
        assert!(AnalysisDate::parse("2024/03/15").is_err());
        assert!(AnalysisDate::parse("2024-03-15; DROP TABLE").is_err());
        assert!(AnalysisDate::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_impossible_date() {
        let err = AnalysisDate::parse("2024-02-30").unwrap_err();
        assert!(matches!(err, SwingError::InvalidInput(_)));
    }
}

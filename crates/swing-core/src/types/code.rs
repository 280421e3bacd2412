//! 종목 코드 정규화.
//!
//! 사용자 입력을 다음 순서로 정규화합니다:
//! 1. 전각 ASCII(U+FF01..U+FF5E)와 전각 공백을 반각으로 변환
//! 2. 앞뒤 공백 제거 후 대문자화
//! 3. 시장 접미사 `.T` 제거
//! 4. `[0-9A-Z]` 이외 문자 제거
//! 5. 3~5자 검증

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ReportError;

/// 코드 최소 길이.
pub const MIN_CODE_LEN: usize = 3;
/// 코드 최대 길이.
pub const MAX_CODE_LEN: usize = 5;

const MARKET_SUFFIX: &str = ".T";

/// 정규화된 종목 코드.
///
/// 항상 `^[0-9A-Z]{3,5}$`를 만족합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentCode(String);

impl InstrumentCode {
    /// 사용자 입력을 정규화합니다.
    ///
    /// - `Ok(None)`: 입력 없음 (대기 상태, 에러 아님)
    /// - `Ok(Some(code))`: 유효한 코드
    /// - `Err(InvalidFormat)`: 정규화 결과가 3~5자가 아님
    ///
    /// # 예제
    ///
    /// ```
    /// use swing_core::types::InstrumentCode;
    ///
    /// let code = InstrumentCode::normalize("７２０３").unwrap().unwrap();
    /// assert_eq!(code.as_str(), "7203");
    ///
    /// let code = InstrumentCode::normalize(" 285a.T ").unwrap().unwrap();
    /// assert_eq!(code.as_str(), "285A");
    ///
    /// assert!(InstrumentCode::normalize("   ").unwrap().is_none());
    /// assert!(InstrumentCode::normalize("123456").is_err());
    /// ```
    pub fn normalize(input: &str) -> Result<Option<Self>, ReportError> {
        let filtered = sanitize(input);
        if filtered.is_empty() {
            return Ok(None);
        }
        if is_valid_code(&filtered) {
            Ok(Some(Self(filtered)))
        } else {
            Err(ReportError::InvalidFormat(filtered))
        }
    }

    /// 코드 문자열.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InstrumentCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InstrumentCode {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_code(&value) {
            Ok(Self(value))
        } else {
            Err(ReportError::InvalidFormat(value))
        }
    }
}

impl From<InstrumentCode> for String {
    fn from(code: InstrumentCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for InstrumentCode {
    type Err = ReportError;

    /// 빈 입력도 `InvalidFormat`으로 처리합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)?.ok_or_else(|| ReportError::InvalidFormat(String::new()))
    }
}

/// 전각 ASCII 문자를 반각으로 변환합니다.
///
/// 전각 공백(U+3000)은 일반 공백이 됩니다.
pub fn to_half_width(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            '\u{3000}' => ' ',
            _ => c,
        })
        .collect()
}

fn sanitize(input: &str) -> String {
    let upper = to_half_width(input).trim().to_ascii_uppercase();
    let without_suffix = upper.strip_suffix(MARKET_SUFFIX).unwrap_or(&upper);
    without_suffix
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        .collect()
}

fn is_valid_code(s: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&s.len())
        && s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(input: &str) -> String {
        InstrumentCode::normalize(input)
            .unwrap()
            .unwrap()
            .as_str()
            .to_string()
    }

    #[test]
    fn test_plain_codes() {
        assert_eq!(normalized("7203"), "7203");
        assert_eq!(normalized("285A"), "285A");
        assert_eq!(normalized("2768T"), "2768T");
    }

    #[test]
    fn test_full_width_and_case() {
        assert_eq!(normalized("７２０３"), "7203");
        assert_eq!(normalized("２８５ａ"), "285A");
        assert_eq!(normalized("\u{3000}6758\u{3000}"), "6758");
    }

    #[test]
    fn test_market_suffix_and_noise() {
        assert_eq!(normalized("7203.T"), "7203");
        assert_eq!(normalized("7203.t"), "7203");
        assert_eq!(normalized("72-03"), "7203");
        assert_eq!(normalized("7203．Ｔ"), "7203");
    }

    #[test]
    fn test_non_ascii_letters_are_stripped() {
        // 대문자 변환으로 ASCII 문자가 새로 생기면 안 됩니다.
        assert_eq!(normalized("72ß3"), "723");
        assert_eq!(normalized("ﬁ7203"), "7203");
        assert_eq!(normalized("7203ı"), "7203");
    }

    #[test]
    fn test_empty_is_idle() {
        assert_eq!(InstrumentCode::normalize("").unwrap(), None);
        assert_eq!(InstrumentCode::normalize("   ").unwrap(), None);
        assert_eq!(InstrumentCode::normalize("---").unwrap(), None);
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(
            InstrumentCode::normalize("72"),
            Err(ReportError::InvalidFormat("72".to_string()))
        );
        assert_eq!(
            InstrumentCode::normalize("１２３４５６"),
            Err(ReportError::InvalidFormat("123456".to_string()))
        );
    }

    #[test]
    fn test_from_str_and_serde() {
        let code: InstrumentCode = "9984".parse().unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"9984\"");
        let back: InstrumentCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);

        assert!("".parse::<InstrumentCode>().is_err());
        assert!(serde_json::from_str::<InstrumentCode>("\"toolong1\"").is_err());
    }
}

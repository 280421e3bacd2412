//! 종목 코드 정규화 속성 테스트.

use proptest::prelude::*;
use swing_core::types::{to_half_width, InstrumentCode};
use swing_core::ReportError;

fn to_full_width(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_graphic() {
                char::from_u32(c as u32 + 0xFEE0).unwrap()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn normalize_is_idempotent(input in "[0-9A-Z]{3,5}") {
        let first = InstrumentCode::normalize(&input).unwrap().unwrap();
        let second = InstrumentCode::normalize(first.as_str()).unwrap().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn full_width_digits_match_half_width(input in "[0-9]{3,5}") {
        let full = to_full_width(&input);
        let code = InstrumentCode::normalize(&full).unwrap().unwrap();
        prop_assert_eq!(code.as_str(), input.as_str());
    }

    #[test]
    fn lowercase_and_padding_are_ignored(input in "[0-9a-z]{3,5}", pad in " {0,3}") {
        let padded = format!("{pad}{input}{pad}");
        let code = InstrumentCode::normalize(&padded).unwrap().unwrap();
        prop_assert_eq!(code.as_str(), input.to_uppercase());
    }

    #[test]
    fn result_always_matches_charset(input in "\\PC{0,12}") {
        match InstrumentCode::normalize(&input) {
            Ok(Some(code)) => {
                prop_assert!((3..=5).contains(&code.as_str().len()));
                prop_assert!(code.as_str().chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
            }
            Ok(None) => {}
            Err(ReportError::InvalidFormat(filtered)) => {
                prop_assert!(!(3..=5).contains(&filtered.len()));
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    #[test]
    fn half_width_conversion_roundtrips_ascii(input in "[!-~]{0,16}") {
        prop_assert_eq!(to_half_width(&to_full_width(&input)), input);
    }
}

//! 지표별 정성 라벨.
//!
//! 결과 화면에서 수치 옆에 붙는 짧은 상태 표시입니다.

/// RSI(9) 상태.
///
/// - 70 이상: 買われすぎ
/// - 30 이하: 売られすぎ
/// - 그 외: 適正
pub fn rsi_status(rsi: f64) -> &'static str {
    if rsi >= 70.0 {
        "買われすぎ"
    } else if rsi <= 30.0 {
        "売られすぎ"
    } else {
        "適正"
    }
}

/// 볼린저 밴드 폭 상태.
pub fn bb_width_status(bb_width: f64) -> &'static str {
    if bb_width > 15.0 {
        "高ボラティリティ"
    } else if bb_width < 5.0 {
        "低ボラティリティ"
    } else {
        "適正"
    }
}

/// 익스팬션 확대율 상태.
pub fn expansion_rate_status(rate: f64) -> &'static str {
    if rate > 20.0 {
        "急拡大"
    } else if rate > 10.0 {
        "拡大中"
    } else {
        "安定"
    }
}

/// 현재가와 VWAP 비교.
pub fn vwap_trend(price: f64, vwap: f64) -> &'static str {
    if price > vwap {
        "上昇傾向"
    } else {
        "下降傾向"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_status_boundaries() {
        assert_eq!(rsi_status(70.0), "買われすぎ");
        assert_eq!(rsi_status(69.9), "適正");
        assert_eq!(rsi_status(30.0), "売られすぎ");
        assert_eq!(rsi_status(30.1), "適正");
    }

    #[test]
    fn test_bb_width_status_boundaries() {
        assert_eq!(bb_width_status(15.0), "適正");
        assert_eq!(bb_width_status(15.1), "高ボラティリティ");
        assert_eq!(bb_width_status(5.0), "適正");
        assert_eq!(bb_width_status(4.9), "低ボラティリティ");
    }

    #[test]
    fn test_expansion_rate_status() {
        assert_eq!(expansion_rate_status(25.0), "急拡大");
        assert_eq!(expansion_rate_status(20.0), "拡大中");
        assert_eq!(expansion_rate_status(10.0), "安定");
    }

    #[test]
    fn test_vwap_trend() {
        assert_eq!(vwap_trend(1500.0, 1490.0), "上昇傾向");
        assert_eq!(vwap_trend(1490.0, 1490.0), "下降傾向");
    }
}

//! 종합 스코어 계산기.
//!
//! 정규화된 종목 리포트의 다섯 지표를 각각 1~5 서브 스코어로 평가하고
//! 가중합을 0~100으로 잘라 종합 스코어를 산출합니다.
//!
//! # 5개 팩터
//!
//! 1. **상승력 (上昇力)**: ×3 - MA5/25/75 추세 정렬, 크로스 상태
//! 2. **매수 압력 (買い圧力)**: ×6 - 거래량 변화율
//! 3. **과열 리스크 (過熱リスク)**: ×-3 - RSI 극단도
//! 4. **기회 (値幅チャンス)**: ×6 - 5일 변동성 %
//! 5. **반락 리스크 (反落リスク)**: ×-2 - 신용배율
//!
//! 리스크 팩터는 감점 전용입니다. 입력이 없으면 서브 스코어 3(`データなし`)입니다.

use tracing::debug;

use swing_core::{
    CompositeBand, CrossState, Factor, InstrumentReport, ScoreCard, SubScore, Trend,
};

/// 입력이 없을 때의 서브 스코어.
pub const NEUTRAL_SUBSCORE: u8 = 3;

/// 입력이 없을 때의 코멘트.
pub const UNAVAILABLE_COMMENT: &str = "データなし";

/// 팩터 가중치. 감점 팩터는 양수로 저장하고 계산 시 차감합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeWeights {
    pub rising_power: i32,    // ×3
    pub buying_pressure: i32, // ×6
    pub exhaustion_risk: i32, // -3
    pub opportunity: i32,     // ×6
    pub rebound_risk: i32,    // -2
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            rising_power: 3,
            buying_pressure: 6,
            exhaustion_risk: 3,
            opportunity: 6,
            rebound_risk: 2,
        }
    }
}

impl CompositeWeights {
    fn weight(&self, factor: Factor) -> i32 {
        match factor {
            Factor::RisingPower => self.rising_power,
            Factor::BuyingPressure => self.buying_pressure,
            Factor::ExhaustionRisk => -self.exhaustion_risk,
            Factor::Opportunity => self.opportunity,
            Factor::ReboundRisk => -self.rebound_risk,
        }
    }
}

/// 상승력 평가 입력.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendInputs {
    pub ma5: Option<Trend>,
    pub ma25: Option<Trend>,
    pub ma75: Option<Trend>,
    pub ma_cross: Option<CrossState>,
    pub macd_cross: Option<CrossState>,
}

impl TrendInputs {
    fn from_report(report: &InstrumentReport) -> Self {
        Self {
            ma5: report.ma5_trend,
            ma25: report.ma25_trend,
            ma75: report.ma75_trend,
            ma_cross: report.ma_cross,
            macd_cross: report.macd_cross,
        }
    }

    fn is_empty(&self) -> bool {
        self.ma5.is_none()
            && self.ma25.is_none()
            && self.ma75.is_none()
            && self.ma_cross.is_none()
            && self.macd_cross.is_none()
    }
}

/// 종합 스코어 계산기.
#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    weights: CompositeWeights,
}

impl CompositeScorer {
    /// 기본 가중치로 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 가중치를 지정하여 생성합니다.
    pub fn with_weights(weights: CompositeWeights) -> Self {
        Self { weights }
    }

    /// 리포트를 평가합니다. I/O 없는 순수 함수입니다.
    pub fn score(&self, report: &InstrumentReport) -> ScoreCard {
        let subscores = vec![
            rising_power(&TrendInputs::from_report(report)),
            buying_pressure(report.volume_change_percent),
            exhaustion_risk(report.rsi),
            opportunity(report.volatility_percent),
            rebound_risk(report.credit_ratio),
        ];

        let raw: i32 = subscores
            .iter()
            .map(|s| i32::from(s.value) * self.weights.weight(s.factor))
            .sum();
        let composite = raw.clamp(0, 100) as u8;

        debug!(
            symbol = %report.symbol,
            raw,
            composite,
            "composite score calculated"
        );

        ScoreCard {
            subscores,
            composite,
            band: CompositeBand::from_score(composite),
        }
    }
}

/// 기본 가중치로 리포트를 평가합니다.
pub fn score_report(report: &InstrumentReport) -> ScoreCard {
    CompositeScorer::new().score(report)
}

fn sub(factor: Factor, value: u8, comment: &str) -> SubScore {
    SubScore {
        factor,
        value,
        comment: comment.to_string(),
    }
}

fn unavailable(factor: Factor) -> SubScore {
    sub(factor, NEUTRAL_SUBSCORE, UNAVAILABLE_COMMENT)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// 상승력. 위에서부터 처음 맞는 규칙이 적용됩니다.
pub fn rising_power(inputs: &TrendInputs) -> SubScore {
    use Trend::{Down, Flat, Up};

    let factor = Factor::RisingPower;
    if inputs.is_empty() {
        return unavailable(factor);
    }

    let (ma5, ma25, ma75) = (inputs.ma5, inputs.ma25, inputs.ma75);
    let dead = inputs.ma_cross == Some(CrossState::Dead)
        || inputs.macd_cross == Some(CrossState::Dead);

    if ma5 == Some(Up) && ma25 == Some(Up) && ma75 == Some(Up) {
        sub(factor, 5, "強い上昇トレンド")
    } else if ma5 == Some(Up) && ma25 == Some(Up) {
        sub(factor, 4, "上昇基調")
    } else if ma5 == Some(Up) && ma25 == Some(Flat) {
        sub(factor, 3, "短期上昇")
    } else if dead {
        sub(factor, 2, "デッドクロス発生")
    } else if ma5 == Some(Down) && ma25 == Some(Down) && ma75 == Some(Down) {
        sub(factor, 1, "下降トレンド")
    } else {
        sub(factor, 3, "方向感なし")
    }
}

/// 매수 압력 (거래량 변화율 %).
pub fn buying_pressure(volume_change_percent: Option<f64>) -> SubScore {
    let factor = Factor::BuyingPressure;
    let Some(v) = finite(volume_change_percent) else {
        return unavailable(factor);
    };

    if v > 50.0 {
        sub(factor, 5, "出来高急増")
    } else if v > 20.0 {
        sub(factor, 4, "出来高増加")
    } else if v > -10.0 {
        sub(factor, 3, "平常")
    } else if v > -30.0 {
        sub(factor, 2, "出来高減少")
    } else {
        sub(factor, 1, "出来高急減")
    }
}

/// 과열 리스크 (RSI).
pub fn exhaustion_risk(rsi: Option<f64>) -> SubScore {
    let factor = Factor::ExhaustionRisk;
    let Some(v) = finite(rsi) else {
        return unavailable(factor);
    };

    if v > 85.0 {
        sub(factor, 5, "極度の過熱")
    } else if v > 70.0 {
        sub(factor, 4, "過熱気味")
    } else if v > 30.0 {
        sub(factor, 3, "適正")
    } else if v > 20.0 {
        sub(factor, 2, "売られ気味")
    } else {
        sub(factor, 1, "売られすぎ")
    }
}

/// 기회 (5일 변동성 %).
pub fn opportunity(volatility_percent: Option<f64>) -> SubScore {
    let factor = Factor::Opportunity;
    let Some(v) = finite(volatility_percent) else {
        return unavailable(factor);
    };

    if v > 8.0 {
        sub(factor, 5, "値幅大")
    } else if v > 5.0 {
        sub(factor, 4, "値幅やや大")
    } else if v > 2.0 {
        sub(factor, 3, "標準")
    } else if v > 1.0 {
        sub(factor, 2, "値幅小")
    } else {
        sub(factor, 1, "値幅極小")
    }
}

/// 반락 리스크 (신용배율).
pub fn rebound_risk(credit_ratio: Option<f64>) -> SubScore {
    let factor = Factor::ReboundRisk;
    let Some(v) = finite(credit_ratio) else {
        return unavailable(factor);
    };

    if v < 1.0 {
        sub(factor, 1, "売り長")
    } else if v < 2.0 {
        sub(factor, 2, "需給良好")
    } else if v < 5.0 {
        sub(factor, 3, "標準")
    } else if v < 10.0 {
        sub(factor, 4, "買い残やや多")
    } else {
        sub(factor, 5, "買い残過多")
    }
}

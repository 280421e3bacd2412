//! 서브 스코어와 종합 스코어 모델.

use serde::{Deserialize, Serialize};

/// 종합 스코어 "유리" 기준.
pub const COMPOSITE_FAVORABLE_THRESHOLD: u8 = 70;
/// 종합 스코어 "중립" 기준.
pub const COMPOSITE_NEUTRAL_THRESHOLD: u8 = 50;

/// 서브 스코어 팩터. 선언 순서가 표시 순서입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// 상승력 (이동평균 추세 정렬)
    RisingPower,
    /// 매수 압력 (거래량 변화)
    BuyingPressure,
    /// 과열 리스크 (RSI)
    ExhaustionRisk,
    /// 기회 (5일 변동성)
    Opportunity,
    /// 반락 리스크 (신용배율)
    ReboundRisk,
}

impl Factor {
    /// 모든 팩터 (표시 순서).
    pub const ALL: [Factor; 5] = [
        Factor::RisingPower,
        Factor::BuyingPressure,
        Factor::ExhaustionRisk,
        Factor::Opportunity,
        Factor::ReboundRisk,
    ];

    /// 표시 이름.
    pub fn label(&self) -> &'static str {
        match self {
            Factor::RisingPower => "上昇力",
            Factor::BuyingPressure => "買い圧力",
            Factor::ExhaustionRisk => "過熱リスク",
            Factor::Opportunity => "値幅チャンス",
            Factor::ReboundRisk => "反落リスク",
        }
    }

    /// 종합 스코어에서 차감되는 리스크 팩터인지.
    pub fn is_penalty(&self) -> bool {
        matches!(self, Factor::ExhaustionRisk | Factor::ReboundRisk)
    }
}

/// 1~5 서브 스코어.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScore {
    pub factor: Factor,
    /// 1..=5
    pub value: u8,
    pub comment: String,
}

/// 종합 스코어 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeBand {
    /// 70 이상
    Favorable,
    /// 50~69
    Neutral,
    /// 50 미만
    Unfavorable,
}

impl CompositeBand {
    /// 점수에서 구간을 결정합니다.
    pub fn from_score(score: u8) -> Self {
        if score >= COMPOSITE_FAVORABLE_THRESHOLD {
            Self::Favorable
        } else if score >= COMPOSITE_NEUTRAL_THRESHOLD {
            Self::Neutral
        } else {
            Self::Unfavorable
        }
    }

    /// 표시 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Favorable => "好条件",
            Self::Neutral => "様子見",
            Self::Unfavorable => "見送り",
        }
    }
}

/// 점수 산출 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// [`Factor::ALL`] 순서의 서브 스코어 5개
    pub subscores: Vec<SubScore>,
    /// 0..=100
    pub composite: u8,
    pub band: CompositeBand,
}

impl ScoreCard {
    /// 특정 팩터의 서브 스코어.
    pub fn get(&self, factor: Factor) -> Option<&SubScore> {
        self.subscores.iter().find(|s| s.factor == factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(CompositeBand::from_score(100), CompositeBand::Favorable);
        assert_eq!(CompositeBand::from_score(70), CompositeBand::Favorable);
        assert_eq!(CompositeBand::from_score(69), CompositeBand::Neutral);
        assert_eq!(CompositeBand::from_score(50), CompositeBand::Neutral);
        assert_eq!(CompositeBand::from_score(49), CompositeBand::Unfavorable);
    }

    #[test]
    fn test_penalty_factors() {
        let penalties: Vec<_> = Factor::ALL.iter().filter(|f| f.is_penalty()).collect();
        assert_eq!(penalties, vec![&Factor::ExhaustionRisk, &Factor::ReboundRisk]);
    }
}

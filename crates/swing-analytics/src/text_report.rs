//! 텍스트 리포트 파서.
//!
//! 외부 엔진의 줄 단위 출력을 섹션 상태 머신으로 스캔합니다.
//!
//! # 상태
//!
//! `None → Trinity | Bandwalk | Expansion` 전이는 헤더 줄에서만 일어나며,
//! 헤더 줄 자체는 필드 매칭에 사용되지 않습니다. 섹션이 활성화되어 있는 동안
//! 각 줄에 해당 섹션의 모든 패턴을 시험합니다. `現在価格`, `BBバンド幅` 등
//! 여러 섹션에 공통인 라벨은 현재 활성 섹션에 귀속됩니다.
//!
//! # 에러 판정
//!
//! - 빈 출력: `EmptyOutput` (섹션 파싱 생략)
//! - 출력 어디든 `Error` 또는 `エラー` 포함: `FetchFailed`
//!   (부분 파싱 결과와 공존 가능)

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use swing_core::domain::{
    BandwalkMetrics, Detection, ExpansionMetrics, ParsedBundle, ScoreStatus, TrinityMetrics,
};
use swing_core::{InstrumentCode, ReportError};

/// 삼위일체 섹션 헤더.
pub const TRINITY_HEADER: &str = "三位一体モデル評価結果";
/// 밴드워크 섹션 헤더.
pub const BANDWALK_HEADER: &str = "バンドウォーク検出銘柄";
/// 익스팬션 섹션 헤더.
pub const EXPANSION_HEADER: &str = "エクスパンション検出銘柄";

/// 에러 표식 (대소문자 구분).
const ERROR_MARKERS: [&str; 2] = ["Error", "エラー"];

/// 파싱 중 활성 섹션.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Trinity,
    Bandwalk,
    Expansion,
}

impl Section {
    /// 헤더 줄이면 전이할 섹션을 반환합니다.
    fn from_header(line: &str) -> Option<Self> {
        if line.contains(TRINITY_HEADER) {
            Some(Section::Trinity)
        } else if line.contains(BANDWALK_HEADER) {
            Some(Section::Bandwalk)
        } else if line.contains(EXPANSION_HEADER) {
            Some(Section::Expansion)
        } else {
            None
        }
    }
}

/// 추출 대상 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Price,
    Score,
    Rsi9,
    Vwap,
    BbWidth,
    ProfitTarget,
    StopLoss,
    Bandwalk,
    Expansion,
    ExpansionRate,
}

impl Field {
    fn pattern(self) -> &'static Regex {
        match self {
            Field::Price => &PRICE,
            Field::Score => &SCORE,
            Field::Rsi9 => &RSI_9,
            Field::Vwap => &VWAP,
            Field::BbWidth => &BB_WIDTH,
            Field::ProfitTarget => &PROFIT_TARGET,
            Field::StopLoss => &STOP_LOSS,
            Field::Bandwalk => &BANDWALK,
            Field::Expansion => &EXPANSION,
            Field::ExpansionRate => &EXPANSION_RATE,
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static report pattern must compile")
}

static PRICE: Lazy<Regex> = Lazy::new(|| compile(r"現在価格: (\d+)円"));
static SCORE: Lazy<Regex> = Lazy::new(|| compile(r"スコア: (\d+)点"));
static RSI_9: Lazy<Regex> = Lazy::new(|| compile(r"RSI_9: ([\d.]+)"));
static VWAP: Lazy<Regex> = Lazy::new(|| compile(r"VWAP: (\d+)円"));
static BB_WIDTH: Lazy<Regex> = Lazy::new(|| compile(r"BBバンド幅: ([\d.]+)"));
static PROFIT_TARGET: Lazy<Regex> = Lazy::new(|| compile(r"利食い目標: (\d+)円"));
static STOP_LOSS: Lazy<Regex> = Lazy::new(|| compile(r"損切りライン: (\d+)円"));
static BANDWALK: Lazy<Regex> = Lazy::new(|| compile(r"バンドウォーク: (⭕ 発生中|❌ なし)"));
static EXPANSION: Lazy<Regex> = Lazy::new(|| compile(r"エクスパンション: (⭕ 発生中|❌ なし)"));
static EXPANSION_RATE: Lazy<Regex> = Lazy::new(|| compile(r"拡大率: ([\d.]+)%"));

const TRINITY_FIELDS: [Field; 7] = [
    Field::Price,
    Field::Score,
    Field::Rsi9,
    Field::Vwap,
    Field::BbWidth,
    Field::ProfitTarget,
    Field::StopLoss,
];

const BANDWALK_FIELDS: [Field; 5] = [
    Field::Price,
    Field::Bandwalk,
    Field::BbWidth,
    Field::ProfitTarget,
    Field::StopLoss,
];

const EXPANSION_FIELDS: [Field; 6] = [
    Field::Price,
    Field::Expansion,
    Field::BbWidth,
    Field::ExpansionRate,
    Field::ProfitTarget,
    Field::StopLoss,
];

/// 섹션별 누적 상태.
#[derive(Debug, Default)]
struct Accumulator {
    trinity: TrinityMetrics,
    bandwalk: BandwalkMetrics,
    expansion: ExpansionMetrics,
}

impl Accumulator {
    fn scan_line(&mut self, section: Section, line: &str) {
        let fields: &[Field] = match section {
            Section::None => return,
            Section::Trinity => &TRINITY_FIELDS,
            Section::Bandwalk => &BANDWALK_FIELDS,
            Section::Expansion => &EXPANSION_FIELDS,
        };

        for &field in fields {
            if let Some(caps) = field.pattern().captures(line) {
                if let Some(value) = caps.get(1) {
                    self.apply(section, field, value.as_str());
                }
            }
        }
    }

    fn apply(&mut self, section: Section, field: Field, raw: &str) {
        match (section, field) {
            (Section::Trinity, Field::Price) => set_number(&mut self.trinity.price, raw),
            (Section::Trinity, Field::Score) => {
                if let Ok(score) = raw.parse::<i64>() {
                    self.trinity.score = Some(score);
                    self.trinity.status = Some(ScoreStatus::from_score(score));
                }
            }
            (Section::Trinity, Field::Rsi9) => set_number(&mut self.trinity.rsi_9, raw),
            (Section::Trinity, Field::Vwap) => set_number(&mut self.trinity.vwap, raw),
            (Section::Trinity, Field::BbWidth) => set_number(&mut self.trinity.bb_width, raw),
            (Section::Trinity, Field::ProfitTarget) => {
                set_number(&mut self.trinity.profit_target, raw)
            }
            (Section::Trinity, Field::StopLoss) => set_number(&mut self.trinity.stop_loss, raw),

            (Section::Bandwalk, Field::Price) => set_number(&mut self.bandwalk.price, raw),
            (Section::Bandwalk, Field::Bandwalk) => {
                self.bandwalk.bandwalk = Some(Detection::from_marker(raw))
            }
            (Section::Bandwalk, Field::BbWidth) => set_number(&mut self.bandwalk.bb_width, raw),
            (Section::Bandwalk, Field::ProfitTarget) => {
                set_number(&mut self.bandwalk.profit_target, raw)
            }
            (Section::Bandwalk, Field::StopLoss) => set_number(&mut self.bandwalk.stop_loss, raw),

            (Section::Expansion, Field::Price) => set_number(&mut self.expansion.price, raw),
            (Section::Expansion, Field::Expansion) => {
                self.expansion.expansion = Some(Detection::from_marker(raw))
            }
            (Section::Expansion, Field::BbWidth) => {
                set_number(&mut self.expansion.bb_width, raw)
            }
            (Section::Expansion, Field::ExpansionRate) => {
                set_number(&mut self.expansion.expansion_rate, raw)
            }
            (Section::Expansion, Field::ProfitTarget) => {
                set_number(&mut self.expansion.profit_target, raw)
            }
            (Section::Expansion, Field::StopLoss) => {
                set_number(&mut self.expansion.stop_loss, raw)
            }

            _ => {}
        }
    }

    fn finish(self, mut bundle: ParsedBundle) -> ParsedBundle {
        bundle.trinity = Some(self.trinity).filter(|m| !m.is_empty());
        bundle.bandwalk = Some(self.bandwalk).filter(|m| !m.is_empty());
        bundle.expansion = Some(self.expansion).filter(|m| !m.is_empty());
        bundle
    }
}

/// 파싱할 수 없는 숫자(`"1.2.3"` 등)는 무시하고 기존 값을 유지합니다.
fn set_number(slot: &mut Option<f64>, raw: &str) {
    if let Ok(value) = raw.parse::<f64>() {
        if value.is_finite() {
            *slot = Some(value);
        }
    }
}

/// 출력에 에러 표식이 있는지 확인합니다.
///
/// 정상 데이터에 해당 문자열이 포함되어도 에러로 판정됩니다.
pub fn contains_error_marker(raw: &str) -> bool {
    ERROR_MARKERS.iter().any(|marker| raw.contains(marker))
}

/// 엔진의 텍스트 출력을 파싱합니다.
///
/// # 예제
///
/// ```
/// use swing_analytics::text_report::parse_text_report;
/// use swing_core::{InstrumentCode, ScoreStatus};
///
/// let code: InstrumentCode = "7203".parse().unwrap();
/// let raw = "=== 三位一体モデル評価結果 ===\n現在価格: 1500円\nスコア: 75点\n";
/// let bundle = parse_text_report(raw, &code);
///
/// let trinity = bundle.trinity.unwrap();
/// assert_eq!(trinity.price, Some(1500.0));
/// assert_eq!(trinity.status, Some(ScoreStatus::High));
/// assert!(bundle.error.is_none());
/// ```
pub fn parse_text_report(raw: &str, code: &InstrumentCode) -> ParsedBundle {
    let mut bundle = ParsedBundle::empty(code.clone());

    if raw.trim().is_empty() {
        bundle.error = Some(ReportError::EmptyOutput);
        return bundle;
    }

    let mut section = Section::None;
    let mut acc = Accumulator::default();

    for line in raw.lines() {
        let line = line.trim();

        if let Some(next) = Section::from_header(line) {
            section = next;
            continue;
        }

        acc.scan_line(section, line);
    }

    let mut bundle = acc.finish(bundle);

    if contains_error_marker(raw) {
        bundle.error = Some(ReportError::FetchFailed);
    }

    debug!(
        code = %code,
        trinity = bundle.trinity.is_some(),
        bandwalk = bundle.bandwalk.is_some(),
        expansion = bundle.expansion.is_some(),
        error = ?bundle.error,
        "Text report parsed"
    );

    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use swing_core::Detection;

    fn code() -> InstrumentCode {
        "7203".parse().unwrap()
    }

    const FULL_OUTPUT: &str = "\
銘柄 7203 の分析を開始します
==============================
【三位一体モデル評価結果】
  現在価格: 2850円
  スコア: 65点
  RSI_9: 58.32
  VWAP: 2810円
  BBバンド幅: 7.45
  利食い目標: 3050円
  損切りライン: 2700円

【バンドウォーク検出銘柄】
  現在価格: 2850円
  バンドウォーク: ⭕ 発生中
  BBバンド幅: 7.45
  利食い目標: 3000円
  損切りライン: 2750円

【エクスパンション検出銘柄】
  現在価格: 2850円
  エクスパンション: ❌ なし
  BBバンド幅: 7.45
  拡大率: 12.8%
  利食い目標: 3100円
  損切りライン: 2720円
";

    #[test]
    fn test_parse_full_output() {
        let bundle = parse_text_report(FULL_OUTPUT, &code());
        assert!(bundle.error.is_none());

        let trinity = bundle.trinity.unwrap();
        assert_eq!(trinity.price, Some(2850.0));
        assert_eq!(trinity.score, Some(65));
        assert_eq!(trinity.status, Some(ScoreStatus::Medium));
        assert_eq!(trinity.rsi_9, Some(58.32));
        assert_eq!(trinity.vwap, Some(2810.0));
        assert_eq!(trinity.bb_width, Some(7.45));
        assert_eq!(trinity.profit_target, Some(3050.0));
        assert_eq!(trinity.stop_loss, Some(2700.0));

        let bandwalk = bundle.bandwalk.unwrap();
        assert_eq!(bandwalk.bandwalk, Some(Detection::from_flag(true)));
        assert_eq!(bandwalk.profit_target, Some(3000.0));
        assert_eq!(bandwalk.stop_loss, Some(2750.0));

        let expansion = bundle.expansion.unwrap();
        assert_eq!(expansion.expansion, Some(Detection::from_flag(false)));
        assert_eq!(expansion.expansion_rate, Some(12.8));
        assert_eq!(expansion.profit_target, Some(3100.0));
    }

    #[test]
    fn test_shared_labels_follow_active_section() {
        let raw = "三位一体モデル評価結果\n現在価格: 100円\nエクスパンション検出銘柄\n現在価格: 200円\n";
        let bundle = parse_text_report(raw, &code());
        assert_eq!(bundle.trinity.unwrap().price, Some(100.0));
        assert_eq!(bundle.expansion.unwrap().price, Some(200.0));
        assert!(bundle.bandwalk.is_none());
    }

    #[test]
    fn test_lines_before_any_header_are_ignored() {
        let raw = "現在価格: 999円\nスコア: 90点\n三位一体モデル評価結果\nRSI_9: 40.0\n";
        let trinity = parse_text_report(raw, &code()).trinity.unwrap();
        assert_eq!(trinity.price, None);
        assert_eq!(trinity.score, None);
        assert_eq!(trinity.rsi_9, Some(40.0));
    }

    #[test]
    fn test_section_specific_labels_are_not_cross_attributed() {
        // 삼위일체 섹션에서는 拡大率 패턴을 시험하지 않음
        let raw = "三位一体モデル評価結果\n拡大率: 30.0%\nバンドウォーク: ⭕ 発生中\n";
        let bundle = parse_text_report(raw, &code());
        assert!(bundle.trinity.is_none());
        assert!(bundle.expansion.is_none());
        assert!(bundle.bandwalk.is_none());
    }

    #[test]
    fn test_header_line_only_switches_section() {
        let raw = "三位一体モデル評価結果 現在価格: 500円\n";
        assert!(parse_text_report(raw, &code()).trinity.is_none());
    }

    #[test]
    fn test_one_line_can_fill_several_fields() {
        let raw = "三位一体モデル評価結果\n現在価格: 1500円 / スコア: 82点 / VWAP: 1490円\n";
        let trinity = parse_text_report(raw, &code()).trinity.unwrap();
        assert_eq!(trinity.price, Some(1500.0));
        assert_eq!(trinity.score, Some(82));
        assert_eq!(trinity.status, Some(ScoreStatus::High));
        assert_eq!(trinity.vwap, Some(1490.0));
    }

    #[test]
    fn test_empty_output() {
        let bundle = parse_text_report("", &code());
        assert_eq!(bundle.error, Some(ReportError::EmptyOutput));
        assert!(!bundle.has_any_section());

        let bundle = parse_text_report("  \n\n", &code());
        assert_eq!(bundle.error, Some(ReportError::EmptyOutput));
    }

    #[test]
    fn test_error_marker_coexists_with_data() {
        let raw = format!("{}\nError: failed to fetch earnings calendar\n", FULL_OUTPUT);
        let bundle = parse_text_report(&raw, &code());
        assert_eq!(bundle.error, Some(ReportError::FetchFailed));
        assert!(bundle.trinity.is_some());
        assert!(bundle.bandwalk.is_some());
        assert!(bundle.expansion.is_some());
    }

    #[test]
    fn test_japanese_error_marker() {
        let bundle = parse_text_report("データ取得エラー: 7203.T\n", &code());
        assert_eq!(bundle.error, Some(ReportError::FetchFailed));
        assert!(!bundle.has_any_section());
    }

    #[test]
    fn test_error_marker_is_case_sensitive() {
        let bundle = parse_text_report("三位一体モデル評価結果\nerror rate: low\nスコア: 40点\n", &code());
        assert!(bundle.error.is_none());
        assert_eq!(bundle.trinity.unwrap().status, Some(ScoreStatus::Low));
    }

    #[test]
    fn test_unparseable_number_is_skipped() {
        let raw = "三位一体モデル評価結果\nRSI_9: 55.1\nRSI_9: 1.2.3\n";
        let trinity = parse_text_report(raw, &code()).trinity.unwrap();
        assert_eq!(trinity.rsi_9, Some(55.1));
    }

    #[test]
    fn test_later_match_overwrites_within_section() {
        let raw = "バンドウォーク検出銘柄\nバンドウォーク: ❌ なし\nバンドウォーク: ⭕ 発生中\n";
        let bandwalk = parse_text_report(raw, &code()).bandwalk.unwrap();
        assert_eq!(bandwalk.bandwalk, Some(Detection::from_flag(true)));
    }

    #[test]
    fn test_windows_line_endings() {
        let raw = "三位一体モデル評価結果\r\n現在価格: 1500円\r\nスコア: 75点\r\n";
        let trinity = parse_text_report(raw, &code()).trinity.unwrap();
        assert_eq!(trinity.price, Some(1500.0));
        assert_eq!(trinity.score, Some(75));
    }
}

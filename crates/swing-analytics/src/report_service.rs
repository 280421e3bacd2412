//! 요청 단위 리포트 흐름.
//!
//! 코드 정규화 → 엔진 1회 호출 → 파싱/정규화 → (종목 상세의 경우) 스코어링.
//! 재시도는 없으며 모든 실패는 [`ReportError`] 하나로 회수됩니다.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn, Instrument};

use swing_core::{
    AnalysisEngine, EngineMode, InstrumentCode, InstrumentReport, ParsedBundle, RawEngineOutput,
    ReportError, ScoreCard,
};

use crate::composite_scorer::CompositeScorer;
use crate::json_report::normalize_report;
use crate::text_report::parse_text_report;

/// 개별 분석(텍스트) 결과.
#[derive(Debug, Clone)]
pub enum IndividualOutcome {
    /// 코드 미입력 (초기 화면)
    Idle,
    /// 엔진 호출 전후 실패
    Failed(ReportError),
    /// 파싱 완료. 번들에 `FetchFailed`나 비정상 종료(`CollaboratorFailed`)가 함께 실려 있을 수 있습니다.
    Parsed(ParsedBundle),
}

/// 종목 상세(JSON) 리포트와 스코어.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyReport {
    pub report: InstrumentReport,
    pub score: ScoreCard,
}

/// 종목 상세 결과.
#[derive(Debug, Clone)]
pub enum CompanyOutcome {
    /// 코드 미입력 (초기 화면)
    Idle,
    /// 실패
    Failed(ReportError),
    /// 정규화와 스코어링 완료
    Ready(Box<CompanyReport>),
}

/// 리포트 서비스.
#[derive(Clone)]
pub struct ReportService {
    engine: Arc<dyn AnalysisEngine>,
    scorer: CompositeScorer,
}

impl ReportService {
    /// 새 서비스를 생성합니다.
    pub fn new(engine: Arc<dyn AnalysisEngine>) -> Self {
        Self {
            engine,
            scorer: CompositeScorer::new(),
        }
    }

    /// 스코어 계산기를 교체합니다.
    pub fn with_scorer(mut self, scorer: CompositeScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// 개별 분석 흐름.
    pub async fn individual(&self, input: &str) -> IndividualOutcome {
        let code = match InstrumentCode::normalize(input) {
            Ok(Some(code)) => code,
            Ok(None) => return IndividualOutcome::Idle,
            Err(e) => return IndividualOutcome::Failed(e),
        };

        let span = swing_core::report_span!("individual_report", code);
        async {
            let output = match self.engine.run(EngineMode::Individual, &code).await {
                Ok(output) => output,
                Err(e) => {
                    warn!(error = %e, detail = ?e.detail(), "analysis engine failed");
                    return IndividualOutcome::Failed(e);
                }
            };

            debug!(output = %output.text, "raw engine output");
            let mut bundle = parse_text_report(&output.text, &code);
            if !output.success() {
                // 섹션은 남기고 오류만 덮어씁니다.
                warn!(exit_code = ?output.exit_code, "engine exited with non-zero status");
                bundle.error = Some(ReportError::CollaboratorFailed {
                    exit_code: output.exit_code,
                    detail: output.text.trim().to_string(),
                });
            }
            IndividualOutcome::Parsed(bundle)
        }
        .instrument(span)
        .await
    }

    /// 종목 상세 흐름.
    pub async fn company(&self, input: &str) -> CompanyOutcome {
        let code = match InstrumentCode::normalize(input) {
            Ok(Some(code)) => code,
            Ok(None) => return CompanyOutcome::Idle,
            Err(e) => return CompanyOutcome::Failed(e),
        };

        let span = swing_core::report_span!("company_report", code);
        async {
            let result = self
                .engine
                .run(EngineMode::Company, &code)
                .await
                .and_then(|output| {
                    debug!(output = %output.text, "raw engine output");
                    decode_company_output(&output)
                });

            match result {
                Ok(doc) => {
                    let report = normalize_report(&doc, &code);
                    let score = self.scorer.score(&report);
                    info!(composite = score.composite, "company report ready");
                    CompanyOutcome::Ready(Box::new(CompanyReport { report, score }))
                }
                Err(e) => {
                    warn!(error = %e, detail = ?e.detail(), "company report failed");
                    CompanyOutcome::Failed(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// 종목 상세 엔진 출력을 JSON 문서로 해석합니다.
///
/// - 비정상 종료: `CollaboratorFailed` (출력 원문을 상세로)
/// - JSON 파싱 실패: `MalformedJson`
/// - 객체가 아님, 또는 `error` 키만 있는 객체: `FetchFailed`
pub fn decode_company_output(output: &RawEngineOutput) -> Result<Value, ReportError> {
    if !output.success() {
        return Err(ReportError::CollaboratorFailed {
            exit_code: output.exit_code,
            detail: output.text.trim().to_string(),
        });
    }

    let doc: Value = serde_json::from_str(output.text.trim())
        .map_err(|e| ReportError::MalformedJson(e.to_string()))?;

    match doc.as_object() {
        Some(map) if map.len() == 1 && map.contains_key("error") => Err(ReportError::FetchFailed),
        Some(_) => Ok(doc),
        None => Err(ReportError::FetchFailed),
    }
}

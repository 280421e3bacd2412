//! 리포트 해석 및 스코어링 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 텍스트 리포트 파서 (삼위일체/밴드워크/익스팬션 섹션)
//! - JSON 리포트 정규화 (두 세대의 필드 이름)
//! - 종합 스코어 계산 (5개 서브 스코어)
//! - 요청 단위 리포트 흐름 ([`ReportService`])
//! - 개별 분석/종목 상세/일별 결과 화면 모델
//!
//! # Re-exports
//!
//! - [`text_report`]: `parse_text_report`
//! - [`json_report`]: `normalize_report`, `NEWS_DISPLAY_LIMIT`
//! - [`composite_scorer`]: `CompositeScorer`, `score_report`

pub mod composite_scorer;
pub mod json_path;
pub mod json_report;
pub mod labels;
pub mod report_service;
pub mod report_view;
pub mod results_view;
pub mod text_report;

pub use composite_scorer::{score_report, CompositeScorer, CompositeWeights, TrendInputs};
pub use json_path::{first_present, lookup, Lookup, PathNode};
pub use json_report::{
    is_earnings_imminent, normalize_report, normalize_report_with_today, parse_report_date,
    NEWS_DISPLAY_LIMIT,
};
pub use labels::{bb_width_status, expansion_rate_status, rsi_status, vwap_trend};
pub use report_service::{
    decode_company_output, CompanyOutcome, CompanyReport, IndividualOutcome, ReportService,
};
pub use report_view::{
    CompanyDetailView, CompanyView, IndividualView, ScoreView, ViewStatus, IDLE_MESSAGE,
};
pub use results_view::{
    default_results_date, group_dates, BandwalkRowView, DailyResultsView, DayEntry,
    ExpansionRowView, MonthGroup, TrinityRowView, YearGroup,
};
pub use text_report::{contains_error_marker, parse_text_report};

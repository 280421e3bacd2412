//! 도메인 모델.

pub mod engine;
pub mod instrument;
pub mod results;
pub mod score;
pub mod sections;

pub use engine::{AnalysisEngine, EngineMode, RawEngineOutput};
pub use instrument::{CrossState, InstrumentReport, NewsItem, Trend};
pub use results::{BandwalkResultRow, ExpansionResultRow, TrinityResultRow};
pub use score::{
    CompositeBand, Factor, ScoreCard, SubScore, COMPOSITE_FAVORABLE_THRESHOLD,
    COMPOSITE_NEUTRAL_THRESHOLD,
};
pub use sections::{
    BandwalkMetrics, Detection, ExpansionMetrics, ParsedBundle, ScoreStatus, TrinityMetrics,
    SCORE_HIGH_THRESHOLD, SCORE_MEDIUM_THRESHOLD,
};

//! 분석 결과 저장소 (읽기 전용).

pub mod results;

pub use results::ResultsStore;

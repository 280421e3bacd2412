//! 공통 값 타입.

pub mod code;
pub mod date;

pub use code::{to_half_width, InstrumentCode, MAX_CODE_LEN, MIN_CODE_LEN};
pub use date::AnalysisDate;

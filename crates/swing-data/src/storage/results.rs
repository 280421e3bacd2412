//! 일별 분석 결과 조회.
//!
//! 분석 배치가 기록한 SQLite DB를 읽기 전용으로 엽니다. 이 계층은 쓰지 않습니다.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, instrument, warn};

use swing_core::{
    AnalysisDate, BandwalkResultRow, DatabaseConfig, ExpansionResultRow, SwingError, SwingResult,
    TrinityResultRow,
};

const SELECT_DATES: &str =
    "SELECT DISTINCT analysis_date FROM analysis_results ORDER BY analysis_date DESC";

const SELECT_TRINITY: &str = r#"
    SELECT r.analysis_date, r.code, c.name AS company_name,
           r.price, r.score, r.rsi_9, r.vwap, r.bb_width, r.profit_target, r.stop_loss
    FROM analysis_results r
    LEFT JOIN companies c ON r.code = c.code
    WHERE r.analysis_date = ?
    ORDER BY r.score DESC, r.code
"#;

const SELECT_BANDWALK: &str = r#"
    SELECT r.analysis_date, r.code, c.name AS company_name,
           r.is_bandwalk, r.price, r.bb_width, r.profit_target, r.stop_loss
    FROM bandwalk_results r
    LEFT JOIN companies c ON r.code = c.code
    WHERE r.analysis_date = ?
    ORDER BY r.code
"#;

const SELECT_EXPANSION: &str = r#"
    SELECT r.analysis_date, r.code, c.name AS company_name,
           r.is_expansion, r.price, r.bb_width, r.expansion_rate, r.profit_target, r.stop_loss
    FROM expansion_results r
    LEFT JOIN companies c ON r.code = c.code
    WHERE r.analysis_date = ?
    ORDER BY r.code
"#;

/// 분석 결과 저장소.
#[derive(Debug, Clone)]
pub struct ResultsStore {
    pool: SqlitePool,
}

impl ResultsStore {
    /// DB 파일을 읽기 전용으로 엽니다. 파일이 없으면 실패합니다.
    pub async fn connect(config: &DatabaseConfig) -> SwingResult<Self> {
        info!(path = %config.path, "Opening analysis results database");

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| SwingError::Database(format!("{}: {}", config.path, e)))?;

        Ok(Self { pool })
    }

    /// 기존 연결 풀에서 생성합니다.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 내부 연결 풀.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 연결 상태를 확인합니다.
    pub async fn health_check(&self) -> SwingResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// 분석 일자 목록 (최신순).
    ///
    /// 형식이 잘못된 날짜 값은 건너뜁니다.
    #[instrument(skip(self))]
    pub async fn list_analysis_dates(&self) -> SwingResult<Vec<AnalysisDate>> {
        let raw = sqlx::query_scalar::<_, String>(SELECT_DATES)
            .fetch_all(&self.pool)
            .await?;

        let dates: Vec<AnalysisDate> = raw
            .iter()
            .filter_map(|value| match AnalysisDate::parse(value) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!(value = %value, error = %e, "Skipping malformed analysis_date");
                    None
                }
            })
            .collect();

        debug!(count = dates.len(), "Analysis dates loaded");
        Ok(dates)
    }

    /// 삼위일체 결과 (스코어 내림차순).
    #[instrument(skip_all, fields(date = %date))]
    pub async fn trinity_results(&self, date: &AnalysisDate) -> SwingResult<Vec<TrinityResultRow>> {
        let rows = sqlx::query_as::<_, TrinityResultRow>(SELECT_TRINITY)
            .bind(date.to_iso())
            .fetch_all(&self.pool)
            .await?;
        debug!(count = rows.len(), "Trinity results loaded");
        Ok(rows)
    }

    /// 밴드워크 결과 (코드순).
    #[instrument(skip_all, fields(date = %date))]
    pub async fn bandwalk_results(
        &self,
        date: &AnalysisDate,
    ) -> SwingResult<Vec<BandwalkResultRow>> {
        let rows = sqlx::query_as::<_, BandwalkResultRow>(SELECT_BANDWALK)
            .bind(date.to_iso())
            .fetch_all(&self.pool)
            .await?;
        debug!(count = rows.len(), "Bandwalk results loaded");
        Ok(rows)
    }

    /// 익스팬션 결과 (코드순).
    #[instrument(skip_all, fields(date = %date))]
    pub async fn expansion_results(
        &self,
        date: &AnalysisDate,
    ) -> SwingResult<Vec<ExpansionResultRow>> {
        let rows = sqlx::query_as::<_, ExpansionResultRow>(SELECT_EXPANSION)
            .bind(date.to_iso())
            .fetch_all(&self.pool)
            .await?;
        debug!(count = rows.len(), "Expansion results loaded");
        Ok(rows)
    }
}

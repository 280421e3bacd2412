//! 외부 분석 엔진 프로세스 실행.
//!
//! `program args... <code>` 형태로 한 번 실행하고 stdout, stderr를 순서대로 이어
//! 붙여 반환합니다. 실행 시간은 `EngineConfig::timeout_secs`로 제한되며, 초과하면
//! 프로세스를 종료합니다.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info};

use swing_core::{
    AnalysisEngine, EngineConfig, EngineMode, InstrumentCode, RawEngineOutput, ReportError,
};

/// 엔진 실행 오류.
#[derive(Debug, Error)]
pub enum EngineError {
    /// 프로세스 시작 실패
    #[error("Failed to spawn analysis engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// 시간 초과
    #[error("Analysis engine timed out after {0:?}")]
    Timeout(Duration),
}

impl From<EngineError> for ReportError {
    fn from(err: EngineError) -> Self {
        ReportError::CollaboratorFailed {
            exit_code: None,
            detail: err.to_string(),
        }
    }
}

/// 서브프로세스 기반 분석 엔진.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    config: EngineConfig,
}

impl ProcessEngine {
    /// 설정에서 엔진을 생성합니다.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 엔진 설정.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn args_for(&self, mode: EngineMode) -> &[String] {
        match mode {
            EngineMode::Individual => &self.config.individual_args,
            EngineMode::Company => &self.config.company_args,
        }
    }

    /// 엔진을 실행하고 원시 출력을 반환합니다.
    pub async fn execute(
        &self,
        mode: EngineMode,
        code: &InstrumentCode,
    ) -> Result<RawEngineOutput, EngineError> {
        let mut command = Command::new(&self.config.program);
        command
            .args(self.args_for(mode))
            .arg(code.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        debug!(program = %self.config.program, %mode, %code, "Spawning analysis engine");

        let timeout = self.config.timeout();
        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(result) => result.map_err(|source| EngineError::Spawn {
                program: self.config.program.clone(),
                source,
            })?,
            Err(_) => {
                error!(%mode, %code, ?timeout, "Analysis engine timed out");
                return Err(EngineError::Timeout(timeout));
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        let raw = RawEngineOutput::new(text, output.status.code());
        info!(
            %mode,
            %code,
            exit_code = ?raw.exit_code,
            bytes = raw.text.len(),
            "Analysis engine finished"
        );

        Ok(raw)
    }
}

#[async_trait]
impl AnalysisEngine for ProcessEngine {
    async fn run(
        &self,
        mode: EngineMode,
        code: &InstrumentCode,
    ) -> Result<RawEngineOutput, ReportError> {
        self.execute(mode, code).await.map_err(ReportError::from)
    }
}

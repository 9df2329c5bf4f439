//! 报告生成 - 将组装好的上下文交给文本生成后端

use thiserror::Error;

use crate::generator::prompt::PromptDocument;
use crate::llm::TextBackend;

/// 固定的系统指令
pub const SYSTEM_INSTRUCTION: &str = "Generate comprehensive workflow analysis report:";

/// 后端调用失败，调用方保留之前的报告
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Generation failed: {message}")]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub struct ReportGenerator<'a> {
    backend: &'a dyn TextBackend,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(backend: &'a dyn TextBackend) -> Self {
        Self { backend }
    }

    /// 生成报告正文，任何后端错误都转换为 `GenerationError`
    pub async fn generate(&self, prompt: &PromptDocument) -> Result<String, GenerationError> {
        match self.backend.complete(SYSTEM_INSTRUCTION, &prompt.content).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!("model returned an empty report");
                Err(GenerationError::new("model returned an empty response"))
            }
            Ok(text) => {
                tracing::info!(characters = text.chars().count(), "report generated");
                Ok(text)
            }
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "report generation failed");
                Err(GenerationError::new(format!("{:#}", e)))
            }
        }
    }
}
